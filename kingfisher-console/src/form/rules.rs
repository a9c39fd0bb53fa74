//! Validation rules
//!
//! Each rule is a predicate+message pair evaluated against the current
//! form snapshot. Failures are collected, not short-circuited; the one
//! exception is the confirmation check, which only activates once the
//! length rule has passed.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::FormValues;

/// Minimum password length enforced on create and on a typed-in change
pub const MIN_PASSWORD_LEN: usize = 12;

static PIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Form field identifiers, used for field-level error indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormField {
    FirstName,
    MiddleName,
    LastName,
    Suffix,
    Username,
    Email,
    Phone,
    Role,
    System,
    Password,
    ConfirmPassword,
    Pin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleKind {
    Required,
    PasswordTooShort,
    PasswordMismatch,
    PinInvalid,
}

/// Local validation failure, rendered next to its field.
///
/// Never crosses the form-engine boundary into the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: FormField,
    pub kind: RuleKind,
    pub message: &'static str,
}

/// What the rules see: the raw values plus which flow is running
pub(crate) struct RuleCtx<'a> {
    pub values: &'a FormValues,
    pub create: bool,
}

type RuleFn = fn(&RuleCtx) -> bool;

struct Rule {
    field: FormField,
    kind: RuleKind,
    message: &'static str,
    /// Whether the rule participates for this snapshot
    applies: RuleFn,
    /// Whether the snapshot satisfies the rule
    passes: RuleFn,
}

fn password_active(ctx: &RuleCtx) -> bool {
    ctx.create || !ctx.values.password.is_empty()
}

fn password_long_enough(ctx: &RuleCtx) -> bool {
    ctx.values.password.chars().count() >= MIN_PASSWORD_LEN
}

fn pin_is_four_digits(ctx: &RuleCtx) -> bool {
    PIN_PATTERN.is_match(&ctx.values.pin)
}

static RULES: &[Rule] = &[
    Rule {
        field: FormField::Password,
        kind: RuleKind::PasswordTooShort,
        message: "Password must be at least 12 characters.",
        applies: password_active,
        passes: password_long_enough,
    },
    Rule {
        field: FormField::ConfirmPassword,
        kind: RuleKind::PasswordMismatch,
        message: "Passwords do not match!",
        applies: |ctx| password_active(ctx) && password_long_enough(ctx),
        passes: |ctx| ctx.values.password == ctx.values.confirm_password,
    },
    Rule {
        field: FormField::Pin,
        kind: RuleKind::PinInvalid,
        message: "A 4-digit PIN is required for POS Managers.",
        applies: |ctx| ctx.create && ctx.values.pin_required(),
        passes: pin_is_four_digits,
    },
    Rule {
        field: FormField::Pin,
        kind: RuleKind::PinInvalid,
        message: "New PIN must be 4 digits.",
        applies: |ctx| !ctx.create && ctx.values.pin_required() && !ctx.values.pin.is_empty(),
        passes: pin_is_four_digits,
    },
    Rule {
        field: FormField::FirstName,
        kind: RuleKind::Required,
        message: "First name is required.",
        applies: |_| true,
        passes: |ctx| !ctx.values.first_name.trim().is_empty(),
    },
    Rule {
        field: FormField::LastName,
        kind: RuleKind::Required,
        message: "Last name is required.",
        applies: |_| true,
        passes: |ctx| !ctx.values.last_name.trim().is_empty(),
    },
    Rule {
        field: FormField::Username,
        kind: RuleKind::Required,
        message: "Username is required.",
        // immutable on edit, so only the create flow enforces it
        applies: |ctx| ctx.create,
        passes: |ctx| !ctx.values.username.trim().is_empty(),
    },
    Rule {
        field: FormField::Email,
        kind: RuleKind::Required,
        message: "Email is required.",
        applies: |_| true,
        passes: |ctx| !ctx.values.email.trim().is_empty(),
    },
    Rule {
        field: FormField::Role,
        kind: RuleKind::Required,
        message: "Role is required.",
        applies: |_| true,
        passes: |ctx| ctx.values.role.is_some(),
    },
    Rule {
        field: FormField::System,
        kind: RuleKind::Required,
        message: "System is required.",
        applies: |_| true,
        passes: |ctx| ctx.values.system.is_some(),
    },
];

/// Evaluate every active rule against the snapshot
pub(crate) fn validate(ctx: &RuleCtx) -> Vec<FieldError> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(ctx) && !(rule.passes)(ctx))
        .map(|rule| FieldError {
            field: rule.field,
            kind: rule.kind,
            message: rule.message,
        })
        .collect()
}
