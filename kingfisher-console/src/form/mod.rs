//! Conditional form engine
//!
//! One engine drives both the add and the edit modals. The field set is
//! fixed; which fields are required is derived per snapshot (a 4-digit
//! operational PIN only matters for a POS manager). Submission builds
//! the payload, hands it to the repository and keeps the entered data
//! intact when the service rejects it.

pub mod rules;

use serde::Serialize;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, Role, System};

use crate::core::DirectoryRepository;
use rules::{RuleCtx, validate};

pub use rules::{FieldError, FormField, MIN_PASSWORD_LEN, RuleKind};

/// Which flow the form is serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Target record plus the immutable username shown read-only
    Edit { id: i64, username: String },
}

/// Form lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormPhase {
    Closed,
    Open,
    Submitting,
}

/// Raw field state as typed by the operator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub suffix: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: Option<Role>,
    pub system: Option<System>,
    pub password: String,
    pub confirm_password: String,
    pub pin: String,
}

impl FormValues {
    /// Prefill from an existing record; credentials always open blank
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            middle_name: employee.middle_name.clone().unwrap_or_default(),
            last_name: employee.last_name.clone(),
            suffix: employee.suffix.clone().unwrap_or_default(),
            username: employee.username.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone().unwrap_or_default(),
            role: Some(employee.role),
            system: employee.system,
            password: String::new(),
            confirm_password: String::new(),
            pin: String::new(),
        }
    }

    /// The PIN field participates only for this combination; outside it
    /// the field is inert regardless of its contents.
    pub fn pin_required(&self) -> bool {
        self.role == Some(Role::Manager) && self.system == Some(System::Pos)
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    /// Field errors recorded; the form stays open
    Invalid,
    /// Mutation accepted; the form reset to closed
    Saved,
    /// Repository error surfaced; the form stays open, data intact
    Failed,
}

/// Shared state machine behind the add and edit employee modals
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    mode: FormMode,
    phase: FormPhase,
    values: FormValues,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Closed,
            values: FormValues::default(),
            errors: Vec::new(),
            submit_error: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Message from the last rejected submission, shown verbatim
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Whether the PIN field is visible/required for the current snapshot
    pub fn pin_required(&self) -> bool {
        self.values.pin_required()
    }

    /// Open the add flow with a blank slate
    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.values = FormValues::default();
        self.reset_feedback();
        self.phase = FormPhase::Open;
    }

    /// Open the edit flow pre-seeded from the target record
    pub fn open_edit(&mut self, employee: &Employee) {
        self.mode = FormMode::Edit {
            id: employee.id,
            username: employee.username.clone(),
        };
        self.values = FormValues::from_employee(employee);
        self.reset_feedback();
        self.phase = FormPhase::Open;
    }

    /// Close and discard edits
    pub fn cancel(&mut self) {
        self.reset_closed();
    }

    /// Update a text-backed field. Role and system go through their
    /// typed setters.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) {
        if self.phase != FormPhase::Open {
            return;
        }
        let value = value.into();
        match field {
            FormField::FirstName => self.values.first_name = value,
            FormField::MiddleName => self.values.middle_name = value,
            FormField::LastName => self.values.last_name = value,
            FormField::Suffix => self.values.suffix = value,
            FormField::Username => self.values.username = value,
            FormField::Email => self.values.email = value,
            FormField::Phone => self.values.phone = value,
            FormField::Password => self.values.password = value,
            FormField::ConfirmPassword => self.values.confirm_password = value,
            FormField::Pin => self.values.pin = value,
            FormField::Role | FormField::System => {}
        }
    }

    pub fn set_role(&mut self, role: Option<Role>) {
        if self.phase == FormPhase::Open {
            self.values.role = role;
        }
    }

    pub fn set_system(&mut self, system: Option<System>) {
        if self.phase == FormPhase::Open {
            self.values.system = system;
        }
    }

    /// Run the rules and record field errors. Returns whether the
    /// snapshot is submittable.
    pub fn validate(&mut self) -> bool {
        let ctx = RuleCtx {
            values: &self.values,
            create: self.mode == FormMode::Create,
        };
        self.errors = validate(&ctx);
        self.errors.is_empty()
    }

    /// Validate, then hand the payload to the repository.
    ///
    /// On rejection the form stays open with the entered data and the
    /// verbatim remote message; nothing is lost on a failed submit.
    pub async fn submit(&mut self, repo: &DirectoryRepository) -> SubmitOutcome {
        if self.phase != FormPhase::Open {
            return SubmitOutcome::Invalid;
        }
        self.submit_error = None;
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        let request = match &self.mode {
            FormMode::Create => self.create_payload().map(PayloadKind::Create),
            FormMode::Edit { id, .. } => {
                let id = *id;
                self.update_payload().map(|p| PayloadKind::Update(id, p))
            }
        };
        let Some(request) = request else {
            return SubmitOutcome::Invalid;
        };

        self.phase = FormPhase::Submitting;
        let result = match request {
            PayloadKind::Create(payload) => repo.create(payload).await,
            PayloadKind::Update(id, payload) => repo.update(id, payload).await,
        };

        match result {
            Ok(()) => {
                self.reset_closed();
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::warn!(error = %e, "Employee form submission failed");
                self.phase = FormPhase::Open;
                self.submit_error = Some(e.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    fn create_payload(&self) -> Option<EmployeeCreate> {
        let role = self.values.role?;
        let system = self.values.system?;
        Some(EmployeeCreate {
            first_name: self.values.first_name.clone(),
            middle_name: self.values.middle_name.clone(),
            last_name: self.values.last_name.clone(),
            suffix: self.values.suffix.clone(),
            username: self.values.username.clone(),
            password: self.values.password.clone(),
            email: self.values.email.clone(),
            phone: self.values.phone.clone(),
            role,
            system,
            pin: self
                .values
                .pin_required()
                .then(|| self.values.pin.clone()),
        })
    }

    fn update_payload(&self) -> Option<EmployeeUpdate> {
        let role = self.values.role?;
        let system = self.values.system?;
        Some(EmployeeUpdate {
            first_name: self.values.first_name.clone(),
            middle_name: self.values.middle_name.clone(),
            last_name: self.values.last_name.clone(),
            suffix: self.values.suffix.clone(),
            email: self.values.email.clone(),
            phone: self.values.phone.clone(),
            role,
            system,
            // blank means "leave unchanged" and is omitted from the payload
            password: (!self.values.password.is_empty()).then(|| self.values.password.clone()),
            pin: (self.values.pin_required() && !self.values.pin.is_empty())
                .then(|| self.values.pin.clone()),
        })
    }

    fn reset_feedback(&mut self) {
        self.errors.clear();
        self.submit_error = None;
    }

    fn reset_closed(&mut self) {
        self.mode = FormMode::Create;
        self.values = FormValues::default();
        self.reset_feedback();
        self.phase = FormPhase::Closed;
    }
}

enum PayloadKind {
    Create(EmployeeCreate),
    Update(i64, EmployeeUpdate),
}
