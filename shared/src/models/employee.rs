//! Employee model
//!
//! The normalized directory record plus the raw wire shape returned by
//! the user-directory service and the create/update payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::role::{Role, UnknownRole};
use super::system::{System, UnknownSystem};

/// Sentinel rendered for absent phone numbers and systems
pub const NOT_AVAILABLE: &str = "N/A";

/// Account status, derived from the remote `isDisabled` flag.
///
/// The directory never deletes a record; archiving flips this to
/// `Inactive` and the record stays listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn from_disabled(disabled: bool) -> Self {
        if disabled {
            EmployeeStatus::Inactive
        } else {
            EmployeeStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EmployeeStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

/// Normalized employee record (repository-owned)
///
/// `id` and `username` are unique across the cache and immutable for the
/// record's lifetime. `full_name` is derived server-side from the name
/// parts; the parts are kept so the edit form can prefill its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub system: Option<System>,
    pub status: EmployeeStatus,
    pub created_at: Option<NaiveDateTime>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Phone number as displayed, `"N/A"` when absent
    pub fn display_phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// System as displayed, `"N/A"` when unset
    pub fn display_system(&self) -> &str {
        self.system.map(|s| s.as_str()).unwrap_or(NOT_AVAILABLE)
    }
}

/// Raw record as returned by `GET /users/list-users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub full_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    pub username: String,
    pub email: String,
    pub user_role: String,
    #[serde(default)]
    pub system: Option<String>,
    pub is_disabled: bool,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// A remote record that cannot be normalized
///
/// Role and system are closed enumerations; a payload carrying anything
/// else is malformed, not a new variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Role(#[from] UnknownRole),
    #[error(transparent)]
    System(#[from] UnknownSystem),
}

/// Drop blank strings and the `"N/A"` sentinel down to `None`
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && v != NOT_AVAILABLE)
}

impl TryFrom<RemoteUser> for Employee {
    type Error = NormalizeError;

    fn try_from(user: RemoteUser) -> Result<Self, Self::Error> {
        let role: Role = user.user_role.parse()?;
        let system = match non_blank(user.system) {
            Some(raw) => Some(raw.parse::<System>()?),
            None => None,
        };

        Ok(Employee {
            id: user.user_id,
            full_name: user.full_name,
            first_name: user.first_name.unwrap_or_default(),
            middle_name: non_blank(user.middle_name),
            last_name: user.last_name.unwrap_or_default(),
            suffix: non_blank(user.suffix),
            username: user.username,
            email: user.email,
            phone: non_blank(user.phone_number),
            role,
            system,
            status: EmployeeStatus::from_disabled(user.is_disabled),
            created_at: user.created_at,
        })
    }
}

/// Create employee payload
///
/// `middle_name`, `suffix` and `phone` are transmitted even when empty;
/// `pin` only accompanies a POS manager account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub suffix: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub system: System,
    pub pin: Option<String>,
}

/// Update employee payload
///
/// `username` is immutable and therefore absent. `password` and `pin`
/// are `None` to leave the stored credential unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub suffix: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub system: System,
    pub password: Option<String>,
    pub pin: Option<String>,
}
