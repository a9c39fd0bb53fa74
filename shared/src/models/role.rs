//! Account role model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role, shared by every subsystem.
///
/// The set is closed; the directory service rejects anything else.
/// Wire strings are lowercase, and `super admin` contains a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
    Rider,
    Cashier,
    User,
    #[serde(rename = "super admin")]
    SuperAdmin,
}

/// Unknown role string in a remote payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// All roles, in the order the selection UI lists them
    pub const ALL: [Role; 7] = [
        Role::Manager,
        Role::Admin,
        Role::Staff,
        Role::Rider,
        Role::Cashier,
        Role::User,
        Role::SuperAdmin,
    ];

    /// Wire string used by the directory service
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Rider => "rider",
            Role::Cashier => "cashier",
            Role::User => "user",
            Role::SuperAdmin => "super admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            "rider" => Ok(Role::Rider),
            "cashier" => Ok(Role::Cashier),
            "user" => Ok(Role::User),
            "super admin" => Ok(Role::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
