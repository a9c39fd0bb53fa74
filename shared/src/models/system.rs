//! Target system model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subsystem an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum System {
    /// Inventory management
    Ims,
    /// Point of sale
    Pos,
    /// Order operations
    Oos,
    /// Authentication service
    Auth,
}

/// Unknown system string in a remote payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown system: {0}")]
pub struct UnknownSystem(pub String);

impl System {
    /// All systems, in the order the selection UI lists them
    pub const ALL: [System; 4] = [System::Ims, System::Pos, System::Oos, System::Auth];

    /// Wire string used by the directory service
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Ims => "IMS",
            System::Pos => "POS",
            System::Oos => "OOS",
            System::Auth => "AUTH",
        }
    }
}

impl FromStr for System {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMS" => Ok(System::Ims),
            "POS" => Ok(System::Pos),
            "OOS" => Ok(System::Oos),
            "AUTH" => Ok(System::Auth),
            other => Err(UnknownSystem(other.to_string())),
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
