//! Shared types for the Kingfisher admin console
//!
//! Data models exchanged between the directory client and the console
//! core: employee records, role/system enumerations, and the mutation
//! payloads submitted by the account forms.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
