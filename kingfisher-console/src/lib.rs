//! Kingfisher Console - employee directory management core
//!
//! Client-side state machine behind the admin console's directory
//! screen: session access, the cached directory repository, the
//! conditional account forms, the filtered table view and the sidebar
//! preference sync.

pub mod console;
pub mod core;
pub mod form;
pub mod logging;
pub mod view;

pub use console::{Console, ConsoleConfig};
pub use core::{DirectoryRepository, LocalStore, SessionStore, SidebarSync};
pub use form::{EmployeeForm, FormField, FormMode, FormPhase, FormValues, SubmitOutcome};
pub use view::{DirectoryFilter, DirectoryView};

// Re-export the client and shared crates
pub use kingfisher_client;
pub use shared;
