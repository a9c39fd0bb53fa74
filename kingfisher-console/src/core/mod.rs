//! Core services for the Kingfisher console
//!
//! Contains the building blocks behind the directory screen:
//! - LocalStore: file-backed key-value store (persistent storage analog)
//! - SessionStore: bearer credential accessor
//! - DirectoryRepository: cached directory listing and mutations
//! - SidebarSync: cross-view preference reconciliation

pub mod directory;
pub mod local_store;
pub mod session;
pub mod sidebar_sync;

pub use directory::DirectoryRepository;
pub use local_store::{LocalStore, StoreError};
pub use session::{AUTH_TOKEN_KEY, SessionStore};
pub use sidebar_sync::{DEFAULT_POLL_INTERVAL, SIDEBAR_COLLAPSED_KEY, SidebarSync};
