//! Kingfisher Client - HTTP client for the user-directory service
//!
//! Provides typed, bearer-authenticated calls to the remote directory
//! API: list, create, update and disable operations over employee
//! accounts.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{DirectoryError, DirectoryResult};
pub use http::{DirectoryApi, HttpDirectoryApi};
