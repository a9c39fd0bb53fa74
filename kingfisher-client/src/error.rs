//! Client error types

use thiserror::Error;

/// Directory client error type
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No bearer credential available for the call
    #[error("authentication required")]
    Unauthorized,

    /// Non-2xx response outside the validation path
    #[error("request failed with status {status}")]
    Fetch { status: u16 },

    /// Payload was not valid JSON or not a list of user records
    #[error("malformed response: {0}")]
    Decode(String),

    /// Remote-side rejection of a create/update, message taken from the
    /// response body's `detail` field
    #[error("{detail}")]
    Rejected { detail: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DirectoryError {
    /// Message shown to the operator.
    ///
    /// Rejections carry the remote message verbatim; decode failures are
    /// presented like fetch failures (the distinction is only logged).
    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::Unauthorized => "Authentication error.".to_string(),
            DirectoryError::Rejected { detail } => detail.clone(),
            DirectoryError::Fetch { status } => {
                format!("Failed to fetch data: {status}")
            }
            DirectoryError::Decode(_) | DirectoryError::Http(_) => {
                "The directory service returned an unexpected response.".to_string()
            }
        }
    }
}

/// Result type for directory client operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;
