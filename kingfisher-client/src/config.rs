//! Client configuration

use std::time::Duration;

use crate::error::DirectoryResult;
use crate::http::HttpDirectoryApi;

/// Configuration for connecting to the user-directory service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://127.0.0.1:4000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP transport from this configuration
    pub fn build(&self) -> DirectoryResult<HttpDirectoryApi> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()?;
        Ok(HttpDirectoryApi::new(client, self.base_url.clone()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:4000")
    }
}
