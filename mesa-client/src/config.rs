//! Client configuration

use crate::{ClientResult, HttpClient, MesaClient};

/// Address the reservation service listens on unless told otherwise
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client configuration for connecting to the reservation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://127.0.0.1:5000")
    pub base_url: String,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a new client configuration without a timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Opt into a request timeout; zero keeps the default of waiting indefinitely
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = (seconds > 0).then_some(seconds);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }

    /// Create the typed API client from this configuration
    pub fn build(&self) -> ClientResult<MesaClient> {
        Ok(MesaClient::new(self.build_http_client()?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
