//! Client configuration.

use std::time::Duration;

/// Default recognition endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/draw";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::RecognitionClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the recognition endpoint.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for the given endpoint with default timeout and agent.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Replace the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("inkboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
