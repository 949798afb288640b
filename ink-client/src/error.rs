//! Submit pipeline errors.

use ink_core::CanvasError;
use thiserror::Error;

/// Result type for submit operations.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Errors that can occur when submitting to the recognition endpoint.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The endpoint URL is invalid.
    #[error("invalid recognition endpoint URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request failed in transport, the endpoint returned an error
    /// status, or the response could not be understood.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// Another submission is still outstanding.
    #[error("a submission is already in flight")]
    InFlight,

    /// The payload could not be captured from the surface.
    #[error("failed to capture canvas: {0}")]
    Capture(#[from] CanvasError),
}

impl SubmitError {
    /// Whether the caller may reasonably try the same submission again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SubmissionFailed(_) | Self::InFlight)
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::SubmissionFailed(err.to_string())
    }
}
