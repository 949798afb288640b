//! Recognition endpoint response parsing.
//!
//! The endpoint may answer with a bare array of records or with an envelope
//! object carrying `message`, `status` and `data`.

use ink_core::RecognitionResult;
use serde::Deserialize;
use serde_json::Value;

use crate::{SubmitError, SubmitResult};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Vec<RecognitionResult>>,
}

fn malformed(e: &serde_json::Error) -> SubmitError {
    SubmitError::SubmissionFailed(format!("unexpected response body: {e}"))
}

/// Parse a response body into ordered result records.
///
/// # Errors
///
/// Returns [`SubmitError::SubmissionFailed`] if the body is not one of the
/// accepted shapes, or if an envelope reports `"status": "error"`.
pub fn parse_results(body: &[u8]) -> SubmitResult<Vec<RecognitionResult>> {
    let parsed: Value = serde_json::from_slice(body).map_err(|e| malformed(&e))?;

    match parsed {
        Value::Array(_) => serde_json::from_value(parsed).map_err(|e| malformed(&e)),
        Value::Object(_) => {
            let envelope: Envelope = serde_json::from_value(parsed).map_err(|e| malformed(&e))?;
            if envelope.status.as_deref() == Some("error") {
                return Err(SubmitError::SubmissionFailed(
                    envelope
                        .message
                        .unwrap_or_else(|| "endpoint reported an error".to_string()),
                ));
            }
            if let Some(message) = &envelope.message {
                tracing::debug!("Endpoint message: {message}");
            }
            envelope.data.ok_or_else(|| {
                SubmitError::SubmissionFailed("response did not contain result data".to_string())
            })
        }
        other => Err(SubmitError::SubmissionFailed(format!(
            "unexpected response body: expected array or object, got {other}"
        ))),
    }
}
