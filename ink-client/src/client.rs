//! Recognition endpoint client.
//!
//! One `POST` per submission, no retries. At most one submission is in flight
//! per client; a second one is rejected with [`SubmitError::InFlight`]
//! instead of racing the first.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ink_core::{DrawingSession, ExportPayload, RecognitionResult};
use reqwest::Client;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::response::parse_results;
use crate::{ClientConfig, SubmitError, SubmitResult};

/// Header carrying the per-submission request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_ERROR_BODY: usize = 200;

/// Client for the recognition endpoint.
///
/// Cheap to clone; clones share the in-flight guard.
#[derive(Clone)]
pub struct RecognitionClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    endpoint: Url,
    in_flight: AtomicBool,
}

impl RecognitionClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InvalidUrl`] if the endpoint is malformed or not
    /// HTTP(S), and [`SubmitError::ClientBuild`] if the HTTP client fails to
    /// build.
    pub fn new(config: &ClientConfig) -> SubmitResult<Self> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| SubmitError::InvalidUrl(e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SubmitError::InvalidUrl(format!(
                "unsupported scheme: {}",
                endpoint.scheme()
            )));
        }

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(SubmitError::ClientBuild)?;

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                endpoint,
                in_flight: AtomicBool::new(false),
            }),
        })
    }

    /// The endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Whether a submission is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Submit a payload and wait for the results.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] if another submission is outstanding,
    /// or [`SubmitError::SubmissionFailed`] on transport, status or decoding
    /// failure.
    pub async fn submit(&self, payload: &ExportPayload) -> SubmitResult<Vec<RecognitionResult>> {
        let _guard = InFlightGuard::acquire(&self.inner)?;
        self.send(payload).await
    }

    /// Claim the in-flight slot now and return the request as an owned future.
    ///
    /// The slot is taken synchronously, so a second call made before the
    /// first future completes is rejected immediately. The returned future is
    /// `'static` and can be spawned onto a runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InFlight`] if another submission is outstanding.
    pub fn begin(
        &self,
        payload: ExportPayload,
    ) -> SubmitResult<impl Future<Output = SubmitResult<Vec<RecognitionResult>>> + Send + 'static>
    {
        let guard = InFlightGuard::acquire(&self.inner)?;
        let client = self.clone();
        Ok(async move {
            let _guard = guard;
            client.send(&payload).await
        })
    }

    /// Capture the session's surface and variables, then begin a submission.
    ///
    /// The snapshot is taken before this returns, so later events on the
    /// session do not leak into the request.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Capture`] if the surface is not initialized, or
    /// [`SubmitError::InFlight`] if another submission is outstanding.
    pub fn begin_from_session(
        &self,
        session: &mut DrawingSession,
    ) -> SubmitResult<impl Future<Output = SubmitResult<Vec<RecognitionResult>>> + Send + 'static>
    {
        if self.is_in_flight() {
            return Err(SubmitError::InFlight);
        }
        let payload = session.capture_payload()?;
        self.begin(payload)
    }

    async fn send(&self, payload: &ExportPayload) -> SubmitResult<Vec<RecognitionResult>> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "submit",
            %request_id,
            endpoint = %self.inner.endpoint,
            vars = payload.variables.len(),
        );

        self.post(payload, request_id).instrument(span).await
    }

    async fn post(
        &self,
        payload: &ExportPayload,
        request_id: Uuid,
    ) -> SubmitResult<Vec<RecognitionResult>> {
        tracing::info!("Submitting canvas ({} bytes of image data)", payload.image.len());

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(payload)
            .send()
            .await
            .inspect_err(|e| tracing::warn!("Submission transport error: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Endpoint returned {status}");
            let detail = match response.text().await {
                Ok(body) => body.chars().take(MAX_ERROR_BODY).collect::<String>(),
                Err(e) => format!("<failed to read body: {e}>"),
            };
            return Err(SubmitError::SubmissionFailed(format!(
                "endpoint returned {status}: {detail}"
            )));
        }

        let body = response.bytes().await?;
        let results = parse_results(&body)?;
        tracing::info!("Submission returned {} result(s)", results.len());
        Ok(results)
    }
}

impl std::fmt::Debug for RecognitionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}

/// Holds the in-flight slot until dropped.
struct InFlightGuard {
    inner: Arc<InnerClient>,
}

impl InFlightGuard {
    fn acquire(inner: &Arc<InnerClient>) -> SubmitResult<Self> {
        inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                tracing::warn!("Rejecting submission: another is in flight");
                SubmitError::InFlight
            })?;
        Ok(Self {
            inner: Arc::clone(inner),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::Release);
    }
}
