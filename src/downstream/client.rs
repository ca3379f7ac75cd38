//! Resilient downstream call execution.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use tokio::time;

use crate::downstream::resolver::EndpointTarget;
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::trace::{Span, TraceContext, Tracer};

/// Fallback greeting substituted for every failed downstream call.
pub const ALOHA_FALLBACK: &str = "Aloha response (fallback)";

/// Path of the greeting operation on the downstream service.
const ALOHA_PATH: &str = "api/aloha";

/// Downstream bodies are tiny; anything bigger is broken.
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
enum CallError {
    #[error("request build: {0}")]
    Request(#[from] axum::http::Error),

    #[error("transport: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("body read: {0}")]
    Body(#[from] axum::Error),

    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CallError {
    /// Status observed on the wire, 0 when the call never completed.
    fn wire_status(&self) -> u16 {
        match self {
            CallError::Status(status) => status.as_u16(),
            _ => 0,
        }
    }
}

/// HTTP client for the downstream greeting service.
///
/// One method, explicit timeout, explicit fallback. The timeout covers the
/// whole call: connection setup, remote processing, body read, and decode.
/// Expiry drops the in-flight future, which aborts the connection instead
/// of letting it complete in the background.
pub struct AlohaClient {
    client: Client<HttpConnector, Body>,
    tracer: Arc<dyn Tracer>,
    timeout: Duration,
}

impl AlohaClient {
    pub fn new(tracer: Arc<dyn Tracer>, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            tracer,
            timeout,
        }
    }

    /// The fallback response as a greeting sequence.
    pub fn fallback() -> Vec<String> {
        vec![ALOHA_FALLBACK.to_string()]
    }

    /// Fetch the downstream greetings as a child of `parent`, forwarding
    /// `request_id` for cross-service log correlation.
    ///
    /// Never fails: timeout, transport error, non-2xx status, and decode
    /// error all yield the fallback.
    pub async fn greetings(
        &self,
        target: &EndpointTarget,
        parent: &TraceContext,
        request_id: Option<&str>,
    ) -> Vec<String> {
        let url = target.join(ALOHA_PATH);
        let started = Instant::now();

        let mut span = self.tracer.start_span(parent, "GET /api/aloha");
        span.tag("http.method", "GET");
        span.tag("http.url", url.as_str());

        match time::timeout(self.timeout, self.fetch(url.as_str(), &span, request_id)).await {
            Ok(Ok((status, greetings))) => {
                self.tracer.finish(span, status.as_u16());
                metrics::record_downstream("ok", started);
                greetings
            }
            Ok(Err(error)) => {
                tracing::warn!(url = %url, error = %error, "Downstream call failed, serving fallback");
                self.tracer.finish(span, error.wire_status());
                metrics::record_downstream("fallback", started);
                Self::fallback()
            }
            Err(_) => {
                tracing::warn!(
                    url = %url,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Downstream call timed out, serving fallback"
                );
                self.tracer.finish(span, 0);
                metrics::record_downstream("fallback", started);
                Self::fallback()
            }
        }
    }

    async fn fetch(
        &self,
        url: &str,
        span: &Span,
        request_id: Option<&str>,
    ) -> Result<(StatusCode, Vec<String>), CallError> {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(url)
            .header(header::ACCEPT, "application/json");
        if let Some(request_id) = request_id {
            builder = builder.header(X_REQUEST_ID, request_id);
        }
        let mut request = builder.body(Body::empty())?;
        self.tracer.inject(span, request.headers_mut());

        let response = self.client.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CallError::Status(status));
        }

        let body = axum::body::to_bytes(Body::new(response.into_body()), MAX_RESPONSE_BYTES).await?;
        let greetings: Vec<String> = serde_json::from_slice(&body)?;
        Ok((status, greetings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_a_single_fixed_element() {
        assert_eq!(AlohaClient::fallback(), vec![ALOHA_FALLBACK.to_string()]);
    }

    #[test]
    fn only_status_errors_carry_a_wire_status() {
        let status = CallError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status.wire_status(), 503);

        let decode: CallError = serde_json::from_slice::<Vec<String>>(b"{")
            .unwrap_err()
            .into();
        assert_eq!(decode.wire_status(), 0);
    }
}
