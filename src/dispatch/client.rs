//! HTTP dispatcher.
//!
//! # Responsibilities
//! - Send a `RequestSpec` over HTTP with explicit connect/request timeouts
//! - Tell transport failures apart from non-2xx responses
//! - Interpret the body into a JSON payload or an `OperationError`
//!
//! No retries happen here; recovery is a human re-trigger.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde_json::Value;

use crate::config::TimeoutConfig;
use crate::dispatch::error::{DispatchResult, OperationError};
use crate::dispatch::request::RequestSpec;
use crate::observability::metrics;

/// Header carrying the per-dispatch correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Something that can perform a request and normalize its outcome.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, spec: RequestSpec) -> DispatchResult<Value>;
}

/// reqwest-backed dispatcher. Cheap to clone; clones share a connection pool.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: Client,
    request_timeout: Duration,
}

impl HttpDispatcher {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect())
            .timeout(timeouts.request())
            .build()?;

        Ok(Self {
            client,
            request_timeout: timeouts.request(),
        })
    }

    /// Wrap an existing client. `request_timeout` is only used for messages;
    /// the client's own timeout settings apply.
    pub fn with_client(client: Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> OperationError {
        if err.is_timeout() {
            OperationError::transport(format!("Request timed out after {:?}", self.request_timeout))
        } else if err.is_connect() {
            OperationError::transport(format!("Could not connect: {}", err))
        } else {
            OperationError::transport(format!("Request failed: {}", err))
        }
    }
}

impl std::fmt::Debug for HttpDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDispatcher")
            .field("request_timeout_secs", &self.request_timeout.as_secs())
            .finish()
    }
}

/// Interpret a received response.
pub fn interpret_response(status: u16, body: &[u8]) -> DispatchResult<Value> {
    if !(200..=299).contains(&status) {
        return Err(OperationError::from_rejection(status, body));
    }

    serde_json::from_slice(body).map_err(|e| {
        OperationError::unknown(format!("Response body is not valid JSON: {}", e)).with_status(status)
    })
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn dispatch(&self, spec: RequestSpec) -> DispatchResult<Value> {
        let start_time = Instant::now();
        let method = spec.method();

        let mut headers = spec.headers().clone();
        if !headers.contains_key(X_REQUEST_ID) {
            let generated = uuid::Uuid::new_v4().to_string();
            if let Ok(value) = generated.parse::<HeaderValue>() {
                headers.insert(X_REQUEST_ID, value);
            }
        }
        let request_id = headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            host = spec.url().host_str().unwrap_or(""),
            path = spec.url().path(),
            "Dispatching request"
        );

        let mut builder = self
            .client
            .request(method.into(), spec.url().clone())
            .headers(headers);
        if let Some(body) = spec.body() {
            let bytes = match serde_json::to_vec(body) {
                Ok(bytes) => bytes,
                Err(e) => {
                    let err = OperationError::unknown(format!("Could not encode request body: {}", e));
                    metrics::record_dispatch(method.as_str(), Some(err.kind), start_time);
                    return Err(err);
                }
            };
            builder = builder.body(bytes);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = self.transport_error(&e);
                tracing::warn!(request_id = %request_id, error = %err, "Request not delivered");
                metrics::record_dispatch(method.as_str(), Some(err.kind), start_time);
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        let result = match response.bytes().await {
            Ok(body) => interpret_response(status, &body),
            Err(e) => Err(self.transport_error(&e).with_status(status)),
        };

        match &result {
            Ok(_) => tracing::debug!(
                request_id = %request_id,
                status,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Request succeeded"
            ),
            Err(err) => tracing::info!(
                request_id = %request_id,
                status,
                kind = %err.kind,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Request failed"
            ),
        }
        metrics::record_dispatch(
            method.as_str(),
            result.as_ref().err().map(|e| e.kind),
            start_time,
        );

        result
    }
}
