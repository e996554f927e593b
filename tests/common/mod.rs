//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::any;
use axum::Router;
use dataproxy_console::HttpDispatcher;
use serde_json::Value;
use tokio::net::TcpListener;

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Handle to a running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Start a mock backend that answers `path` with a fixed status and body.
pub async fn start_mock_backend(path: &str, status: u16, body: &str) -> MockBackend {
    start_delayed_backend(path, status, body, Duration::ZERO).await
}

/// Like `start_mock_backend`, but waits `delay` before answering.
pub async fn start_delayed_backend(path: &str, status: u16, body: &str, delay: Duration) -> MockBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        delay,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route(path, any(record_and_respond))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend { addr, requests }
}

async fn record_and_respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let recorded = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// A dispatcher that ignores system proxy settings.
pub fn dispatcher() -> HttpDispatcher {
    dispatcher_with_timeout(Duration::from_secs(5))
}

#[allow(dead_code)]
pub fn dispatcher_with_timeout(timeout: Duration) -> HttpDispatcher {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .unwrap();
    HttpDispatcher::with_client(client, timeout)
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
