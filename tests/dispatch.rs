//! Dispatcher behaviour over real HTTP.

use std::time::Duration;

use dataproxy_console::dispatch::{Dispatch, ErrorKind, RequestSpec, X_REQUEST_ID};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_get_without_body() {
    let backend = common::start_mock_backend("/status", 200, r#"{"ok": true}"#).await;
    let spec = RequestSpec::get(&format!("{}/status", backend.base_url())).unwrap();

    let value = common::dispatcher().dispatch(spec).await.unwrap();

    assert_eq!(value, json!({"ok": true}));
    let request = &backend.requests()[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_caller_request_id_is_kept() {
    let backend = common::start_mock_backend("/status", 200, "{}").await;
    let spec = RequestSpec::get(&format!("{}/status", backend.base_url()))
        .unwrap()
        .header(X_REQUEST_ID, "req-42")
        .unwrap();

    common::dispatcher().dispatch(spec).await.unwrap();

    assert_eq!(backend.requests()[0].header(X_REQUEST_ID), Some("req-42"));
}

#[tokio::test]
async fn test_generic_message_without_detail() {
    let backend = common::start_mock_backend("/fetch", 500, r#"{"error": "internal"}"#).await;
    let spec = RequestSpec::post(&format!("{}/fetch", backend.base_url()))
        .unwrap()
        .json_body(json!({"url": "https://example.com"}));

    let err = common::dispatcher().dispatch(spec).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::ServerRejected);
    assert_eq!(err.http_status, Some(500));
    assert_eq!(err.message, "HTTP error 500");
}

#[tokio::test]
async fn test_malformed_success_body_is_unknown() {
    let backend = common::start_mock_backend("/fetch", 200, "<html>not json</html>").await;
    let spec = RequestSpec::post(&format!("{}/fetch", backend.base_url())).unwrap();

    let err = common::dispatcher().dispatch(spec).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
}

#[tokio::test]
async fn test_slow_backend_times_out_as_transport() {
    let backend = common::start_delayed_backend("/fetch", 200, "{}", Duration::from_secs(3)).await;
    let dispatcher = common::dispatcher_with_timeout(Duration::from_millis(200));
    let spec = RequestSpec::post(&format!("{}/fetch", backend.base_url())).unwrap();

    let err = dispatcher.dispatch(spec).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.message.contains("timed out"), "got: {}", err.message);
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let spec = RequestSpec::post(&format!("http://{}/fetch", common::closed_addr())).unwrap();

    let first = common::dispatcher().dispatch(spec.clone()).await.unwrap_err();
    let second = common::dispatcher().dispatch(spec).await.unwrap_err();

    assert_eq!(first.kind, ErrorKind::Transport);
    assert_eq!(second.kind, first.kind);
}
