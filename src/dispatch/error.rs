//! Normalized error taxonomy shared by every flow.
//!
//! # Kinds
//! - Validation: caller input violates a precondition, nothing was sent
//! - Transport: no response was received (connect, DNS, timeout)
//! - ServerRejected: a response arrived with a non-2xx status
//! - Unknown: a response arrived but could not be interpreted
//!
//! All kinds are terminal for the attempt that produced them.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Placeholder substituted for secrets found in error messages.
pub const REDACTED: &str = "[redacted]";

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Transport,
    ServerRejected,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Transport => "transport",
            ErrorKind::ServerRejected => "server_rejected",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed pipeline step, captured as data for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Form field the error refers to, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl OperationError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
            field: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn server_rejected(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerRejected, message).with_status(status)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Replace every occurrence of `secret` in the message.
    pub fn redact(mut self, secret: &str) -> Self {
        if !secret.is_empty() && self.message.contains(secret) {
            self.message = self.message.replace(secret, REDACTED);
        }
        self
    }

    /// Build the error for a non-2xx response from its raw body.
    ///
    /// A JSON body with a usable `detail` supplies the message verbatim;
    /// otherwise a status-coded message is synthesized. A body that is not
    /// JSON at all yields `Unknown`, still tagged with the status.
    pub fn from_rejection(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => {
                let message = detail_message(&value)
                    .unwrap_or_else(|| format!("HTTP error {}", status));
                Self::server_rejected(status, message)
            }
            Err(e) => Self::unknown(format!(
                "HTTP error {}: response body is not valid JSON ({})",
                status, e
            ))
            .with_status(status),
        }
    }
}

/// Extract a human-readable message from a `detail` field.
///
/// Strings are used as-is. Validation error lists (`[{"msg": ..}, ..]`)
/// contribute their first `msg`. Other non-null values are rendered as JSON.
pub fn detail_message(body: &Value) -> Option<String> {
    let detail = body.get("detail")?;
    match detail {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => match items.first() {
            None => None,
            Some(first) => Some(
                first
                    .get("msg")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| first.to_string()),
            ),
        },
        other => Some(other.to_string()),
    }
}

pub type DispatchResult<T> = Result<T, OperationError>;
