//! Outbound request description.
//!
//! # Responsibilities
//! - Hold method, absolute URL, headers and optional JSON body
//! - Reject malformed URLs and header values before anything is sent
//!
//! Header values may carry secrets (`x-api-key`), so `Debug` prints
//! header names only.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::dispatch::error::{DispatchResult, OperationError};

/// HTTP method supported by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A fully-formed request, ready for dispatch.
#[derive(Clone)]
pub struct RequestSpec {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Value>,
}

impl RequestSpec {
    /// Parse `url` and build a request with no headers and no body.
    pub fn new(method: Method, url: &str) -> DispatchResult<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| OperationError::validation(format!("Invalid URL '{}': {}", url, e)))?;
        Self::from_url(method, parsed)
    }

    pub fn from_url(method: Method, url: Url) -> DispatchResult<Self> {
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(OperationError::validation(format!(
                    "Unsupported URL scheme '{}': expected http or https",
                    other
                )))
            }
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(OperationError::validation(format!("URL '{}' has no host", url)));
        }

        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    pub fn post(url: &str) -> DispatchResult<Self> {
        Self::new(Method::Post, url)
    }

    pub fn get(url: &str) -> DispatchResult<Self> {
        Self::new(Method::Get, url)
    }

    /// Set a header, replacing any value already stored under the same
    /// (case-insensitive) name. The value never appears in the error.
    pub fn header(mut self, name: &str, value: &str) -> DispatchResult<Self> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| OperationError::validation(format!("Invalid header name '{}'", name)))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            OperationError::validation(format!("Header '{}' contains invalid characters", name))
                .on_field(header_name.as_str())
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers.keys().map(|k| k.as_str()).collect::<Vec<_>>())
            .field("has_body", &self.body.is_some())
            .finish()
    }
}
