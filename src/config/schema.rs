//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the console.
//! All types derive Serde traits for deserialization from TOML files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROXY_BASE: &str = "https://api.thedataproxy.com/v2/proxy";
pub const DEFAULT_API_BASE: &str = "https://api.thedataproxy.com";

/// Root configuration for the console.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Remote service base URLs.
    pub endpoints: EndpointConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Activation flow settings.
    pub activation: ActivationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Base URLs of the external services.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Proxy API base; `/fetch` is appended.
    pub proxy_base: String,

    /// Account API base; `/v2/activate` is appended.
    pub api_base: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Timeout configuration for outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 30,
        }
    }
}

/// Activation flow settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ActivationConfig {
    /// Minimum number of characters in a new password.
    pub min_password_length: usize,

    /// Where the operator is sent after a successful activation.
    pub login_path: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            login_path: "/login".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
