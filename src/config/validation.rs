//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Base URLs are absolute http(s) URLs
//! - Timeouts and password length are non-zero
//!
//! Returns every error found, not just the first.

use std::fmt;

use url::Url;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn check_base_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("'{}' must be an http or https URL (got scheme '{}')", value, url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("'{}' is not a valid URL: {}", value, e))),
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_base_url("endpoints.proxy_base", &config.endpoints.proxy_base, &mut errors);
    check_base_url("endpoints.api_base", &config.endpoints.api_base, &mut errors);

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.activation.min_password_length == 0 {
        errors.push(ValidationError::new(
            "activation.min_password_length",
            "must be at least 1",
        ));
    }
    if !config.activation.login_path.starts_with('/') {
        errors.push(ValidationError::new("activation.login_path", "must start with '/'"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("'{}' is not one of {}", config.observability.log_level, LOG_LEVELS.join(", ")),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.endpoints.proxy_base = "not a url".to_string();
        config.endpoints.api_base = "ftp://api.example.com".to_string();
        config.timeouts.request_secs = 0;
        config.activation.login_path = "login".to_string();
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "endpoints.proxy_base",
                "endpoints.api_base",
                "timeouts.request_secs",
                "activation.login_path",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("timeouts.connect_secs", "must be greater than 0");
        assert_eq!(err.to_string(), "timeouts.connect_secs: must be greater than 0");
    }
}
