//! Operator-entered proxy test fields and their validation.

use std::fmt;

use serde_json::json;
use url::Url;

use crate::dispatch::{DispatchResult, Method, OperationError, RequestSpec};
use crate::proxy::region::Region;

/// Raw fields from the proxy test form. `api_key` is a secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProxyQuery {
    pub target_url: String,
    pub region: String,
    pub api_key: String,
}

impl fmt::Debug for ProxyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyQuery")
            .field("target_url", &self.target_url)
            .field("region", &self.region)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A query whose fields have all passed the validation gate.
#[derive(Clone, Copy)]
pub struct ValidatedQuery<'a> {
    pub target_url: &'a str,
    pub region: Region,
    api_key: &'a str,
}

impl ProxyQuery {
    pub fn new(
        target_url: impl Into<String>,
        region: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            target_url: target_url.into(),
            region: region.into(),
            api_key: api_key.into(),
        }
    }

    /// Check that every field is present and the region is known.
    /// Fields are checked in form order: url, API key, region.
    pub fn validate(&self) -> DispatchResult<ValidatedQuery<'_>> {
        if self.target_url.trim().is_empty() {
            return Err(OperationError::validation("Target URL is required").on_field("url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(OperationError::validation("API key is required").on_field("api_key"));
        }
        let region = self.region.trim();
        if region.is_empty() {
            return Err(OperationError::validation("Region is required").on_field("region"));
        }
        let region = region.parse::<Region>().map_err(|e| {
            let known: Vec<_> = Region::ALL.iter().map(Region::as_str).collect();
            OperationError::validation(format!("{}; expected one of {}", e, known.join(", ")))
                .on_field("region")
        })?;

        Ok(ValidatedQuery {
            target_url: &self.target_url,
            region,
            api_key: &self.api_key,
        })
    }
}

impl ValidatedQuery<'_> {
    /// `POST {proxy_base}/fetch?region=..` with the API key header and
    /// `{"url": target}` body.
    pub fn to_request(&self, proxy_base: &str) -> DispatchResult<RequestSpec> {
        let endpoint = format!("{}/fetch", proxy_base.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint).map_err(|e| {
            OperationError::validation(format!("Invalid proxy base URL '{}': {}", proxy_base, e))
        })?;
        url.query_pairs_mut().append_pair("region", self.region.as_str());

        Ok(RequestSpec::from_url(Method::Post, url)?
            .header("x-api-key", self.api_key)?
            .header("content-type", "application/json")?
            .json_body(json!({ "url": self.target_url })))
    }
}
