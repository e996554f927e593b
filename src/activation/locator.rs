//! Access to the hosting page's location.
//!
//! The activation token arrives as a query parameter on the page URL. The
//! controller receives a `Locator` at construction instead of reading any
//! ambient state, so tests can substitute their own.

use url::Url;

/// Query parameter carrying the one-time activation token.
pub const TOKEN_PARAM: &str = "token";

/// Read-only view of the current page location.
pub trait Locator: Send + Sync {
    /// First value of query parameter `name`, if present.
    fn query_param(&self, name: &str) -> Option<String>;
}

/// Locator backed by a parsed page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocator {
    url: Url,
}

impl PageLocator {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(page_url: &str) -> Result<Self, url::ParseError> {
        Url::parse(page_url).map(Self::new)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Locator for PageLocator {
    fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_first_token() {
        let locator =
            PageLocator::parse("https://app.example.com/activate?token=t%2Fone&token=two").unwrap();
        assert_eq!(locator.query_param(TOKEN_PARAM).as_deref(), Some("t/one"));
    }

    #[test]
    fn test_missing_and_empty_token() {
        let locator = PageLocator::parse("https://app.example.com/activate").unwrap();
        assert_eq!(locator.query_param(TOKEN_PARAM), None);

        let locator = PageLocator::parse("https://app.example.com/activate?token=").unwrap();
        assert_eq!(locator.query_param(TOKEN_PARAM).as_deref(), Some(""));
    }

    #[test]
    fn test_rejects_relative_page_url() {
        assert!(PageLocator::parse("/activate?token=abc").is_err());
    }
}
