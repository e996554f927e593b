//! Proxy results and the untrusted HTML they may carry.
//!
//! The artifact string is passed through unchanged. Rendering it goes
//! through `HtmlArtifact::sandboxed_preview`, which embeds the markup in an
//! iframe with an empty `sandbox` attribute: no scripts, no same-origin
//! access, no popups, no forms.

use serde::Serialize;
use serde_json::Value;

/// Field of a successful proxy response that holds fetched HTML.
pub const RESULT_FIELD: &str = "result";

const PREVIEW_CSP: &str = "script-src 'none'; object-src 'none'; form-action 'none'; base-uri 'none'";

/// Markup returned by the proxy. Treat as hostile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HtmlArtifact(String);

impl HtmlArtifact {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// A standalone document that renders the artifact in a fully
    /// restricted iframe.
    pub fn sandboxed_preview(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html>\n",
                "<head>\n",
                "<meta charset=\"utf-8\">\n",
                "<meta http-equiv=\"Content-Security-Policy\" content=\"{csp}\">\n",
                "<title>HTML Preview</title>\n",
                "</head>\n",
                "<body style=\"margin:0\">\n",
                "<iframe title=\"HTML Preview\" sandbox=\"\" referrerpolicy=\"no-referrer\" ",
                "style=\"width:100%;height:100vh;border:1px solid #ccc\" srcdoc=\"{srcdoc}\"></iframe>\n",
                "</body>\n",
                "</html>\n"
            ),
            csp = PREVIEW_CSP,
            srcdoc = escape_attribute(&self.0),
        )
    }
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + raw.len() / 8);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Outcome of one successful proxy test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyResult {
    pub raw: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_artifact: Option<HtmlArtifact>,
}

impl ProxyResult {
    /// Wrap a response payload, lifting a string `result` field out as the
    /// HTML artifact. Any other shape leaves the artifact unset.
    pub fn from_raw(raw: Value) -> Self {
        let html_artifact = raw
            .get(RESULT_FIELD)
            .and_then(Value::as_str)
            .map(HtmlArtifact::new);

        Self { raw, html_artifact }
    }

    pub fn html_artifact(&self) -> Option<&str> {
        self.html_artifact.as_ref().map(HtmlArtifact::as_str)
    }

    /// Raw payload with two-space indentation.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_field_becomes_artifact() {
        let result = ProxyResult::from_raw(json!({"result": "<html>ok</html>", "status": 200}));
        assert_eq!(result.html_artifact(), Some("<html>ok</html>"));
        assert_eq!(result.raw["status"], 200);
    }

    #[test]
    fn test_missing_or_non_string_result() {
        assert_eq!(ProxyResult::from_raw(json!({"status": "ok"})).html_artifact(), None);
        assert_eq!(ProxyResult::from_raw(json!({"result": {"html": "x"}})).html_artifact(), None);
        assert_eq!(ProxyResult::from_raw(json!(["result"])).html_artifact(), None);
        assert_eq!(ProxyResult::from_raw(json!("plain")).html_artifact(), None);
    }

    #[test]
    fn test_pretty_uses_two_spaces() {
        let result = ProxyResult::from_raw(json!({"a": 1}));
        assert_eq!(result.pretty(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_preview_is_sandboxed_and_escaped() {
        let artifact = HtmlArtifact::new(r#"<script>alert("x")</script><a href='y'>&</a>"#);
        let preview = artifact.sandboxed_preview();

        assert!(preview.contains("sandbox=\"\""));
        assert!(preview.contains("script-src 'none'"));
        assert!(!preview.contains("<script>"));
        assert!(preview.contains(
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;&lt;a href=&#39;y&#39;&gt;&amp;&lt;/a&gt;"
        ));
        assert!(!preview.contains("allow-scripts"));
    }

    #[test]
    fn test_artifact_passes_through_unchanged() {
        let markup = "<html><body onload=\"x()\">hi</body></html>";
        let result = ProxyResult::from_raw(json!({ "result": markup }));
        assert_eq!(result.html_artifact(), Some(markup));
        assert_eq!(
            serde_json::to_value(&result).unwrap()["html_artifact"],
            json!(markup)
        );
    }
}
