//! Request screening and upstream body construction.
//!
//! Only `messages` and `response_format` are taken from the caller. The
//! model and sampling parameters always come from the relay.

use lec_ai::SamplingParams;
use serde_json::{Map, Value, json};

/// An answer the relay gives without contacting upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    pub message: String,
}

impl Rejection {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn not_found() -> Self {
        Self::new(404, "not found")
    }

    pub(crate) fn method_not_allowed() -> Self {
        Self::new(405, "method not allowed; use POST")
    }

    pub(crate) fn unreadable_body(detail: &str) -> Self {
        Self::new(400, format!("could not read request body: {detail}"))
    }

    pub(crate) fn not_configured() -> Self {
        Self::new(503, "relay has no upstream API key configured")
    }

    pub(crate) fn bad_gateway(detail: &str) -> Self {
        Self::new(502, format!("upstream request failed: {detail}"))
    }

    /// JSON body sent back to the caller.
    pub fn body(&self) -> String {
        json!({ "error": self.message }).to_string()
    }
}

/// Path component of a request target, without any query string.
pub(crate) fn request_path(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Validate a caller's body and build the upstream chat-completion body.
///
/// # Errors
///
/// Returns a 400 [`Rejection`] when the body is not a JSON object or lacks a
/// non-empty `messages` array.
pub fn build_upstream_body(raw: &[u8], model: &str) -> Result<Value, Rejection> {
    let parsed: Value = serde_json::from_slice(raw)
        .map_err(|e| Rejection::new(400, format!("request body is not valid JSON: {e}")))?;
    let Value::Object(mut incoming) = parsed else {
        return Err(Rejection::new(400, "request body must be a JSON object"));
    };

    let messages = match incoming.remove("messages") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => return Err(Rejection::new(400, "'messages' must not be empty")),
        Some(_) => return Err(Rejection::new(400, "'messages' must be an array")),
        None => return Err(Rejection::new(400, "'messages' is required")),
    };

    let mut body = match serde_json::to_value(SamplingParams::RELAY_DEFAULT) {
        Ok(Value::Object(sampling)) => sampling,
        _ => Map::new(),
    };
    body.insert("model".into(), Value::String(model.to_string()));
    body.insert("messages".into(), Value::Array(messages));
    if let Some(format) = incoming.remove("response_format") {
        body.insert("response_format".into(), format);
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn injects_model_and_sampling() {
        let raw = br#"{
            "messages": [{"role": "user", "content": "hi"}],
            "response_format": {"type": "json_object"},
            "model": "caller-chosen",
            "temperature": 2.0
        }"#;
        let body = build_upstream_body(raw, "gpt-4o-mini").unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hi"}],
                "response_format": {"type": "json_object"},
                "temperature": 0.7,
                "max_tokens": 3000,
                "top_p": 0.9,
                "frequency_penalty": 0.1,
                "presence_penalty": 0.1
            })
        );
    }

    #[test]
    fn response_format_is_optional() {
        let body = build_upstream_body(br#"{"messages": [{"role": "user", "content": "x"}]}"#, "m")
            .unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[rstest]
    #[case::not_json(b"messages=hi".as_slice(), "not valid JSON")]
    #[case::array_body(br#"[{"role": "user"}]"#.as_slice(), "JSON object")]
    #[case::missing(br#"{"response_format": {}}"#.as_slice(), "required")]
    #[case::empty(br#"{"messages": []}"#.as_slice(), "must not be empty")]
    #[case::wrong_type(br#"{"messages": "hi"}"#.as_slice(), "must be an array")]
    fn malformed_bodies_are_rejected(#[case] raw: &[u8], #[case] expected: &str) {
        let rejection = build_upstream_body(raw, "m").unwrap_err();
        assert_eq!(rejection.status, 400);
        assert!(
            rejection.message.contains(expected),
            "{} should mention {expected}",
            rejection.message
        );
    }

    #[test]
    fn rejection_body_is_json() {
        let body: Value = serde_json::from_str(&Rejection::not_found().body()).unwrap();
        assert_eq!(body, json!({"error": "not found"}));
    }

    #[rstest]
    #[case("/api/openai-proxy", "/api/openai-proxy")]
    #[case("/api/openai-proxy?debug=1", "/api/openai-proxy")]
    #[case("/", "/")]
    fn path_ignores_query(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(request_path(url), expected);
    }
}
