//! Pull the JSON document out of a model reply.

use serde_json::Value;

use crate::error::AiError;

/// Parse a model reply as JSON.
///
/// Surrounding whitespace and one Markdown code fence (with or without a
/// language tag) are removed first. The parse itself is strict: anything that
/// is not a complete JSON document is an error, with no partial recovery.
///
/// # Errors
///
/// Returns [`AiError::EmptyResponse`] for a blank reply and
/// [`AiError::Parse`] when the text is not valid JSON.
pub fn extract_json(reply: &str) -> Result<Value, AiError> {
    let body = strip_fence(reply.trim());
    if body.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| AiError::Parse(format!("reply is not valid JSON: {e}")))
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(r#"{"title":"Fractions"}"#)]
    #[case("  \n{\"title\":\"Fractions\"}\n ")]
    #[case("```json\n{\"title\":\"Fractions\"}\n```")]
    #[case("```\n{\"title\":\"Fractions\"}\n```")]
    #[case("```JSON\n{\"title\":\"Fractions\"}```")]
    fn accepts_plain_and_fenced_json(#[case] reply: &str) {
        assert_eq!(extract_json(reply).unwrap(), json!({"title": "Fractions"}));
    }

    #[rstest]
    #[case("Here is your lesson plan: {\"title\":\"Fractions\"}")]
    #[case("{\"title\":\"Fractions\"")]
    #[case("```json\n{\"title\":\"Fractions\"}")]
    #[case("{\"title\":\"Fractions\"} trailing words")]
    fn rejects_anything_but_a_complete_document(#[case] reply: &str) {
        assert!(matches!(extract_json(reply), Err(AiError::Parse(_))));
    }

    #[test]
    fn blank_reply_is_empty() {
        assert!(matches!(extract_json("   "), Err(AiError::EmptyResponse)));
        assert!(matches!(extract_json("```json\n```"), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn non_object_json_is_still_json() {
        assert_eq!(extract_json("[1, 2]").unwrap(), json!([1, 2]));
    }
}
