//! Parse raw backend responses into JSON objects.
//!
//! Generative backends sometimes wrap JSON payloads in a markdown code fence;
//! both ```` ```json ```` and bare ```` ``` ```` wrappers are stripped before
//! parsing.

use crate::error::PipelineError;
use indexmap::IndexMap;
use serde_json::Value;

/// Remove an optional markdown code-fence wrapper.
///
/// Content wrapped in a fence parses identically to the same content without
/// one; unfenced input is returned trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a backend response as a JSON object, preserving key order.
///
/// Anything that is not a single JSON object is [`PipelineError::Malformed`];
/// malformed responses never travel further up the pipeline as parsed values.
pub fn parse_json_object(raw: &str) -> Result<IndexMap<String, Value>, PipelineError> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str(cleaned)
        .map_err(|e| PipelineError::Malformed(format!("expected a JSON object: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unfenced_json_passes_through() {
        let object = parse_json_object(r#"{"key": "value"}"#).unwrap();
        assert_eq!(object.get("key"), Some(&json!("value")));
    }

    #[test]
    fn test_json_fence_is_stripped() {
        let fenced = "```json\n{\"key\": \"value\"}\n```";
        let plain = "{\"key\": \"value\"}";
        assert_eq!(
            parse_json_object(fenced).unwrap(),
            parse_json_object(plain).unwrap()
        );
    }

    #[test]
    fn test_bare_fence_is_stripped() {
        let fenced = "```\n{\"key\": 1}\n```";
        let object = parse_json_object(fenced).unwrap();
        assert_eq!(object.get("key"), Some(&json!(1)));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let raw = "  \n```json\n{\"a\": true}\n```  \n";
        let object = parse_json_object(raw).unwrap();
        assert_eq!(object.get("a"), Some(&json!(true)));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_json_object("this is prose, not JSON").unwrap_err();
        assert!(matches!(err, PipelineError::Malformed(_)));
    }

    #[test]
    fn test_json_array_is_malformed() {
        let err = parse_json_object(r#"[{"key": "value"}]"#).unwrap_err();
        assert!(matches!(err, PipelineError::Malformed(_)));
    }

    #[test]
    fn test_key_order_preserved() {
        let object = parse_json_object(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let keys: Vec<&String> = object.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
