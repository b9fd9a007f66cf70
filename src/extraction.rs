//! Field extraction from decoded JSON records.
//!
//! Fields are looked up by top-level key and always come back as text, so
//! callers can project a record without caring how each field was typed in
//! the source.

use serde_json::{Map, Value};

/// Trait for types that can extract values by key
pub trait Extractor {
    /// Extract the value stored under `key`
    ///
    /// Returns `Some(value)` if the key exists, `None` otherwise
    fn extract(&self, key: &str) -> Option<String>;

    /// Extract a value, falling back to an empty string when absent
    fn extract_or_empty(&self, key: &str) -> String {
        self.extract(key).unwrap_or_default()
    }
}

impl Extractor for Map<String, Value> {
    fn extract(&self, key: &str) -> Option<String> {
        self.get(key).map(value_to_text)
    }
}

/// Render a JSON value as field text.
///
/// Strings pass through untouched and `null` becomes the empty string. Other
/// values use their compact JSON form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_extract_top_level_string() {
        let record = object(json!({"code": "A00", "detailed_context": "Cholera"}));

        assert_eq!(record.extract("code"), Some("A00".to_string()));
        assert_eq!(record.extract("description"), None);
        assert_eq!(record.extract_or_empty("description"), "");
    }

    #[test]
    fn test_dotted_key_is_literal() {
        let record = object(json!({"a.b": "dotted", "a": {"b": "nested"}}));
        assert_eq!(record.extract("a.b"), Some("dotted".to_string()));
    }

    #[test]
    fn test_non_string_values_render_as_text() {
        let record = object(json!({
            "n": 42,
            "f": 1.5,
            "b": true,
            "z": null,
            "list": [1, "x"],
            "obj": {"k": "v"}
        }));

        assert_eq!(record.extract_or_empty("n"), "42");
        assert_eq!(record.extract_or_empty("f"), "1.5");
        assert_eq!(record.extract_or_empty("b"), "true");
        assert_eq!(record.extract("z"), Some(String::new()));
        assert_eq!(record.extract_or_empty("list"), r#"[1,"x"]"#);
        assert_eq!(record.extract_or_empty("obj"), r#"{"k":"v"}"#);
    }
}
