//! Core entity trait and the projected output record.
//!
//! An entity is a flat record with a fixed, ordered set of string fields. The
//! order drives both the CSV header/row layout and the key order of the JSON
//! objects written for it.

use serde::{Deserialize, Serialize};

/// Core trait for all records emitted by the converter.
///
/// # Example
///
/// ```ignore
/// use jsonl_projector::Entity;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct NameRow {
///     first_name: String,
///     last_name: String,
/// }
///
/// impl Entity for NameRow {
///     const NAME: &'static str = "NameRow";
///     const FIELDS: &'static [&'static str] = &["first_name", "last_name"];
///
///     fn values(&self) -> Vec<&str> {
///         vec![self.first_name.as_str(), self.last_name.as_str()]
///     }
/// }
/// ```
pub trait Entity: Serialize + Sized {
    /// The name of this entity type
    const NAME: &'static str;

    /// Field names in output order. Used as the CSV header.
    const FIELDS: &'static [&'static str];

    /// Field values, in the same order as [`Entity::FIELDS`]
    fn values(&self) -> Vec<&str>;
}

/// A record projected onto its `code` and `detailed_context` fields.
///
/// Serializes with exactly these two keys, in this order. Absent source
/// fields are represented by empty strings, never omitted or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContext {
    pub code: String,
    pub detailed_context: String,
}

impl CodeContext {
    pub fn new(code: impl Into<String>, detailed_context: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            detailed_context: detailed_context.into(),
        }
    }
}

impl Entity for CodeContext {
    const NAME: &'static str = "CodeContext";
    const FIELDS: &'static [&'static str] = &["code", "detailed_context"];

    fn values(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.detailed_context.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_two_keys_in_order() {
        let entity = CodeContext::new("A00", "Cholera");

        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"code":"A00","detailed_context":"Cholera"}"#);
    }

    #[test]
    fn test_fields_match_values() {
        let entity = CodeContext::new("B01", "");

        assert_eq!(CodeContext::FIELDS.len(), entity.values().len());
        assert_eq!(entity.values(), vec!["B01", ""]);
    }

    #[test]
    fn test_default_is_empty_strings() {
        let json = serde_json::to_string(&CodeContext::default()).unwrap();
        assert_eq!(json, r#"{"code":"","detailed_context":""}"#);
    }
}
