//! Native item encoding for the key-value store.
//!
//! # Responsibility
//! - Define the attribute value shape every backend stores.
//! - Encode any `Serialize` record into an `Item`.
//!
//! # Invariants
//! - Numbers are kept as decimal text so no precision is lost in transit.
//! - `null` has no attribute representation and is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// One stored item: attribute name to value.
pub type Item = BTreeMap<String, AttributeValue>;

/// Typed attribute value, serialized as `{"S": "..."}`, `{"N": "42"}`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    L(Vec<AttributeValue>),
    M(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            _ => None,
        }
    }

    /// Parses an `N` attribute as a signed integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::N(value) => value.parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::N(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[derive(Debug, Error)]
pub enum ItemCodecError {
    #[error("failed to serialize record: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("record must serialize to a map of attributes, got {kind}")]
    NotAMap { kind: &'static str },
    #[error("unsupported null value at `{path}`")]
    UnsupportedValue { path: String },
}

/// Encodes a serializable record into a store item.
///
/// # Errors
/// - `Serde` when the record's `Serialize` impl fails.
/// - `NotAMap` when the record is not a struct/map.
/// - `UnsupportedValue` when any attribute (nested included) is `null`.
pub fn to_item<T: Serialize + ?Sized>(record: &T) -> Result<Item, ItemCodecError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => fields
            .into_iter()
            .map(|(name, value)| {
                let attribute = encode_value(&name, value)?;
                Ok::<_, ItemCodecError>((name, attribute))
            })
            .collect(),
        other => Err(ItemCodecError::NotAMap {
            kind: value_kind(&other),
        }),
    }
}

fn encode_value(path: &str, value: Value) -> Result<AttributeValue, ItemCodecError> {
    match value {
        Value::Null => Err(ItemCodecError::UnsupportedValue {
            path: path.to_string(),
        }),
        Value::Bool(flag) => Ok(AttributeValue::Bool(flag)),
        Value::Number(number) => Ok(AttributeValue::N(number.to_string())),
        Value::String(text) => Ok(AttributeValue::S(text)),
        Value::Array(values) => values
            .into_iter()
            .enumerate()
            .map(|(index, value)| encode_value(&format!("{path}[{index}]"), value))
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::L),
        Value::Object(fields) => fields
            .into_iter()
            .map(|(name, value)| {
                let attribute = encode_value(&format!("{path}.{name}"), value)?;
                Ok::<_, ItemCodecError>((name, attribute))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(AttributeValue::M),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::{to_item, AttributeValue, ItemCodecError};
    use serde_json::json;

    #[test]
    fn nested_values_keep_their_shape() {
        let item = to_item(&json!({
            "name": "a",
            "count": 3,
            "flags": [true, false],
            "meta": {"ratio": 1.5}
        }))
        .unwrap();

        assert_eq!(item["name"], AttributeValue::S("a".to_string()));
        assert_eq!(item["count"].as_i64(), Some(3));
        assert_eq!(
            item["flags"],
            AttributeValue::L(vec![AttributeValue::Bool(true), AttributeValue::Bool(false)])
        );
        match &item["meta"] {
            AttributeValue::M(meta) => assert_eq!(meta["ratio"], AttributeValue::N("1.5".into())),
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn nested_null_reports_full_path() {
        let err = to_item(&json!({"meta": {"tags": ["x", null]}})).unwrap_err();
        match err {
            ItemCodecError::UnsupportedValue { path } => assert_eq!(path, "meta.tags[1]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn scalar_record_is_rejected() {
        let err = to_item("just text").unwrap_err();
        assert!(matches!(err, ItemCodecError::NotAMap { kind: "string" }));
    }

    #[test]
    fn attribute_wire_shape_is_tagged() {
        let wire = serde_json::to_value(AttributeValue::from(7_i64)).unwrap();
        assert_eq!(wire, json!({"N": "7"}));
        let wire = serde_json::to_value(AttributeValue::from(true)).unwrap();
        assert_eq!(wire, json!({"BOOL": true}));
    }
}
