//! Recursive pruning of values that carry no information.
//!
//! Null and blank strings are empty. Mappings are empty when nothing survives
//! cleaning their entries. Arrays are kept as-is, even when empty: `[]` means
//! "known to have zero items", which is different from a missing field.

use serde_json::{Map, Value};

/// Clean `value`, returning `None` when nothing informative is left.
///
/// Strings are kept untrimmed when they have any non-whitespace content.
/// Numbers and booleans always survive, including `0` and `false`.
pub fn clean_empty_values(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(_) => Some(value.clone()),
        Value::Object(map) => {
            let cleaned: Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| clean_empty_values(v).map(|v| (k.clone(), v)))
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Object(cleaned))
            }
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Some(value.clone()),
    }
}

/// Whether an existing merge slot is vacant and may be taken by a later value.
///
/// Wider than cleaning: an empty array or mapping leaves the slot open too.
pub fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
