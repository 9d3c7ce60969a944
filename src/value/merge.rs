//! Pairwise merge of JSON mappings with a reserved-key guard.
//!
//! Decision table per source entry:
//!
//! | source value | result                                                    |
//! |--------------|-----------------------------------------------------------|
//! | array        | replaces the slot with a shallow copy                     |
//! | mapping      | deep-merged into the slot if it holds a non-empty mapping, |
//! |              | otherwise merged into a fresh mapping                     |
//! | scalar/null  | fills the slot only if it is missing, or vacant while the |
//! |              | source value is not                                       |
//!
//! Keys named `__proto__`, `constructor` or `prototype` are dropped at every
//! level that goes through `merge`.

use crate::Result;
use crate::value::clean::is_vacant;

use anyhow::{Context, bail};
use serde_json::{Map, Value};

const RESERVED_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Keys that are never copied or merged.
///
/// A `serde_json::Map` only holds its own entries, so the reserved names are
/// the whole guard.
pub fn is_unsafe_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Merge `source` over `target` into a fresh mapping. Neither input is modified.
pub fn merge(target: &Map<String, Value>, source: &Map<String, Value>) -> Map<String, Value> {
    let mut out: Map<String, Value> = target
        .iter()
        .filter(|(key, _)| !is_unsafe_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, source_value) in source {
        if is_unsafe_key(key) {
            continue;
        }

        match source_value {
            Value::Array(items) => {
                out.insert(key.clone(), Value::Array(items.clone()));
            }
            Value::Object(source_map) => {
                let merged = match out.get(key) {
                    Some(Value::Object(existing)) if !existing.is_empty() => {
                        merge(existing, source_map)
                    }
                    _ => merge(&Map::new(), source_map),
                };
                out.insert(key.clone(), Value::Object(merged));
            }
            scalar => {
                let take = match out.get(key) {
                    None => true,
                    Some(existing) => is_vacant(existing) && !is_vacant(scalar),
                };
                if take {
                    out.insert(key.clone(), scalar.clone());
                }
            }
        }
    }

    out
}

/// Fold raw samples, each a JSON object, into one representative document.
///
/// Samples are merged left to right, the accumulator always being the target.
pub fn merge_samples<S: AsRef<str>>(samples: &[S]) -> Result<Map<String, Value>> {
    let mut acc = Map::new();
    for (idx, sample) in samples.iter().enumerate() {
        let parsed: Value = serde_json::from_str(sample.as_ref())
            .with_context(|| format!("sample {} is not valid JSON", idx))?;
        let Value::Object(doc) = parsed else {
            bail!("sample {} is not a JSON object", idx);
        };
        acc = merge(&acc, &doc);
    }
    Ok(acc)
}
