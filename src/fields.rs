//! Field catalog: one representative cleaned value per top-level field.
//!
//! Documents are folded in order. The first document to supply a non-empty
//! value for a key fixes it; a key whose value cleans to nothing stays open for
//! later documents.

use crate::value::clean_empty_values;

use serde_json::{Map, Value};

pub type FieldCatalog = Map<String, Value>;

/// Fold one document payload into the catalog. `None` contributes nothing.
pub fn fold_fields(mut catalog: FieldCatalog, payload: Option<&Map<String, Value>>) -> FieldCatalog {
    let Some(payload) = payload else {
        return catalog;
    };

    for (key, value) in payload {
        if catalog.contains_key(key) {
            continue;
        }
        if let Some(cleaned) = clean_empty_values(value) {
            catalog.insert(key.clone(), cleaned);
        }
    }
    catalog
}

/// Build a catalog from payloads in document order.
pub fn extract_unique_fields<'a, I>(payloads: I) -> FieldCatalog
where
    I: IntoIterator<Item = Option<&'a Map<String, Value>>>,
{
    let catalog = payloads.into_iter().fold(FieldCatalog::new(), fold_fields);
    tracing::debug!(fields = catalog.len(), "extracted unique fields");
    catalog
}
