//! Durable encoding of the item collection
//!
//! `[ { "id": 1, "text": "Buy milk", "completed": false }, ... ]`
//!
//! No version field; the empty collection is `[]`.

use std::collections::HashSet;

use thiserror::Error;

use crate::store::{Item, ItemId};

/// Why a stored encoding could not be turned back into a collection
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, or not an array of items
    #[error("malformed item collection: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("item {0} has empty text")]
    EmptyText(ItemId),
}

/// Serialize the collection in display order
pub fn encode(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parse and validate a stored collection
///
/// The whole collection is rejected if any item breaks an invariant, so the
/// caller never sees a partially trusted list.
pub fn decode(raw: &str) -> Result<Vec<Item>, DecodeError> {
    let items: Vec<Item> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id) {
            return Err(DecodeError::DuplicateId(item.id));
        }
        if item.text.trim().is_empty() {
            return Err(DecodeError::EmptyText(item.id));
        }
    }

    Ok(items)
}
