//! Item types and id generation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique item identifier
///
/// Serialized as a bare JSON number, so integer timestamp ids written by
/// earlier versions still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Trimmed, never empty
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Item {
    /// New, not yet completed item. `text` must already be trimmed.
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Monotonic id counter
///
/// Never consults the clock, so rapid successive adds cannot collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Counter positioned past every id in `items`
    pub fn after(items: &[Item]) -> Self {
        let mut ids = Self::new();
        ids.advance_past(items);
        ids
    }

    /// Move the counter past every id in `items`; never moves it back
    pub fn advance_past(&mut self, items: &[Item]) {
        let past = items
            .iter()
            .filter_map(|item| item.id.0.checked_add(1))
            .max()
            .unwrap_or(1);
        self.next = self.next.max(past);
    }

    pub fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), ItemId(1));
        assert_eq!(ids.next_id(), ItemId(2));
        assert_eq!(ids.next_id(), ItemId(3));
    }

    #[test]
    fn test_after_skips_loaded_ids() {
        let items = vec![
            Item::new(ItemId(1_700_000_000_000), "old"),
            Item::new(ItemId(5), "older"),
        ];
        let mut ids = IdGenerator::after(&items);
        assert_eq!(ids.next_id(), ItemId(1_700_000_000_001));

        let mut empty = IdGenerator::after(&[]);
        assert_eq!(empty.next_id(), ItemId(1));
    }

    #[test]
    fn test_advance_past_never_moves_back() {
        let mut ids = IdGenerator::new();
        ids.next_id();
        ids.next_id();
        ids.next_id();

        // Reloading a list whose highest id was already handed out
        ids.advance_past(&[Item::new(ItemId(1), "kept")]);
        assert_eq!(ids.next_id(), ItemId(4));

        ids.advance_past(&[Item::new(ItemId(10), "loaded")]);
        assert_eq!(ids.next_id(), ItemId(11));

        ids.advance_past(&[]);
        assert_eq!(ids.next_id(), ItemId(12));
    }

    #[test]
    fn test_new_item_not_completed() {
        let item = Item::new(ItemId(1), "Buy milk");
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
    }
}
