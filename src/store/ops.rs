//! Collection transforms
//!
//! Each mutation is a pure function from the current collection to the next
//! one. `None` means the input leaves the collection unchanged.

use super::item::{Item, ItemId};

/// Trimmed text, or `None` if nothing is left
pub fn normalize_text(raw: &str) -> Option<&str> {
    let text = raw.trim();
    (!text.is_empty()).then_some(text)
}

/// Append `item` at the end (display order = insertion order)
pub fn append(items: &[Item], item: Item) -> Vec<Item> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// Flip `completed` on the item with `id`, leaving every other item as is
pub fn toggle(items: &[Item], id: ItemId) -> Option<Vec<Item>> {
    let index = items.iter().position(|item| item.id == id)?;
    let mut next = items.to_vec();
    next[index].completed = !next[index].completed;
    Some(next)
}

/// Drop the item with `id`
pub fn remove(items: &[Item], id: ItemId) -> Option<Vec<Item>> {
    let index = items.iter().position(|item| item.id == id)?;
    let mut next = items.to_vec();
    next.remove(index);
    Some(next)
}

/// Drop every completed item
pub fn remove_completed(items: &[Item]) -> Option<Vec<Item>> {
    if !items.iter().any(|item| item.completed) {
        return None;
    }
    Some(items.iter().filter(|item| !item.completed).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        vec![
            Item::new(ItemId(1), "one"),
            Item::new(ItemId(2), "two"),
            Item::new(ItemId(3), "three"),
        ]
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Buy milk \n"), Some("Buy milk"));
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text(" \t\n "), None);
    }

    #[test]
    fn test_append_keeps_order() {
        let next = append(&sample(), Item::new(ItemId(4), "four"));
        let ids: Vec<u64> = next.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_toggle_touches_only_target() {
        let items = sample();
        let next = toggle(&items, ItemId(2)).unwrap();

        assert!(next[1].completed);
        assert_eq!(next[0], items[0]);
        assert_eq!(next[2], items[2]);

        let back = toggle(&next, ItemId(2)).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_unknown_id_is_unchanged() {
        assert!(toggle(&sample(), ItemId(42)).is_none());
        assert!(remove(&sample(), ItemId(42)).is_none());
    }

    #[test]
    fn test_remove() {
        let next = remove(&sample(), ItemId(1)).unwrap();
        let ids: Vec<u64> = next.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_remove_completed() {
        let mut items = sample();
        assert!(remove_completed(&items).is_none());

        items[0].completed = true;
        items[2].completed = true;
        let next = remove_completed(&items).unwrap();
        assert_eq!(next, vec![Item::new(ItemId(2), "two")]);
    }
}
