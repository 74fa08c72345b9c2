//! Canonical item collection
//!
//! The store owns the only copy of the list. Every committed mutation is
//! written through the persistence adapter immediately; a failed write is
//! kept as a warning and never rolls the mutation back.

use std::fmt;

use super::item::{IdGenerator, Item, ItemId};
use super::ops;
use crate::config::StoreConfig;
use crate::persistence::{PersistError, PersistenceAdapter, StorageBackend, codec};

/// Notification delivered to subscribers
#[derive(Debug)]
pub enum StoreEvent<'a> {
    /// `initialize` replaced the collection with what storage held
    Loaded(&'a [Item]),
    /// A mutation was committed in memory
    Changed(&'a [Item]),
    /// The current collection reached storage
    Persisted,
    /// Writing the current collection failed; in-memory state stands
    PersistFailed(&'a PersistError),
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent<'_>)>;

/// Todo list state, kept in sync with one durable key
pub struct TodoStore<B> {
    adapter: PersistenceAdapter<B>,
    persist_unchanged: bool,
    items: Vec<Item>,
    ids: IdGenerator,
    persist_error: Option<PersistError>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<B: StorageBackend> TodoStore<B> {
    /// Empty store bound to `adapter`. Call `initialize` to load saved items.
    pub fn new(adapter: PersistenceAdapter<B>) -> Self {
        Self {
            adapter,
            persist_unchanged: false,
            items: Vec::new(),
            ids: IdGenerator::new(),
            persist_error: None,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Empty store over `backend`, keyed and tuned by `config`
    pub fn from_config(backend: B, config: &StoreConfig) -> Self {
        let mut store = Self::new(PersistenceAdapter::new(backend, config.storage_key.as_str()));
        store.persist_unchanged = config.persist_unchanged;
        store
    }

    /// `from_config` followed by `initialize`
    pub fn open(backend: B, config: &StoreConfig) -> Self {
        let mut store = Self::from_config(backend, config);
        store.initialize();
        store
    }

    /// Load the saved collection, falling back to an empty one
    ///
    /// Missing, unreadable or invalid data all start the list empty; the
    /// cause is logged, never returned. Calling this again reloads from
    /// storage.
    pub fn initialize(&mut self) {
        let key = self.adapter.key();
        let items = match self.adapter.load() {
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(items) => {
                    log::info!("Loaded {} items from {:?}", items.len(), key);
                    items
                }
                Err(err) => {
                    log::warn!("Discarding saved items under {:?}: {}", key, err);
                    Vec::new()
                }
            },
            Ok(None) => {
                log::info!("No saved items under {:?}, starting fresh", key);
                Vec::new()
            }
            Err(err) => {
                log::warn!("Could not read {:?}, starting fresh: {}", key, err);
                Vec::new()
            }
        };

        // Ids handed out earlier in this process stay retired across reloads
        self.ids.advance_past(&items);
        self.items = items;
        self.persist_error = None;
        emit(&mut self.listeners, &StoreEvent::Loaded(&self.items));
    }

    /// Append a new item with the trimmed `raw_text`
    ///
    /// Returns the new id, or `None` (and changes nothing) if the text is
    /// empty after trimming.
    pub fn add(&mut self, raw_text: &str) -> Option<ItemId> {
        let Some(text) = ops::normalize_text(raw_text) else {
            log::debug!("Ignoring empty item text");
            self.commit(None);
            return None;
        };

        let id = self.fresh_id();
        let next = ops::append(&self.items, Item::new(id, text));
        self.commit(Some(next));
        log::debug!("Added item {}", id);
        Some(id)
    }

    /// Flip `completed` on the item with `id`. `false` if there is none.
    pub fn toggle_completed(&mut self, id: ItemId) -> bool {
        let next = ops::toggle(&self.items, id);
        let changed = self.commit(next);
        if changed {
            log::debug!("Toggled item {}", id);
        }
        changed
    }

    /// Delete the item with `id`. `false` if there is none.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let next = ops::remove(&self.items, id);
        let changed = self.commit(next);
        if changed {
            log::debug!("Removed item {}", id);
        }
        changed
    }

    /// Delete every completed item in one write; returns how many went
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        let next = ops::remove_completed(&self.items);
        self.commit(next);
        let removed = before - self.items.len();
        if removed > 0 {
            log::debug!("Cleared {} completed items", removed);
        }
        removed
    }

    /// Current collection in display order
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items still to do
    pub fn remaining_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Write the current collection again (e.g. after freeing storage)
    pub fn persist(&mut self) -> Result<(), &PersistError> {
        self.write();
        match &self.persist_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Error from the most recent write, cleared by the next successful one
    pub fn last_persist_error(&self) -> Option<&PersistError> {
        self.persist_error.as_ref()
    }

    pub fn take_persist_error(&mut self) -> Option<PersistError> {
        self.persist_error.take()
    }

    /// Register `listener` for every subsequent `StoreEvent`
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn adapter(&self) -> &PersistenceAdapter<B> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut PersistenceAdapter<B> {
        &mut self.adapter
    }

    /// Tear the store down, handing back its adapter
    pub fn into_adapter(self) -> PersistenceAdapter<B> {
        self.adapter
    }

    /// Id not used by any current item
    fn fresh_id(&mut self) -> ItemId {
        loop {
            let id = self.ids.next_id();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    /// Install `next` (if any) and write it. Returns whether anything changed.
    fn commit(&mut self, next: Option<Vec<Item>>) -> bool {
        let changed = next.is_some();
        if let Some(items) = next {
            self.items = items;
            emit(&mut self.listeners, &StoreEvent::Changed(&self.items));
        }
        if changed || self.persist_unchanged {
            self.write();
        }
        changed
    }

    fn write(&mut self) {
        match self.adapter.save(&self.items) {
            Ok(()) => {
                if self.persist_error.take().is_some() {
                    log::info!("Saving to {:?} works again", self.adapter.key());
                }
                emit(&mut self.listeners, &StoreEvent::Persisted);
            }
            Err(err) => {
                log::warn!(
                    "Could not save {} items, keeping them in memory only: {}",
                    self.items.len(),
                    err
                );
                emit(&mut self.listeners, &StoreEvent::PersistFailed(&err));
                self.persist_error = Some(err);
            }
        }
    }
}

fn emit(listeners: &mut [(SubscriptionId, Listener)], event: &StoreEvent<'_>) {
    for (_, listener) in listeners.iter_mut() {
        listener(event);
    }
}

impl<B: fmt::Debug> fmt::Debug for TodoStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("adapter", &self.adapter)
            .field("persist_unchanged", &self.persist_unchanged)
            .field("items", &self.items)
            .field("persist_error", &self.persist_error)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
