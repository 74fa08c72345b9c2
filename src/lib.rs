//! Todo Keep - a todo list that survives page reloads
//!
//! Core modules:
//! - `store`: The item collection and its add/toggle/remove operations
//! - `persistence`: Durable JSON encoding under one storage key
//! - `platform`: Browser/native logging, storage backends and JS bindings
//! - `config`: Storage key and write policy

pub mod config;
pub mod persistence;
pub mod platform;
pub mod store;

pub use config::StoreConfig;
pub use persistence::{
    MemoryBackend, PersistError, PersistenceAdapter, StorageBackend, StorageError,
};
pub use store::{Item, ItemId, StoreEvent, SubscriptionId, TodoStore};

/// Shared constants
pub mod consts {
    /// Storage key used when none is configured
    pub const DEFAULT_STORAGE_KEY: &str = "todos";
}
