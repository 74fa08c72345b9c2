//! Save/load of the item collection
//!
//! Features:
//! - Plain JSON array under one fixed storage key
//! - Validation on decode (unique ids, non-blank text)
//! - Pluggable key-value backends (memory here, LocalStorage/file in `platform`)

pub mod adapter;
pub mod backend;
pub mod codec;

pub use adapter::{PersistError, PersistenceAdapter};
pub use backend::{MemoryBackend, StorageBackend, StorageError};
pub use codec::{DecodeError, decode, encode};
