//! One collection under one storage key

use thiserror::Error;

use super::backend::{StorageBackend, StorageError};
use super::codec;
use crate::store::Item;

/// A failed durable write
///
/// Recoverable: the caller keeps its in-memory state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode items: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Binds a storage backend to the fixed key the collection lives under
#[derive(Debug)]
pub struct PersistenceAdapter<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> PersistenceAdapter<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Storage key the collection is written under
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Encode the full collection and overwrite the stored value
    pub fn save(&mut self, items: &[Item]) -> Result<(), PersistError> {
        let json = codec::encode(items)?;
        self.backend.set_item(&self.key, &json)?;
        log::debug!("Saved {} items under {:?}", items.len(), self.key);
        Ok(())
    }

    /// Raw stored encoding, `None` if nothing was ever saved
    ///
    /// Decoding is left to the caller.
    pub fn load(&self) -> Result<Option<String>, StorageError> {
        self.backend.get_item(&self.key)
    }

    /// Remove the stored value entirely
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.backend.remove_item(&self.key)?;
        log::info!("Cleared saved items under {:?}", self.key);
        Ok(())
    }
}
