//! Store configuration
//!
//! Kept out of the durable encoding; a host sets it once at startup.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_STORAGE_KEY;

/// How a `TodoStore` binds to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the collection is stored under
    pub storage_key: String,
    /// Write even when a mutation turned out to be a no-op
    pub persist_unchanged: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist_unchanged: false,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_persist_unchanged(mut self, persist_unchanged: bool) -> Self {
        self.persist_unchanged = persist_unchanged;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new();
        assert_eq!(config.storage_key, "todos");
        assert!(!config.persist_unchanged);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new()
            .with_storage_key("groceries")
            .with_persist_unchanged(true);
        assert_eq!(config.storage_key, "groceries");
        assert!(config.persist_unchanged);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"persist_unchanged":true}"#).unwrap();
        assert_eq!(config.storage_key, "todos");
        assert!(config.persist_unchanged);
    }
}
