//! JavaScript-facing widget API
//!
//! For hosts that render the list themselves: every call maps onto one
//! `TodoStore` operation, and `list()` hands back the durable JSON shape.

use wasm_bindgen::prelude::*;

use super::storage::LocalStorageBackend;
use crate::config::StoreConfig;
use crate::persistence::codec;
use crate::store::{ItemId, TodoStore};

#[wasm_bindgen]
pub struct TodoWidget {
    store: TodoStore<LocalStorageBackend>,
}

#[wasm_bindgen]
impl TodoWidget {
    /// Bind to LocalStorage under `storage_key` (default `"todos"`)
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key: Option<String>) -> Result<TodoWidget, JsValue> {
        let mut config = StoreConfig::default();
        if let Some(key) = storage_key {
            config = config.with_storage_key(key);
        }

        let backend =
            LocalStorageBackend::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            store: TodoStore::from_config(backend, &config),
        })
    }

    pub fn initialize(&mut self) {
        self.store.initialize();
    }

    /// New item id, or `undefined` for blank text
    ///
    /// Ids are exact JS numbers up to `Number.MAX_SAFE_INTEGER` (2^53 - 1);
    /// an id beyond that is reported as `undefined` even though the item
    /// was added.
    pub fn add(&mut self, text: &str) -> Option<f64> {
        self.store.add(text).and_then(id_to_js)
    }

    #[wasm_bindgen(js_name = toggleCompleted)]
    pub fn toggle_completed(&mut self, id: f64) -> bool {
        js_id(id).is_some_and(|id| self.store.toggle_completed(id))
    }

    pub fn remove(&mut self, id: f64) -> bool {
        js_id(id).is_some_and(|id| self.store.remove(id))
    }

    #[wasm_bindgen(js_name = clearCompleted)]
    pub fn clear_completed(&mut self) -> usize {
        self.store.clear_completed()
    }

    /// Current items as a JSON array string
    pub fn list(&self) -> Result<String, JsValue> {
        codec::encode(self.store.list()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn remaining(&self) -> usize {
        self.store.remaining_count()
    }

    /// Message from the last failed save, if saving is currently failing
    #[wasm_bindgen(js_name = lastWarning)]
    pub fn last_warning(&self) -> Option<String> {
        self.store.last_persist_error().map(|e| e.to_string())
    }
}

/// `Number.MAX_SAFE_INTEGER`
const MAX_SAFE_ID: u64 = (1 << 53) - 1;

fn id_to_js(id: ItemId) -> Option<f64> {
    (id.0 <= MAX_SAFE_ID).then(|| id.0 as f64)
}

/// JS numbers are f64; only whole numbers in `0..=MAX_SAFE_INTEGER` name an
/// item exactly
fn js_id(raw: f64) -> Option<ItemId> {
    let exact = raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= MAX_SAFE_ID as f64;
    exact.then(|| ItemId(raw as u64))
}
