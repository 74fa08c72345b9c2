//! Durable storage backends per platform
//!
//! - wasm32: `window.localStorage`
//! - native: one file per key in a directory

use crate::persistence::{StorageBackend, StorageError};

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageBackend {
    /// Bind to the page's LocalStorage
    ///
    /// Fails when there is no window or storage is disabled (e.g. some
    /// private browsing modes).
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    use wasm_bindgen::JsCast;

    // QuotaExceededError arrives as a DOMException, which is an Error
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    StorageError::Rejected(message)
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileBackend;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{StorageBackend, StorageError};

    /// Stores each key as `<dir>/<key>.json`
    ///
    /// Writes go to a temp file first and are renamed into place, so a crash
    /// mid-write leaves the previous value intact.
    #[derive(Debug, Clone)]
    pub struct FileBackend {
        dir: PathBuf,
    }

    impl FileBackend {
        /// The directory is created on first write
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
            let valid = !key.is_empty()
                && key != "."
                && key != ".."
                && !key.contains(['/', '\\', '\0']);
            if !valid {
                return Err(StorageError::Rejected(format!(
                    "invalid storage key {:?}",
                    key
                )));
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl StorageBackend for FileBackend {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            match fs::read_to_string(self.path_for(key)?) {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let path = self.path_for(key)?;
            fs::create_dir_all(&self.dir)?;

            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            match fs::remove_file(self.path_for(key)?) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }

}
