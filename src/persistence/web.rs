//! Browser LocalStorage backend (WASM)

use super::{PrefKey, PrefStore, PrefValue, StoreError};

/// One LocalStorage entry per key, values JSON-encoded
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    prefix: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new("stress_buster_prefs")
    }
}

impl LocalStorageStore {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".into()))
    }

    fn entry(&self, key: PrefKey) -> String {
        format!("{}.{}", self.prefix, key.as_str())
    }
}

impl PrefStore for LocalStorageStore {
    fn get(&self, key: PrefKey) -> Result<Option<PrefValue>, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(&self.entry(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: PrefKey, value: PrefValue) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(&value)?;
        storage
            .set_item(&self.entry(key), &json)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
