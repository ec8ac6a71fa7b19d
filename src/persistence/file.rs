//! JSON file backend (native)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{PrefKey, PrefStore, PrefValue, StoreError};

/// All preferences in one JSON object, rewritten atomically on every set
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> Result<BTreeMap<String, PrefValue>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_map(&self, map: &BTreeMap<String, PrefValue>) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(map)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PrefStore for JsonFileStore {
    fn get(&self, key: PrefKey) -> Result<Option<PrefValue>, StoreError> {
        Ok(self.load_map()?.remove(key.as_str()))
    }

    fn set(&mut self, key: PrefKey, value: PrefValue) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every write
        let mut map = self.load_map().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable {}: {e}", self.path.display());
            BTreeMap::new()
        });
        map.insert(key.as_str().to_string(), value);
        self.save_map(&map)
    }
}
