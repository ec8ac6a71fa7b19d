//! Preference store port
//!
//! The core never reaches for storage globally. Everything persisted goes
//! through a `PrefStore` handed to the game: sound/vibration toggles and the
//! daily challenge counters, shared with the host's other screens.
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, headless sessions)
//! - `JsonFileStore`: one JSON object on disk (native)
//! - `LocalStorageStore`: browser LocalStorage, one entry per key (WASM)

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Every key the core reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrefKey {
    SoundOn,
    VibrationOn,
    LastPlayDate,
    DailyProgress,
    DailyGoal,
    UnlockSuperSplash,
    /// Reserved for the host; the core never sets it
    UnlockGoldenBubble,
}

impl PrefKey {
    pub const ALL: [PrefKey; 7] = [
        PrefKey::SoundOn,
        PrefKey::VibrationOn,
        PrefKey::LastPlayDate,
        PrefKey::DailyProgress,
        PrefKey::DailyGoal,
        PrefKey::UnlockSuperSplash,
        PrefKey::UnlockGoldenBubble,
    ];

    /// Storage key, shared with the host's settings screen
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::SoundOn => "sound_on",
            PrefKey::VibrationOn => "vibration_on",
            PrefKey::LastPlayDate => "last_play_date",
            PrefKey::DailyProgress => "daily_progress",
            PrefKey::DailyGoal => "daily_goal",
            PrefKey::UnlockSuperSplash => "unlock_super_splash",
            PrefKey::UnlockGoldenBubble => "unlock_golden_bubble",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// A stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PrefValue {
    fn kind(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "bool",
            PrefValue::Int(_) => "int",
            PrefValue::Str(_) => "string",
        }
    }
}

/// Storage failure at the platform seam
#[derive(Debug)]
pub enum StoreError {
    /// Backing storage cannot be reached
    Unavailable(String),
    Io(std::io::Error),
    Codec(serde_json::Error),
    /// Stored value has the wrong type for the key
    TypeMismatch {
        key: PrefKey,
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(why) => write!(f, "preference storage unavailable: {why}"),
            StoreError::Io(e) => write!(f, "preference file error: {e}"),
            StoreError::Codec(e) => write!(f, "preference encoding error: {e}"),
            StoreError::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "preference {} holds a {found}, expected {expected}",
                key.as_str()
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e)
    }
}

/// Key-value preference port
///
/// Each call is a complete read or write; nothing is cached by callers.
pub trait PrefStore {
    fn get(&self, key: PrefKey) -> Result<Option<PrefValue>, StoreError>;
    fn set(&mut self, key: PrefKey, value: PrefValue) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<PrefKey, PrefValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: PrefKey, value: PrefValue) -> Self {
        self.values.insert(key, value);
        self
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: PrefKey) -> Result<Option<PrefValue>, StoreError> {
        Ok(self.values.get(&key).cloned())
    }

    fn set(&mut self, key: PrefKey, value: PrefValue) -> Result<(), StoreError> {
        self.values.insert(key, value);
        Ok(())
    }
}

fn read_or<T>(
    store: &impl PrefStore,
    key: PrefKey,
    default: T,
    expected: &'static str,
    extract: impl FnOnce(PrefValue) -> Result<T, PrefValue>,
) -> T {
    match store.get(key) {
        Ok(None) => default,
        Ok(Some(value)) => match extract(value) {
            Ok(v) => v,
            Err(other) => {
                let err = StoreError::TypeMismatch {
                    key,
                    expected,
                    found: other.kind(),
                };
                log::warn!("{err}, using default");
                default
            }
        },
        Err(e) => {
            log::warn!("Failed to read {}: {e}, using default", key.as_str());
            default
        }
    }
}

/// Read a bool, substituting `default` when missing or unreadable
pub fn read_bool(store: &impl PrefStore, key: PrefKey, default: bool) -> bool {
    read_or(store, key, default, "bool", |v| match v {
        PrefValue::Bool(b) => Ok(b),
        other => Err(other),
    })
}

/// Read an integer, substituting `default` when missing or unreadable
pub fn read_int(store: &impl PrefStore, key: PrefKey, default: i64) -> i64 {
    read_or(store, key, default, "int", |v| match v {
        PrefValue::Int(i) => Ok(i),
        other => Err(other),
    })
}

/// Read a string, substituting `default` when missing or unreadable
pub fn read_string(store: &impl PrefStore, key: PrefKey, default: &str) -> String {
    read_or(store, key, default.to_string(), "string", |v| match v {
        PrefValue::Str(s) => Ok(s),
        other => Err(other),
    })
}

/// Write a value, logging instead of failing
pub fn write_or_warn(store: &mut impl PrefStore, key: PrefKey, value: PrefValue) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Failed to persist {}: {e}", key.as_str());
    }
}
