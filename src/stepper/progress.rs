/// Resumable progress persistence
///
/// Saves and loads `current step + partial data` so an abandoned session can
/// be resumed. Storage failures never reach the caller: a failed save is
/// logged and swallowed, a failed or corrupt load degrades to "no progress".
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::StoreError;

/// Default expiry window for stored progress, in days
pub const DEFAULT_EXPIRY_DAYS: u32 = 7;

const MILLIS_PER_DAY: u64 = 86_400_000;

/// Persisted progress record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProgress<T> {
    /// Step the user was on when the record was written
    pub step: u32,

    /// Partial flow data collected so far
    pub data: Option<T>,

    /// Write time, epoch milliseconds
    pub timestamp: u64,
}

impl<T> StoredProgress<T> {
    /// Age of the record relative to `now` (epoch millis)
    pub fn age_millis(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    /// Whether the record has outlived the expiry window
    pub fn is_expired(&self, expiry_days: u32, now: u64) -> bool {
        self.age_millis(now) > u64::from(expiry_days) * MILLIS_PER_DAY
    }
}

/// Abstract key/value backend for progress records
pub trait ProgressStore {
    /// Read the raw value for a key, `None` if absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write the raw value for a key
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value for a key; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Current wall-clock time as epoch milliseconds
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Persist a progress record, overwriting any previous one.
///
/// Storage failures (quota, disabled storage) are logged and swallowed.
pub fn save_progress<T: Serialize>(
    store: &dyn ProgressStore,
    key: &str,
    step: u32,
    data: Option<T>,
) {
    let record = StoredProgress {
        step,
        data,
        timestamp: now_millis(),
    };

    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("[progress] failed to serialize record for {}: {}", key, e);
            return;
        }
    };

    if let Err(e) = store.set(key, &json) {
        log::warn!("[progress] failed to save record for {}: {}", key, e);
    }
}

/// Load a progress record.
///
/// Returns `None` if the record is absent, corrupt, or older than the
/// expiry window. Expired records are deleted from the store as a side
/// effect. Never fails.
pub fn load_progress<T: DeserializeOwned>(
    store: &dyn ProgressStore,
    key: &str,
    expiry_days: u32,
) -> Option<StoredProgress<T>> {
    let raw = store.get(key)?;

    let record: StoredProgress<T> = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("[progress] corrupt record for {}: {}", key, e);
            return None;
        }
    };

    if record.is_expired(expiry_days, now_millis()) {
        log::debug!("[progress] record for {} expired, deleting", key);
        let _ = store.remove(key);
        return None;
    }

    Some(record)
}

/// Delete a stored progress record. Idempotent.
pub fn clear_progress(store: &dyn ProgressStore, key: &str) {
    if let Err(e) = store.remove(key) {
        log::warn!("[progress] failed to clear record for {}: {}", key, e);
    }
}

/// In-memory store for tests and single-session use
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// File-backed store, one JSON file per key
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at an explicit directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform config directory
    pub fn in_config_dir() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("CaseWizard").join("progress")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl ProgressStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Write {
            key: key.to_string(),
            source: Box::new(e),
        })?;

        fs::write(self.path_for(key), value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            source: Box::new(e),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path).map_err(|e| StoreError::Remove {
            key: key.to_string(),
            source: Box::new(e),
        })
    }
}
