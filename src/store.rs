//! Durable key-value storage for the persisted session record.
//!
//! DESIGN
//! ======
//! The store is a flat string-to-string map, the same shape as browser
//! `localStorage`. Writes and removals are batched so the session record's
//! three keys always land (or disappear) together.
//!
//! TRADE-OFFS
//! ==========
//! `FileStore` rewrites the whole file on every batch. The map holds three
//! small keys, so a full rewrite through a temp file and rename is cheaper
//! to reason about than partial updates.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key holding the JSON-serialized `User`.
pub const USER_KEY: &str = "user";
/// Key holding the opaque access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key holding the opaque refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// All keys that make up the persisted session record.
pub const SESSION_KEYS: [&str; 3] = [USER_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not a JSON object: {0}")]
    Format(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store that survives process restarts.
///
/// Implementations must apply each `set_many`/`remove_many` batch as a unit:
/// a reader never observes half of a batch.
pub trait KeyValueStore: Send + Sync {
    /// Read a single key.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write every `(key, value)` pair in one batch.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

    /// Remove every key in one batch. Missing keys are ignored.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError>;

    /// Drop every entry, including ones that cannot be parsed.
    fn reset(&self) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store. Contents are lost on drop; useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Seed a store with existing entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Mutex::new(map) }
    }

    /// Snapshot of every stored key.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut map = self.lock();
        for (key, value) in entries {
            map.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut map = self.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        self.lock().clear();
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// JSON-file-backed store.
///
/// The file holds one JSON object of string values. A missing file reads as
/// an empty store. A file holding anything else fails every read and batch
/// with `StoreError::Format` until `reset` overwrites it. Every batch is written to `<path>.tmp` and renamed over
/// the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), guard: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let body = serde_json::to_vec_pretty(map)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&body)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.guard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut map = self.read_map()?;
        mutate(&mut map);
        self.write_map(&map)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(self.read_map()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert((*key).to_owned(), (*value).to_owned());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        self.update(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }

    fn reset(&self) -> Result<(), StoreError> {
        let _guard = self.guard.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        self.write_map(&BTreeMap::new())
    }
}
