//! Durable progress storage.
//!
//! Progress is kept as three independent JSON records in a key-value store:
//!
//! - `<prefix>Sessions`: ordered session log
//! - `<prefix>Achievements`: unlocked achievements
//! - `<prefix>Streaks`: `{current, longest}`
//!
//! Each record loads on its own. A missing or unreadable record falls back to
//! its empty default without affecting the others. Saves write all three or,
//! on failure, put back whatever was stored before.

use parking_lot::RwLock;
use physio_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::achievements::Achievement;
use crate::session::Session;
use crate::streak::StreakState;

pub const DEFAULT_KEY_PREFIX: &str = "physioVeda";

/// Minimal string key-value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-process store. Writes can be made to fail for testing error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence(format!("write rejected for key {key}")));
        }
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence(format!("remove rejected for key {key}")));
        }
        self.entries.write().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;

        // Write-then-rename so readers never see a truncated record
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, value)?;
        std::fs::rename(&staging, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Everything the progress tracker persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub sessions: Vec<Session>,
    pub achievements: Vec<Achievement>,
    pub streaks: StreakState,
}

/// Loads and saves the complete progress state
pub trait ProgressBackend: Send + Sync {
    /// Never fails: absent or corrupt data loads as empty state
    fn load(&self) -> ProgressState;

    fn save(&self, state: &ProgressState) -> Result<()>;
}

impl<B: ProgressBackend + ?Sized> ProgressBackend for Box<B> {
    fn load(&self) -> ProgressState {
        (**self).load()
    }

    fn save(&self, state: &ProgressState) -> Result<()> {
        (**self).save(state)
    }
}

impl<B: ProgressBackend + ?Sized> ProgressBackend for Arc<B> {
    fn load(&self) -> ProgressState {
        (**self).load()
    }

    fn save(&self, state: &ProgressState) -> Result<()> {
        (**self).save(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub sessions: String,
    pub achievements: String,
    pub streaks: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            sessions: format!("{prefix}Sessions"),
            achievements: format!("{prefix}Achievements"),
            streaks: format!("{prefix}Streaks"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// [`ProgressBackend`] over any [`KeyValueStore`]
#[derive(Debug)]
pub struct KeyValueBackend<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> KeyValueBackend<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Puts back the values stored before a failed save
    fn restore<'a>(&self, records: impl Iterator<Item = (&'a str, &'a Option<String>)>) {
        for (key, prior) in records {
            let restored = match prior {
                Some(raw) => self.store.set(key, raw),
                None => self.store.remove(key),
            };
            if let Err(e) = restored {
                tracing::warn!(key, "Failed to restore progress record: {}", e);
            }
        }
    }

    fn load_record<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key, "Discarding corrupt progress record: {}", e);
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, "Failed to read progress record: {}", e);
                T::default()
            }
        }
    }
}

impl<S: KeyValueStore> ProgressBackend for KeyValueBackend<S> {
    fn load(&self) -> ProgressState {
        let streaks: StreakState = self.load_record(&self.keys.streaks);

        ProgressState {
            sessions: self.load_record(&self.keys.sessions),
            achievements: self.load_record(&self.keys.achievements),
            streaks: StreakState::new(streaks.current, streaks.longest),
        }
    }

    fn save(&self, state: &ProgressState) -> Result<()> {
        // Serialize everything before touching the store
        let records = [
            (self.keys.sessions.as_str(), serde_json::to_string(&state.sessions)?),
            (self.keys.achievements.as_str(), serde_json::to_string(&state.achievements)?),
            (self.keys.streaks.as_str(), serde_json::to_string(&state.streaks)?),
        ];

        let mut previous = Vec::with_capacity(records.len());
        for (key, _) in &records {
            previous.push(self.store.get(key)?);
        }

        for (written, (key, value)) in records.iter().enumerate() {
            if let Err(e) = self.store.set(key, value) {
                self.restore(records[..written].iter().map(|(key, _)| *key).zip(&previous));
                return Err(e);
            }
        }
        Ok(())
    }
}
