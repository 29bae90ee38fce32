//! Progress tracker configuration.

use chrono::{Duration, FixedOffset};
use physio_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::persistence::{
    FileStore, KeyValueBackend, MemoryStore, ProgressBackend, StorageKeys, DEFAULT_KEY_PREFIX,
};

/// Complete progress configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Where progress is persisted
    pub storage: StorageConfig,

    /// Day boundaries and reporting windows
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageKind,

    /// Directory for the file backend
    pub directory: PathBuf,

    /// Prefix for the sessions/achievements/streaks record keys
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::File,
            directory: PathBuf::from("data/progress"),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Offset from UTC used to decide which calendar day a session falls on
    pub utc_offset_minutes: i32,

    /// Length of the weekly progress window (days)
    pub weekly_window_days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            weekly_window_days: 7,
        }
    }
}

impl CalendarConfig {
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            Error::Config(format!(
                "UTC offset of {} minutes is out of range",
                self.utc_offset_minutes
            ))
        })
    }

    pub fn weekly_window(&self) -> Duration {
        Duration::days(i64::from(self.weekly_window_days))
    }
}

impl ProgressConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables, e.g. `PHYSIO_STORAGE__BACKEND=memory`
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;

        settings.try_deserialize()
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("PHYSIO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(&self.storage.key_prefix)
    }

    pub fn build_backend(&self) -> Box<dyn ProgressBackend> {
        let keys = self.storage_keys();
        match self.storage.backend {
            StorageKind::Memory => Box::new(KeyValueBackend::with_keys(MemoryStore::new(), keys)),
            StorageKind::File => Box::new(KeyValueBackend::with_keys(
                FileStore::new(self.storage.directory.clone()),
                keys,
            )),
        }
    }
}
