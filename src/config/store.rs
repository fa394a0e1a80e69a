//! Persistent key/value settings
//!
//! One store is shared by every window of the running instance. Values are
//! JSON so sizes, positions, flags and theme names all round-trip through the
//! same interface. Readers always go back to the store instead of caching, so
//! windows converge on whatever was written last.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::AppIdentity;
use crate::constants::app;

/// Persisted mapping from string keys to values
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Read a typed value, falling back to `default` when the key is missing or
/// holds something of the wrong shape
pub fn read_or<T: DeserializeOwned>(store: &dyn SettingsStore, key: &str, default: T) -> T {
    match store.get(key) {
        Some(raw) => match serde_json::from_value(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Stored setting has unexpected type, using default");
                default
            }
        },
        None => default,
    }
}

/// Serialize and store a typed value
pub fn write<T: Serialize>(store: &mut dyn SettingsStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_value(value)
        .with_context(|| format!("Failed to serialize setting '{key}'"))?;
    store.set(key, raw)
}

/// Settings kept in memory only (tests and throwaway sessions)
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings persisted as a pretty-printed JSON object on disk
/// Every `set` writes through, so a crash never loses an applied setting
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// Default location: `<config dir>/<organization>/<application>.json`
    pub fn default_path(identity: &AppIdentity) -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(&identity.organization);
        path.push(format!("{}.{}", identity.application, app::SETTINGS_EXTENSION));
        path
    }

    /// Open the store scoped to the given application identity
    pub fn open(identity: &AppIdentity) -> Result<Self> {
        Self::open_at(Self::default_path(identity))
    }

    /// Open the store at an explicit path
    /// A missing file is an empty store; a malformed one is an error
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            info!(path = %path.display(), "No settings file found, starting with defaults");
            return Ok(Self { path, values: Map::new() });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let values = if contents.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str::<Map<String, Value>>(&contents)
                .with_context(|| format!("Failed to parse settings JSON from {}", path.display()))?
        };

        info!(path = %path.display(), keys = values.len(), "Loaded settings");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize settings to JSON")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings file to {}", self.path.display()))?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        if self.values.get(key) == Some(&value) {
            return Ok(());
        }
        debug!(key = %key, value = %value, "Writing setting");
        self.values.insert(key.to_string(), value);
        self.save()
    }
}
