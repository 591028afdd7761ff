//! Inventory domain: persistent key-value backends.
//!
//! `PrefsFile` keeps every key in one JSON document and replaces the file
//! atomically on `flush`, so all writes made between two flushes land
//! together or not at all. `MemoryPrefs` is the in-process equivalent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Failed to access prefs file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Prefs file {path} is corrupt: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable string/int key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&mut self, key: &str, value: &str);
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn set_int(&mut self, key: &str, value: i64);
    fn delete_key(&mut self, key: &str);
    /// Every string key starting with `prefix`.
    fn string_keys_with_prefix(&self, prefix: &str) -> Vec<String>;
    /// Make every write since the last flush durable.
    fn flush(&mut self) -> Result<(), PrefsError>;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
struct PrefsData {
    #[serde(default)]
    strings: BTreeMap<String, String>,
    #[serde(default)]
    ints: BTreeMap<String, i64>,
}

impl PrefsData {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.ints.get(key).copied().unwrap_or(default)
    }

    fn delete_key(&mut self, key: &str) {
        self.strings.remove(key);
        self.ints.remove(key);
    }

    fn string_keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.strings
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

// ============================================================================
// File backend
// ============================================================================

pub struct PrefsFile {
    path: PathBuf,
    data: PrefsData,
    dirty: bool,
}

impl PrefsFile {
    /// Open the prefs file, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let data = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| PrefsError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| PrefsError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            PrefsData::default()
        };

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self) -> Result<(), PrefsError> {
        let io_err = |source| PrefsError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.data).map_err(|source| PrefsError::Parse {
            path: self.path.display().to_string(),
            source,
        })?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, json).map_err(io_err)?;
        fs::rename(&staging, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for PrefsFile {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.data.get_string(key, default)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.data.strings.insert(key.to_string(), value.to_string());
        self.dirty = true;
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.data.get_int(key, default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.data.ints.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn delete_key(&mut self, key: &str) {
        self.data.delete_key(key);
        self.dirty = true;
    }

    fn string_keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.data.string_keys_with_prefix(prefix)
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        if !self.dirty {
            return Ok(());
        }
        self.write_atomically()?;
        self.dirty = false;
        Ok(())
    }
}

// ============================================================================
// Memory backend
// ============================================================================

/// In-memory store. `durable` holds the state as of the last flush so a
/// crash can be simulated by discarding unflushed writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    live: PrefsData,
    durable: PrefsData,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every write made since the last flush.
    pub fn simulate_crash(&mut self) {
        self.live = self.durable.clone();
    }

    pub fn has_unflushed_writes(&self) -> bool {
        self.live != self.durable
    }
}

impl KeyValueStore for MemoryPrefs {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.live.get_string(key, default)
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.live.strings.insert(key.to_string(), value.to_string());
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.live.get_int(key, default)
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.live.ints.insert(key.to_string(), value);
    }

    fn delete_key(&mut self, key: &str) {
        self.live.delete_key(key);
    }

    fn string_keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.live.string_keys_with_prefix(prefix)
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        self.durable = self.live.clone();
        Ok(())
    }
}
