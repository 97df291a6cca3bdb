//! Key-value score persistence
//!
//! The session only ever needs `get(key)` (0 when absent) and `set(key, value)`.
//! Backends:
//! - `MemoryStore`: in-process map, for tests and throwaway runs
//! - `JsonFileStore`: JSON object on disk, written through on every set (native)
//! - `LocalStorageStore`: browser LocalStorage (WASM)

use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;

/// Persistent integer store keyed by name
pub trait ScoreStore {
    /// Stored value, or 0 if the key was never written
    fn get(&self, key: &str) -> i64;
    /// Store a value
    fn set(&mut self, key: &str, value: i64);
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn get(&self, key: &str) -> i64 {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: i64) {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    /// Number of `set` calls (lets tests see write-through)
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: i64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
    }
}

/// JSON file store (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Open (or create on first write) a store at `path`
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading scores from {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing scores in {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        log::info!("Score store at {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all values to disk
    pub fn flush(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing scores to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> i64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            log::warn!("Score not persisted: {e:#}");
        }
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore {
    prefix: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// Keys are stored as `{prefix}{key}`
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> i64 {
        Self::storage()
            .and_then(|s| s.get_item(&format!("{}{}", self.prefix, key)).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: i64) {
        match Self::storage() {
            Some(storage) => {
                let _ = storage.set_item(&format!("{}{}", self.prefix, key), &value.to_string());
            }
            None => log::warn!("LocalStorage unavailable, {key} not saved"),
        }
    }
}
