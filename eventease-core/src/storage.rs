//! Key/value persistence for the session store.
//!
//! Mirrors the browser's local storage: string keys mapping to string values.
//! `FileStorage` keeps them in a single JSON object on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{EventEaseError, EventEaseResult};

const STORAGE_FILENAME: &str = "storage.json";

pub trait Storage {
    fn get(&self, key: &str) -> EventEaseResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> EventEaseResult<()>;

    /// Remove a key. Returns whether anything was removed.
    fn remove(&mut self, key: &str) -> EventEaseResult<bool>;
}

/// In-memory storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> EventEaseResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EventEaseResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> EventEaseResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Storage backed by `<dir>/storage.json`, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file inside `dir`.
    ///
    /// A file that can't be read or parsed is discarded: the storage starts
    /// empty and the next write replaces it.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILENAME);

        let entries = if path.exists() {
            load_entries(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "discarding unreadable storage");
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "opened storage");

        FileStorage { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> EventEaseResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventEaseError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents).map_err(|e| {
            EventEaseError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        // Owner-only, the file holds the session token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

fn load_entries(path: &Path) -> EventEaseResult<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        EventEaseError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> EventEaseResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EventEaseResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> EventEaseResult<bool> {
        if self.entries.remove(key).is_none() {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }
}
