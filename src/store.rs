//! Snapshot persistence
//!
//! A minimal key-value seam between the planner and wherever its state
//! lives. Each key holds one UTF-8 JSON snapshot that is replaced whole on
//! every write.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Snapshot key for the character pool.
pub const CHARACTERS_KEY: &str = "characters";
/// Snapshot key for the roster list.
pub const ROSTERS_KEY: &str = "rosters";
/// Snapshot key for the selected roster name.
pub const SELECTED_KEY: &str = "selected";

/// Key-value store holding whole snapshots.
pub trait SnapshotStore {
    /// Read the snapshot under `key`. A missing key is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the snapshot under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────
// File Store
// ─────────────────────────────────────────────────────────────────

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                trace!(path = %path.display(), bytes = content.len(), "Snapshot read");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::IoRead { path, source: e }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| Error::IoWrite {
                path: self.dir.clone(),
                source: e,
            })?;
            debug!(path = %self.dir.display(), "Created data directory");
        }

        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| Error::IoWrite {
            path: path.clone(),
            source: e,
        })?;
        trace!(path = %path.display(), bytes = value.len(), "Snapshot written");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
use std::collections::HashMap;

#[cfg(test)]
use parking_lot::Mutex;

/// In-process store, also counting writes per key.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<HashMap<String, usize>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a snapshot without counting it as a write.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Writes performed under `key` since creation.
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.lock().get(key).copied().unwrap_or(0)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

#[cfg(test)]
impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        *self.writes.lock().entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
impl<S: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
