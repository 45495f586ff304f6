//! File-backed key-value store.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::error::{Result, StoreError};
use super::store::KeyValueStore;

/// Key-value store persisted to a single file.
///
/// # File Format
///
/// The whole map is stored as one bincode blob. Every write rewrites the file
/// through a temp file and an atomic rename, so a crash leaves either the old
/// or the new map on disk, never a torn one.
///
/// An unreadable blob is logged and treated as an empty store; the next write
/// replaces it.
pub struct FileStore {
    path: PathBuf,
    entries: FxHashMap<String, String>,
}

impl FileStore {
    /// Open (or create) a store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let bytes = fs::read(&path)?;
            match decode(&bytes) {
                Ok(entries) => {
                    tracing::debug!("Loaded {} keys from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    tracing::warn!("Ignoring unreadable store {}: {}", path.display(), e);
                    FxHashMap::default()
                }
            }
        } else {
            FxHashMap::default()
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("bin.tmp")
    }

    fn flush(&self) -> Result<()> {
        let temp_path = self.temp_path();

        let bytes = bincode::serialize(&self.entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved {} keys to {}", self.entries.len(), self.path.display());

        Ok(())
    }
}

fn decode(bytes: &[u8]) -> Result<FxHashMap<String, String>> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corrupted(e.to_string()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), value.clone());
        }
        self.flush()
    }
}
