//! SnapshotStore Trait - Key/Value Persistence Seam
//!
//! Charts are persisted as opaque string payloads under a key. The chart
//! service only depends on this trait, so a host can back it with whatever
//! storage it has.
//!
//! # Implementations
//!
//! - [`MemorySnapshotStore`]: process-local map, used in tests and previews
//! - [`FileSnapshotStore`]: one `{key}.json` file per key inside a directory
//!
//! Errors use `anyhow::Result`; the caller treats every failure as
//! non-fatal.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key/value storage for serialized snapshots
pub trait SnapshotStore: Send + Sync {
    /// Load the payload stored under `key`, `None` if nothing was saved yet
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `payload` under `key`, replacing any previous value
    fn save(&self, key: &str, payload: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one payload
    pub fn with_entry(key: impl Into<String>, payload: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.into(), payload.into());
        }
        store
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Directory-backed store
///
/// The directory is created on first save.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            bail!("invalid snapshot key: {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        // Readers only ever see a complete file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload).with_context(|| format!("failed to write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("failed to replace {}", path.display()));
        }
        Ok(())
    }
}
