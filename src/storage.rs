//! The single persisted slot a saved game lives in.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Synchronous key/blob storage with last-write-wins semantics.
pub trait SnapshotStore: Send {
    /// Blob stored under `key`, or `None` if the key is absent.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
    /// Replace whatever is stored under `key`.
    fn write(&mut self, key: &str, blob: &[u8]) -> io::Result<()>;
    /// Remove `key` entirely. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Process-local store, used by tests and `sim`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &[u8]) -> io::Result<()> {
        self.slots.insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, blob: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename so a reader never sees half a blob.
        let tmp = self.dir.join(format!(".{}.tmp", key));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, self.path(key))
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
