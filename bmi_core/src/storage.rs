//! Key-value storage collaborators for persisted blobs.
//!
//! The history log is stored as a single string under a fixed key. The
//! [`KeyValueStore`] trait is the only seam between the core and the outside
//! world; [`FileStore`] keeps one file per key with file locking, while
//! [`MemoryStore`] keeps everything in process.
//!
//! `FileStore` locks a stable `<key>.lock` file next to the value, so writers
//! on the same key are serialized and readers never see a half-written
//! value. A load-modify-write cycle across processes is still
//! last-writer-wins.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Minimal get/set key-value service
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, or `None` if nothing was written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Reject keys that can't be used verbatim as a file name
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_string()))
    }
}

/// File-backed store: each key lives in `<dir>/<key>.json`, guarded by `<dir>/<key>.lock`
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Path of the lock file guarding `key`
    pub fn lock_path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.lock", key)))
    }

    fn open_lock(&self, key: &str) -> Result<File> {
        let lock_path = self.lock_path_for(key)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(lock_path)?;
        Ok(file)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            tracing::debug!("No value stored for key {:?} at {:?}", key, path);
            return Ok(None);
        }

        let lock = self.open_lock(key)?;
        lock.lock_shared()?;

        let mut contents = String::new();
        let read = File::open(&path)
            .and_then(|file| std::io::BufReader::new(file).read_to_string(&mut contents));
        lock.unlock()?;
        read?;

        tracing::debug!("Read {} bytes for key {:?}", contents.len(), key);
        Ok(Some(contents))
    }

    /// Atomically replace the value by:
    /// 1. Taking the key's exclusive lock
    /// 2. Writing to a temp file in the same directory
    /// 3. Syncing to disk
    /// 4. Renaming over the original
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let lock = self.open_lock(key)?;
        lock.lock_exclusive()?;
        let written = write_atomically(&self.dir, &path, value);
        lock.unlock()?;
        written?;

        tracing::debug!("Wrote {} bytes for key {:?} to {:?}", value.len(), key, path);
        Ok(())
    }
}

fn write_atomically(dir: &Path, path: &Path, value: &str) -> Result<()> {
    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(value.as_bytes())?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// In-process store, nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, for exercising degraded paths
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing `set`
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Storage(format!(
                "store is read-only, cannot write {:?}",
                key
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
