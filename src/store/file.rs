//! JSON file store
//!
//! All keys live in one JSON object on disk. Writes take an exclusive
//! advisory lock on a sibling `.lock` file, re-read the current contents,
//! apply the change and replace the file through a temporary sibling, so
//! concurrent writers to different keys don't drop each other's values.
//!
//! A file that exists but doesn't parse reads as empty and refuses writes
//! until it is repaired or deleted.

use super::{KeyValueStore, StoreError};
use fs4::fs_std::FileExt;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type Entries = BTreeMap<String, Value>;

/// Store persisted as a single JSON object file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file is created on
    /// first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("store.json"), OsString::from);
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Parse the file. A missing or blank file is empty; a file that can't
    /// be read or isn't a JSON object is an error.
    fn load_entries(&self) -> Result<Entries, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };
        // Stray bytes only damage the value they sit in.
        let content = String::from_utf8_lossy(&bytes);
        if matches!(content, Cow::Owned(_)) {
            warn!("Replaced invalid UTF-8 in store {:?}", self.path);
        }

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn read_entries(&self) -> Entries {
        self.load_entries().unwrap_or_else(|e| {
            warn!("Reading store as empty: {}", e);
            Entries::new()
        })
    }

    /// Check that the backing file can be read and updated.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file exists but cannot be read or is
    /// not a JSON object.
    pub fn validate(&self) -> Result<(), StoreError> {
        self.load_entries().map(|_| ())
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.sibling(".tmp");

        let mut tmp = File::create(&tmp_path).map_err(|e| Self::io_error(&tmp_path, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.sync_all())
            .map_err(|e| Self::io_error(&tmp_path, e))?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(|e| Self::io_error(&self.path, e))?;
        debug!("Saved store to {:?}", self.path);
        Ok(())
    }

    /// Run a read-modify-write cycle under the store's lock.
    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
        }

        let lock_path = self.sibling(".lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| Self::io_error(&lock_path, e))?;
        FileExt::lock_exclusive(&lock).map_err(|e| Self::io_error(&lock_path, e))?;

        // A file that fails to parse is never rewritten.
        let result = self.load_entries().and_then(|mut entries| {
            apply(&mut entries);
            self.write_entries(&entries)
        });

        if let Err(e) = FileExt::unlock(&lock) {
            warn!("Failed to unlock {:?}: {}", lock_path, e);
        }
        result
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        // Hand-edited files may hold raw JSON instead of an encoded string.
        self.read_entries().remove(key).map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
