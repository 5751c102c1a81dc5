//! Durable key-value storage
//!
//! Everything modeldeck persists is a string value under a string key, the
//! same shape as browser local storage. The registry and the backend settings
//! only see the [`KeyValueStore`] trait, so tests run against
//! [`MemoryStore`] and the CLI against [`FileStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Errors raised while writing to a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File that could not be read, written or locked.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file on disk is not a JSON object. Writing would discard every
    /// other key, so the file is left as it is.
    #[error("store {} is not a valid JSON object: {source}", path.display())]
    Corrupt {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The store contents could not be serialized.
    #[error("failed to serialize store contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Blocking string key-value storage.
///
/// Reads never fail: an unreadable backend reads as absent. Writes report
/// errors, and callers decide whether to surface them.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the deletion could not be persisted.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
