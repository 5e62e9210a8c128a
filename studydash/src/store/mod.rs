//! Key-value persistence for dashboard snapshots.
//!
//! Defines the [`KvStore`] trait plus two backends:
//! - [`InMemoryStore`]: process-local map for tests and `--ephemeral` runs
//! - [`file::FileStore`]: one JSON file per key inside a data directory
//!
//! Components never fail because of storage. [`load_snapshot`] turns a
//! missing, unreadable or malformed value into `None`, and
//! [`save_snapshot`] logs write failures and carries on; the in-memory state
//! remains authoritative.

pub mod file;

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use studydash_core::codec;

pub use file::FileStore;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing medium cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// The key contains characters the backend cannot represent.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Synchronous string-keyed storage.
///
/// Each key is owned by exactly one component, so implementations do not
/// need cross-key transactions.
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Reads and decodes the snapshot under `key`.
///
/// Absent keys, read failures and malformed snapshots all yield `None`; the
/// latter two are logged.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::debug!(key, "no stored snapshot, using defaults");
            return None;
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "snapshot read failed, using defaults");
            return None;
        }
    };

    match codec::decode(&text) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed snapshot ignored");
            None
        }
    }
}

/// Encodes `value` and writes it under `key`.
///
/// Returns `true` if the write went through. Failures are logged, never
/// propagated.
pub fn save_snapshot<T: Serialize + ?Sized>(store: &dyn KvStore, key: &str, value: &T) -> bool {
    let text = match codec::encode(value) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(key, error = %err, "snapshot encode failed");
            return false;
        }
    };

    match store.set(key, &text) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(key, error = %err, "snapshot write failed, state kept in memory");
            false
        }
    }
}

/// In-memory implementation of [`KvStore`].
///
/// Nothing survives the process. Used by tests and by `--ephemeral`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KvStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
