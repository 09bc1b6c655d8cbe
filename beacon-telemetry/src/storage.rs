//! Opaque key-value persistence for identity and session state.
//!
//! The tracking code only needs `get`/`set`/`remove` over string keys; what
//! actually holds the data is a backend decision. [`FileStorage`] is the
//! durable backend, [`MemoryStorage`] the process-lifetime one, and
//! [`FallbackStorage`] pairs a primary with a fallback so that an
//! unwritable primary (read-only filesystem, exhausted quota) silently
//! degrades instead of breaking telemetry.
//!
//! Persisted keys are qualified with a `beacon.` prefix so the storage
//! document remains recognizable next to other data.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Prefix applied to every persisted key.
const KEY_PREFIX: &str = "beacon.";

/// Errors from a [`Storage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying I/O operation failed.
    #[error("storage i/o failed")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("storage document is not valid JSON")]
    Encoding(#[from] serde_json::Error),
}

/// A key-value store consumed by the tracking code.
///
/// Implementations decide durability and failure behavior; callers treat
/// the store as opaque. A missing key is not an error.
pub trait Storage: fmt::Debug {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn qualified_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// Process-lifetime storage backed by an in-memory map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&qualified_key(key))
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(qualified_key(key), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&qualified_key(key));
        Ok(())
    }
}

/// Durable storage backed by a single JSON document on disk.
///
/// The whole document is rewritten on every `set`/`remove`; the expected
/// contents are a handful of identity keys, not bulk data.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens storage at `path`, loading the existing document if present.
    ///
    /// # Errors
    ///
    /// Fails when an existing document cannot be read or is not valid JSON.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let encoded = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&qualified_key(key))
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(qualified_key(key), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&qualified_key(key));
        self.persist(&entries)
    }
}

/// A primary store with a fallback for when the primary cannot be written.
///
/// Writes go to the primary; on failure the value is written to the
/// fallback instead (with a warning). Reads consult the primary first, then
/// the fallback, so values that landed in the fallback remain visible.
#[derive(Debug)]
pub struct FallbackStorage<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackStorage<P, F>
where
    P: Storage,
    F: Storage,
{
    /// Pairs `primary` with `fallback`.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> Storage for FallbackStorage<P, F>
where
    P: Storage,
    F: Storage,
{
    fn get(&self, key: &str) -> Option<String> {
        self.primary.get(key).or_else(|| self.fallback.get(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.primary.set(key, value) {
            Ok(()) => Ok(()),
            Err(error) => {
                log::warn!("primary storage rejected key {key:?}, using fallback: {error}");
                self.fallback.set(key, value)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let primary = self.primary.remove(key);
        let fallback = self.fallback.remove(key);
        primary.and(fallback)
    }
}
