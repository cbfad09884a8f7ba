//! The key-value trait and its implementations.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// Key-value read/write of session data surviving reloads.
///
/// Implementations must be read-after-write consistent within the same
/// process: a `get` issued after a completed `set` observes the new value.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value stored under `key`. Removing an absent key is a
    /// no-op.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Process-local store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> std::sync::Arc<Self> {
        std::sync::Arc::new(self)
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// A single JSON file on disk holding a string→string map.
///
/// The whole map is rewritten on every mutation; session state is a
/// handful of small keys, so simplicity wins over incremental writes. A
/// file that fails to parse is treated as empty and overwritten on the
/// next write — corrupted durable state must never wedge the client.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKvStore {
    /// Open (or create) the store backed by `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError::Io`] if the parent directory cannot be
    /// created or the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "store file unreadable, starting empty");
                    BTreeMap::new()
                },
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> std::sync::Arc<Self> {
        std::sync::Arc::new(self)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}
