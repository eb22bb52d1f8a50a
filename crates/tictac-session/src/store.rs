//! Durable key/value storage for the session identity.
//!
//! A browser client would keep its session id in per-origin local
//! storage. A native client has no such thing, so the store is a
//! capability: [`FileSessionStore`] for real devices, and
//! [`MemorySessionStore`] for tests that need deterministic, clearable
//! storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::SessionError;

/// A string key/value store that survives across controller instances.
///
/// Methods take `&self`; implementations use interior mutability so one
/// store can be shared between the identity and a test that clears it.
pub trait SessionStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// An in-memory [`SessionStore`].
///
/// Clones share the same map, so a test can hand one clone to a
/// [`SessionIdentity`](crate::SessionIdentity) and keep another to
/// inspect or [`clear`](Self::clear) the storage from outside.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry, like a user wiping site data.
    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock can't leave a BTreeMap half
        // written, so a poisoned map is still safe to use.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileSessionStore
// ---------------------------------------------------------------------------

/// A [`SessionStore`] backed by a small JSON file.
///
/// The file holds one JSON object mapping keys to strings:
///
/// ```json
/// { "ttt_session_id": "3f2b9c4e-..." }
/// ```
///
/// A missing file reads as an empty store. Writes go to a sibling temp
/// file first and are renamed into place, so a crash mid-write never
/// leaves a truncated store behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at `path`. Nothing touches the disk until the
    /// first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_slice(&raw).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_vec_pretty(entries).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
