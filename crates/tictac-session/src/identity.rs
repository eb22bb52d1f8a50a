//! The device's session identity: read once, minted at most once.

use rand::Rng;
use tictac_protocol::SessionId;

use crate::{SessionError, SessionStore};

/// The store key the session identifier lives under.
pub const SESSION_KEY: &str = "ttt_session_id";

/// Resolves the stable session identifier for this device.
///
/// ## Lifecycle
///
/// ```text
/// get_or_create() ──(stored?)──yes──→ return stored id
///        │
///        no
///        ▼
///   generate ──→ persist ──→ return new id
/// ```
///
/// Once written, the identifier never changes until the store is cleared
/// (by [`clear`](Self::clear) or by something outside the process).
#[derive(Debug, Clone)]
pub struct SessionIdentity<S: SessionStore> {
    store: S,
    key: String,
}

impl<S: SessionStore> SessionIdentity<S> {
    /// Creates an identity backed by `store` under [`SESSION_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, SESSION_KEY)
    }

    /// Creates an identity under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Returns the stored identifier, creating and persisting one if the
    /// store has none.
    ///
    /// A stored value that is empty or whitespace counts as missing.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read or written.
    pub fn get_or_create(&self) -> Result<SessionId, SessionError> {
        if let Some(existing) = self.store.get(&self.key)? {
            if !existing.trim().is_empty() {
                tracing::debug!(session_id = %existing, "session identity restored");
                return Ok(SessionId::new(existing));
            }
        }

        let id = generate_session_id();
        self.store.set(&self.key, id.as_str())?;
        tracing::info!(session_id = %id, "session identity created");
        Ok(id)
    }

    /// Forgets the stored identifier. The next
    /// [`get_or_create`](Self::get_or_create) mints a new one.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove(&self.key)?;
        tracing::info!("session identity cleared");
        Ok(())
    }
}

/// Generates a random version-4 UUID string, e.g.
/// `"9b2f6c1e-3a4d-4f8e-b1c2-7d9e0a5f3b21"`.
///
/// The bytes come from `rand::rng()`, the thread-local CSPRNG, so
/// identifiers are unpredictable as well as unique. `uuid` stamps the
/// version and variant bits and formats the result.
fn generate_session_id() -> SessionId {
    let bytes: [u8; 16] = rand::rng().random();
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    SessionId::new(uuid.hyphenated().to_string())
}
