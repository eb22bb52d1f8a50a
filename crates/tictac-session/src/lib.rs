//! Per-device session identity for tictac.
//!
//! The game server correlates a device with its game through an opaque
//! session identifier. This crate makes sure a device presents the SAME
//! identifier on every launch:
//!
//! 1. **Storage** — a durable key/value capability ([`SessionStore`]) with
//!    a file-backed implementation for real clients and an in-memory one
//!    for tests.
//! 2. **Identity** — [`SessionIdentity::get_or_create`] reads the stored
//!    identifier or mints and persists a fresh random one.
//!
//! # How it fits in the stack
//!
//! ```text
//! Controller (above)  ← stamps every move with the session id
//!     ↕
//! Session Layer (this crate)  ← owns the id's lifetime on this device
//!     ↕
//! Protocol Layer (below)  ← provides the SessionId type
//! ```

mod error;
mod identity;
mod store;

pub use error::SessionError;
pub use identity::{SESSION_KEY, SessionIdentity};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
