//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. When you see a
//! `ProtocolError`, the problem is in turning moves into bytes or bytes
//! into moves, not in the network or the session store.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: a board with the wrong number of cells, an unknown
    /// status string, or a truncated body.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
