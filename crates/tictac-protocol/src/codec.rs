//! Codec trait and implementations for serializing/deserializing messages.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The HTTP transport doesn't care HOW a move is serialized; it just needs
//! something that implements [`Codec`] and can name its media type for the
//! `Content-Type` header.
//!
//! The move API speaks JSON, so [`JsonCodec`] is the only implementation.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` lets a transport own its codec for as long as
/// the controller lives.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value owns
/// all its data, so the response buffer can be dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// The media type sent as `Content-Type` and `Accept`.
    fn content_type(&self) -> &'static str;

    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use tictac_protocol::{Board, Codec, JsonCodec, MoveRequest, SessionId};
///
/// let codec = JsonCodec;
///
/// let request = MoveRequest {
///     session_id: SessionId::new("S"),
///     board: Board::empty(),
///     cell_index: 4,
/// };
///
/// let bytes = codec.encode(&request).unwrap();
/// assert_eq!(
///     std::str::from_utf8(&bytes).unwrap(),
///     r#"{"sessionId":"S","board":[0,0,0,0,0,0,0,0,0],"cellIndex":4}"#
/// );
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
