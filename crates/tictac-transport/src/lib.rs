//! Move submission layer for tictac.
//!
//! Provides the [`MoveTransport`] trait: a single-method capability that
//! sends one candidate move to the authoritative server and returns its
//! verdict. The controller only ever talks to this trait, so tests swap in
//! scripted doubles while production uses [`HttpMoveTransport`].
//!
//! # Feature Flags
//!
//! - `http` (default) — HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpMoveTransport;

use tictac_protocol::{Codec, ErrorBody, MoveRequest, MoveResponse};

/// Path of the move endpoint, relative to the API base.
pub const MOVE_PATH: &str = "/game/move";

/// Submits a move to the server and returns the authoritative result.
///
/// Implementations send exactly one request per call and never retry.
/// A returned error means nothing was applied; the caller keeps its
/// previous board and status.
pub trait MoveTransport {
    /// Sends `request` and waits for the server's reply.
    async fn submit_move(
        &self,
        request: MoveRequest,
    ) -> Result<MoveResponse, TransportError>;
}

/// Builds the absolute move endpoint URL.
///
/// An empty `api_base` means "same origin": the request goes to the
/// origin the client was served from. Trailing slashes are trimmed so
/// `http://host/` and `http://host` resolve identically.
///
/// # Errors
/// Returns [`TransportError::InvalidEndpoint`] if neither value yields an
/// `http://` or `https://` base.
pub fn resolve_endpoint(
    api_base: &str,
    origin: &str,
) -> Result<String, TransportError> {
    let base = match api_base.trim().trim_end_matches('/') {
        "" => origin.trim().trim_end_matches('/'),
        base => base,
    };
    if base.is_empty() {
        return Err(TransportError::InvalidEndpoint(
            "no API base or origin configured".into(),
        ));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(TransportError::InvalidEndpoint(format!(
            "{base} is not an http(s) URL"
        )));
    }
    Ok(format!("{base}{MOVE_PATH}"))
}

/// Extracts a player-facing message from a non-success response.
///
/// Tries to decode `body` as `{"message": string | string[]}`. If the body
/// is missing, unparseable, or carries no readable message, falls back to
/// a generic description of the HTTP status, e.g.
/// `"request failed with status 503 Service Unavailable"`. `reason` is the
/// status's canonical reason phrase, if it has one.
pub fn rejection_message<C: Codec>(
    codec: &C,
    status: u16,
    reason: Option<&str>,
    body: &[u8],
) -> String {
    codec
        .decode::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.display_message())
        .unwrap_or_else(|| match reason {
            Some(reason) => format!("request failed with status {status} {reason}"),
            None => format!("request failed with status {status}"),
        })
}
