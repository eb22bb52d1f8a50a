//! Unified error type for the tictac client.

use tictac_session::SessionError;
use tictac_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `tictac` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
///
/// Only setup can fail. Once a [`GameController`](crate::prelude::GameController)
/// exists, move failures are reported through its snapshot instead.
#[derive(Debug, thiserror::Error)]
pub enum TictacError {
    /// A transport-level error (bad endpoint, HTTP client setup).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session store could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::InvalidEndpoint("ftp://nope".into());
        let tictac_err: TictacError = err.into();
        assert!(matches!(tictac_err, TictacError::Transport(_)));
        assert!(tictac_err.to_string().contains("ftp://nope"));
    }

    #[test]
    fn test_from_transport_error_keeps_decode_message() {
        let decode = serde_json::from_str::<tictac_protocol::Board>("[1]").unwrap_err();
        let err = TransportError::from(tictac_protocol::ProtocolError::Decode(decode));
        let tictac_err: TictacError = err.into();
        assert!(matches!(
            tictac_err,
            TictacError::Transport(TransportError::Protocol(_))
        ));
        assert!(tictac_err.to_string().starts_with("decode failed"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Io {
            path: "/nowhere/session.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let tictac_err: TictacError = err.into();
        assert!(matches!(tictac_err, TictacError::Session(_)));
        assert!(tictac_err.to_string().contains("/nowhere/session.json"));
    }
}
