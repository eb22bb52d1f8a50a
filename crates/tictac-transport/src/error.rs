use tictac_protocol::ProtocolError;

/// Errors that can occur while submitting a move.
///
/// Every variant's `Display` text is what ends up in the controller's
/// error field, so the messages are written for a player, not a log file.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never got a response (DNS, refused, reset, TLS).
    #[error("network error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered but did not accept the move.
    ///
    /// `message` is extracted from the error body when the server sent one,
    /// otherwise it is a generic description of `status`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The server's success body could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    TimedOut,

    /// The configured API base cannot be turned into a request URL.
    #[error("invalid move endpoint: {0}")]
    InvalidEndpoint(String),
}
