//! `TictacClientBuilder`: wires storage, transport and controller together.

use std::path::PathBuf;
use std::time::Duration;

use tictac_controller::{
    ControllerConfig, DEFAULT_BOT_USERNAME, DEFAULT_REQUEST_TIMEOUT, GameController,
};
use tictac_session::{FileSessionStore, SessionIdentity};
use tictac_transport::HttpMoveTransport;

use crate::TictacError;

/// Origin used for same-origin mode when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Where the session identifier is persisted by default.
pub const DEFAULT_STORE_PATH: &str = ".tictac/session.json";

/// Builder for a ready-to-play [`GameController`].
///
/// # Example
///
/// ```rust,no_run
/// use tictac::prelude::*;
///
/// # fn main() -> Result<(), TictacError> {
/// let controller = TictacClientBuilder::new()
///     .api_base("https://api.example.com")
///     .store_path("/tmp/tictac/session.json")
///     .build()?;
/// println!("playing as {}", controller.session_id());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TictacClientBuilder {
    api_base: String,
    origin: String,
    bot_username: String,
    store_path: PathBuf,
    request_timeout: Option<Duration>,
}

impl TictacClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_base: String::new(),
            origin: DEFAULT_ORIGIN.to_string(),
            bot_username: DEFAULT_BOT_USERNAME.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Sets the API base. Empty means same origin.
    pub fn api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.to_string();
        self
    }

    /// Sets the origin used when the API base is empty.
    pub fn origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    /// Sets the bot the reward link opens.
    pub fn bot_username(mut self, bot_username: &str) -> Self {
        self.bot_username = bot_username.to_string();
        self
    }

    /// Sets the file the session identifier is kept in.
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Sets the per-move timeout. `None` disables it.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolves this device's identity and builds the controller.
    ///
    /// Reads the session identifier from the store, creating and
    /// persisting one on first launch.
    ///
    /// # Errors
    /// Fails if the store cannot be read or written, or if no usable
    /// move endpoint can be derived from `api_base` and `origin`.
    pub fn build(self) -> Result<GameController<HttpMoveTransport>, TictacError> {
        let identity = SessionIdentity::new(FileSessionStore::new(&self.store_path));
        let session_id = identity.get_or_create()?;

        let transport = HttpMoveTransport::new(&self.api_base, &self.origin)?;

        tracing::info!(
            %session_id,
            endpoint = transport.endpoint(),
            store = %self.store_path.display(),
            "tictac client ready"
        );

        let config = ControllerConfig {
            request_timeout: self.request_timeout,
            bot_username: self.bot_username,
        };
        Ok(GameController::with_config(transport, session_id, config))
    }
}

impl Default for TictacClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
