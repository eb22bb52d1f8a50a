//! Controller configuration.

use std::time::Duration;

use crate::DEFAULT_BOT_USERNAME;

/// How long a move request may stay in flight before it is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for a [`GameController`](crate::GameController).
///
/// `Default` gives a 15 second request timeout and the production reward
/// bot. Override only the fields you care about:
///
/// ```rust
/// use std::time::Duration;
/// use tictac_controller::ControllerConfig;
///
/// let config = ControllerConfig {
///     request_timeout: Some(Duration::from_secs(3)),
///     ..ControllerConfig::default()
/// };
/// assert_eq!(config.bot_username, "ttt432_bot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Upper bound on a single transport call.
    ///
    /// When it elapses the move fails with "request timed out" and the
    /// controller becomes interactive again. `None` waits forever, which
    /// leaves the controller busy for as long as the network stalls.
    pub request_timeout: Option<Duration>,

    /// Username of the bot the reward deep link opens.
    pub bot_username: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            bot_username: DEFAULT_BOT_USERNAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_config_default() {
        let config = ControllerConfig::default();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.bot_username, "ttt432_bot");
    }
}
