//! The client-side game state machine for tictac.
//!
//! The controller turns user intents ("mark cell 4", "start over") into
//! at most one in-flight move request at a time, applies the server's
//! authoritative reply wholesale, and unlocks a reward deep link on a win.
//!
//! # Key types
//!
//! - [`GameController`] — the state machine; owns a [`MoveTransport`](tictac_transport::MoveTransport)
//! - [`Snapshot`] — the only externally observable state
//! - [`MoveOutcome`] — what a single `play` call did
//! - [`ControllerConfig`] — timeout and reward bot settings
//! - [`RewardLinkBuilder`] — derives the bot deep link from a session id

mod config;
mod controller;
mod reward;
mod snapshot;

pub use config::{ControllerConfig, DEFAULT_REQUEST_TIMEOUT};
pub use controller::GameController;
pub use reward::{DEFAULT_BOT_USERNAME, RewardLinkBuilder};
pub use snapshot::{IgnoreReason, MoveOutcome, Snapshot};
