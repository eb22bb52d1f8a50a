//! # Tictac
//!
//! Client for a server-authoritative tic-tac-toe game.
//!
//! The server owns the rules and the opponent. This client keeps a
//! per-device session identity, submits one move at a time, renders
//! whatever board the server sends back, and turns a win into a reward
//! deep link.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tictac::prelude::*;
//!
//! # async fn run() -> Result<(), TictacError> {
//! tictac::init_tracing();
//!
//! let controller = TictacClientBuilder::new()
//!     .api_base("https://api.example.com")
//!     .build()?;
//!
//! controller.play(4).await;
//! let snap = controller.snapshot();
//! println!("{}\n{}", snap.board, snap.status);
//! if let Some(link) = snap.reward_link {
//!     println!("claim your reward: {link}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! | Crate | Concern |
//! |-------|---------|
//! | `tictac-protocol` | wire types and codec |
//! | `tictac-transport` | move submission over HTTP |
//! | `tictac-session` | persisted device identity |
//! | `tictac-controller` | game state machine, reward links |

mod client;
mod error;

pub use client::{DEFAULT_ORIGIN, DEFAULT_STORE_PATH, TictacClientBuilder};
pub use tictac_controller::{DEFAULT_BOT_USERNAME, DEFAULT_REQUEST_TIMEOUT};
pub use error::TictacError;

/// Installs a `tracing` subscriber that logs to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless: later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub mod prelude {
    //! Everything a front-end needs in one import.

    pub use crate::{TictacClientBuilder, TictacError, init_tracing};
    pub use tictac_controller::{
        ControllerConfig, GameController, IgnoreReason, MoveOutcome,
        RewardLinkBuilder, Snapshot,
    };
    pub use tictac_protocol::{Board, Cell, GameStatus, SessionId};
    pub use tictac_session::{
        FileSessionStore, MemorySessionStore, SessionIdentity, SessionStore,
    };
    pub use tictac_transport::{HttpMoveTransport, MoveTransport, TransportError};
}
