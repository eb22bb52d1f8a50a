//! The controller's observable state and per-intent outcomes.

use std::fmt;

use serde::Serialize;
use tictac_protocol::{Board, GameStatus, SessionId};

/// Everything a front-end needs to render the game.
///
/// A snapshot is never edited in place by observers: the controller
/// builds the next one and replaces it atomically, then notifies
/// subscribers. `Serialize` lets a front-end forward it as-is (e.g. to a
/// web view or a log line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// The device's session identifier.
    pub session_id: SessionId,
    /// The board to display. While a move is in flight it shows the
    /// user's mark optimistically; the server reply replaces it.
    pub board: Board,
    /// The last server-reported status.
    pub status: GameStatus,
    /// `true` while a move request is outstanding.
    pub busy: bool,
    /// Message from the last failed move, cleared by the next success
    /// or a reset.
    pub error: Option<String>,
    /// Reward deep link, present only after a win.
    pub reward_link: Option<String>,
}

impl Snapshot {
    /// The state of a fresh game: empty board, in progress, idle.
    pub fn initial(session_id: SessionId) -> Self {
        Self {
            session_id,
            board: Board::empty(),
            status: GameStatus::InProgress,
            busy: false,
            error: None,
            reward_link: None,
        }
    }
}

/// Why a `play` intent had no effect.
///
/// These are not errors: nothing is shown to the user and the snapshot
/// is untouched. They are returned so callers and logs can tell the
/// cases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another move is still in flight.
    Busy,
    /// The game already ended with this status; reset first.
    GameOver(GameStatus),
    /// The index is not on the board.
    OffBoard,
    /// The cell is already marked.
    Occupied,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "a move is already in flight"),
            Self::GameOver(status) => write!(f, "game is over ({status})"),
            Self::OffBoard => write!(f, "cell is off the board"),
            Self::Occupied => write!(f, "cell is occupied"),
        }
    }
}

/// What a single [`GameController::play`](crate::GameController::play)
/// call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The server accepted the move; this is the new status.
    Applied(GameStatus),
    /// The move failed; the message is now in the snapshot's error field.
    Failed(String),
    /// The guard rejected the intent before any request was sent.
    Ignored(IgnoreReason),
    /// The reply arrived after a reset and was discarded.
    Stale,
}
