//! Core wire types for the move API.
//!
//! Every type in this module travels "on the wire": it is serialized to
//! JSON, POSTed to the game server, and the server's reply is decoded back
//! into these same types.
//!
//! The server is authoritative. The client never decides who won; it only
//! carries the board the server hands back and shows it.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// An opaque per-device session identifier.
///
/// This is a "newtype wrapper" around `String`. The server uses it to
/// correlate a device with its server-side game; the reward bot uses it to
/// look up the promo code after a win. The client never interprets it.
///
/// `#[serde(transparent)]` makes `SessionId("abc")` serialize as the bare
/// string `"abc"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// The content of one board square.
///
/// On the wire a cell is a bare integer: `0` empty, `1` the local player,
/// `2` the remote opponent. `#[serde(into = "u8", try_from = "u8")]` routes
/// serialization through the `From`/`TryFrom` impls below, so the enum
/// stays readable in Rust while the JSON stays compact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    /// Nobody has marked this square.
    #[default]
    Empty,
    /// Marked by the local player.
    Player,
    /// Marked by the server-side opponent.
    Opponent,
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Player => 1,
            Cell::Opponent => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Player),
            2 => Ok(Self::Opponent),
            other => Err(format!("invalid cell value {other}, expected 0-2")),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// A 3x3 board stored row-major as exactly nine cells.
///
/// The fixed-size array makes "length is always 9" a type-level fact:
/// serde rejects a JSON array with fewer elements at decode time, and
/// there is no way to build a `Board` of any other size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; BOARD_SIZE]);

impl Board {
    /// An all-empty board.
    pub fn empty() -> Self {
        Self([Cell::Empty; BOARD_SIZE])
    }

    /// Borrows the nine cells in row-major order.
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.0
    }

    /// Returns the cell at `index`, or `None` if the index is off the board.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    /// Returns `true` if `index` is on the board and nobody has marked it.
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Cell::Empty)
    }

    /// Returns `true` if every cell is empty.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|c| *c == Cell::Empty)
    }

    /// Returns a copy of this board with `cell` written at `index`.
    ///
    /// Returns `None` if `index` is off the board.
    pub fn with_mark(&self, index: usize, cell: Cell) -> Option<Self> {
        let mut next = *self;
        *next.0.get_mut(index)? = cell;
        Some(next)
    }
}

impl From<[Cell; BOARD_SIZE]> for Board {
    fn from(cells: [Cell; BOARD_SIZE]) -> Self {
        Self(cells)
    }
}

/// Renders the board as three rows, e.g.
///
/// ```text
///  X | . | .
///  . | O | .
///  . | . | .
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.0.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let marks: Vec<&str> = cells
                .iter()
                .map(|c| match c {
                    Cell::Empty => ".",
                    Cell::Player => "X",
                    Cell::Opponent => "O",
                })
                .collect();
            write!(f, " {} ", marks.join(" | "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// The server-reported outcome of the game so far.
///
/// ```text
///   InProgress ──(server reply)──→ Win | Lose | Draw
///       ↑                                  │
///       └──────────────(reset)─────────────┘
/// ```
///
/// `#[serde(rename_all = "snake_case")]` gives the wire names
/// `"in_progress"`, `"win"`, `"lose"`, `"draw"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The only non-terminal status. Moves are accepted.
    #[default]
    InProgress,
    /// The local player won. Unlocks the reward link.
    Win,
    /// The opponent won.
    Lose,
    /// The board filled with no winner.
    Draw,
}

impl GameStatus {
    /// Returns `true` for `Win`, `Lose` and `Draw`.
    ///
    /// No further moves are accepted in a terminal status until the
    /// game is reset.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in_progress"),
            Self::Win => write!(f, "win"),
            Self::Lose => write!(f, "lose"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

// ---------------------------------------------------------------------------
// MoveRequest / MoveResponse
// ---------------------------------------------------------------------------

/// Client → Server: "I want to mark this cell."
///
/// `board` is the board as the client saw it *before* the move. The
/// server validates the move against it, applies it, computes the
/// opponent's reply inline, and answers with the resulting board.
///
/// `#[serde(rename_all = "camelCase")]` produces the keys the move API
/// expects: `sessionId`, `board`, `cellIndex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Who is playing.
    pub session_id: SessionId,
    /// The board snapshot at submission time.
    pub board: Board,
    /// The targeted square, `0..=8`.
    pub cell_index: u8,
}

/// Server → Client: the authoritative result of a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// Whether the server accepted the move.
    pub success: bool,
    /// The game status after the user's move and the opponent's reply.
    pub status: GameStatus,
    /// The full board after both moves. Replaces the local board.
    pub board: Board,
    /// Reward code issued on a win.
    ///
    /// Accepted for compatibility with the server contract. Redemption
    /// happens through the bot, so the client never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

/// Server → Client: just the `success` flag of a move reply.
///
/// Decoded ahead of [`MoveResponse`]. A refusal body may carry only
/// `success` and `message`, with no board or status to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAck {
    /// Whether the server accepted the move.
    pub success: bool,
}

// ---------------------------------------------------------------------------
// ErrorBody
// ---------------------------------------------------------------------------

/// The `message` field of an error body: one string or a list of them.
///
/// `#[serde(untagged)]` tries each variant in order, so both
/// `{"message": "nope"}` and `{"message": ["a", "b"]}` decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Best-effort shape of a non-success response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
}

impl ErrorBody {
    /// Returns the human-readable message, joining a list with `", "`.
    ///
    /// Blank strings are skipped. Returns `None` when nothing readable is
    /// left, so the caller can fall back to a generic description.
    pub fn display_message(&self) -> Option<String> {
        let text = match self.message.as_ref()? {
            ErrorMessage::One(msg) => msg.trim().to_string(),
            ErrorMessage::Many(msgs) => msgs
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        };
        (!text.is_empty()).then_some(text)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Tests for the move API types and their JSON shapes.
    //!
    //! The server is written against exact JSON keys and values. A serde
    //! attribute mismatch here means every move fails at the server.

    use super::*;

    fn board_of(raw: [u8; BOARD_SIZE]) -> Board {
        let cells = raw.map(|v| Cell::try_from(v).unwrap());
        Board::from(cells)
    }

    // =====================================================================
    // SessionId
    // =====================================================================

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&SessionId::new("abc-123")).unwrap();
        assert_eq!(json, "\"abc-123\"");
    }

    #[test]
    fn test_session_id_display_is_raw_value() {
        assert_eq!(SessionId::from("S").to_string(), "S");
    }

    // =====================================================================
    // Cell / Board
    // =====================================================================

    #[test]
    fn test_cell_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Cell::Player).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Cell::Opponent).unwrap(), "2");
    }

    #[test]
    fn test_cell_out_of_range_value_rejected() {
        let result: Result<Cell, _> = serde_json::from_str("3");
        assert!(result.is_err());
    }

    #[test]
    fn test_board_serializes_as_flat_array() {
        let json = serde_json::to_string(&Board::empty()).unwrap();
        assert_eq!(json, "[0,0,0,0,0,0,0,0,0]");
    }

    #[test]
    fn test_board_short_array_rejected() {
        let result: Result<Board, _> = serde_json::from_str("[0,0,0,0,0,0,0,0]");
        assert!(result.is_err());
    }

    #[test]
    fn test_board_get_off_board_returns_none() {
        let board = Board::empty();
        assert_eq!(board.get(8), Some(Cell::Empty));
        assert_eq!(board.get(9), None);
        assert!(!board.is_empty_at(9));
    }

    #[test]
    fn test_board_with_mark_leaves_original_untouched() {
        let board = Board::empty();
        let marked = board.with_mark(4, Cell::Player).unwrap();

        assert!(board.is_blank());
        assert_eq!(marked.get(4), Some(Cell::Player));
        assert!(!marked.is_empty_at(4));
        assert!(board.with_mark(9, Cell::Player).is_none());
    }

    #[test]
    fn test_board_display_renders_three_rows() {
        let board = board_of([1, 0, 0, 0, 2, 0, 0, 0, 0]);
        assert_eq!(
            board.to_string(),
            " X | . | . \n . | O | . \n . | . | . "
        );
    }

    // =====================================================================
    // GameStatus
    // =====================================================================

    #[test]
    fn test_game_status_wire_names() {
        let names: Vec<String> = [
            GameStatus::InProgress,
            GameStatus::Win,
            GameStatus::Lose,
            GameStatus::Draw,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
        assert_eq!(names, ["\"in_progress\"", "\"win\"", "\"lose\"", "\"draw\""]);
    }

    #[test]
    fn test_game_status_only_in_progress_is_non_terminal() {
        assert!(!GameStatus::InProgress.is_terminal());
        assert!(GameStatus::Win.is_terminal());
        assert!(GameStatus::Lose.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
    }

    // =====================================================================
    // MoveRequest / MoveResponse
    // =====================================================================

    #[test]
    fn test_move_request_json_format() {
        let req = MoveRequest {
            session_id: SessionId::new("S"),
            board: Board::empty(),
            cell_index: 4,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sessionId": "S",
                "board": [0, 0, 0, 0, 0, 0, 0, 0, 0],
                "cellIndex": 4
            })
        );
    }

    #[test]
    fn test_move_response_decodes_server_reply() {
        let json = r#"{
            "success": true,
            "status": "win",
            "board": [0,0,0,0,1,0,0,0,2]
        }"#;
        let resp: MoveResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.status, GameStatus::Win);
        assert_eq!(resp.board, board_of([0, 0, 0, 0, 1, 0, 0, 0, 2]));
        assert_eq!(resp.promo_code, None);
    }

    #[test]
    fn test_move_response_accepts_promo_code() {
        let json = r#"{
            "success": true,
            "status": "win",
            "board": [1,1,1,2,2,0,0,0,0],
            "promoCode": "WIN-42"
        }"#;
        let resp: MoveResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.promo_code.as_deref(), Some("WIN-42"));
    }

    #[test]
    fn test_move_response_unknown_status_rejected() {
        let json = r#"{"success": true, "status": "paused", "board": [0,0,0,0,0,0,0,0,0]}"#;
        let result: Result<MoveResponse, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_ack_decodes_refusal_without_board() {
        let json = r#"{"success": false, "message": "Cell is already occupied"}"#;
        let ack: MoveAck = serde_json::from_str(json).unwrap();
        assert!(!ack.success);
        assert!(serde_json::from_str::<MoveResponse>(json).is_err());
    }

    // =====================================================================
    // ErrorBody
    // =====================================================================

    #[test]
    fn test_error_body_single_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "cell occupied"}"#).unwrap();
        assert_eq!(body.display_message().as_deref(), Some("cell occupied"));
    }

    #[test]
    fn test_error_body_message_list_joined() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": ["cellIndex out of range", "board must have 9 cells"]}"#,
        )
        .unwrap();
        assert_eq!(
            body.display_message().as_deref(),
            Some("cellIndex out of range, board must have 9 cells")
        );
    }

    #[test]
    fn test_error_body_missing_or_blank_message_is_none() {
        let missing: ErrorBody = serde_json::from_str(r#"{"error": "x"}"#).unwrap();
        assert_eq!(missing.display_message(), None);

        let blank: ErrorBody = serde_json::from_str(r#"{"message": ["", " "]}"#).unwrap();
        assert_eq!(blank.display_message(), None);
    }
}
