//! Wire protocol for the tictac move API.
//!
//! This crate defines the "language" the client and the game server speak:
//!
//! - **Types** ([`MoveRequest`], [`MoveResponse`], [`Board`], [`GameStatus`],
//!   etc.) — the structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those structures are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits below the transport (which moves bytes over
//! HTTP) and the controller (which owns game state). It knows nothing
//! about networking or UI; it only knows what a move looks like.
//!
//! ```text
//! Controller (snapshot) → Transport (HTTP) → Protocol (MoveRequest ⇄ bytes)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    BOARD_SIZE, Board, Cell, ErrorBody, ErrorMessage, GameStatus, MoveAck,
    MoveRequest, MoveResponse, SessionId,
};
