//! `GameController`: the move-submission state machine.
//!
//! ```text
//!                 play(i) [guard ok]
//!   InProgress ───────────────────────→ InProgress + busy
//!     idle                                    │
//!      ↑          reply: in_progress          │
//!      ├──────────────────────────────────────┤
//!      │          reply: win | lose | draw    │
//!      │        ┌─────────────────────────────┘
//!      │        ▼
//!      │   Win | Lose | Draw  (play ignored)
//!      │        │
//!      └─reset()┘
//! ```
//!
//! All state lives behind one short-lived mutex that is never held across
//! an `.await`. The only suspension point is the transport call.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tictac_protocol::{
    Board, Cell, GameStatus, MoveRequest, MoveResponse, SessionId,
};
use tictac_transport::{MoveTransport, TransportError};
use tokio::sync::watch;

use crate::{
    ControllerConfig, IgnoreReason, MoveOutcome, RewardLinkBuilder, Snapshot,
};

/// Mutable controller state. Only touched inside [`GameController::update`].
struct ControllerState {
    snapshot: Snapshot,
    /// Bumped by every reset. A reply tagged with an older generation
    /// belongs to a game that no longer exists.
    generation: u64,
    /// The board as it was before the in-flight move's optimistic mark.
    board_before: Board,
}

impl ControllerState {
    /// Applies the guard and, if it passes, enters the busy state.
    fn begin_move(&mut self, cell: usize) -> Result<(u64, MoveRequest), IgnoreReason> {
        let snap = &mut self.snapshot;
        if snap.busy {
            return Err(IgnoreReason::Busy);
        }
        if snap.status.is_terminal() {
            return Err(IgnoreReason::GameOver(snap.status));
        }
        if !snap.board.is_empty_at(cell) {
            return Err(match snap.board.get(cell) {
                None => IgnoreReason::OffBoard,
                Some(_) => IgnoreReason::Occupied,
            });
        }
        let optimistic = snap
            .board
            .with_mark(cell, Cell::Player)
            .ok_or(IgnoreReason::OffBoard)?;
        let cell_index = u8::try_from(cell).map_err(|_| IgnoreReason::OffBoard)?;

        let request = MoveRequest {
            session_id: snap.session_id.clone(),
            board: snap.board,
            cell_index,
        };
        self.board_before = snap.board;
        snap.board = optimistic;
        snap.busy = true;
        snap.error = None;
        Ok((self.generation, request))
    }

    /// Applies the transport result for the move started at `generation`.
    fn finish_move(
        &mut self,
        generation: u64,
        result: Result<MoveResponse, TransportError>,
        rewards: &RewardLinkBuilder,
    ) -> MoveOutcome {
        let snap = &mut self.snapshot;
        snap.busy = false;

        if generation != self.generation {
            return MoveOutcome::Stale;
        }

        match result {
            Ok(reply) => {
                // Authoritative: the server's board replaces ours outright,
                // optimistic mark included.
                snap.board = reply.board;
                snap.status = reply.status;
                snap.error = None;
                if reply.status == GameStatus::Win {
                    snap.reward_link = Some(rewards.build_link(&snap.session_id));
                }
                MoveOutcome::Applied(reply.status)
            }
            Err(e) => {
                let message = e.to_string();
                snap.board = self.board_before;
                snap.error = Some(message.clone());
                MoveOutcome::Failed(message)
            }
        }
    }

    /// Rolls back a move whose future was dropped before the reply came.
    fn abandon_move(&mut self, generation: u64) {
        self.snapshot.busy = false;
        if generation == self.generation {
            self.snapshot.board = self.board_before;
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        let snap = &mut self.snapshot;
        snap.board = Board::empty();
        snap.status = GameStatus::InProgress;
        snap.error = None;
        snap.reward_link = None;
        // `busy` is left alone: an in-flight request is still outstanding
        // and must finish (and be discarded) before another can start.
    }
}

/// Drives one game session against the authoritative server.
///
/// The controller is meant to be shared by reference within a single
/// task: a UI loop calls [`play`](Self::play) and [`reset`](Self::reset)
/// and renders [`snapshot`](Self::snapshot) or a [`subscribe`](Self::subscribe)
/// receiver. Concurrent `play` calls (a click storm) collapse to one
/// request; the rest are ignored.
///
/// ## Example
///
/// ```rust,ignore
/// let controller = GameController::new(transport, session_id);
/// let mut updates = controller.subscribe();
///
/// controller.play(4).await;
/// if let Some(link) = &updates.borrow_and_update().reward_link {
///     println!("claim your reward: {link}");
/// }
/// ```
pub struct GameController<T: MoveTransport> {
    transport: T,
    config: ControllerConfig,
    rewards: RewardLinkBuilder,
    state: Mutex<ControllerState>,
    updates: watch::Sender<Snapshot>,
}

impl<T: MoveTransport> GameController<T> {
    /// Creates a controller with [`ControllerConfig::default`].
    pub fn new(transport: T, session_id: SessionId) -> Self {
        Self::with_config(transport, session_id, ControllerConfig::default())
    }

    /// Creates a controller with an explicit configuration.
    pub fn with_config(
        transport: T,
        session_id: SessionId,
        config: ControllerConfig,
    ) -> Self {
        let snapshot = Snapshot::initial(session_id);
        let (updates, _) = watch::channel(snapshot.clone());
        let rewards = RewardLinkBuilder::new(config.bot_username.clone());

        tracing::debug!(session_id = %snapshot.session_id, "game controller created");

        Self {
            transport,
            config,
            rewards,
            state: Mutex::new(ControllerState {
                snapshot,
                generation: 0,
                board_before: Board::empty(),
            }),
            updates,
        }
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    /// Returns a receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    /// The session this controller plays as.
    pub fn session_id(&self) -> SessionId {
        self.lock().snapshot.session_id.clone()
    }

    /// The transport moves are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Tries to mark `cell` (0..=8, row-major).
    ///
    /// If the guard passes (game in progress, nothing in flight, cell
    /// empty) this sends exactly one request and applies the reply. If it
    /// fails, nothing happens and `MoveOutcome::Ignored` says why.
    ///
    /// Never returns an error: a failed request lands in the snapshot's
    /// `error` field. `busy` is cleared on every exit path, including
    /// when the returned future is dropped before it completes.
    pub async fn play(&self, cell: usize) -> MoveOutcome {
        let (generation, request) = match self.update(|s| s.begin_move(cell)) {
            Ok(started) => started,
            Err(reason) => {
                tracing::debug!(cell, %reason, "move intent ignored");
                return MoveOutcome::Ignored(reason);
            }
        };

        tracing::info!(
            session_id = %request.session_id,
            cell,
            generation,
            "submitting move"
        );

        let in_flight = InFlight {
            controller: self,
            generation,
            armed: true,
        };
        let result = self.dispatch(request).await;
        let outcome = in_flight.complete(result);

        match &outcome {
            MoveOutcome::Applied(GameStatus::Win) => {
                tracing::info!(cell, "game won, reward link unlocked");
            }
            MoveOutcome::Applied(status) => {
                tracing::info!(cell, %status, "move applied");
            }
            MoveOutcome::Failed(error) => {
                tracing::warn!(cell, %error, "move failed");
            }
            MoveOutcome::Stale => {
                tracing::debug!(cell, generation, "discarded reply from before reset");
            }
            MoveOutcome::Ignored(_) => {}
        }
        outcome
    }

    /// Starts a new game: empty board, in progress, no error, no reward.
    ///
    /// Works from any state. An in-flight request is not cancelled; its
    /// reply will be discarded when it arrives.
    pub fn reset(&self) {
        let generation = self.update(|s| {
            s.reset();
            s.generation
        });
        tracing::info!(generation, "game reset");
    }

    async fn dispatch(&self, request: MoveRequest) -> Result<MoveResponse, TransportError> {
        let call = self.transport.submit_move(request);
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(TransportError::TimedOut)),
            None => call.await,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        // No invariant spans a panic point inside `update`, so a poisoned
        // state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the state and publishes the snapshot if it changed.
    fn update<R>(&self, f: impl FnOnce(&mut ControllerState) -> R) -> R {
        let mut state = self.lock();
        let before = state.snapshot.clone();
        let out = f(&mut *state);
        if state.snapshot != before {
            self.updates.send_replace(state.snapshot.clone());
        }
        out
    }
}

/// Drop guard for an in-flight move.
///
/// If the `play` future is dropped while awaiting the server (the caller
/// timed out, the UI task was cancelled), `Drop` clears `busy` and undoes
/// the optimistic mark so the controller never stays locked.
struct InFlight<'a, T: MoveTransport> {
    controller: &'a GameController<T>,
    generation: u64,
    armed: bool,
}

impl<T: MoveTransport> InFlight<'_, T> {
    fn complete(mut self, result: Result<MoveResponse, TransportError>) -> MoveOutcome {
        self.armed = false;
        let generation = self.generation;
        let rewards = &self.controller.rewards;
        self.controller
            .update(|s| s.finish_move(generation, result, rewards))
    }
}

impl<T: MoveTransport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let generation = self.generation;
            self.controller.update(|s| s.abandon_move(generation));
            tracing::debug!(generation, "in-flight move abandoned");
        }
    }
}
