//! One match between two named players.

use crate::game::{Board, GameStatus, Player, Square};
use crate::registry::RegistryInner;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, Weak};
use tracing::{debug, info, instrument, warn};

/// Unique identifier of a queued or active game.
///
/// Ids are issued by the registry, start at 1 and are never reused; a
/// queue id becomes the game id on promotion.
pub type GameId = u64;

/// Error returned when a move or forfeit is rejected.
///
/// Every rejection leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The session already finished.
    #[display("Game is already over")]
    GameOver,
    /// The acting player is not the next mover.
    #[display("It's not {:?}'s turn", _0)]
    WrongTurn(Player),
    /// The coordinates fall outside the 3x3 grid.
    #[display("Coordinates ({row}, {col}) are off the board")]
    OutOfBounds {
        /// Rejected row.
        row: usize,
        /// Rejected column.
        col: usize,
    },
    /// The targeted square already carries a mark.
    #[display("Square ({row}, {col}) is already occupied")]
    SquareOccupied {
        /// Targeted row.
        row: usize,
        /// Targeted column.
        col: usize,
    },
}

impl std::error::Error for MoveError {}

/// Mutable match state, guarded by the per-session lock.
#[derive(Debug)]
struct SessionState {
    board: Board,
    next_mover: Player,
    status: GameStatus,
}

/// One game between two named players.
///
/// All mutation goes through [`GameSession::make_move`] and
/// [`GameSession::forfeit`]. Both run as a single critical section
/// under the session's own lock, so a concurrent caller observes
/// either the previous state or the fully applied move, never a
/// partial one. Sessions of different games progress independently.
///
/// Once the status leaves `InProgress` the session is immutable; a
/// caller still holding a reference after registry eviction keeps a
/// valid read-only snapshot.
#[derive(Debug)]
pub struct GameSession {
    id: GameId,
    player1: String,
    player2: String,
    state: Mutex<SessionState>,
    registry: Weak<Mutex<RegistryInner>>,
}

impl GameSession {
    /// Creates a detached session with a randomly drawn first mover.
    pub fn new(id: GameId, player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self::with_first_mover(id, player1, player2, Player::random())
    }

    /// Creates a detached session with a fixed first mover.
    pub fn with_first_mover(
        id: GameId,
        player1: impl Into<String>,
        player2: impl Into<String>,
        first_mover: Player,
    ) -> Self {
        let (player1, player2) = (player1.into(), player2.into());
        info!(game_id = id, %player1, %player2, ?first_mover, "Creating game session");
        Self {
            id,
            player1,
            player2,
            state: Mutex::new(SessionState {
                board: Board::new(),
                next_mover: first_mover,
                status: GameStatus::InProgress,
            }),
            registry: Weak::new(),
        }
    }

    /// Session created by the registry; evicts itself on terminal transition.
    pub(crate) fn attached(
        id: GameId,
        player1: String,
        player2: String,
        registry: Weak<Mutex<RegistryInner>>,
    ) -> Self {
        let mut session = Self::new(id, player1, player2);
        session.registry = registry;
        session
    }

    /// Applies `player`'s mark at `(row, col)`.
    ///
    /// Preconditions are checked in order, each a distinct rejection:
    /// the session must still be in progress, it must be `player`'s
    /// turn, the coordinates must be on the board, and the square must
    /// be empty. On success the mark, the turn flip and the outcome
    /// recomputation land atomically under the session lock.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn make_move(&self, player: Player, row: usize, col: usize) -> Result<(), MoveError> {
        let status = {
            let mut state = self.state.lock().unwrap();
            if state.status.is_over() {
                warn!("Move attempted on a finished game");
                return Err(MoveError::GameOver);
            }
            if player != state.next_mover {
                warn!(next_mover = ?state.next_mover, "Move attempted out of turn");
                return Err(MoveError::WrongTurn(player));
            }
            let Some(square) = state.board.slot(row, col) else {
                warn!("Move attempted outside the board");
                return Err(MoveError::OutOfBounds { row, col });
            };
            if *square != Square::Empty {
                warn!("Move attempted on an occupied square");
                return Err(MoveError::SquareOccupied { row, col });
            }
            *square = Square::Occupied(player);
            state.next_mover = player.opponent();
            state.status = state.board.outcome();
            state.status
        };

        match status {
            GameStatus::InProgress => {}
            GameStatus::Won(winner) => {
                info!(?winner, "Game won");
                self.evict();
            }
            GameStatus::Draw => {
                info!("Game drawn");
                self.evict();
            }
        }
        Ok(())
    }

    /// Concedes the game, awarding the win to the opponent.
    ///
    /// Accepted regardless of whose turn it is; the board is left
    /// as-is.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn forfeit(&self, player: Player) -> Result<(), MoveError> {
        {
            let mut state = self.state.lock().unwrap();
            if state.status.is_over() {
                warn!("Forfeit attempted on a finished game");
                return Err(MoveError::GameOver);
            }
            state.status = GameStatus::Won(player.opponent());
        }
        info!(forfeited_by = ?player, "Game forfeited");
        self.evict();
        Ok(())
    }

    /// Removes this session from the owning registry's active table.
    ///
    /// Fire-and-forget: runs outside the session lock, and a detached
    /// session or an already-dropped registry makes it a no-op.
    fn evict(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().unwrap().evict(self.id);
            debug!(game_id = self.id, "Session evicted from registry");
        }
    }

    /// Returns the game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Returns the name of the player who queued the game.
    pub fn player1_name(&self) -> &str {
        &self.player1
    }

    /// Returns the name of the player who joined.
    pub fn player2_name(&self) -> &str {
        &self.player2
    }

    /// Maps a player back to the name supplied at creation.
    pub fn name_of(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.state.lock().unwrap().status
    }

    /// Returns the winner, once decided.
    pub fn winner(&self) -> Option<Player> {
        self.status().winner()
    }

    /// True once the game has finished.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// True when the game ended with a full board and no winner.
    pub fn is_draw(&self) -> bool {
        self.status() == GameStatus::Draw
    }

    /// Returns the player whose move is accepted next.
    pub fn next_mover(&self) -> Player {
        self.state.lock().unwrap().next_mover
    }

    /// Returns the name of the player whose move is accepted next.
    pub fn next_mover_name(&self) -> &str {
        self.name_of(self.next_mover())
    }

    /// Returns a copy of the board.
    pub fn board(&self) -> Board {
        self.state.lock().unwrap().board.clone()
    }

    /// Captures a consistent point-in-time view under the session lock.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().unwrap();
        SessionSnapshot {
            id: self.id,
            player1: self.player1.clone(),
            player2: self.player2.clone(),
            next_mover: self.name_of(state.next_mover).to_string(),
            over: state.status.is_over(),
            draw: state.status == GameStatus::Draw,
            winner: state.status.winner().map(|p| self.name_of(p).to_string()),
            board: state.board.clone(),
        }
    }
}

/// Point-in-time view of a session, shaped for transport serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Game id.
    pub id: GameId,
    /// Name of the player who queued the game.
    pub player1: String,
    /// Name of the player who joined.
    pub player2: String,
    /// Name of the player whose move is accepted next.
    pub next_mover: String,
    /// True once the game has finished.
    pub over: bool,
    /// True when the game ended in a draw.
    pub draw: bool,
    /// Winner's name, when decided.
    pub winner: Option<String>,
    /// Current board.
    pub board: Board,
}
