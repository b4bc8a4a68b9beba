//! Authoritative server-side state for two-player tic-tac-toe.
//!
//! Two cooperating pieces:
//!
//! - [`GameSession`]: one game's board, turn order and outcome, guarded
//!   by a per-session lock so moves never interleave.
//! - [`GameRegistry`]: pairs a waiting first player with a joining
//!   second player, issues game ids, and tracks live sessions until
//!   they finish.
//!
//! The crate exposes only synchronous in-process operations; wrapping
//! them in a transport (HTTP handlers, MCP tools) is the embedder's
//! concern, as is any persistence.
//!
//! # Example
//!
//! ```
//! use tictactoe_lobby::GameRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = GameRegistry::new();
//! let queue_id = registry.queue_game("alice");
//! let game = registry.start_game(queue_id, "bob")?;
//!
//! let mover = game.next_mover();
//! game.make_move(mover, 1, 1)?;
//! assert_eq!(game.next_mover(), mover.opponent());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
mod registry;
mod session;

// Crate-level exports - game types
pub use game::{Board, GameStatus, Player, Square};

// Crate-level exports - matchmaking registry
pub use registry::{GameRegistry, RegistryError};

// Crate-level exports - sessions
pub use session::{GameId, GameSession, MoveError, SessionSnapshot};
