//! Board, players and rules for a single tic-tac-toe match.

mod rules;
mod types;

pub use types::{Board, GameStatus, Player, Square};
