//! Core domain types for a tic-tac-toe match.

use serde::{Deserialize, Serialize};

/// One of the two players in a match.
///
/// Identity is positional: `One` queued the game, `Two` joined it.
/// The mapping to display names lives on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// The player who queued the game.
    One,
    /// The player who joined the pending game.
    Two,
}

impl Player {
    /// Returns the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Draws the opening player with an unbiased coin flip.
    pub fn random() -> Self {
        if rand::random() {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Square {
    /// No mark yet.
    Empty,
    /// Marked by a player; never reverts to `Empty`.
    Occupied(Player),
}

/// 3x3 board with squares stored in row-major order.
///
/// Rows and columns are indexed 0-2. Reads outside the grid answer
/// `None` rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    fn index(row: usize, col: usize) -> Option<usize> {
        (row < 3 && col < 3).then_some(row * 3 + col)
    }

    /// Gets the square at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Square> {
        Self::index(row, col).map(|i| self.squares[i])
    }

    /// Checks if the square at `(row, col)` is empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Square::Empty))
    }

    /// Bounds-checked mutable access to a square.
    pub(crate) fn slot(&mut self, row: usize, col: usize) -> Option<&mut Square> {
        Self::index(row, col).map(|i| &mut self.squares[i])
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable grid.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let glyph = match self.squares[row * 3 + col] {
                    Square::Empty => '.',
                    Square::Occupied(Player::One) => 'X',
                    Square::Occupied(Player::Two) => 'O',
                };
                out.push(glyph);
                if col < 2 {
                    out.push(' ');
                }
            }
            if row < 2 {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal classification of a match, or `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Moves are still being accepted.
    InProgress,
    /// A player completed a line, or the opponent forfeited.
    Won(Player),
    /// Full board with no completed line.
    Draw,
}

impl GameStatus {
    /// True once the match has left `InProgress`.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winning player, if decided.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }

    #[test]
    fn test_out_of_range_reads_are_none() {
        let board = Board::new();
        assert_eq!(board.get(3, 0), None);
        assert_eq!(board.get(0, 3), None);
        assert!(!board.is_empty(3, 3));
    }

    #[test]
    fn test_render_marks_players() {
        let mut board = Board::new();
        *board.slot(0, 0).unwrap() = Square::Occupied(Player::One);
        *board.slot(1, 1).unwrap() = Square::Occupied(Player::Two);
        assert_eq!(board.render(), "X . .\n. O .\n. . .");
    }
}
