//! Win and draw detection over a board.

use super::types::{Board, GameStatus, Player, Square};

/// Winning lines in detection order: rows, then columns, then diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

impl Board {
    /// Returns the player holding a completed line, if any.
    ///
    /// Lines are scanned rows first, then columns, then diagonals. At
    /// most one player can hold a completed line, so a move finishing
    /// two lines at once still yields that single player.
    pub fn winner(&self) -> Option<Player> {
        let squares = self.squares();
        for [a, b, c] in LINES {
            if let Square::Occupied(player) = squares[a]
                && squares[b] == squares[a]
                && squares[c] == squares[a]
            {
                return Some(player);
            }
        }
        None
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares().iter().all(|&s| s != Square::Empty)
    }

    /// Classifies the board: a win, a draw on a full board, or neither.
    pub fn outcome(&self) -> GameStatus {
        match self.winner() {
            Some(player) => GameStatus::Won(player),
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{Board, GameStatus, Player, Square};

    fn board_with(marks: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(row, col, player) in marks {
            *board.slot(row, col).expect("test coordinates on the board") =
                Square::Occupied(player);
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::new();
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameStatus::InProgress);
    }

    #[test]
    fn test_row_wins_detected() {
        for row in 0..3 {
            let board = board_with(&[
                (row, 0, Player::One),
                (row, 1, Player::One),
                (row, 2, Player::One),
            ]);
            assert_eq!(board.winner(), Some(Player::One));
        }
    }

    #[test]
    fn test_column_wins_detected() {
        for col in 0..3 {
            let board = board_with(&[
                (0, col, Player::Two),
                (1, col, Player::Two),
                (2, col, Player::Two),
            ]);
            assert_eq!(board.winner(), Some(Player::Two));
        }
    }

    #[test]
    fn test_diagonal_wins_detected() {
        let main = board_with(&[(0, 0, Player::One), (1, 1, Player::One), (2, 2, Player::One)]);
        assert_eq!(main.winner(), Some(Player::One));

        let anti = board_with(&[(0, 2, Player::Two), (1, 1, Player::Two), (2, 0, Player::Two)]);
        assert_eq!(anti.winner(), Some(Player::Two));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(&[
            (0, 0, Player::One),
            (0, 1, Player::Two),
            (0, 2, Player::One),
        ]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        // X O X
        // X O O
        // O X X
        let board = board_with(&[
            (0, 0, Player::One),
            (0, 1, Player::Two),
            (0, 2, Player::One),
            (1, 0, Player::One),
            (1, 1, Player::Two),
            (1, 2, Player::Two),
            (2, 0, Player::Two),
            (2, 1, Player::One),
            (2, 2, Player::One),
        ]);
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameStatus::Draw);
    }

    #[test]
    fn test_win_takes_precedence_over_full_board() {
        // Full board where X's last mark completed the bottom row.
        let board = board_with(&[
            (0, 0, Player::One),
            (0, 1, Player::Two),
            (0, 2, Player::Two),
            (1, 0, Player::Two),
            (1, 1, Player::One),
            (1, 2, Player::Two),
            (2, 0, Player::One),
            (2, 1, Player::One),
            (2, 2, Player::One),
        ]);
        assert!(board.is_full());
        assert_eq!(board.outcome(), GameStatus::Won(Player::One));
    }
}
