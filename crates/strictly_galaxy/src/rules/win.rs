//! Win detection shared by micro-boards and the galaxy board.

use super::super::{MicroBoard, Player, Square};
use tracing::instrument;

/// The 8 winning lines: rows, then columns, then diagonals.
pub(crate) const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on a 9-square line set.
///
/// Returns `Some(player)` for the first line (in row, column, diagonal
/// order) one player fully occupies, `None` otherwise. A full grid with no
/// line is the caller's business; see [`super::is_full`].
pub fn detect_line_winner(squares: &[Square; 9]) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| match squares[a] {
        Square::Occupied(player) if squares[b] == squares[a] && squares[c] == squares[a] => {
            Some(player)
        }
        _ => None,
    })
}

/// Projects the galaxy onto one 3x3 grid and checks it for a line.
///
/// Claimed boards become their owner's mark; open and cat boards count as
/// empty, so the galaxy uses exactly the micro-board geometry.
#[instrument(level = "trace", skip(boards))]
pub fn determine_macro_winner(boards: &[MicroBoard; 9]) -> Option<Player> {
    detect_line_winner(&macro_squares(boards))
}

/// The galaxy board as squares: claimed boards are occupied, the rest empty.
pub(crate) fn macro_squares(boards: &[MicroBoard; 9]) -> [Square; 9] {
    let mut squares = [Square::Empty; 9];
    for (square, board) in squares.iter_mut().zip(boards) {
        if let Some(player) = board.status().winner() {
            *square = Square::Occupied(player);
        }
    }
    squares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardStatus, Position};

    fn squares_from(marks: &str) -> [Square; 9] {
        let mut squares = [Square::Empty; 9];
        for (square, mark) in squares.iter_mut().zip(marks.chars()) {
            *square = match mark {
                'X' => Square::Occupied(Player::X),
                'O' => Square::Occupied(Player::O),
                _ => Square::Empty,
            };
        }
        squares
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(detect_line_winner(&[Square::Empty; 9]), None);
    }

    #[test]
    fn test_winner_top_row() {
        assert_eq!(detect_line_winner(&squares_from("XXX......")), Some(Player::X));
    }

    #[test]
    fn test_winner_column() {
        assert_eq!(detect_line_winner(&squares_from(".O..O..O.")), Some(Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        assert_eq!(detect_line_winner(&squares_from("..O.O.O..")), Some(Player::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(detect_line_winner(&squares_from("XX.OO....")), None);
    }

    #[test]
    fn test_no_winner_full_cat() {
        assert_eq!(detect_line_winner(&squares_from("XOXOXOOXO")), None);
    }

    #[test]
    fn test_macro_winner_empty_galaxy() {
        let boards: [MicroBoard; 9] = Default::default();
        assert_eq!(determine_macro_winner(&boards), None);
    }

    #[test]
    fn test_macro_winner_from_claimed_line() {
        let mut boards: [MicroBoard; 9] = Default::default();
        for pos in [Position::TopRight, Position::Center, Position::BottomLeft] {
            boards[pos.to_index()].set_status(BoardStatus::Won(Player::O));
        }
        assert_eq!(determine_macro_winner(&boards), Some(Player::O));
    }

    #[test]
    fn test_macro_winner_ignores_cat_boards() {
        let mut boards: [MicroBoard; 9] = Default::default();
        boards[0].set_status(BoardStatus::Won(Player::X));
        boards[1].set_status(BoardStatus::Cat);
        boards[2].set_status(BoardStatus::Won(Player::X));
        assert_eq!(determine_macro_winner(&boards), None);
    }
}
