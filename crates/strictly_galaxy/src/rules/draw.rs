//! Draw detection for micro-boards and the galaxy.

use super::super::{MicroBoard, Square};
use super::win::determine_macro_winner;

/// Checks if every square is occupied.
///
/// A full micro-board with no winner is a cat's game.
pub fn is_full(squares: &[Square; 9]) -> bool {
    squares.iter().all(|s| *s != Square::Empty)
}

/// Checks if no micro-board is open any more.
pub fn all_closed(boards: &[MicroBoard; 9]) -> bool {
    boards.iter().all(|board| !board.is_open())
}

/// The galaxy stalls when every board is closed and nobody owns a line.
///
/// Both a placement and a micro tiebreak can close the last board; both
/// consult this one predicate before arming the galaxy decider.
pub fn galaxy_stalled(boards: &[MicroBoard; 9]) -> bool {
    all_closed(boards) && determine_macro_winner(boards).is_none()
}
