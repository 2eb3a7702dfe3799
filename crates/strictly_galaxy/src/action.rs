//! First-class action types for galaxy tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent the player's
//! intent and can be validated independently of execution.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A placement: a player's mark on one square of one micro-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Micro-board within the galaxy.
    pub board: Position,
    /// Square within that micro-board.
    pub cell: Position,
}

impl Move {
    /// Builds a move from raw indices (0-8 each).
    pub fn from_indices(player: Player, board: usize, cell: usize) -> Option<Self> {
        Some(Self::new(
            player,
            Position::from_index(board)?,
            Position::from_index(cell)?,
        ))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}/{}", self.player, self.board.label(), self.cell.label())
    }
}

/// Reasons a placement is rejected.
///
/// A rejected move leaves the caller's state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// An RPSLS tiebreak must finish before anyone places again.
    #[display("Finish RPS first: a tiebreak is pending")]
    TiebreakPending,

    /// The match already has a winner.
    #[display("Game is already over")]
    MatchOver,

    /// The move must go to a different micro-board.
    #[display("Board {} is not in play; you were sent elsewhere", _0)]
    BoardNotLegal(Position),

    /// The micro-board has already been decided.
    #[display("Board {} is already closed", _0)]
    BoardClosed(Position),

    /// The square is taken.
    #[display("Square {} of board {} is already occupied", _1, _0)]
    CellOccupied(Position, Position),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Reasons an RPSLS throw is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TiebreakError {
    /// No micro-board is waiting on RPSLS.
    #[display("No board is waiting on RPS")]
    NoMicroTiebreak,

    /// The galaxy decider is not running.
    #[display("No galaxy tiebreak is running")]
    NoGalaxyTiebreak,
}

impl std::error::Error for TiebreakError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices() {
        let mov = Move::from_indices(Player::O, 4, 8).unwrap();
        assert_eq!(mov.board, Position::Center);
        assert_eq!(mov.cell, Position::BottomRight);
        assert!(Move::from_indices(Player::O, 9, 0).is_none());
    }

    #[test]
    fn test_error_messages() {
        assert!(MoveError::TiebreakPending.to_string().contains("Finish RPS first"));
        assert_eq!(
            MoveError::CellOccupied(Position::Center, Position::TopLeft).to_string(),
            "Square Top-left of board Center is already occupied"
        );
    }
}
