//! Contract-based validation for galaxy moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::engine::forced_board;
use super::invariants::{GalaxyInvariants, InvariantSet};
use super::{GameState, Phase, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: no RPSLS round is holding up play.
pub struct NoTiebreakPending;

impl NoTiebreakPending {
    /// Rejects placements while a micro or galaxy tiebreak runs.
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        match state.phase() {
            Phase::MicroTiebreak { .. } | Phase::GalaxyTiebreak { .. } => {
                Err(MoveError::TiebreakPending)
            }
            Phase::Playing | Phase::Finished { .. } => Ok(()),
        }
    }
}

/// Precondition: the match has no winner yet.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Rejects placements after the match is decided.
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        if state.is_over() {
            Err(MoveError::MatchOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the move goes to the board the last move sent it to.
///
/// When that board is closed (or nothing was sent) any board passes here
/// and [`BoardIsOpen`] has the final word.
pub struct BoardIsLegal;

impl BoardIsLegal {
    /// Rejects boards other than the one play was sent to.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        match forced_board(state) {
            Some(board) if board != mov.board => Err(MoveError::BoardNotLegal(mov.board)),
            _ => Ok(()),
        }
    }
}

/// Precondition: the micro-board is still open.
pub struct BoardIsOpen;

impl BoardIsOpen {
    /// Rejects boards that are claimed or drawn.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board(mov.board).is_open() {
            Ok(())
        } else {
            Err(MoveError::BoardClosed(mov.board))
        }
    }
}

/// Precondition: the square is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects occupied squares.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board(mov.board).is_empty(mov.cell) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(mov.board, mov.cell))
        }
    }
}

/// Composite precondition, checked in this order: no tiebreak pending,
/// match in progress, legal board, open board, empty square.
///
/// Passing it is equivalent to the move appearing in
/// [`legal_moves`](crate::legal_moves).
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a move.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        NoTiebreakPending::check(state)?;
        MatchInProgress::check(state)?;
        BoardIsLegal::check(mov, state)?;
        BoardIsOpen::check(mov, state)?;
        CellIsEmpty::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Two-state postcondition
// ─────────────────────────────────────────────────────────────

/// Postcondition: boards closed before a transition are untouched after it.
pub struct ClosedBoardsFrozen;

impl ClosedBoardsFrozen {
    /// Returns the first closed board whose squares changed.
    pub fn check(before: &GameState, after: &GameState) -> Result<(), Position> {
        Position::ALL
            .into_iter()
            .find(|pos| {
                let was = before.board(*pos);
                !was.is_open() && was.squares() != after.board(*pos).squares()
            })
            .map_or(Ok(()), Err)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions: see [`LegalPlacement`].
///
/// Postconditions:
/// - every [`GalaxyInvariants`] member holds
/// - closed boards stay frozen
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalPlacement::check(action, state)
    }

    #[instrument(level = "trace", skip_all)]
    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        if let Err(board) = ClosedBoardsFrozen::check(before, after) {
            warn!(%board, "Closed board changed");
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: closed board {} changed",
                board
            )));
        }
        GalaxyInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Square, apply_move};

    #[test]
    fn test_precondition_fresh_state() {
        let state = GameState::new();
        let action = Move::new(Player::X, Position::Center, Position::Center);
        assert!(MoveContract::pre(&state, &action).is_ok());
    }

    #[test]
    fn test_precondition_wrong_board() {
        let state = GameState::new();
        let state = apply_move(&state, Position::Center, Position::TopLeft).unwrap();
        let action = Move::new(Player::O, Position::Center, Position::Center);
        assert_eq!(
            MoveContract::pre(&state, &action),
            Err(MoveError::BoardNotLegal(Position::Center))
        );
    }

    #[test]
    fn test_precondition_occupied_square() {
        let state = GameState::new();
        let state = apply_move(&state, Position::Center, Position::Center).unwrap();
        let action = Move::new(Player::O, Position::Center, Position::Center);
        assert_eq!(
            MoveContract::pre(&state, &action),
            Err(MoveError::CellOccupied(Position::Center, Position::Center))
        );
    }

    #[test]
    fn test_precondition_closed_board() {
        let mut state = GameState::new();
        state.boards[0].set_status(crate::BoardStatus::Won(Player::X));
        let action = Move::new(Player::X, Position::TopLeft, Position::Center);
        assert_eq!(
            MoveContract::pre(&state, &action),
            Err(MoveError::BoardClosed(Position::TopLeft))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::new();
        let after = apply_move(&before, Position::TopRight, Position::Center).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = GameState::new();
        let mut after = apply_move(&before, Position::TopRight, Position::Center).unwrap();
        // Three in a row on an open board.
        for cell in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            after.boards[0].set(cell, Square::Occupied(Player::O));
        }
        assert!(MoveContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_closed_board_frozen_detects_change() {
        let mut before = GameState::new();
        before.boards[3].set_status(crate::BoardStatus::Cat);
        let mut after = before.clone();
        after.boards[3].set(Position::Center, Square::Occupied(Player::X));
        assert_eq!(ClosedBoardsFrozen::check(&before, &after), Err(Position::MiddleLeft));
    }
}
