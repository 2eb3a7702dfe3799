//! Board invariant: each micro-board's status matches its squares.

use super::super::rules::{detect_line_winner, is_full};
use super::super::{BoardStatus, GameState, MicroBoard};
use super::Invariant;

/// Invariant: every micro-board's status is justified by its squares.
///
/// Open boards have room and no line. Cat boards are full without a line.
/// A claimed board either carries its owner's line or was full, which is
/// how a board won on RPSLS looks.
pub struct BoardsConsistent;

impl BoardsConsistent {
    fn board_holds(board: &MicroBoard) -> bool {
        let line = detect_line_winner(board.squares());
        let full = is_full(board.squares());
        match board.status() {
            BoardStatus::Open => line.is_none() && !full,
            BoardStatus::Cat => line.is_none() && full,
            BoardStatus::Won(owner) => match line {
                Some(player) => player == owner,
                None => full,
            },
        }
    }
}

impl Invariant<GameState> for BoardsConsistent {
    fn holds(state: &GameState) -> bool {
        state.boards().iter().all(Self::board_holds)
    }

    fn description() -> &'static str {
        "Micro-board statuses match their squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Square};

    #[test]
    fn test_open_board_with_line_fails() {
        let mut board = MicroBoard::new();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.set(pos, Square::Occupied(Player::X));
        }
        assert!(!BoardsConsistent::board_holds(&board));

        board.set_status(BoardStatus::Won(Player::X));
        assert!(BoardsConsistent::board_holds(&board));

        board.set_status(BoardStatus::Won(Player::O));
        assert!(!BoardsConsistent::board_holds(&board));
    }

    #[test]
    fn test_empty_claimed_board_fails() {
        let mut board = MicroBoard::new();
        board.set_status(BoardStatus::Won(Player::O));
        assert!(!BoardsConsistent::board_holds(&board));
    }
}
