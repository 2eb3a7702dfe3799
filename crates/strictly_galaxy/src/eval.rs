//! Static position evaluation for the search.

use super::engine::forced_board;
use super::rules::{LINES, macro_squares};
use super::{BoardStatus, GameState, Player, Position, Square};

/// Score of a decided match.
pub(crate) const WIN_SCORE: f64 = 5000.0;

const MACRO_WEIGHT: f64 = 20.0;
const CLAIMED_BOARD: f64 = 50.0;
const HOT_BOARD_WEIGHT: f64 = 1.5;

/// Sums how promising every line of a 3x3 grid is for `player`.
///
/// A line scores 100 when owned outright, 15 with two marks and a gap, 3
/// with one mark and two gaps, the same amounts negated for the opponent,
/// and nothing once both players have a mark in it.
pub fn line_potential(squares: &[Square; 9], player: Player) -> f64 {
    LINES
        .iter()
        .map(|line| {
            let (mut mine, mut theirs) = (0, 0);
            for &i in line {
                match squares[i] {
                    Square::Occupied(p) if p == player => mine += 1,
                    Square::Occupied(_) => theirs += 1,
                    Square::Empty => {}
                }
            }
            match (mine, theirs) {
                (0, 0) => 0.0,
                (n, 0) => occupancy_score(n),
                (0, n) => -occupancy_score(n),
                _ => 0.0,
            }
        })
        .sum()
}

fn occupancy_score(marks: usize) -> f64 {
    match marks {
        3 => 100.0,
        2 => 15.0,
        1 => 3.0,
        _ => 0.0,
    }
}

/// Scores a state from `player`'s point of view; higher is better.
///
/// A decided match is worth ±5000. Otherwise the galaxy's line potential
/// (weighted ×20) is added to per-board terms: ±50 for a claimed board,
/// nothing for a cat board, and the board's own line potential for open
/// boards, weighted ×1.5 on the board(s) the next move must go to.
pub fn evaluate(state: &GameState, player: Player) -> f64 {
    if let Some(winner) = state.macro_winner() {
        return if winner == player { WIN_SCORE } else { -WIN_SCORE };
    }

    let forced = forced_board(state);
    let macro_score = MACRO_WEIGHT * line_potential(&macro_squares(state.boards()), player);

    let boards_score: f64 = Position::ALL
        .into_iter()
        .map(|pos| {
            let board = state.board(pos);
            match board.status() {
                BoardStatus::Won(owner) if owner == player => CLAIMED_BOARD,
                BoardStatus::Won(_) => -CLAIMED_BOARD,
                BoardStatus::Cat => 0.0,
                BoardStatus::Open => {
                    let weight = match forced {
                        Some(target) if target != pos => 1.0,
                        _ => HOT_BOARD_WEIGHT,
                    };
                    weight * line_potential(board.squares(), player)
                }
            }
        })
        .sum();

    macro_score + boards_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Phase, apply_move};

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
    fn test_empty_grid_is_neutral() {
        assert_eq!(line_potential(&[Square::Empty; 9], Player::X), 0.0);
    }

    #[test]
    fn test_center_mark() {
        // Center sits on 4 lines: row, column and both diagonals.
        let squares = squares_from("....X....");
        assert_eq!(line_potential(&squares, Player::X), 12.0);
        assert_eq!(line_potential(&squares, Player::O), -12.0);
    }

    #[test]
    fn test_two_in_a_row_and_contested_lines() {
        // Row 0: XX_ = 15. Column 1 and the main diagonal: one X each = 3.
        // Row 2 and the anti-diagonal: one O each = -3. Column 0 holds both
        // marks and scores nothing.
        let squares = squares_from("XX....O..");
        assert_eq!(line_potential(&squares, Player::X), 15.0 + 3.0 + 3.0 - 3.0 - 3.0);
    }

    #[test]
    fn test_fresh_state_scores_zero() {
        assert_eq!(evaluate(&GameState::new(), Player::X), 0.0);
    }

    #[test]
    fn test_symmetric_for_players() {
        let state = apply_move(&GameState::new(), Position::Center, Position::TopLeft).unwrap();
        assert_eq!(evaluate(&state, Player::X), -evaluate(&state, Player::O));
    }

    #[test]
    fn test_forced_board_weighs_more() {
        // X's mark on board 0 counts 1.5x while O is sent to board 0.
        let state = apply_move(&GameState::new(), Position::TopLeft, Position::TopLeft).unwrap();
        // Corner sits on 3 lines.
        assert_eq!(evaluate(&state, Player::X), 1.5 * 9.0);

        // A center mark on board 0 while O is sent to board 4.
        let state = apply_move(&GameState::new(), Position::TopLeft, Position::Center).unwrap();
        assert_eq!(evaluate(&state, Player::X), 12.0);
    }

    #[test]
    fn test_decided_match() {
        let mut state = GameState::new();
        state.phase = Phase::Finished {
            winner: Player::O,
            final_rps: None,
        };
        assert_eq!(evaluate(&state, Player::O), WIN_SCORE);
        assert_eq!(evaluate(&state, Player::X), -WIN_SCORE);
    }
}
