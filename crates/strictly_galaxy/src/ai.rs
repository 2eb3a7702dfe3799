//! Computer opponents.
//!
//! The search drives the same [`apply_move`] real moves go through, so
//! whatever it picks is legal by construction.

use super::action::Move;
use super::engine::{apply_move, legal_moves};
use super::eval::evaluate;
use super::phases::Phase;
use super::{GameState, Player, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How a seat picks its moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AiLevel {
    /// A human picks; the selector stays out of it.
    #[default]
    None,
    /// Uniformly random legal move.
    Easy,
    /// Minimax, two plies.
    Smart,
    /// Minimax, three plies.
    Hard,
}

impl AiLevel {
    /// Minimax depth in plies, for the searching levels.
    pub fn search_depth(self) -> Option<u32> {
        match self {
            AiLevel::Smart => Some(2),
            AiLevel::Hard => Some(3),
            AiLevel::None | AiLevel::Easy => None,
        }
    }

    /// True when the computer plays this seat.
    pub fn is_ai(self) -> bool {
        self != AiLevel::None
    }
}

/// Picks a move for the current player at the given level.
///
/// Returns `None` for [`AiLevel::None`] or when nothing is playable.
pub fn choose_move(state: &GameState, level: AiLevel) -> Option<Move> {
    choose_move_with(state, level, &mut rand::rng())
}

/// [`choose_move`] with a caller-supplied random source.
#[instrument(
    level = "debug",
    skip(state, rng),
    fields(player = %state.current_player(), level = %level)
)]
pub fn choose_move_with<R: Rng>(state: &GameState, level: AiLevel, rng: &mut R) -> Option<Move> {
    let moves = legal_moves(state);
    if moves.is_empty() {
        debug!("No legal moves");
        return None;
    }
    let chosen = match (level, level.search_depth()) {
        (AiLevel::None, _) => None,
        (_, Some(depth)) => Some(search(state, &moves, depth)),
        (_, None) => moves.choose(rng).copied(),
    };
    if let Some(mov) = chosen {
        debug!(%mov, "AI chose move");
    }
    chosen
}

/// Full-window minimax at the root so tied scores are exact, then the
/// tie-break ladder.
fn search(state: &GameState, moves: &[Move], depth: u32) -> Move {
    let me = state.current_player();
    let scored: Vec<(Move, f64)> = moves
        .iter()
        .filter_map(|mov| {
            let child = apply_move(state, mov.board, mov.cell).ok()?;
            let score = minimax(&child, depth - 1, me, f64::NEG_INFINITY, f64::INFINITY);
            Some((*mov, score))
        })
        .collect();

    let best = scored
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<Move> = scored
        .iter()
        .filter(|(_, score)| *score == best)
        .map(|(mov, _)| *mov)
        .collect();
    debug!(best, tied = tied.len(), "Root search finished");

    break_tie(state, &tied).unwrap_or(moves[0])
}

/// Minimax with alpha-beta pruning, scored for `me`.
///
/// Tiebreaks and finished matches are leaves: the search does not model
/// RPSLS.
fn minimax(state: &GameState, depth: u32, me: Player, mut alpha: f64, mut beta: f64) -> f64 {
    if depth == 0 || *state.phase() != Phase::Playing {
        return evaluate(state, me);
    }
    let moves = legal_moves(state);
    if moves.is_empty() {
        return evaluate(state, me);
    }

    let maximizing = state.current_player() == me;
    let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
    for mov in moves {
        let Ok(child) = apply_move(state, mov.board, mov.cell) else {
            continue;
        };
        let score = minimax(&child, depth - 1, me, alpha, beta);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Among equally scored moves prefer, in order: a galaxy win, a block of
/// the opponent's galaxy win, a center square, a corner square, the first.
fn break_tie(state: &GameState, tied: &[Move]) -> Option<Move> {
    let me = state.current_player();
    let as_opponent = state.with_current_player(me.opponent());
    tied.iter()
        .find(|mov| wins_galaxy(state, mov))
        .or_else(|| tied.iter().find(|mov| wins_galaxy(&as_opponent, mov)))
        .or_else(|| tied.iter().find(|mov| mov.cell == Position::Center))
        .or_else(|| tied.iter().find(|mov| mov.cell.is_corner()))
        .or_else(|| tied.first())
        .copied()
}

/// True if the player to move in `state` wins the match by playing `mov`.
fn wins_galaxy(state: &GameState, mov: &Move) -> bool {
    let player = state.current_player();
    apply_move(state, mov.board, mov.cell)
        .map(|next| next.macro_winner() == Some(player))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardStatus, Square};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// `owner` holds boards 0 and 4 and two squares of board 8's top row;
    /// `mover` must play on board 8.
    fn galaxy_threat(owner: Player, mover: Player) -> GameState {
        let mut state = GameState::new();
        for idx in [0, 4] {
            for cell in Position::ALL {
                state.boards[idx].set(cell, Square::Occupied(owner));
            }
            state.boards[idx].set_status(BoardStatus::Won(owner));
        }
        state.boards[8].set(Position::TopLeft, Square::Occupied(owner));
        state.boards[8].set(Position::TopCenter, Square::Occupied(owner));
        state.boards[8].set(Position::BottomLeft, Square::Occupied(owner.opponent()));
        state.current_player = mover;
        state.next_board = Some(Position::BottomRight);
        state
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("hard".parse::<AiLevel>().unwrap(), AiLevel::Hard);
        assert_eq!("Smart".parse::<AiLevel>().unwrap(), AiLevel::Smart);
        assert_eq!(AiLevel::Easy.to_string(), "easy");
        assert!(!AiLevel::None.is_ai());
        assert_eq!(AiLevel::Hard.search_depth(), Some(3));
    }

    #[test]
    fn test_none_level_defers_to_human() {
        assert_eq!(choose_move(&GameState::new(), AiLevel::None), None);
    }

    #[test]
    fn test_easy_is_legal_and_seeded() {
        let state = apply_move(&GameState::new(), Position::Center, Position::TopLeft).unwrap();
        let legal = legal_moves(&state);
        let a = choose_move_with(&state, AiLevel::Easy, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = choose_move_with(&state, AiLevel::Easy, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(legal.contains(&a));
        assert_eq!(a, b);
    }

    #[test]
    fn test_smart_takes_galaxy_win() {
        let state = galaxy_threat(Player::X, Player::X);
        let chosen = choose_move(&state, AiLevel::Smart).unwrap();
        assert_eq!(chosen.board, Position::BottomRight);
        assert_eq!(chosen.cell, Position::TopRight);
    }

    #[test]
    fn test_hard_takes_galaxy_win() {
        let state = galaxy_threat(Player::O, Player::O);
        let chosen = choose_move(&state, AiLevel::Hard).unwrap();
        assert_eq!((chosen.board, chosen.cell), (Position::BottomRight, Position::TopRight));
    }

    #[test]
    fn test_tie_break_blocks_before_center() {
        let state = galaxy_threat(Player::O, Player::X);
        let tied = [
            Move::new(Player::X, Position::BottomRight, Position::Center),
            Move::new(Player::X, Position::BottomRight, Position::TopRight),
        ];
        assert_eq!(break_tie(&state, &tied), Some(tied[1]));
    }

    #[test]
    fn test_tie_break_center_then_corner_then_first() {
        let state = GameState::new();
        let mov = |cell| Move::new(Player::X, Position::TopLeft, cell);

        let tied = [mov(Position::TopCenter), mov(Position::TopLeft), mov(Position::Center)];
        assert_eq!(break_tie(&state, &tied), Some(mov(Position::Center)));

        let tied = [mov(Position::TopCenter), mov(Position::BottomRight)];
        assert_eq!(break_tie(&state, &tied), Some(mov(Position::BottomRight)));

        let tied = [mov(Position::MiddleRight), mov(Position::TopCenter)];
        assert_eq!(break_tie(&state, &tied), Some(mov(Position::MiddleRight)));

        assert_eq!(break_tie(&state, &[]), None);
    }

    #[test]
    fn test_search_returns_legal_move_from_fresh_state() {
        let state = GameState::new();
        let chosen = choose_move(&state, AiLevel::Smart).unwrap();
        assert!(legal_moves(&state).contains(&chosen));
    }

    #[test]
    fn test_no_moves_during_tiebreak() {
        let mut state = GameState::new();
        state.phase = Phase::GalaxyTiebreak {
            final_rps: Default::default(),
        };
        assert_eq!(choose_move(&state, AiLevel::Hard), None);
    }
}
