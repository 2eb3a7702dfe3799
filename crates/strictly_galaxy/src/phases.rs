//! Match phases.
//!
//! A match is always in exactly one phase, so a pending micro tiebreak, a
//! live galaxy decider and a decided winner can never coexist.

use super::position::Position;
use super::rpsls::RpsRound;
use super::tiebreak::FinalRps;
use super::types::Player;
use serde::{Deserialize, Serialize};

/// What the match is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Ordinary placement.
    Playing,
    /// A filled micro-board is waiting on an RPSLS round.
    MicroTiebreak {
        /// The drawn board.
        board: Position,
        /// Throws collected for the current round.
        round: RpsRound,
    },
    /// Every board closed with no galaxy line; best-of-3 RPSLS decides.
    GalaxyTiebreak {
        /// Decider score and current round.
        final_rps: FinalRps,
    },
    /// The match is over.
    Finished {
        /// Winner of the match.
        winner: Player,
        /// Final decider score, when the match went to one.
        final_rps: Option<FinalRps>,
    },
}

/// Summary of a match for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting on a placement from this player.
    ToMove(Player),
    /// Waiting on RPSLS throws for this board.
    MicroTiebreak(Position),
    /// Waiting on galaxy decider throws.
    GalaxyTiebreak,
    /// Player won the match.
    Won(Player),
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::ToMove(player) => write!(f, "In progress. Player {} to move.", player),
            GameStatus::MicroTiebreak(board) => {
                write!(f, "Board {} is a cat's game. Settle it with RPSLS!", board)
            }
            GameStatus::GalaxyTiebreak => write!(f, "Galaxy drawn. Best of three RPSLS!"),
            GameStatus::Won(player) => write!(f, "Game over. Player {} wins!", player),
        }
    }
}

impl super::types::GameState {
    /// Returns a display summary of the match.
    pub fn status(&self) -> GameStatus {
        match &self.phase {
            Phase::Playing => GameStatus::ToMove(self.current_player),
            Phase::MicroTiebreak { board, .. } => GameStatus::MicroTiebreak(*board),
            Phase::GalaxyTiebreak { .. } => GameStatus::GalaxyTiebreak,
            Phase::Finished { winner, .. } => GameStatus::Won(*winner),
        }
    }

    /// True once the match has a winner.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }
}
