//! Decider invariant: galaxy scores stay within best-of-3 bounds.

use super::super::{GameState, Phase, Player};
use super::Invariant;

/// Invariant: a live decider has both scores below 2 and `rounds` counts
/// exactly the decisive rounds played, live or finished.
pub struct TiebreakScoreBounded;

impl Invariant<GameState> for TiebreakScoreBounded {
    fn holds(state: &GameState) -> bool {
        let Some(decider) = state.final_rps() else {
            return true;
        };
        let (x, o) = (decider.score(Player::X), decider.score(Player::O));
        let counted = decider.rounds() == x + o;
        match state.phase() {
            Phase::GalaxyTiebreak { .. } => counted && x < 2 && o < 2,
            _ => counted && x.max(o) == 2,
        }
    }

    fn description() -> &'static str {
        "Galaxy decider scores stay within best of three"
    }
}
