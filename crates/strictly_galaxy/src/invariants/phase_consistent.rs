//! Phase invariant: the phase agrees with what is on the boards.

use super::super::rules::{all_closed, determine_macro_winner, galaxy_stalled};
use super::super::rpsls::RpsRound;
use super::super::{BoardStatus, GameState, Phase, Player, Position};
use super::Invariant;

/// Invariant: the match phase is the one the boards call for.
///
/// - while playing, nothing is drawn, nobody owns a galaxy line and at
///   least one board is open
/// - a micro tiebreak points at the one and only cat board
/// - the galaxy decider only runs on a stalled galaxy
/// - no pending round holds both throws
/// - a finished match is won by a galaxy line or by reaching two decider
///   points
pub struct PhaseConsistent;

impl Invariant<GameState> for PhaseConsistent {
    fn holds(state: &GameState) -> bool {
        let cats: Vec<Position> = Position::ALL
            .into_iter()
            .filter(|pos| state.board(*pos).status() == BoardStatus::Cat)
            .collect();
        let macro_line = determine_macro_winner(state.boards());

        match state.phase() {
            Phase::Playing => {
                cats.is_empty() && macro_line.is_none() && !all_closed(state.boards())
            }
            Phase::MicroTiebreak { board, round } => {
                cats == [*board] && macro_line.is_none() && !round_settled(round)
            }
            Phase::GalaxyTiebreak { final_rps } => {
                cats.is_empty()
                    && galaxy_stalled(state.boards())
                    && !round_settled(final_rps.round())
            }
            Phase::Finished { winner, final_rps } => {
                cats.is_empty()
                    && match final_rps {
                        None => macro_line == Some(*winner),
                        Some(decider) => {
                            galaxy_stalled(state.boards())
                                && decider.score(*winner) == 2
                                && decider.score(winner.opponent()) < 2
                        }
                    }
            }
        }
    }

    fn description() -> &'static str {
        "Match phase matches the board outcomes"
    }
}

/// Both picks in means the round should already have been scored and cleared.
fn round_settled(round: &RpsRound) -> bool {
    round.pick(Player::X).is_some() && round.pick(Player::O).is_some()
}
