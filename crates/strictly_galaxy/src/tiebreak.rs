//! RPSLS tiebreak sub-protocols.
//!
//! A drawn micro-board is handed to whoever wins a single decisive RPSLS
//! round. A drawn galaxy goes to a best-of-3 decider. In both, ties replay
//! the round and every throw passes the turn so a shared device can be
//! handed across.

use super::action::TiebreakError;
use super::engine::settle;
use super::invariants::{GalaxyInvariants, InvariantSet};
use super::phases::Phase;
use super::rpsls::{Clash, RoundOutcome, RpsRound, Throw};
use super::{BoardStatus, GameState, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Best-of-3 decider state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRps {
    round: RpsRound,
    score_x: u8,
    score_o: u8,
    rounds: u8,
}

impl FinalRps {
    /// Points needed to win the decider.
    pub const TARGET: u8 = 2;

    /// Decisive rounds won by a player.
    pub fn score(&self, player: Player) -> u8 {
        match player {
            Player::X => self.score_x,
            Player::O => self.score_o,
        }
    }

    /// Decisive rounds played; ties do not count.
    pub fn rounds(&self) -> u8 {
        self.rounds
    }

    /// Throws collected for the current round.
    pub fn round(&self) -> &RpsRound {
        &self.round
    }

    fn award(&mut self, player: Player) -> u8 {
        let score = match player {
            Player::X => &mut self.score_x,
            Player::O => &mut self.score_o,
        };
        *score += 1;
        self.rounds += 1;
        *score
    }
}

/// Narration for a micro-board settled on RPSLS.
///
/// Purely descriptive: nothing in the engine reads it back.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Resolution {
    /// The board that was drawn.
    board: Position,
    /// Who now owns it.
    winner: Player,
    /// X's throw.
    x_throw: Throw,
    /// O's throw.
    o_throw: Throw,
    /// Verb from the domination table, e.g. "smashes".
    #[getter(skip)]
    verb: &'static str,
}

impl Resolution {
    /// Verb from the domination table, e.g. "smashes".
    pub fn verb(&self) -> &'static str {
        self.verb
    }

    fn from_clash(board: Position, winner: Player, clash: &Clash) -> Self {
        let won = clash.throw_of(winner);
        let lost = clash.throw_of(winner.opponent());
        Self {
            board,
            winner,
            x_throw: clash.x,
            o_throw: clash.o,
            verb: won.verb_against(lost).unwrap_or("beats"),
        }
    }

    /// E.g. "spock smashes scissors".
    pub fn narrate(&self) -> String {
        let (won, lost) = match self.winner {
            Player::X => (self.x_throw, self.o_throw),
            Player::O => (self.o_throw, self.x_throw),
        };
        format!("{} {} {}", won, self.verb, lost)
    }
}

/// Result of a micro tiebreak throw.
#[derive(Debug, Clone)]
pub struct MicroThrowOutcome {
    /// State after the throw.
    pub state: GameState,
    /// The settled round, once both players have thrown.
    pub clash: Option<Clash>,
    /// Set when the round was decisive and the board changed hands.
    pub resolved: Option<Resolution>,
}

/// Result of a galaxy decider throw.
#[derive(Debug, Clone)]
pub struct FinalThrowOutcome {
    /// State after the throw.
    pub state: GameState,
    /// The settled round, once both players have thrown.
    pub clash: Option<Clash>,
    /// Set when this round gave a player their second point.
    pub final_winner: Option<Player>,
}

/// Records a throw for the pending micro-board tiebreak.
///
/// Once both players have thrown, a tie clears the picks and keeps the
/// same board pending; a decisive round hands the board to the winner,
/// resumes play and re-evaluates the galaxy, which may end the match or arm
/// the galaxy decider.
#[instrument(level = "debug", skip(state), fields(player = %player, throw = %throw))]
pub fn submit_micro_throw(
    state: &GameState,
    player: Player,
    throw: Throw,
) -> Result<MicroThrowOutcome, TiebreakError> {
    let Phase::MicroTiebreak { board, round } = state.phase() else {
        return Err(TiebreakError::NoMicroTiebreak);
    };
    let board = *board;
    let mut round = round.clone();
    let clash = round.record(player, throw);

    let mut next = state.clone();
    next.current_player = state.current_player().opponent();
    next.phase = Phase::MicroTiebreak { board, round };

    let mut resolved = None;
    if let Some(clash) = &clash {
        match clash.outcome {
            RoundOutcome::Tie => debug!(%board, throw = %clash.x, "RPS tie, replaying round"),
            RoundOutcome::Won(winner) => {
                next.boards[board.to_index()].set_status(BoardStatus::Won(winner));
                next.phase = Phase::Playing;
                settle(&mut next);
                let resolution = Resolution::from_clash(board, winner, clash);
                debug!(
                    %board,
                    %winner,
                    narration = %resolution.narrate(),
                    "Micro tiebreak resolved"
                );
                resolved = Some(resolution);
            }
        }
    }

    check_invariants(&next);
    Ok(MicroThrowOutcome {
        state: next,
        clash,
        resolved,
    })
}

/// Records a throw for the galaxy decider.
///
/// Decisive rounds score a point; the first player to two points wins the
/// match. Ties replay without counting as a round.
#[instrument(level = "debug", skip(state), fields(player = %player, throw = %throw))]
pub fn submit_final_throw(
    state: &GameState,
    player: Player,
    throw: Throw,
) -> Result<FinalThrowOutcome, TiebreakError> {
    let Phase::GalaxyTiebreak { final_rps } = state.phase() else {
        return Err(TiebreakError::NoGalaxyTiebreak);
    };
    let mut final_rps = final_rps.clone();
    let clash = final_rps.round.record(player, throw);

    let mut next = state.clone();
    next.current_player = state.current_player().opponent();

    let mut final_winner = None;
    if let Some(Clash {
        outcome: RoundOutcome::Won(winner),
        ..
    }) = clash
    {
        let score = final_rps.award(winner);
        debug!(%winner, score, rounds = final_rps.rounds, "Decider round won");
        if score >= FinalRps::TARGET {
            final_winner = Some(winner);
        }
    }

    next.phase = match final_winner {
        Some(winner) => {
            debug!(%winner, "Galaxy decider won");
            Phase::Finished {
                winner,
                final_rps: Some(final_rps),
            }
        }
        None => Phase::GalaxyTiebreak { final_rps },
    };

    check_invariants(&next);
    Ok(FinalThrowOutcome {
        state: next,
        clash,
        final_winner,
    })
}

/// Debug-build postcondition for tiebreak transitions.
fn check_invariants(state: &GameState) {
    if !cfg!(debug_assertions) {
        return;
    }
    let result = GalaxyInvariants::check_all(state);
    if let Err(violations) = &result {
        warn!(?violations, "Tiebreak left an inconsistent state");
    }
    debug_assert!(result.is_ok(), "Tiebreak postcondition failed: {:?}", result);
}
