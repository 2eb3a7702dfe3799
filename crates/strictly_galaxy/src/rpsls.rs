//! Rock-Paper-Scissors-Lizard-Spock.
//!
//! Every pair of distinct throws has exactly one winner, and each win comes
//! with the verb used to narrate it.

use super::types::Player;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One RPSLS throw.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Throw {
    /// Crushes scissors and lizard.
    Rock,
    /// Covers rock, disproves Spock.
    Paper,
    /// Cuts paper, decapitates lizard.
    Scissors,
    /// Poisons Spock, eats paper.
    Lizard,
    /// Smashes scissors, vaporizes rock.
    Spock,
}

/// Who beats whom, and how.
const DOMINATION: [(Throw, Throw, &str); 10] = [
    (Throw::Rock, Throw::Scissors, "crushes"),
    (Throw::Rock, Throw::Lizard, "crushes"),
    (Throw::Paper, Throw::Rock, "covers"),
    (Throw::Paper, Throw::Spock, "disproves"),
    (Throw::Scissors, Throw::Paper, "cuts"),
    (Throw::Scissors, Throw::Lizard, "decapitates"),
    (Throw::Lizard, Throw::Spock, "poisons"),
    (Throw::Lizard, Throw::Paper, "eats"),
    (Throw::Spock, Throw::Scissors, "smashes"),
    (Throw::Spock, Throw::Rock, "vaporizes"),
];

impl Throw {
    /// The five throws in table order.
    pub const ALL: [Throw; 5] = [
        Throw::Rock,
        Throw::Paper,
        Throw::Scissors,
        Throw::Lizard,
        Throw::Spock,
    ];

    /// All five throws.
    pub fn all() -> impl Iterator<Item = Throw> {
        Self::ALL.into_iter()
    }

    /// True if this throw defeats `other`.
    pub fn beats(self, other: Throw) -> bool {
        self.verb_against(other).is_some()
    }

    /// The narrative verb when this throw defeats `other`, e.g. rock
    /// *crushes* scissors.
    pub fn verb_against(self, other: Throw) -> Option<&'static str> {
        DOMINATION
            .iter()
            .find(|(winner, loser, _)| *winner == self && *loser == other)
            .map(|(_, _, verb)| *verb)
    }
}

/// Result of one RPSLS round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// This player's throw won.
    Won(Player),
    /// Same throw on both sides; the round repeats.
    Tie,
}

impl RoundOutcome {
    /// Compares X's throw against O's.
    pub fn between(x: Throw, o: Throw) -> Self {
        if x.beats(o) {
            RoundOutcome::Won(Player::X)
        } else if o.beats(x) {
            RoundOutcome::Won(Player::O)
        } else {
            RoundOutcome::Tie
        }
    }
}

/// Both throws of a completed round and what came of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Clash {
    /// X's throw.
    pub x: Throw,
    /// O's throw.
    pub o: Throw,
    /// Round result.
    pub outcome: RoundOutcome,
}

impl Clash {
    /// The throw a player made in this round.
    pub fn throw_of(&self, player: Player) -> Throw {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Narration such as "spock smashes scissors", or `None` on a tie.
    pub fn narrate(&self) -> Option<String> {
        let RoundOutcome::Won(winner) = self.outcome else {
            return None;
        };
        let (won, lost) = (self.throw_of(winner), self.throw_of(winner.opponent()));
        won.verb_against(lost)
            .map(|verb| format!("{} {} {}", won, verb, lost))
    }
}

/// Throws collected for the current round.
///
/// Picks never outlive a round: as soon as both players have thrown, the
/// round is settled and the picks are cleared, tie or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsRound {
    x: Option<Throw>,
    o: Option<Throw>,
    last_outcome: Option<RoundOutcome>,
}

impl RpsRound {
    /// A player's throw for this round, if made.
    pub fn pick(&self, player: Player) -> Option<Throw> {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Result of the previous round, for narration.
    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    /// True when no throw is waiting.
    pub fn is_clear(&self) -> bool {
        self.x.is_none() && self.o.is_none()
    }

    /// Records a throw, replacing any earlier one from the same player.
    ///
    /// Returns the settled clash once both players have thrown.
    #[instrument(level = "debug", skip(self))]
    pub(crate) fn record(&mut self, player: Player, throw: Throw) -> Option<Clash> {
        match player {
            Player::X => self.x = Some(throw),
            Player::O => self.o = Some(throw),
        }
        let (Some(x), Some(o)) = (self.x, self.o) else {
            return None;
        };
        self.x = None;
        self.o = None;
        let clash = Clash::new(x, o, RoundOutcome::between(x, o));
        self.last_outcome = Some(clash.outcome);
        Some(clash)
    }
}

/// Picks one of the five throws uniformly at random.
pub fn random_throw() -> Throw {
    random_throw_with(&mut rand::rng())
}

/// Picks one of the five throws uniformly using the given generator.
pub fn random_throw_with<R: Rng>(rng: &mut R) -> Throw {
    // ALL is never empty.
    Throw::ALL.choose(rng).copied().unwrap_or(Throw::Rock)
}
