//! AI against AI, many times over.

use crate::session::{Ending, Session};
use anyhow::{Result, bail};
use rand::Rng;
use std::io;
use strictly_galaxy::{AiLevel, GameState, Phase, Player};
use tracing::{info, instrument};

/// Results of a self-play run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Matches X won.
    pub x_wins: u32,
    /// Matches O won.
    pub o_wins: u32,
    /// Matches that went to the galaxy decider.
    pub deciders: u32,
}

impl Tally {
    /// Matches counted so far.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {} ({} settled by the galaxy decider)",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.deciders
        )
    }
}

/// Plays `games` matches between two AI levels.
#[instrument(skip(rng))]
pub fn run_selfplay<G: Rng>(x: AiLevel, o: AiLevel, games: u32, rng: &mut G) -> Result<Tally> {
    if !x.is_ai() || !o.is_ai() {
        bail!("Self-play needs an AI level for both seats, got X={} O={}", x, o);
    }
    let mut tally = Tally::default();
    for game in 0..games {
        let state = GameState::new()
            .with_name(Player::X, format!("{} X", x))
            .with_name(Player::O, format!("{} O", o))
            .with_ai_level(Player::X, x)
            .with_ai_level(Player::O, o);
        let mut session = Session::new(state, io::empty(), io::sink(), &mut *rng);
        let Ending::Decided(winner) = session.run()? else {
            bail!("Self-play match {} stopped without a winner", game);
        };
        match winner {
            Player::X => tally.x_wins += 1,
            Player::O => tally.o_wins += 1,
        }
        if let Phase::Finished {
            final_rps: Some(_), ..
        } = session.state().phase()
        {
            tally.deciders += 1;
        }
        info!(game, %winner, "Self-play match finished");
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_tally_counts_every_game() {
        let mut rng = StdRng::seed_from_u64(42);
        let tally = run_selfplay(AiLevel::Easy, AiLevel::Easy, 5, &mut rng).unwrap();
        assert_eq!(tally.games(), 5);
        assert!(tally.deciders <= 5);
    }

    #[test]
    fn test_seed_reproduces_run() {
        let run = |seed| {
            run_selfplay(AiLevel::Easy, AiLevel::Easy, 3, &mut StdRng::seed_from_u64(seed)).unwrap()
        };
        assert_eq!(run(8), run(8));
    }

    #[test]
    fn test_human_seat_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(run_selfplay(AiLevel::None, AiLevel::Easy, 1, &mut rng).is_err());
    }

    #[test]
    fn test_tally_display() {
        let tally = Tally {
            x_wins: 3,
            o_wins: 1,
            deciders: 2,
        };
        assert_eq!(
            tally.to_string(),
            "4 games: X won 3, O won 1 (2 settled by the galaxy decider)"
        );
    }
}
