//! Drives one match on a text terminal.
//!
//! Humans type on `input`; AI seats move and throw on their own. Everything
//! shown to players goes to `output`, so a whole match can be scripted.

use crate::input::{is_quit, parse_placement, parse_throw};
use anyhow::{Context, Result};
use rand::Rng;
use std::io::{BufRead, Write};
use std::path::Path;
use strictly_galaxy::{
    Clash, GameState, Phase, Player, Position, Throw, apply_move, choose_move_with, legal_boards,
    random_throw_with, submit_final_throw, submit_micro_throw,
};
use tracing::{debug, info, instrument};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The match has a winner.
    Decided(Player),
    /// A player quit or input ran out; the match can be resumed.
    Suspended,
}

/// A match in progress plus where it reads and writes.
pub struct Session<'a, R, W, G> {
    state: GameState,
    input: R,
    output: W,
    rng: &'a mut G,
    save_path: Option<&'a Path>,
}

impl<'a, R: BufRead, W: Write, G: Rng> Session<'a, R, W, G> {
    /// Creates a session around an existing match.
    pub fn new(state: GameState, input: R, output: W, rng: &'a mut G) -> Self {
        Self {
            state,
            input,
            output,
            rng,
            save_path: None,
        }
    }

    /// Writes the match to `path` after every action.
    pub fn saving_to(mut self, path: &'a Path) -> Self {
        self.save_path = Some(path);
        self
    }

    /// The match as it stands.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays until the match is decided or a human stops.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<Ending> {
        info!(
            x = %self.state.seat(Player::X).name(),
            o = %self.state.seat(Player::O).name(),
            "Match started"
        );
        loop {
            let progressed = match self.state.phase().clone() {
                Phase::Finished { winner, final_rps } => {
                    writeln!(self.output, "{}", self.state.display())?;
                    let name = self.state.seat(winner).name().clone();
                    match &final_rps {
                        Some(decider) => writeln!(
                            self.output,
                            "{} ({}) wins the galaxy decider {}-{}!",
                            name,
                            winner,
                            decider.score(winner),
                            decider.score(winner.opponent())
                        )?,
                        None => writeln!(self.output, "{} ({}) wins the galaxy!", name, winner)?,
                    }
                    info!(%winner, decider = final_rps.is_some(), "Match decided");
                    return Ok(Ending::Decided(winner));
                }
                Phase::Playing => self.placement()?,
                Phase::MicroTiebreak { board, round } => {
                    let player = next_thrower(round.pick(Player::X));
                    self.micro_throw(board, player)?
                }
                Phase::GalaxyTiebreak { final_rps } => {
                    let player = next_thrower(final_rps.round().pick(Player::X));
                    self.final_throw(player)?
                }
            };
            if !progressed {
                info!("Match suspended");
                return Ok(Ending::Suspended);
            }
            self.save()?;
        }
    }

    /// One placement. Returns false if the player quit.
    fn placement(&mut self) -> Result<bool> {
        let player = self.state.current_player();
        let level = *self.state.seat(player).level();
        if level.is_ai() {
            let Some(mov) = choose_move_with(&self.state, level, self.rng) else {
                anyhow::bail!("{} found no legal move in a live match", player);
            };
            info!(%mov, %level, "AI placed");
            writeln!(
                self.output,
                "{} plays {} on board {}",
                self.state.seat(player).name(),
                mov.cell,
                mov.board
            )?;
            self.state = apply_move(&self.state, mov.board, mov.cell)?;
            return Ok(true);
        }

        writeln!(self.output, "{}", self.state.display())?;
        loop {
            let boards = legal_boards(&self.state)
                .into_iter()
                .map(|board| board.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(
                self.output,
                "{} ({}), board and square [{}]: ",
                self.state.seat(player).name(),
                player,
                boards
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            let (board, cell) = match parse_placement(&line) {
                Ok(target) => target,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    continue;
                }
            };
            match apply_move(&self.state, board, cell) {
                Ok(next) => {
                    debug!(%board, %cell, "Human placed");
                    self.state = next;
                    return Ok(true);
                }
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }

    fn micro_throw(&mut self, board: Position, player: Player) -> Result<bool> {
        if player == Player::X {
            writeln!(self.output, "{}", self.state.status())?;
        }
        let Some(throw) = self.throw_for(player)? else {
            return Ok(false);
        };
        let outcome = submit_micro_throw(&self.state, player, throw)?;
        if let Some(clash) = &outcome.clash {
            self.report_clash(clash)?;
        }
        if let Some(resolution) = &outcome.resolved {
            let winner = *resolution.winner();
            info!(%board, %winner, "Micro tiebreak resolved");
            writeln!(
                self.output,
                "{} takes board {}: {}",
                outcome.state.seat(winner).name(),
                board,
                resolution.narrate()
            )?;
        }
        self.state = outcome.state;
        Ok(true)
    }

    fn final_throw(&mut self, player: Player) -> Result<bool> {
        if player == Player::X {
            writeln!(self.output, "{}", self.state.status())?;
        }
        let Some(throw) = self.throw_for(player)? else {
            return Ok(false);
        };
        let outcome = submit_final_throw(&self.state, player, throw)?;
        if let Some(clash) = &outcome.clash {
            self.report_clash(clash)?;
            if let Some(decider) = outcome.state.final_rps() {
                writeln!(
                    self.output,
                    "Decider: X {} - O {}",
                    decider.score(Player::X),
                    decider.score(Player::O)
                )?;
            }
        }
        if let Some(winner) = outcome.final_winner {
            info!(%winner, "Galaxy decider won");
        }
        self.state = outcome.state;
        Ok(true)
    }

    /// A throw from an AI seat, or one typed by a human.
    fn throw_for(&mut self, player: Player) -> Result<Option<Throw>> {
        let seat = self.state.seat(player).clone();
        if seat.level().is_ai() {
            let throw = random_throw_with(self.rng);
            debug!(%player, %throw, "AI threw");
            return Ok(Some(throw));
        }
        loop {
            write!(
                self.output,
                "{} ({}), throw rock, paper, scissors, lizard or spock: ",
                seat.name(),
                player
            )?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_throw(&line) {
                Ok(throw) => return Ok(Some(throw)),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }

    fn report_clash(&mut self, clash: &Clash) -> Result<()> {
        match clash.narrate() {
            Some(narration) => {
                writeln!(self.output, "X {} vs O {}: {}", clash.x, clash.o, narration)?
            }
            None => writeln!(self.output, "Both threw {}. Again!", clash.x)?,
        }
        Ok(())
    }

    /// Next non-empty line, or `None` on end of input or a quit word.
    fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if is_quit(&line) {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
    }

    fn save(&self) -> Result<()> {
        let Some(path) = self.save_path else {
            return Ok(());
        };
        let text = self.state.to_text()?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write save file {}", path.display()))?;
        debug!(path = %path.display(), "Match saved");
        Ok(())
    }
}

/// X throws first in every round; once X's pick is in, it is O's turn.
fn next_thrower(x_pick: Option<Throw>) -> Player {
    match x_pick {
        None => Player::X,
        Some(_) => Player::O,
    }
}

/// Loads a saved match, or starts a new one when there is none.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn resume(path: &Path) -> Result<GameState> {
    if !path.exists() {
        debug!("No save file, starting fresh");
        return Ok(GameState::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read save file {}", path.display()))?;
    let state = GameState::from_text(&text);
    info!(status = %state.status(), "Resumed saved match");
    Ok(state)
}
