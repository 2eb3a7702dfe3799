//! Galaxy - terminal front-end for the strictly_galaxy engine.
//!
//! Interactive play, AI self-play and a viewer for saved matches.

#![warn(missing_docs)]

mod cli;
mod config;
mod input;
mod selfplay;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::{DEFAULT_LOG_LEVEL, MatchConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use strictly_galaxy::{AiLevel, GameState, Player};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            save,
            fresh,
            x_level,
            o_level,
            x_name,
            o_name,
        } => {
            let mut match_config = match &config {
                Some(path) => MatchConfig::from_file(path)?,
                None => MatchConfig::default(),
            };
            init_tracing(cli.log_level.as_deref().unwrap_or(match_config.log_filter()));
            match_config.override_seat(Player::X, x_name, x_level);
            match_config.override_seat(Player::O, o_name, o_level);
            match_config.override_save_path(save);
            run_play(&match_config, fresh)
        }
        Command::Selfplay { x, o, games, seed } => {
            init_tracing(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));
            run_selfplay(x, o, games, seed)
        }
        Command::Show { path } => {
            init_tracing(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));
            run_show(path)
        }
    }
}

/// Run an interactive match on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: &MatchConfig, fresh: bool) -> Result<()> {
    let saved = match (config.save_path(), fresh) {
        (Some(path), false) => session::resume(path)?,
        _ => GameState::new(),
    };
    let state = config.seat_players(&saved);
    info!(
        x_level = %state.seat(Player::X).level(),
        o_level = %state.seat(Player::O).level(),
        "Starting match"
    );

    let stdin = io::stdin();
    let mut rng = rand::rng();
    let mut session = session::Session::new(state, stdin.lock(), io::stdout(), &mut rng);
    if let Some(path) = config.save_path() {
        session = session.saving_to(path);
    }

    match session.run()? {
        session::Ending::Decided(winner) => info!(%winner, "Match over"),
        session::Ending::Suspended => match config.save_path() {
            Some(path) => println!("Match saved to {}", path.display()),
            None => println!("Match abandoned"),
        },
    }
    Ok(())
}

/// Run AI self-play and print the tally
#[instrument]
fn run_selfplay(x: AiLevel, o: AiLevel, games: u32, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let tally = selfplay::run_selfplay(x, o, games, &mut rng)?;
    info!(%tally, "Self-play finished");
    println!("{} (X: {}, O: {})", tally, x, o);
    Ok(())
}

/// Render a saved match
#[instrument(fields(path = %path.display()))]
fn run_show(path: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read save file {}", path.display()))?;
    let state = GameState::try_from_text(&text)?;
    println!("{}", state.display());
    println!(
        "X: {} ({})  O: {} ({})",
        state.seat(Player::X).name(),
        state.seat(Player::X).level(),
        state.seat(Player::O).name(),
        state.seat(Player::O).level()
    );
    println!("{}", state.status());
    Ok(())
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}
