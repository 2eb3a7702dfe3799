//! Command-line interface for the galaxy binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_galaxy::AiLevel;

/// Galaxy tic-tac-toe with RPSLS tiebreaks
#[derive(Parser, Debug)]
#[command(name = "galaxy")]
#[command(
    about = "Ultimate tic-tac-toe with Rock-Paper-Scissors-Lizard-Spock tiebreaks",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Log filter when RUST_LOG is unset (e.g. "info", "strictly_galaxy=debug")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Path to a match config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Save file; resumed on start and written after every action
        #[arg(long)]
        save: Option<PathBuf>,

        /// Ignore an existing save file and start over
        #[arg(long)]
        fresh: bool,

        /// Who plays X: none (human), easy, smart or hard
        #[arg(long)]
        x_level: Option<AiLevel>,

        /// Who plays O: none (human), easy, smart or hard
        #[arg(long)]
        o_level: Option<AiLevel>,

        /// Display name for X
        #[arg(long)]
        x_name: Option<String>,

        /// Display name for O
        #[arg(long)]
        o_name: Option<String>,
    },

    /// Pit two AI levels against each other
    Selfplay {
        /// Level playing X
        #[arg(long, default_value = "smart")]
        x: AiLevel,

        /// Level playing O
        #[arg(long, default_value = "easy")]
        o: AiLevel,

        /// Number of matches
        #[arg(short = 'n', long, default_value_t = 10)]
        games: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render a saved match
    Show {
        /// Save file written by `play --save`
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selfplay() {
        let args = ["galaxy", "selfplay", "--x", "hard", "-n", "3", "--seed", "9"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Selfplay { x, o, games, seed } => {
                assert_eq!(x, AiLevel::Hard);
                assert_eq!(o, AiLevel::Easy);
                assert_eq!(games, 3);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_play_overrides() {
        let cli = Cli::try_parse_from([
            "galaxy", "play", "--o-level", "Smart", "--x-name", "Arthur", "--save", "match.json",
            "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Play {
                o_level,
                x_name,
                save,
                config,
                fresh,
                ..
            } => {
                assert_eq!(o_level, Some(AiLevel::Smart));
                assert_eq!(x_name.as_deref(), Some("Arthur"));
                assert_eq!(save, Some(PathBuf::from("match.json")));
                assert!(config.is_none());
                assert!(!fresh);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["galaxy", "selfplay", "--x", "grandmaster"]).is_err());
    }

    #[test]
    fn test_show_requires_path() {
        assert!(Cli::try_parse_from(["galaxy", "show"]).is_err());
        assert!(Cli::try_parse_from(["galaxy", "show", "saved.json"]).is_ok());
    }
}
