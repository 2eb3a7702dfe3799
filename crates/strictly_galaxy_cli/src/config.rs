//! Match configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_galaxy::{AiLevel, GameState, Player};
use tracing::{debug, info, instrument};

/// Log filter used when neither RUST_LOG nor a flag sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// One seat as written in the config file. Missing fields fall back to the
/// seat's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name.
    #[serde(default)]
    name: Option<String>,

    /// AI level; `none` means a human types the moves.
    #[serde(default)]
    level: Option<AiLevel>,
}

/// Configuration for a terminal match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seat X.
    #[serde(default)]
    x: SeatConfig,

    /// Seat O.
    #[serde(default)]
    o: SeatConfig,

    /// Where to save the match after every action.
    #[serde(default)]
    save_path: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset.
    #[serde(default)]
    log_level: Option<String>,
}

impl MatchConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            x = %config.seat_name(Player::X),
            o = %config.seat_name(Player::O),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Applies command-line overrides for one seat.
    pub fn override_seat(&mut self, player: Player, name: Option<String>, level: Option<AiLevel>) {
        let seat = match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        };
        if name.is_some() {
            seat.name = name;
        }
        if level.is_some() {
            seat.level = level;
        }
    }

    /// Overrides the save file.
    pub fn override_save_path(&mut self, path: Option<PathBuf>) {
        if path.is_some() {
            self.save_path = path;
        }
    }

    /// Resolved display name for a seat.
    pub fn seat_name(&self, player: Player) -> String {
        self.seat(player)
            .name
            .clone()
            .unwrap_or_else(|| format!("Player {}", player))
    }

    /// Resolved level for a seat: X defaults to a human, O to `smart`.
    pub fn seat_level(&self, player: Player) -> AiLevel {
        self.seat(player).level.unwrap_or(match player {
            Player::X => AiLevel::None,
            Player::O => AiLevel::Smart,
        })
    }

    /// Copies both seats onto a match.
    pub fn seat_players(&self, state: &GameState) -> GameState {
        [Player::X, Player::O].into_iter().fold(state.clone(), |state, player| {
            state
                .with_name(player, self.seat_name(player))
                .with_ai_level(player, self.seat_level(player))
        })
    }

    /// Log filter from the file, or the default.
    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    fn seat(&self, player: Player) -> &SeatConfig {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
