//! Text round trip for saved matches.

use super::GameState;
use super::invariants::{GalaxyInvariants, InvariantSet};
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// Codec error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Codec error: {} at {}:{}", message, file, line)]
pub struct CodecError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CodecError {
    /// Creates a new codec error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

impl GameState {
    /// Serializes the full state: boards, turn, pending board, phase and
    /// any tiebreak picks and scores.
    #[instrument(level = "debug", skip(self))]
    pub fn to_text(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses text written by [`GameState::to_text`].
    ///
    /// Input that parses but describes an impossible match (a claimed board
    /// with no line, a tiebreak on an open board, a decider past two points)
    /// is rejected.
    #[instrument(level = "debug", skip(text), fields(len = text.len()))]
    pub fn try_from_text(text: &str) -> Result<Self, CodecError> {
        let state: Self = serde_json::from_str(text)?;
        GalaxyInvariants::check_all(&state).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            CodecError::new(format!("Inconsistent state: {}", descriptions))
        })?;
        debug!(status = %state.status(), "State decoded");
        Ok(state)
    }

    /// Parses saved text, falling back to a fresh match when it cannot be
    /// trusted.
    pub fn from_text(text: &str) -> Self {
        Self::try_from_text(text).unwrap_or_else(|err| {
            warn!(%err, "Discarding saved state, starting a new match");
            Self::new()
        })
    }
}
