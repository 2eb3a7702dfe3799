//! Parsing of typed moves and throws.

use strictly_galaxy::{Position, Throw};

/// Why a line of input was not understood.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Nothing was typed.
    #[display("Type a board and a square, e.g. \"4 0\" or \"center top-left\"")]
    Empty,

    /// Not exactly two positions.
    #[display("Expected a board and a square, got {} value(s)", _0)]
    WrongCount(usize),

    /// Neither a number 0-8 nor a position name.
    #[display("Unknown position \"{}\" (use 0-8 or names like top-left)", _0)]
    UnknownPosition(String),

    /// Not one of the five throws.
    #[display("Unknown throw \"{}\" (rock, paper, scissors, lizard, spock)", _0)]
    UnknownThrow(String),
}

impl std::error::Error for InputError {}

/// True for the words that leave the match.
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

/// Parses "board cell" as two positions, each a number 0-8 or a name.
///
/// Whitespace or a comma separates the two; names may not contain spaces.
pub fn parse_placement(line: &str) -> Result<(Position, Position), InputError> {
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [] => Err(InputError::Empty),
        [board, cell] => Ok((parse_position(board)?, parse_position(cell)?)),
        other => Err(InputError::WrongCount(other.len())),
    }
}

fn parse_position(token: &str) -> Result<Position, InputError> {
    Position::from_label_or_number(token)
        .ok_or_else(|| InputError::UnknownPosition(token.to_string()))
}

/// Parses a throw name, ignoring case. Single letters work too, with
/// `sp` for Spock.
pub fn parse_throw(line: &str) -> Result<Throw, InputError> {
    let word = line.trim();
    let throw = match word.to_ascii_lowercase().as_str() {
        "r" => Some(Throw::Rock),
        "p" => Some(Throw::Paper),
        "s" => Some(Throw::Scissors),
        "l" => Some(Throw::Lizard),
        "sp" => Some(Throw::Spock),
        _ => word.parse::<Throw>().ok(),
    };
    throw.ok_or_else(|| InputError::UnknownThrow(word.to_string()))
}
