//! Core domain types for galaxy tic-tac-toe.

use super::ai::AiLevel;
use super::phases::Phase;
use super::position::Position;
use super::rules::determine_macro_winner;
use super::tiebreak::FinalRps;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on a micro-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Outcome of a single micro-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardStatus {
    /// Still accepting marks.
    #[default]
    Open,
    /// Claimed by a player, by a line or by winning the RPSLS tiebreak.
    Won(Player),
    /// Filled without a line; waiting on an RPSLS tiebreak.
    Cat,
}

impl BoardStatus {
    /// Returns the owning player, if the board has been claimed.
    pub fn winner(self) -> Option<Player> {
        match self {
            BoardStatus::Won(player) => Some(player),
            BoardStatus::Open | BoardStatus::Cat => None,
        }
    }
}

/// One 3x3 micro-board.
///
/// Once the status leaves [`BoardStatus::Open`] no square changes again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MicroBoard {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    status: BoardStatus,
}

impl MicroBoard {
    /// Creates a new empty, open board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the board outcome.
    pub fn status(&self) -> BoardStatus {
        self.status
    }

    /// True while marks may still be placed here.
    pub fn is_open(&self) -> bool {
        self.status == BoardStatus::Open
    }

    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    pub(crate) fn set_status(&mut self, status: BoardStatus) {
        self.status = status;
    }
}

/// Who sits in a player's chair: a display name and an AI assignment.
///
/// The engine never reads seats when judging legality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Seat {
    /// Display name.
    name: String,
    /// AI level driving this seat, `None` for a human.
    level: AiLevel,
}

impl Seat {
    /// Creates a seat.
    pub fn new(name: impl Into<String>, level: AiLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    fn default_for(player: Player) -> Self {
        Self::new(format!("Player {}", player), AiLevel::None)
    }
}

/// Complete match state.
///
/// Values are never mutated by engine operations: every transition returns
/// a fresh `GameState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Micro-boards in row-major macro order.
    pub(crate) boards: [MicroBoard; 9],
    /// Player to move (or to throw, during tiebreaks).
    pub(crate) current_player: Player,
    /// Board the next move is sent to; `None` means any open board.
    pub(crate) next_board: Option<Position>,
    /// What the match is waiting on.
    pub(crate) phase: Phase,
    pub(crate) x_seat: Seat,
    pub(crate) o_seat: Seat,
}

impl GameState {
    /// Creates a fresh match: empty boards, X to move, any board.
    #[instrument(level = "debug")]
    pub fn new() -> Self {
        Self {
            boards: Default::default(),
            current_player: Player::X,
            next_board: None,
            phase: Phase::Playing,
            x_seat: Seat::default_for(Player::X),
            o_seat: Seat::default_for(Player::O),
        }
    }

    /// Returns the micro-board at the given macro position.
    pub fn board(&self, pos: Position) -> &MicroBoard {
        &self.boards[pos.to_index()]
    }

    /// Returns all micro-boards in row-major order.
    pub fn boards(&self) -> &[MicroBoard; 9] {
        &self.boards
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the board constraint for the next move, `None` for any board.
    pub fn next_board(&self) -> Option<Position> {
        self.next_board
    }

    /// Returns the match phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the match winner, if decided.
    pub fn macro_winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Finished { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// Returns the micro-board awaiting an RPSLS tiebreak.
    pub fn pending_rps_board(&self) -> Option<Position> {
        match self.phase {
            Phase::MicroTiebreak { board, .. } => Some(board),
            _ => None,
        }
    }

    /// True while the galaxy best-of-3 decider is running.
    pub fn pending_final_rps(&self) -> bool {
        matches!(self.phase, Phase::GalaxyTiebreak { .. })
    }

    /// Returns the galaxy decider, live or finished, once it has ever started.
    pub fn final_rps(&self) -> Option<&FinalRps> {
        match &self.phase {
            Phase::GalaxyTiebreak { final_rps } => Some(final_rps),
            Phase::Finished { final_rps, .. } => final_rps.as_ref(),
            _ => None,
        }
    }

    /// Returns the seat for a player.
    pub fn seat(&self, player: Player) -> &Seat {
        match player {
            Player::X => &self.x_seat,
            Player::O => &self.o_seat,
        }
    }

    /// Returns a copy of this state with a player's display name replaced.
    pub fn with_name(&self, player: Player, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        let seat = next.seat_mut(player);
        seat.name = name.into();
        next
    }

    /// Returns a copy of this state with a player's AI level replaced.
    pub fn with_ai_level(&self, player: Player, level: AiLevel) -> Self {
        let mut next = self.clone();
        next.seat_mut(player).level = level;
        next
    }

    fn seat_mut(&mut self, player: Player) -> &mut Seat {
        match player {
            Player::X => &mut self.x_seat,
            Player::O => &mut self.o_seat,
        }
    }

    /// Same position with a different player to move; used by the search to
    /// check what the opponent could do from here.
    pub(crate) fn with_current_player(&self, player: Player) -> Self {
        let mut next = self.clone();
        next.current_player = player;
        next
    }

    /// Formats the galaxy as a human-readable grid.
    ///
    /// Open boards show their marks, claimed boards are filled with the
    /// owner's letter and boards waiting on RPSLS show `?`.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for macro_row in 0..3 {
            for micro_row in 0..3 {
                for macro_col in 0..3 {
                    let micro = &self.boards[macro_row * 3 + macro_col];
                    for micro_col in 0..3 {
                        let square = micro.squares[micro_row * 3 + micro_col];
                        let symbol = match (micro.status(), square) {
                            (BoardStatus::Won(player), _) => player.to_string().to_lowercase(),
                            (_, Square::Occupied(player)) => player.to_string(),
                            (BoardStatus::Cat, Square::Empty) => "?".to_string(),
                            (BoardStatus::Open, Square::Empty) => ".".to_string(),
                        };
                        result.push_str(&symbol);
                    }
                    if macro_col < 2 {
                        result.push_str(" | ");
                    }
                }
                result.push('\n');
            }
            if macro_row < 2 {
                result.push_str("----+-----+----\n");
            }
        }
        if let Some(winner) = determine_macro_winner(&self.boards) {
            result.push_str(&format!("Galaxy line for {}\n", winner));
        }
        result
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
