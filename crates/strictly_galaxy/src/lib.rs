//! Strictly Galaxy - rules engine and AI for galaxy tic-tac-toe.
//!
//! Nine 3x3 micro-boards sit in a 3x3 macro grid. The cell you play picks
//! the micro-board your opponent must play next. Drawn micro-boards are
//! settled by a round of Rock-Paper-Scissors-Lizard-Spock, and a drawn macro
//! board goes to a best-of-3 RPSLS decider.
//!
//! # Architecture
//!
//! - **Rules**: line detection shared by micro and macro boards
//! - **Engine**: `apply_move` and legal move generation
//! - **Tiebreak**: micro and galaxy RPSLS sub-protocols
//! - **Eval / AI**: static evaluation and minimax move selection
//! - **Codec**: lossless text round trip with repair on bad input
//!
//! Every operation borrows a [`GameState`] and returns a new one. Nothing
//! here performs I/O.
//!
//! # Example
//!
//! ```
//! use strictly_galaxy::{apply_move, legal_moves, GameState, Position};
//!
//! let state = GameState::new();
//! let state = apply_move(&state, Position::Center, Position::Center).unwrap();
//! assert!(legal_moves(&state).iter().all(|m| m.board == Position::Center));
//! ```

#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod codec;
mod contracts;
mod engine;
mod eval;
mod invariants;
mod phases;
mod position;
mod rpsls;
mod rules;
mod tiebreak;
mod types;

// Crate-level exports - Domain types
pub use position::Position;
pub use types::{BoardStatus, GameState, MicroBoard, Player, Seat, Square};

// Crate-level exports - Phases
pub use phases::{GameStatus, Phase};

// Crate-level exports - Actions and errors
pub use action::{Move, MoveError, TiebreakError};
pub use codec::CodecError;

// Crate-level exports - Rules
pub use rules::{all_closed, detect_line_winner, determine_macro_winner, galaxy_stalled, is_full};

// Crate-level exports - Engine
pub use engine::{apply_move, legal_boards, legal_moves};

// Crate-level exports - RPSLS
pub use rpsls::{Clash, RoundOutcome, RpsRound, Throw, random_throw, random_throw_with};
pub use tiebreak::{
    FinalRps, FinalThrowOutcome, MicroThrowOutcome, Resolution, submit_final_throw,
    submit_micro_throw,
};

// Crate-level exports - AI
pub use ai::{AiLevel, choose_move, choose_move_with};
pub use eval::{evaluate, line_potential};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    BoardIsLegal, BoardIsOpen, CellIsEmpty, ClosedBoardsFrozen, Contract, LegalPlacement,
    MatchInProgress, MoveContract, NoTiebreakPending,
};
pub use invariants::{
    BoardsConsistent, GalaxyInvariants, Invariant, InvariantSet, InvariantViolation,
    PhaseConsistent, TiebreakScoreBounded,
};
