//! Game rules for galaxy tic-tac-toe.
//!
//! Pure functions over squares and boards. Micro-boards and the galaxy
//! board share the same line geometry.

pub mod draw;
pub mod win;

pub use draw::{all_closed, galaxy_stalled, is_full};
pub(crate) use win::{LINES, macro_squares};
pub use win::{detect_line_winner, determine_macro_winner};
