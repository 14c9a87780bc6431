//! Baseball rules.
//!
//! Pure functions over game state. The reducer composes them into
//! transitions; they never record undo points or raise events themselves.

pub mod game_over;
pub mod walk;

pub use game_over::{is_game_over, is_walk_off};
pub use walk::force_advance;
