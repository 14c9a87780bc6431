//! End-of-game detection.

use crate::phase::Half;
use crate::state::GameState;
use crate::types::Side;

/// True when the home team leads in the bottom of the last scheduled inning
/// (or later). Play stops there.
pub fn is_walk_off(state: &GameState) -> bool {
    match state.half_inning() {
        Some(h) => {
            h.inning >= state.total_innings()
                && h.half == Half::Bottom
                && state.runs(Side::Home) > state.runs(Side::Away)
        }
        None => false,
    }
}

/// True when no further play is possible.
///
/// Derived from the state alone: the game is over if it is not live, if the
/// home team has walked off, or if the inning has run past the schedule.
pub fn is_game_over(state: &GameState) -> bool {
    !state.is_game_active() || is_walk_off(state) || state.inning() > state.total_innings()
}
