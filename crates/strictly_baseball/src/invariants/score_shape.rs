//! Line score invariant.

use super::Invariant;
use crate::state::{GameState, MAX_INNINGS};
use crate::types::Side;

/// Invariant: the schedule is 1 to 9 innings, both score rows have one cell
/// per scheduled inning, and a live game is within the schedule.
pub struct ScoreShape;

impl Invariant<GameState> for ScoreShape {
    fn holds(state: &GameState) -> bool {
        let total = state.total_innings();
        let rows_fit = [Side::Home, Side::Away]
            .into_iter()
            .all(|side| state.score().row(side).len() == total as usize);
        let in_schedule = !state.is_game_active() || state.inning() <= total;
        (1..=MAX_INNINGS).contains(&total) && rows_fit && in_schedule
    }

    fn description() -> &'static str {
        "Score rows match the scheduled innings"
    }
}
