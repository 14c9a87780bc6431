//! Batting order invariant.

use super::Invariant;
use crate::state::GameState;

/// Invariant: each batting order is a permutation of its roster and the
/// batter index points into it.
pub struct BattingOrderConsistent;

impl Invariant<GameState> for BattingOrderConsistent {
    fn holds(state: &GameState) -> bool {
        state.home_team().is_consistent() && state.away_team().is_consistent()
    }

    fn description() -> &'static str {
        "Batting orders are permutations of their rosters"
    }
}
