//! Count invariant: balls, strikes and outs never rest at their trigger values.

use super::Invariant;
use crate::state::{GameState, MAX_BALLS, MAX_OUTS, MAX_STRIKES};

/// Invariant: `balls < 4`, `strikes < 3`, `outs < 3`.
///
/// A fourth ball, third strike or third out is resolved inside the
/// transition that produced it.
pub struct CountInRange;

impl Invariant<GameState> for CountInRange {
    fn holds(state: &GameState) -> bool {
        state.balls() < MAX_BALLS && state.strikes() < MAX_STRIKES && state.outs() < MAX_OUTS
    }

    fn description() -> &'static str {
        "Balls, strikes and outs stay below their limits"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_outs_violates() {
        let mut state = GameState::default();
        assert!(CountInRange::holds(&state));
        state.outs = 3;
        assert!(!CountInRange::holds(&state));
    }
}
