//! Baserunner invariant: only the batting team is on base.

use super::Invariant;
use crate::state::GameState;

/// Invariant: every runner is on the batting team's roster, and no player
/// occupies two bases.
pub struct RunnersOnOffense;

impl Invariant<GameState> for RunnersOnOffense {
    fn holds(state: &GameState) -> bool {
        let team = state.batting_team();
        let runners: Vec<_> = state.bases().runners().map(|(_, id)| id).collect();
        let distinct = runners
            .iter()
            .enumerate()
            .all(|(i, id)| !runners[..i].contains(id));
        distinct && runners.iter().all(|id| team.contains(id))
    }

    fn description() -> &'static str {
        "Runners belong to the batting team, one base each"
    }
}
