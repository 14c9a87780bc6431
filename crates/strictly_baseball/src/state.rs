//! The aggregate game state and its single-slot undo record.

use crate::action::Action;
use crate::phase::{HalfInning, Phase};
use crate::types::{Bases, GameId, PlayerId, Score, Side, Team};
use serde::{Deserialize, Serialize};

/// A fourth ball is a walk; `balls` never rests at this value.
pub const MAX_BALLS: u8 = 4;
/// A third strike is a strikeout; `strikes` never rests at this value.
pub const MAX_STRIKES: u8 = 3;
/// A third out ends the half-inning; `outs` never rests at this value.
pub const MAX_OUTS: u8 = 3;
/// Upper bound on the scheduled length of a game.
pub const MAX_INNINGS: u8 = 9;

/// Snapshot of one game.
///
/// Mutated only through [`StateMachine`](crate::StateMachine), so every
/// observer sees either the state before a transition or the state after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub(crate) home_team: Team,
    pub(crate) away_team: Team,
    pub(crate) phase: Phase,
    pub(crate) balls: u8,
    pub(crate) strikes: u8,
    pub(crate) outs: u8,
    pub(crate) bases: Bases,
    pub(crate) score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) game_id: Option<GameId>,
    pub(crate) total_innings: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_action: Option<LastAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_updated: Option<i64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            home_team: Team::default(),
            away_team: Team::default(),
            phase: Phase::Setup,
            balls: 0,
            strikes: 0,
            outs: 0,
            bases: Bases::default(),
            score: Score::new(MAX_INNINGS as usize),
            game_id: None,
            total_innings: MAX_INNINGS,
            last_action: None,
            last_updated: None,
        }
    }
}

impl GameState {
    /// Home team.
    pub fn home_team(&self) -> &Team {
        &self.home_team
    }

    /// Visiting team.
    pub fn away_team(&self) -> &Team {
        &self.away_team
    }

    /// Team for a side.
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub(crate) fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Home => &mut self.home_team,
            Side::Away => &mut self.away_team,
        }
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current half-inning, if the game has started.
    pub fn half_inning(&self) -> Option<HalfInning> {
        self.phase.half_inning()
    }

    /// Current inning (1 during setup).
    pub fn inning(&self) -> u8 {
        self.phase.inning()
    }

    /// True in the top half (and during setup).
    pub fn is_top_inning(&self) -> bool {
        self.phase.is_top_inning()
    }

    /// True while a half-inning is being played.
    pub fn is_game_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Balls in the current count.
    pub fn balls(&self) -> u8 {
        self.balls
    }

    /// Strikes in the current count.
    pub fn strikes(&self) -> u8 {
        self.strikes
    }

    /// Outs in the current half-inning.
    pub fn outs(&self) -> u8 {
        self.outs
    }

    /// Runners on base.
    pub fn bases(&self) -> &Bases {
        &self.bases
    }

    /// Line score.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Join code, if assigned.
    pub fn game_id(&self) -> Option<&GameId> {
        self.game_id.as_ref()
    }

    /// Assigns the join code.
    pub fn set_game_id(&mut self, id: GameId) {
        self.game_id = Some(id);
    }

    /// Scheduled number of innings.
    pub fn total_innings(&self) -> u8 {
        self.total_innings
    }

    /// The undo record for the most recent action, if any.
    pub fn last_action(&self) -> Option<&LastAction> {
        self.last_action.as_ref()
    }

    /// Milliseconds since the epoch of the most recent change.
    pub fn last_updated(&self) -> Option<i64> {
        self.last_updated
    }

    /// Side currently at bat.
    pub fn batting_side(&self) -> Side {
        if self.is_top_inning() {
            Side::Away
        } else {
            Side::Home
        }
    }

    /// Team currently at bat.
    pub fn batting_team(&self) -> &Team {
        self.team(self.batting_side())
    }

    /// Id of the player due up for the batting team.
    pub fn current_batter_id(&self) -> Option<&PlayerId> {
        self.batting_team().current_batter()
    }

    /// Total runs for a side.
    pub fn runs(&self, side: Side) -> u32 {
        self.score.total(side)
    }
}

/// Single-slot undo record.
///
/// `previous_state` is the complete state before the action. Its own
/// `last_action` is kept with one further level of history stripped, so undo
/// chains back at most one extra step and the stored document stays bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAction {
    #[serde(rename = "type")]
    pub(crate) label: String,
    pub(crate) action: Action,
    pub(crate) previous_state: Box<GameState>,
    pub(crate) timestamp: i64,
}

impl LastAction {
    /// Human-readable label of the action ("Walk", "Single", ...).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The action that was applied.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// State before the action.
    pub fn previous_state(&self) -> &GameState {
        &self.previous_state
    }

    /// Milliseconds since the epoch when the action was applied.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Copy of `state` suitable for storing as an undo point.
pub(crate) fn undo_point(state: &GameState) -> GameState {
    let mut snapshot = state.clone();
    if let Some(last) = snapshot.last_action.as_mut() {
        last.previous_state.last_action = None;
    }
    snapshot
}
