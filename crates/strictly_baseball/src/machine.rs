//! The game state machine: the single mutator of a [`GameState`].

use crate::action::{Action, GameEvent, PlayKind, Transition};
use crate::reducer::Reducer;
use crate::rules;
use crate::state::{undo_point, GameState, LastAction};
use crate::types::{Base, BasePath, PlayerId, Side, Team};
use tracing::{debug, info, instrument};

/// Owns one game's state and applies actions to it atomically.
///
/// Each applied action records the complete prior state as the undo point.
/// Actions that change nothing leave the undo point untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMachine {
    state: GameState,
}

impl StateMachine {
    /// Wraps an existing state (freshly set up, or fetched from a store).
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consumes the machine, returning the state.
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Applies an action.
    ///
    /// No game-over gating happens here; callers that drive a live control
    /// panel check [`is_game_over`](Self::is_game_over) first.
    #[instrument(skip(self), fields(game_id = ?self.state.game_id, inning = self.state.inning()))]
    pub fn apply(&mut self, action: Action) -> Transition {
        if action == Action::Undo {
            return self.undo_last_action();
        }

        let before = self.state.clone();
        let label = action.label(&before);
        let events = {
            let mut reducer = Reducer::new(&mut self.state);
            reducer.dispatch(action);
            reducer.into_events()
        };

        if self.state == before {
            debug!(%label, "Action changed nothing");
            return Transition::Unchanged;
        }

        let now = now_millis();
        self.state.last_action = Some(LastAction {
            label: label.clone(),
            action,
            previous_state: Box::new(undo_point(&before)),
            timestamp: now,
        });
        self.state.last_updated = Some(now);

        #[cfg(debug_assertions)]
        self.check_invariants();

        info!(
            %label,
            balls = self.state.balls,
            strikes = self.state.strikes,
            outs = self.state.outs,
            events = events.len(),
            "Action applied"
        );
        Transition::Applied { label, events }
    }

    /// Restores the state before the most recent action.
    ///
    /// The restored state carries its own undo point, so a second undo steps
    /// back once more; beyond that there is no history. With no history this
    /// is a no-op.
    #[instrument(skip(self))]
    pub fn undo_last_action(&mut self) -> Transition {
        let Some(last) = self.state.last_action.take() else {
            debug!("Nothing to undo");
            return Transition::Unchanged;
        };

        let LastAction {
            label,
            previous_state,
            ..
        } = last;
        self.state = *previous_state;
        self.state.last_updated = Some(now_millis());
        info!(undone = %label, "Action undone");

        Transition::Applied {
            label: "Undo".to_string(),
            events: vec![GameEvent::ActionUndone { label }],
        }
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use crate::invariants::{BaseballInvariants, InvariantSet};

        if let Err(violations) = BaseballInvariants::check_all(&self.state) {
            for violation in violations {
                tracing::warn!(invariant = %violation.description, "Invariant violated");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Operations
    // ─────────────────────────────────────────────────────────────

    /// One ball; the fourth walks the batter.
    pub fn add_ball(&mut self) -> Transition {
        self.apply(Action::AddBall)
    }

    /// One strike; the third strikes the batter out.
    pub fn add_strike(&mut self) -> Transition {
        self.apply(Action::AddStrike)
    }

    /// One out; the third switches sides.
    pub fn add_out(&mut self) -> Transition {
        self.apply(Action::AddOut)
    }

    /// Zeroes balls and strikes.
    pub fn reset_count(&mut self) -> Transition {
        self.apply(Action::ResetCount)
    }

    /// Moves a runner forward, or the batter from home.
    pub fn advance_runner(&mut self, from: BasePath, to: BasePath) -> Transition {
        self.apply(Action::AdvanceRunner { from, to })
    }

    /// Moves a runner back, only onto an empty base.
    pub fn return_runner(&mut self, from: Base, to: Base) -> Transition {
        self.apply(Action::ReturnRunner { from, to })
    }

    /// Puts out the runner on `base`, if any.
    pub fn strike_out_runner(&mut self, base: Base) -> Transition {
        self.apply(Action::StrikeOutRunner { base })
    }

    /// Empties all bases.
    pub fn clear_bases(&mut self) -> Transition {
        self.apply(Action::ClearBases)
    }

    /// Credits a run to the batting side in the current inning.
    pub fn add_run(&mut self) -> Transition {
        self.apply(Action::AddRun)
    }

    /// Brings up the next batter.
    pub fn next_batter(&mut self) -> Transition {
        self.apply(Action::NextBatter)
    }

    /// Ends the half-inning.
    pub fn switch_sides(&mut self) -> Transition {
        self.apply(Action::SwitchSides)
    }

    /// Ends the half-inning regardless of outs.
    pub fn end_team_turn(&mut self) -> Transition {
        self.apply(Action::EndTeamTurn)
    }

    /// Ends the game.
    pub fn end_game(&mut self) -> Transition {
        self.apply(Action::EndGame)
    }

    /// Runs a composite play as one undoable step.
    pub fn play(&mut self, play: PlayKind) -> Transition {
        self.apply(Action::Play { play })
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// True when no further play is possible.
    pub fn is_game_over(&self) -> bool {
        rules::is_game_over(&self.state)
    }

    /// Id of the player due up.
    pub fn current_batter_id(&self) -> Option<&PlayerId> {
        self.state.current_batter_id()
    }

    /// Side at bat.
    pub fn batting_side(&self) -> Side {
        self.state.batting_side()
    }

    /// Team at bat.
    pub fn batting_team(&self) -> &Team {
        self.state.batting_team()
    }
}

impl From<GameState> for StateMachine {
    fn from(state: GameState) -> Self {
        Self::new(state)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
