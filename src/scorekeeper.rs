//! Admin-side game session.
//!
//! Wraps the state machine with the rules the scoring screen enforces:
//! nothing is accepted once the game is over, and a game that is over but
//! still live is ended automatically. Every change is published to the sync
//! channel.

use strictly_baseball::{
    Action, GameEvent, GameId, GameState, GameSummary, StateMachine, Transition,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Reason an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionRejected {
    /// The game is over; controls are locked.
    #[display("Game {} is over", _0)]
    GameOver(GameId),
}

impl std::error::Error for ActionRejected {}

/// Owns the authoritative state for one game.
#[derive(Debug)]
pub struct Scorekeeper {
    game_id: GameId,
    machine: StateMachine,
    updates: Option<UnboundedSender<GameState>>,
}

impl Scorekeeper {
    /// Takes ownership of `state`, stamping it with `game_id`.
    pub fn new(game_id: GameId, mut state: GameState) -> Self {
        state.set_game_id(game_id.clone());
        Self {
            game_id,
            machine: StateMachine::new(state),
            updates: None,
        }
    }

    /// Publishes every changed snapshot to `tx`.
    pub fn with_updates(mut self, tx: UnboundedSender<GameState>) -> Self {
        self.updates = Some(tx);
        self
    }

    /// Game id.
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        self.machine.state()
    }

    /// True once no further action is accepted.
    pub fn is_game_over(&self) -> bool {
        self.machine.is_game_over()
    }

    /// Final line score.
    pub fn summary(&self) -> GameSummary {
        GameSummary::from_state(self.machine.state())
    }

    /// Applies `action` unless the game is over.
    ///
    /// When the action leaves the game over but still live, the game is
    /// ended in the same step and the end events are appended.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn apply(&mut self, action: Action) -> Result<Transition, ActionRejected> {
        if self.machine.is_game_over() {
            warn!("Action rejected, game is over");
            return Err(ActionRejected::GameOver(self.game_id.clone()));
        }

        let mut transition = self.machine.apply(action);
        if self.machine.is_game_over() && self.machine.state().is_game_active() {
            info!("Game over, ending game");
            let end = self.machine.end_game();
            if let Transition::Applied { events, .. } = &mut transition {
                events.extend(end.events().iter().cloned());
            }
        }

        if let Transition::Applied { label, events } = &transition {
            debug!(label = %label, "Action applied");
            for event in events {
                log_event(event);
            }
            self.publish();
        }
        Ok(transition)
    }

    fn publish(&self) {
        if let Some(tx) = &self.updates
            && tx.send(self.machine.state().clone()).is_err()
        {
            warn!("Sync channel closed, snapshot not published");
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::RunScored { side, inning } => info!(%side, inning, "Run scored"),
        GameEvent::GameEnded { .. } => info!("Game ended"),
        other => debug!(event = ?other, "Game event"),
    }
}
