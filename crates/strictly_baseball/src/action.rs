//! First-class scoring actions.
//!
//! Every change to a game goes through an [`Action`]. Actions are plain data:
//! they can be logged, serialized, parsed from a command line and replayed
//! against a [`StateMachine`](crate::StateMachine).

use crate::phase::HalfInning;
use crate::state::{GameState, MAX_BALLS, MAX_STRIKES};
use crate::types::{Base, BasePath, GameId, PlayerId, Side};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Composite plays the control panel offers as single buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
pub enum PlayKind {
    /// Batter to first; every runner advances one base.
    Single,
    /// Batter to second; runners on second and third score, first goes to third.
    Double,
    /// Batter to third; every runner scores.
    Triple,
    /// Batter and every runner score.
    #[strum(to_string = "Home Run")]
    HomeRun,
    /// Batter is put out on the play.
    #[strum(to_string = "Direct Out")]
    DirectOut,
}

/// A scoring action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// One ball; the fourth is a walk.
    AddBall,
    /// One strike; the third is a strikeout.
    AddStrike,
    /// One out; the third ends the half-inning.
    AddOut,
    /// Zero the count.
    ResetCount,
    /// Move a runner (or the batter, from home) forward.
    AdvanceRunner {
        /// Origin.
        from: BasePath,
        /// Destination.
        to: BasePath,
    },
    /// Move a runner back to an empty base.
    ReturnRunner {
        /// Origin.
        from: Base,
        /// Destination.
        to: Base,
    },
    /// Put out the runner on a base (pickoff, caught stealing).
    StrikeOutRunner {
        /// Base the runner is put out on.
        base: Base,
    },
    /// Empty every base.
    ClearBases,
    /// Credit one run to the batting side.
    AddRun,
    /// Bring up the next batter.
    NextBatter,
    /// End the half-inning.
    SwitchSides,
    /// End the half-inning regardless of outs.
    EndTeamTurn,
    /// End the game.
    EndGame,
    /// A composite play.
    Play {
        /// Which play.
        play: PlayKind,
    },
    /// Restore the state before the most recent action.
    Undo,
}

impl Action {
    /// Human-readable label for applying this action to `state`.
    pub fn label(&self, state: &GameState) -> String {
        match self {
            Action::AddBall if state.balls() >= MAX_BALLS - 1 => "Ball (Walk)".to_string(),
            Action::AddBall => "Ball".to_string(),
            Action::AddStrike if state.strikes() >= MAX_STRIKES - 1 => {
                "Strike (Strikeout)".to_string()
            }
            Action::AddStrike => "Strike".to_string(),
            Action::AddOut => "Out".to_string(),
            Action::ResetCount => "Reset Count".to_string(),
            Action::AdvanceRunner { from, to } => match (from, to) {
                (BasePath::Home, BasePath::Home) => "Home Run".to_string(),
                (BasePath::Home, BasePath::First) => "Hit (Single)".to_string(),
                (BasePath::Home, BasePath::Second) => "Hit (Double)".to_string(),
                (BasePath::Home, BasePath::Third) => "Hit (Triple)".to_string(),
                (from, BasePath::Home) => format!("Runner Scored from {}", from),
                (from, to) => format!("Runner Advanced: {} to {}", from, to),
            },
            Action::ReturnRunner { from, to } => format!("Runner Returned: {} to {}", from, to),
            Action::StrikeOutRunner { base } => format!("Strike Out Runner at {}", base),
            Action::ClearBases => "Clear Bases".to_string(),
            Action::AddRun => "Run Scored".to_string(),
            Action::NextBatter => "Next Batter".to_string(),
            Action::SwitchSides if state.is_top_inning() => {
                "Switch Sides (Top to Bottom)".to_string()
            }
            Action::SwitchSides => "Switch Sides (Bottom to Top)".to_string(),
            Action::EndTeamTurn => "End Team Turn".to_string(),
            Action::EndGame => "End Game".to_string(),
            Action::Play { play } => play.to_string(),
            Action::Undo => "Undo".to_string(),
        }
    }
}

/// Error parsing an action from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionParseError {
    /// No words given.
    #[display("Empty action")]
    Empty,

    /// The verb is not a known action.
    #[display("Unknown action: {}", _0)]
    UnknownAction(String),

    /// A base argument is missing or not a base.
    #[display("Invalid base argument for '{}': {}", verb, argument)]
    InvalidBase {
        /// Action verb.
        verb: String,
        /// Offending argument (empty if missing).
        argument: String,
    },
}

impl std::error::Error for ActionParseError {}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parses whitespace-separated words, e.g. `ball`, `advance first home`,
    /// `pickoff second`, `single`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<String> = s.split_whitespace().map(str::to_lowercase).collect();
        let Some((verb, args)) = words.split_first() else {
            return Err(ActionParseError::Empty);
        };

        let path = |index: usize| parse_arg::<BasePath>(verb, args, index);
        let base = |index: usize| parse_arg::<Base>(verb, args, index);

        let action = match verb.as_str() {
            "ball" => Action::AddBall,
            "strike" => Action::AddStrike,
            "out" => Action::AddOut,
            "reset" | "reset-count" => Action::ResetCount,
            "advance" => Action::AdvanceRunner {
                from: path(0)?,
                to: path(1)?,
            },
            "return" => Action::ReturnRunner {
                from: base(0)?,
                to: base(1)?,
            },
            "pickoff" | "strike-out-runner" => Action::StrikeOutRunner { base: base(0)? },
            "clear" | "clear-bases" => Action::ClearBases,
            "run" => Action::AddRun,
            "next" | "next-batter" => Action::NextBatter,
            "switch" | "switch-sides" => Action::SwitchSides,
            "end-turn" => Action::EndTeamTurn,
            "end" | "end-game" => Action::EndGame,
            "undo" => Action::Undo,
            "single" => Action::Play {
                play: PlayKind::Single,
            },
            "double" => Action::Play {
                play: PlayKind::Double,
            },
            "triple" => Action::Play {
                play: PlayKind::Triple,
            },
            "homerun" | "home-run" | "hr" => Action::Play {
                play: PlayKind::HomeRun,
            },
            "direct-out" | "groundout" | "flyout" => Action::Play {
                play: PlayKind::DirectOut,
            },
            other => return Err(ActionParseError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }
}

fn parse_arg<T: FromStr>(verb: &str, args: &[String], index: usize) -> Result<T, ActionParseError> {
    let raw = args.get(index).map(String::as_str).unwrap_or_default();
    T::from_str(raw).map_err(|_| ActionParseError::InvalidBase {
        verb: verb.to_string(),
        argument: raw.to_string(),
    })
}

/// Something notable that happened while applying an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    /// A run was credited.
    RunScored {
        /// Scoring side.
        side: Side,
        /// Inning credited.
        inning: u8,
    },
    /// The batter drew a walk.
    Walked {
        /// Batter, if the order was non-empty.
        batter: Option<PlayerId>,
    },
    /// The batter struck out.
    StruckOut {
        /// Batter, if the order was non-empty.
        batter: Option<PlayerId>,
    },
    /// A new half-inning began.
    SidesSwitched {
        /// The half now being played.
        to: HalfInning,
    },
    /// The game ended; viewers should move to the summary.
    GameEnded {
        /// Join code of the ended game.
        game_id: Option<GameId>,
    },
    /// The most recent action was reverted.
    ActionUndone {
        /// Label of the reverted action.
        label: String,
    },
}

/// Outcome of [`StateMachine::apply`](crate::StateMachine::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The state changed and an undo point was recorded.
    Applied {
        /// Label of the applied action.
        label: String,
        /// Events raised along the way, in order.
        events: Vec<GameEvent>,
    },
    /// Nothing changed; no undo point was recorded.
    Unchanged,
}

impl Transition {
    /// True if the state changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }

    /// Events raised, empty when unchanged.
    pub fn events(&self) -> &[GameEvent] {
        match self {
            Transition::Applied { events, .. } => events,
            Transition::Unchanged => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!("ball".parse::<Action>(), Ok(Action::AddBall));
        assert_eq!("  Strike ".parse::<Action>(), Ok(Action::AddStrike));
        assert_eq!("undo".parse::<Action>(), Ok(Action::Undo));
        assert_eq!(
            "hr".parse::<Action>(),
            Ok(Action::Play {
                play: PlayKind::HomeRun
            })
        );
    }

    #[test]
    fn test_parse_runner_moves() {
        assert_eq!(
            "advance first home".parse::<Action>(),
            Ok(Action::AdvanceRunner {
                from: BasePath::First,
                to: BasePath::Home
            })
        );
        assert_eq!(
            "pickoff second".parse::<Action>(),
            Ok(Action::StrikeOutRunner { base: Base::Second })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Action>(), Err(ActionParseError::Empty));
        assert!(matches!(
            "bunt".parse::<Action>(),
            Err(ActionParseError::UnknownAction(_))
        ));
        assert!(matches!(
            "return home first".parse::<Action>(),
            Err(ActionParseError::InvalidBase { .. })
        ));
        assert!(matches!(
            "advance first".parse::<Action>(),
            Err(ActionParseError::InvalidBase { .. })
        ));
    }

    #[test]
    fn test_labels_depend_on_count() {
        let state = GameState::default();
        assert_eq!(Action::AddBall.label(&state), "Ball");
        assert_eq!(Action::AddStrike.label(&state), "Strike");
        assert_eq!(
            Action::AdvanceRunner {
                from: BasePath::Home,
                to: BasePath::Second
            }
            .label(&state),
            "Hit (Double)"
        );
        assert_eq!(
            Action::Play {
                play: PlayKind::HomeRun
            }
            .label(&state),
            "Home Run"
        );
    }

    #[test]
    fn test_action_serializes_tagged() {
        let json = serde_json::to_value(Action::StrikeOutRunner { base: Base::Third }).expect("Serializes");
        assert_eq!(json["type"], "strikeOutRunner");
        assert_eq!(json["base"], "third");
    }
}
