//! Game phase: setup, a live half-inning, or final.

use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Top or bottom of an inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Half {
    /// Visitors bat.
    Top,
    /// Home team bats.
    Bottom,
}

/// A half-inning: one team's turn at bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{} {}", half, inning)]
pub struct HalfInning {
    /// 1-based inning number.
    pub inning: u8,
    /// Which half.
    pub half: Half,
}

impl HalfInning {
    /// Top of the given inning.
    pub fn top(inning: u8) -> Self {
        Self {
            inning,
            half: Half::Top,
        }
    }

    /// Bottom of the given inning.
    pub fn bottom(inning: u8) -> Self {
        Self {
            inning,
            half: Half::Bottom,
        }
    }

    /// Returns true in the top half.
    pub fn is_top(&self) -> bool {
        self.half == Half::Top
    }

    /// The side at bat in this half.
    pub fn batting_side(&self) -> Side {
        match self.half {
            Half::Top => Side::Away,
            Half::Bottom => Side::Home,
        }
    }
}

/// Lifecycle phase of a game.
///
/// Replaces the loose `inning`/`isTopInning`/`isGameActive` combination with
/// a single tagged value, so that an ended game always remembers the half in
/// which it ended and a game in setup carries no half at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Phase {
    /// Teams are being assembled; no play has started.
    #[default]
    Setup,
    /// A half-inning is being played.
    Live(HalfInning),
    /// The game is over. Keeps the half in which it ended.
    Final(HalfInning),
}

impl Phase {
    /// The half-inning in play or in which the game ended.
    pub fn half_inning(&self) -> Option<HalfInning> {
        match self {
            Phase::Setup => None,
            Phase::Live(h) | Phase::Final(h) => Some(*h),
        }
    }

    /// Current inning number; 1 during setup.
    pub fn inning(&self) -> u8 {
        self.half_inning().map_or(1, |h| h.inning)
    }

    /// True in the top half and during setup.
    pub fn is_top_inning(&self) -> bool {
        self.half_inning().is_none_or(|h| h.is_top())
    }

    /// True only while a half-inning is being played.
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Live(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_reports_first_top() {
        let phase = Phase::Setup;
        assert_eq!(phase.inning(), 1);
        assert!(phase.is_top_inning());
        assert!(!phase.is_active());
    }

    #[test]
    fn test_final_keeps_half() {
        let phase = Phase::Final(HalfInning::bottom(9));
        assert_eq!(phase.inning(), 9);
        assert!(!phase.is_top_inning());
        assert!(!phase.is_active());
    }

    #[test]
    fn test_batting_side_follows_half() {
        assert_eq!(HalfInning::top(3).batting_side(), Side::Away);
        assert_eq!(HalfInning::bottom(3).batting_side(), Side::Home);
    }

    #[test]
    fn test_phase_serializes_tagged() {
        let json = serde_json::to_value(Phase::Live(HalfInning::top(2))).expect("Serializes");
        assert_eq!(json["status"], "live");
        assert_eq!(json["inning"], 2);
        assert_eq!(json["half"], "top");
    }
}
