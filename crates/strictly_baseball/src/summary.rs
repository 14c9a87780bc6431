//! Final summary of a game.

use crate::state::GameState;
use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The inning in which one side scored the most runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductiveInning {
    /// 1-based inning.
    pub inning: u8,
    /// Runs scored in it.
    pub runs: u32,
    /// Side that scored them.
    pub side: Side,
}

/// Result view of a (usually finished) game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    home_name: String,
    away_name: String,
    home_runs: u32,
    away_runs: u32,
    home_line: Vec<u32>,
    away_line: Vec<u32>,
    innings_played: usize,
    most_productive_inning: Option<ProductiveInning>,
}

impl GameSummary {
    /// Builds the summary.
    ///
    /// Tolerates a stored `total_innings` that disagrees with the score rows:
    /// a zero schedule falls back to the row length, and missing cells read
    /// as zero.
    pub fn from_state(state: &GameState) -> Self {
        let score = state.score();
        let innings_played = match state.total_innings() {
            0 => score.innings(),
            n => n as usize,
        };
        let line = |side: Side| -> Vec<u32> {
            let row = score.row(side);
            (0..innings_played)
                .map(|i| row.get(i).copied().unwrap_or(0))
                .collect()
        };
        let home_line = line(Side::Home);
        let away_line = line(Side::Away);

        let mut most_productive_inning: Option<ProductiveInning> = None;
        for (i, (home, away)) in home_line.iter().zip(&away_line).enumerate() {
            for (side, runs) in [(Side::Home, *home), (Side::Away, *away)] {
                let best = most_productive_inning.map_or(0, |p| p.runs);
                if runs > best {
                    most_productive_inning = Some(ProductiveInning {
                        inning: u8::try_from(i + 1).unwrap_or(u8::MAX),
                        runs,
                        side,
                    });
                }
            }
        }

        Self {
            home_name: state.home_team().name().to_string(),
            away_name: state.away_team().name().to_string(),
            home_runs: home_line.iter().sum(),
            away_runs: away_line.iter().sum(),
            home_line,
            away_line,
            innings_played,
            most_productive_inning,
        }
    }

    /// Home team name.
    pub fn home_name(&self) -> &str {
        &self.home_name
    }

    /// Visiting team name.
    pub fn away_name(&self) -> &str {
        &self.away_name
    }

    /// Runs for a side.
    pub fn runs(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_runs,
            Side::Away => self.away_runs,
        }
    }

    /// Winning side, `None` on a tie.
    pub fn winner(&self) -> Option<Side> {
        match self.home_runs.cmp(&self.away_runs) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Name of the winning team, `None` on a tie.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner().map(|side| match side {
            Side::Home => self.home_name.as_str(),
            Side::Away => self.away_name.as_str(),
        })
    }

    /// Run difference.
    pub fn margin(&self) -> u32 {
        self.home_runs.abs_diff(self.away_runs)
    }

    /// Number of innings shown.
    pub fn innings_played(&self) -> usize {
        self.innings_played
    }

    /// Highest single-inning output, `None` if nobody scored.
    pub fn most_productive_inning(&self) -> Option<ProductiveInning> {
        self.most_productive_inning
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.home_name.len().max(self.away_name.len()).max(4);
        write!(f, "{:<width$}", "Team")?;
        for inning in 1..=self.innings_played {
            write!(f, " {:>2}", inning)?;
        }
        writeln!(f, " | {:>3}", "R")?;
        for (name, line, runs) in [
            (&self.away_name, &self.away_line, self.away_runs),
            (&self.home_name, &self.home_line, self.home_runs),
        ] {
            write!(f, "{:<width$}", name)?;
            for cell in line {
                write!(f, " {:>2}", cell)?;
            }
            writeln!(f, " | {:>3}", runs)?;
        }
        match self.winner_name() {
            Some(name) => write!(f, "{} win by {}", name, self.margin()),
            None => write!(f, "Tie game"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Score;

    fn finished(home: &[(u8, u32)], away: &[(u8, u32)], innings: u8) -> GameState {
        let mut state = GameState {
            total_innings: innings,
            score: Score::new(innings as usize),
            ..GameState::default()
        };
        for (inning, runs) in home {
            for _ in 0..*runs {
                state.score.credit(Side::Home, *inning);
            }
        }
        for (inning, runs) in away {
            for _ in 0..*runs {
                state.score.credit(Side::Away, *inning);
            }
        }
        state
    }

    #[test]
    fn test_winner_and_margin() {
        let summary = GameSummary::from_state(&finished(&[(1, 2), (3, 1)], &[(2, 1)], 3));
        assert_eq!(summary.winner(), Some(Side::Home));
        assert_eq!(summary.margin(), 2);
        assert_eq!(summary.runs(Side::Home), 3);
    }

    #[test]
    fn test_tie_has_no_winner() {
        let summary = GameSummary::from_state(&finished(&[(1, 1)], &[(1, 1)], 2));
        assert_eq!(summary.winner(), None);
        assert_eq!(summary.margin(), 0);
        assert!(summary.to_string().ends_with("Tie game"));
    }

    #[test]
    fn test_most_productive_inning_first_strict_max() {
        let summary = GameSummary::from_state(&finished(&[(2, 3)], &[(1, 3), (3, 1)], 3));
        assert_eq!(
            summary.most_productive_inning(),
            Some(ProductiveInning {
                inning: 1,
                runs: 3,
                side: Side::Away
            })
        );
    }

    #[test]
    fn test_home_checked_before_away_in_same_inning() {
        let summary = GameSummary::from_state(&finished(&[(2, 2)], &[(2, 2)], 3));
        assert_eq!(summary.most_productive_inning().map(|p| p.side), Some(Side::Home));
    }

    #[test]
    fn test_scoreless_game_has_no_productive_inning() {
        let summary = GameSummary::from_state(&finished(&[], &[], 3));
        assert_eq!(summary.most_productive_inning(), None);
    }

    #[test]
    fn test_zero_total_innings_falls_back_to_rows() {
        let mut state = finished(&[(4, 1)], &[], 5);
        state.total_innings = 0;
        let summary = GameSummary::from_state(&state);
        assert_eq!(summary.innings_played(), 5);
        assert_eq!(summary.runs(Side::Home), 1);
    }

    #[test]
    fn test_line_score_rendering() {
        let mut state = finished(&[(1, 1)], &[], 2);
        state.home_team = crate::types::Team::new("Tigers");
        state.away_team = crate::types::Team::new("Cubs");
        let text = GameSummary::from_state(&state).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Team    1  2 |   R");
        assert_eq!(lines[1], "Cubs    0  0 |   0");
        assert_eq!(lines[2], "Tigers  1  0 |   1");
        assert_eq!(lines[3], "Tigers win by 1");
    }
}
