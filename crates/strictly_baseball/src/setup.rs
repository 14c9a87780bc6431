//! Game setup: from two rosters to a live game.

use crate::phase::{HalfInning, Phase};
use crate::state::{GameState, MAX_INNINGS};
use crate::types::{GameId, Score, Side, Team};
use tracing::{info, instrument, warn};

/// Fewer players than this is allowed but unusual.
pub const RECOMMENDED_MIN_PLAYERS: usize = 7;

/// Error starting a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// A team has no players.
    #[display("The {} team has no players", _0)]
    EmptyRoster(Side),

    /// A batting order does not match its roster.
    #[display("The {} team's batting order does not match its roster", _0)]
    InvalidBattingOrder(Side),
}

impl std::error::Error for SetupError {}

/// Builder for a new game.
///
/// ```
/// use strictly_baseball::{GameSetup, Player, Team};
///
/// let home = Team::with_players("Home", vec![Player::new("Ana", None)]);
/// let away = Team::with_players("Away", vec![Player::new("Beto", None)]);
/// let game = GameSetup::new(home, away).total_innings(3).start().unwrap();
/// assert!(game.is_game_active());
/// assert_eq!(game.total_innings(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GameSetup {
    home: Team,
    away: Team,
    total_innings: u8,
    away_bats_first: bool,
    game_id: Option<GameId>,
}

impl GameSetup {
    /// Starts a nine-inning game with the visitors batting first.
    pub fn new(home: Team, away: Team) -> Self {
        Self {
            home,
            away,
            total_innings: MAX_INNINGS,
            away_bats_first: true,
            game_id: None,
        }
    }

    /// Sets the scheduled innings, clamped to 1..=9.
    pub fn total_innings(mut self, innings: u8) -> Self {
        self.total_innings = innings.clamp(1, MAX_INNINGS);
        self
    }

    /// Chooses which side bats in the first half-inning.
    pub fn away_bats_first(mut self, away_first: bool) -> Self {
        self.away_bats_first = away_first;
        self
    }

    /// Assigns the join code.
    pub fn game_id(mut self, id: GameId) -> Self {
        self.game_id = Some(id);
        self
    }

    /// Validates the rosters and produces a live game.
    #[instrument(skip(self), fields(home = %self.home.name(), away = %self.away.name(), innings = self.total_innings))]
    pub fn start(self) -> Result<GameState, SetupError> {
        let mut home = self.home;
        let mut away = self.away;
        for (side, team) in [(Side::Home, &home), (Side::Away, &away)] {
            if team.players().is_empty() {
                return Err(SetupError::EmptyRoster(side));
            }
            if !team.is_consistent() {
                return Err(SetupError::InvalidBattingOrder(side));
            }
            if team.players().len() < RECOMMENDED_MIN_PLAYERS {
                warn!(
                    %side,
                    players = team.players().len(),
                    recommended = RECOMMENDED_MIN_PLAYERS,
                    "Short roster"
                );
            }
        }
        home.reset_batter();
        away.reset_batter();

        let opening = if self.away_bats_first {
            HalfInning::top(1)
        } else {
            HalfInning::bottom(1)
        };

        info!(half = %opening, "Game started");
        Ok(GameState {
            home_team: home,
            away_team: away,
            phase: Phase::Live(opening),
            score: Score::new(self.total_innings as usize),
            game_id: self.game_id,
            total_innings: self.total_innings,
            ..GameState::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    fn team(name: &str, size: usize) -> Team {
        let players = (0..size)
            .map(|n| Player::with_id(format!("{name}-{n}").as_str(), format!("{name} {n}"), None))
            .collect();
        Team::with_players(name, players)
    }

    #[test]
    fn test_start_defaults() {
        let game = GameSetup::new(team("home", 9), team("away", 9)).start().unwrap();
        assert_eq!(game.phase(), Phase::Live(HalfInning::top(1)));
        assert_eq!(game.total_innings(), 9);
        assert_eq!(game.score().row(Side::Home), &[0; 9]);
        assert!(game.last_action().is_none());
    }

    #[test]
    fn test_innings_clamped() {
        let game = GameSetup::new(team("home", 1), team("away", 1))
            .total_innings(12)
            .start()
            .unwrap();
        assert_eq!(game.total_innings(), 9);

        let game = GameSetup::new(team("home", 1), team("away", 1))
            .total_innings(0)
            .start()
            .unwrap();
        assert_eq!(game.total_innings(), 1);
        assert_eq!(game.score().innings(), 1);
    }

    #[test]
    fn test_home_bats_first() {
        let game = GameSetup::new(team("home", 2), team("away", 2))
            .away_bats_first(false)
            .start()
            .unwrap();
        assert!(!game.is_top_inning());
        assert_eq!(game.batting_side(), Side::Home);
    }

    #[test]
    fn test_empty_roster_rejected() {
        let result = GameSetup::new(team("home", 3), Team::new("away")).start();
        assert_eq!(result, Err(SetupError::EmptyRoster(Side::Away)));
    }

    #[test]
    fn test_game_id_carried() {
        let game = GameSetup::new(team("home", 1), team("away", 1))
            .game_id(GameId::from("abc1234"))
            .start()
            .unwrap();
        assert_eq!(game.game_id(), Some(&GameId::from("abc1234")));
    }
}
