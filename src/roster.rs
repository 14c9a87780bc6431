//! Team rosters loaded from TOML.

use crate::config::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_baseball::{GameSetup, MAX_INNINGS, Player, PlayerId, Team};
use tracing::{debug, info, instrument};

/// One player entry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Display name.
    name: String,
    /// Jersey number.
    #[serde(default)]
    number: Option<String>,
}

/// One team entry.
///
/// Players bat in the listed order unless `batting_order` names them in a
/// different one.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RosterTeam {
    /// Team name.
    name: String,
    /// Rostered players.
    #[serde(default)]
    players: Vec<RosterPlayer>,
    /// Player names in batting order; every player exactly once.
    #[serde(default)]
    batting_order: Option<Vec<String>>,
}

impl RosterTeam {
    /// Builds a team, generating a fresh id per player.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `batting_order` names an unknown or
    /// ambiguous player, or is not a permutation of the roster.
    #[instrument(skip(self), fields(team = %self.name))]
    pub fn to_team(&self) -> Result<Team, ConfigError> {
        let mut team = Team::new(self.name.clone());
        for entry in &self.players {
            team.add_player(Player::new(entry.name.clone(), entry.number.clone()))
                .map_err(|e| ConfigError::new(format!("Team '{}': {}", self.name, e)))?;
        }

        if let Some(names) = &self.batting_order {
            let order = names
                .iter()
                .map(|name| self.player_id(&team, name))
                .collect::<Result<Vec<_>, _>>()?;
            team.set_batting_order(order)
                .map_err(|e| ConfigError::new(format!("Team '{}': {}", self.name, e)))?;
        }

        debug!(players = team.players().len(), "Team built");
        Ok(team)
    }

    fn player_id(&self, team: &Team, name: &str) -> Result<PlayerId, ConfigError> {
        let mut matches = team.players().iter().filter(|p| p.name() == name);
        match (matches.next(), matches.next()) {
            (Some(player), None) => Ok(player.id().clone()),
            (None, _) => Err(ConfigError::new(format!(
                "Team '{}': batting order names unknown player '{}'",
                self.name, name
            ))),
            (Some(_), Some(_)) => Err(ConfigError::new(format!(
                "Team '{}': player name '{}' is ambiguous",
                self.name, name
            ))),
        }
    }
}

/// A game definition: both teams plus schedule options.
///
/// ```toml
/// total_innings = 7
/// away_bats_first = true
///
/// [home]
/// name = "Tigers"
/// players = [{ name = "Ana", number = "7" }, { name = "Beto" }]
/// batting_order = ["Beto", "Ana"]
///
/// [away]
/// name = "Cubs"
/// players = [{ name = "Caro" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RosterFile {
    /// Home team.
    home: RosterTeam,
    /// Visiting team.
    away: RosterTeam,
    /// Scheduled innings.
    #[serde(default = "default_total_innings")]
    total_innings: u8,
    /// Whether the visitors bat first.
    #[serde(default = "default_away_bats_first")]
    away_bats_first: bool,
}

#[instrument]
fn default_total_innings() -> u8 {
    MAX_INNINGS
}

#[instrument]
fn default_away_bats_first() -> bool {
    true
}

impl RosterFile {
    /// Parses a roster from TOML text.
    #[instrument(skip(content))]
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse roster: {}", e)))
    }

    /// Loads a roster from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read roster file: {}", e)))?;
        let roster = Self::parse(&content)?;
        info!(
            home = %roster.home.name,
            away = %roster.away.name,
            innings = roster.total_innings,
            "Roster loaded"
        );
        Ok(roster)
    }

    /// Turns the roster into a game builder.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either team's batting order is invalid.
    pub fn to_setup(&self) -> Result<GameSetup, ConfigError> {
        Ok(GameSetup::new(self.home.to_team()?, self.away.to_team()?)
            .total_innings(self.total_innings)
            .away_bats_first(self.away_bats_first))
    }
}
