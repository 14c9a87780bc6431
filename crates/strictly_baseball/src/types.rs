//! Core domain types for a baseball game.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Opaque player identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display, derive_more::From)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque game identifier, used as join code and storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A player on a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    number: Option<String>,
}

impl Player {
    /// Creates a player with a freshly generated id.
    pub fn new(name: impl Into<String>, number: Option<String>) -> Self {
        Self::with_id(PlayerId::generate(), name, number)
    }

    /// Creates a player with a caller-chosen id.
    pub fn with_id(id: impl Into<PlayerId>, name: impl Into<String>, number: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number,
        }
    }

    /// Returns the player's id.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Returns the player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the jersey number, if any.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }
}

/// Which team: the home team bats in the bottom half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Home team.
    Home,
    /// Visiting team.
    Away,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Error raised when editing a roster or batting order.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RosterError {
    /// The player is already on the roster.
    #[display("Player {} is already on the roster", _0)]
    DuplicatePlayer(PlayerId),

    /// The proposed batting order is not a permutation of the roster.
    #[display("Batting order must list every rostered player exactly once")]
    NotAPermutation,
}

impl std::error::Error for RosterError {}

/// A team: roster plus batting order.
///
/// The batting order is always a permutation of the roster ids, and
/// `current_batter_index` points into it whenever it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    name: String,
    players: Vec<Player>,
    batting_order: Vec<PlayerId>,
    current_batter_index: usize,
}

impl Team {
    /// Creates a team with an empty roster.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a team whose batting order follows roster order.
    pub fn with_players(name: impl Into<String>, players: Vec<Player>) -> Self {
        let batting_order = players.iter().map(|p| p.id.clone()).collect();
        Self {
            name: name.into(),
            players,
            batting_order,
            current_batter_index: 0,
        }
    }

    /// Returns the team name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the roster in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the batting order.
    pub fn batting_order(&self) -> &[PlayerId] {
        &self.batting_order
    }

    /// Returns the index of the current batter in the batting order.
    pub fn current_batter_index(&self) -> usize {
        self.current_batter_index
    }

    /// Returns the id of the player due up, if the order is non-empty.
    pub fn current_batter(&self) -> Option<&PlayerId> {
        self.batting_order.get(self.current_batter_index)
    }

    /// Looks up a rostered player.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Returns true if the player is on this roster.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Adds a player to the end of the roster and the batting order.
    #[instrument(skip(self, player), fields(team = %self.name, player = %player.name))]
    pub fn add_player(&mut self, player: Player) -> Result<(), RosterError> {
        if self.contains(&player.id) {
            return Err(RosterError::DuplicatePlayer(player.id));
        }
        self.batting_order.push(player.id.clone());
        self.players.push(player);
        debug!(roster_size = self.players.len(), "Player added");
        Ok(())
    }

    /// Replaces the batting order.
    #[instrument(skip(self, order), fields(team = %self.name, len = order.len()))]
    pub fn set_batting_order(&mut self, order: Vec<PlayerId>) -> Result<(), RosterError> {
        if !is_permutation(&order, &self.players) {
            warn!("Rejected batting order");
            return Err(RosterError::NotAPermutation);
        }
        self.batting_order = order;
        if self.current_batter_index >= self.batting_order.len() {
            self.current_batter_index = 0;
        }
        Ok(())
    }

    /// Returns true if the batting order is a permutation of the roster
    /// and the batter index is in range.
    pub fn is_consistent(&self) -> bool {
        let index_ok = self.batting_order.is_empty()
            || self.current_batter_index < self.batting_order.len();
        index_ok && is_permutation(&self.batting_order, &self.players)
    }

    /// Moves to the next batter, wrapping around. Returns false on an empty order.
    pub(crate) fn advance_batter(&mut self) -> bool {
        if self.batting_order.is_empty() {
            return false;
        }
        self.current_batter_index = (self.current_batter_index + 1) % self.batting_order.len();
        true
    }

    pub(crate) fn reset_batter(&mut self) {
        self.current_batter_index = 0;
    }
}

fn is_permutation(order: &[PlayerId], players: &[Player]) -> bool {
    if order.len() != players.len() {
        return false;
    }
    let mut expected: Vec<&PlayerId> = players.iter().map(|p| &p.id).collect();
    let mut actual: Vec<&PlayerId> = order.iter().collect();
    expected.sort();
    actual.sort();
    expected == actual
}

/// One of the three bases a runner can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Base {
    /// First base.
    First,
    /// Second base.
    Second,
    /// Third base.
    Third,
}

/// Origin or destination of a runner move: a base or home plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BasePath {
    /// Home plate (the batter's box when moving from, scoring when moving to).
    Home,
    /// First base.
    First,
    /// Second base.
    Second,
    /// Third base.
    Third,
}

impl BasePath {
    /// Returns the base, or `None` for home plate.
    pub fn base(self) -> Option<Base> {
        match self {
            BasePath::Home => None,
            BasePath::First => Some(Base::First),
            BasePath::Second => Some(Base::Second),
            BasePath::Third => Some(Base::Third),
        }
    }
}

impl From<Base> for BasePath {
    fn from(base: Base) -> Self {
        match base {
            Base::First => BasePath::First,
            Base::Second => BasePath::Second,
            Base::Third => BasePath::Third,
        }
    }
}

/// Runners on base, at most one per base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    first: Option<PlayerId>,
    second: Option<PlayerId>,
    third: Option<PlayerId>,
}

impl Bases {
    /// Returns the runner on a base.
    pub fn get(&self, base: Base) -> Option<&PlayerId> {
        self.slot(base).as_ref()
    }

    /// Returns true if a runner is on the base.
    pub fn is_occupied(&self, base: Base) -> bool {
        self.get(base).is_some()
    }

    /// Returns true if no runner is on base.
    pub fn is_empty(&self) -> bool {
        self.runners().next().is_none()
    }

    /// Iterates over occupied bases, nearest to home plate last.
    pub fn runners(&self) -> impl Iterator<Item = (Base, &PlayerId)> {
        [Base::First, Base::Second, Base::Third]
            .into_iter()
            .filter_map(|base| self.get(base).map(|id| (base, id)))
    }

    pub(crate) fn set(&mut self, base: Base, runner: Option<PlayerId>) {
        *self.slot_mut(base) = runner;
    }

    pub(crate) fn take(&mut self, base: Base) -> Option<PlayerId> {
        self.slot_mut(base).take()
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot(&self, base: Base) -> &Option<PlayerId> {
        match base {
            Base::First => &self.first,
            Base::Second => &self.second,
            Base::Third => &self.third,
        }
    }

    fn slot_mut(&mut self, base: Base) -> &mut Option<PlayerId> {
        match base {
            Base::First => &mut self.first,
            Base::Second => &mut self.second,
            Base::Third => &mut self.third,
        }
    }
}

/// Runs per inning for each side. The row length is fixed at game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    home: Vec<u32>,
    away: Vec<u32>,
}

impl Score {
    /// Creates a zeroed line score with the given number of innings.
    pub fn new(innings: usize) -> Self {
        Self {
            home: vec![0; innings],
            away: vec![0; innings],
        }
    }

    /// Returns the per-inning runs for a side.
    pub fn row(&self, side: Side) -> &[u32] {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Returns total runs for a side.
    pub fn total(&self, side: Side) -> u32 {
        self.row(side).iter().sum()
    }

    /// Returns the number of inning cells.
    pub fn innings(&self) -> usize {
        self.home.len()
    }

    /// Adds one run in the given (1-based) inning. Returns false if the
    /// inning is outside the line score.
    pub(crate) fn credit(&mut self, side: Side, inning: u8) -> bool {
        let row = match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        };
        match (inning as usize).checked_sub(1).and_then(|i| row.get_mut(i)) {
            Some(cell) => {
                *cell += 1;
                true
            }
            None => false,
        }
    }
}
