//! Primitive transitions over a borrowed [`GameState`].
//!
//! The reducer performs one action's worth of mutation, including cascades
//! such as walk → forced advance → next batter or out → switch sides → end
//! game. It never records undo points; [`StateMachine`](crate::StateMachine)
//! wraps each dispatch with that.

use crate::action::{Action, GameEvent, PlayKind};
use crate::phase::{Half, HalfInning, Phase};
use crate::rules;
use crate::state::{GameState, MAX_BALLS, MAX_OUTS, MAX_STRIKES};
use crate::types::{Base, BasePath, Side};
use tracing::{debug, info, instrument, warn};

/// Applies actions to a game state in place and collects the events raised.
pub(crate) struct Reducer<'a> {
    state: &'a mut GameState,
    events: Vec<GameEvent>,
}

impl<'a> Reducer<'a> {
    pub(crate) fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    pub(crate) fn into_events(self) -> Vec<GameEvent> {
        self.events
    }

    /// Runs one action. `Undo` is handled by the state machine and ignored here.
    pub(crate) fn dispatch(&mut self, action: Action) {
        match action {
            Action::AddBall => self.add_ball(),
            Action::AddStrike => self.add_strike(),
            Action::AddOut => self.add_out(),
            Action::ResetCount => self.reset_count(),
            Action::AdvanceRunner { from, to } => self.advance_runner(from, to),
            Action::ReturnRunner { from, to } => self.return_runner(from, to),
            Action::StrikeOutRunner { base } => self.strike_out_runner(base),
            Action::ClearBases => self.state.bases.clear(),
            Action::AddRun => self.add_run(),
            Action::NextBatter => self.next_batter(),
            Action::SwitchSides | Action::EndTeamTurn => self.switch_sides(),
            Action::EndGame => self.end_game(),
            Action::Play { play } => self.play(play),
            Action::Undo => debug!("Undo reached the reducer; ignoring"),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Count
    // ─────────────────────────────────────────────────────────────

    #[instrument(skip(self), fields(balls = self.state.balls))]
    fn add_ball(&mut self) {
        if self.state.balls < MAX_BALLS - 1 {
            self.state.balls += 1;
            return;
        }

        let batter = self.state.current_batter_id().cloned();
        info!(batter = ?batter, "Walk");
        self.reset_count();
        let forced_home = rules::force_advance(&mut self.state.bases, batter.clone());
        if forced_home.is_some() {
            self.add_run();
        }
        self.events.push(GameEvent::Walked { batter });
        self.next_batter();
    }

    #[instrument(skip(self), fields(strikes = self.state.strikes))]
    fn add_strike(&mut self) {
        if self.state.strikes < MAX_STRIKES - 1 {
            self.state.strikes += 1;
            return;
        }

        let batter = self.state.current_batter_id().cloned();
        info!(batter = ?batter, "Strikeout");
        self.reset_count();
        self.events.push(GameEvent::StruckOut { batter });
        // After a third out this advances the side now at bat.
        self.add_out();
        self.next_batter();
    }

    #[instrument(skip(self), fields(outs = self.state.outs))]
    fn add_out(&mut self) {
        if self.state.outs < MAX_OUTS - 1 {
            self.state.outs += 1;
            return;
        }
        debug!("Third out");
        self.switch_sides();
    }

    fn reset_count(&mut self) {
        self.state.balls = 0;
        self.state.strikes = 0;
    }

    // ─────────────────────────────────────────────────────────────
    //  Baserunning
    // ─────────────────────────────────────────────────────────────

    /// Moves a runner forward. Callers issuing several moves for one play
    /// must go third → second → first so no destination is overwritten.
    #[instrument(skip(self))]
    fn advance_runner(&mut self, from: BasePath, to: BasePath) {
        match (from.base(), to.base()) {
            (None, Some(to)) => {
                match self.state.current_batter_id().cloned() {
                    Some(batter) => self.state.bases.set(to, Some(batter)),
                    None => warn!("No batter to place; batting order is empty"),
                }
                self.next_batter();
            }
            (None, None) => self.add_run(),
            (Some(from), None) => {
                if self.state.bases.take(from).is_some() {
                    self.add_run();
                } else {
                    debug!(%from, "No runner to score");
                }
            }
            (Some(from), Some(to)) => {
                if from == to {
                    return;
                }
                let Some(runner) = self.state.bases.take(from) else {
                    debug!(%from, "No runner to advance");
                    return;
                };
                if self.state.bases.is_occupied(to) {
                    warn!(%to, "Advancing onto an occupied base");
                }
                self.state.bases.set(to, Some(runner));
            }
        }
    }

    #[instrument(skip(self))]
    fn return_runner(&mut self, from: Base, to: Base) {
        if self.state.bases.is_occupied(to) {
            info!(%to, "Destination occupied; runner not returned");
            return;
        }
        match self.state.bases.take(from) {
            Some(runner) => self.state.bases.set(to, Some(runner)),
            None => debug!(%from, "No runner to return"),
        }
    }

    #[instrument(skip(self))]
    fn strike_out_runner(&mut self, base: Base) {
        if self.state.bases.take(base).is_none() {
            debug!(%base, "No runner on base");
            return;
        }
        self.add_out();
    }

    fn add_run(&mut self) {
        let side = self.state.batting_side();
        let inning = self.state.inning();
        if self.state.score.credit(side, inning) {
            debug!(%side, inning, "Run scored");
            self.events.push(GameEvent::RunScored { side, inning });
        } else {
            warn!(%side, inning, "Inning outside the line score; run not credited");
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Turns
    // ─────────────────────────────────────────────────────────────

    /// Advances the batting side's order and clears the count.
    fn next_batter(&mut self) {
        let side = self.state.batting_side();
        if !self.state.team_mut(side).advance_batter() {
            debug!(%side, "Batting order is empty");
        }
        self.reset_count();
    }

    #[instrument(skip(self), fields(phase = ?self.state.phase))]
    fn switch_sides(&mut self) {
        let Phase::Live(current) = self.state.phase else {
            debug!("Game is not live; sides not switched");
            return;
        };

        if rules::is_walk_off(self.state) {
            info!("Walk-off");
            self.end_game();
            return;
        }

        self.state.balls = 0;
        self.state.strikes = 0;
        self.state.outs = 0;
        self.state.bases.clear();

        let next = match current.half {
            Half::Top => HalfInning::bottom(current.inning),
            Half::Bottom => {
                let inning = current.inning.saturating_add(1);
                if inning > self.state.total_innings {
                    self.end_game();
                    return;
                }
                HalfInning::top(inning)
            }
        };
        self.state.phase = Phase::Live(next);
        info!(half = %next, "Sides switched");
        self.events.push(GameEvent::SidesSwitched { to: next });
    }

    fn end_game(&mut self) {
        let Phase::Live(current) = self.state.phase else {
            debug!("Game is not live; nothing to end");
            return;
        };
        self.state.phase = Phase::Final(current);
        info!(
            game_id = ?self.state.game_id,
            home = self.state.runs(Side::Home),
            away = self.state.runs(Side::Away),
            "Game ended"
        );
        self.events.push(GameEvent::GameEnded {
            game_id: self.state.game_id.clone(),
        });
    }

    // ─────────────────────────────────────────────────────────────
    //  Composite plays
    // ─────────────────────────────────────────────────────────────

    #[instrument(skip(self))]
    fn play(&mut self, play: PlayKind) {
        match play {
            PlayKind::Single => {
                self.move_runners([
                    (Base::Third, BasePath::Home),
                    (Base::Second, BasePath::Third),
                    (Base::First, BasePath::Second),
                ]);
                self.advance_runner(BasePath::Home, BasePath::First);
            }
            PlayKind::Double => {
                self.move_runners([
                    (Base::Third, BasePath::Home),
                    (Base::Second, BasePath::Home),
                    (Base::First, BasePath::Third),
                ]);
                self.advance_runner(BasePath::Home, BasePath::Second);
            }
            PlayKind::Triple => {
                self.score_all_runners();
                self.advance_runner(BasePath::Home, BasePath::Third);
            }
            PlayKind::HomeRun => {
                self.score_all_runners();
                self.advance_runner(BasePath::Home, BasePath::Home);
                self.next_batter();
            }
            PlayKind::DirectOut => {
                self.add_out();
                self.next_batter();
            }
        }
    }

    fn move_runners(&mut self, moves: [(Base, BasePath); 3]) {
        for (from, to) in moves {
            if self.state.bases.is_occupied(from) {
                self.advance_runner(from.into(), to);
            }
        }
    }

    fn score_all_runners(&mut self) {
        self.move_runners([
            (Base::Third, BasePath::Home),
            (Base::Second, BasePath::Home),
            (Base::First, BasePath::Home),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Player, PlayerId, Team};

    fn live_state() -> GameState {
        let players = |prefix: &str| {
            (1..=3)
                .map(|n| Player::with_id(format!("{prefix}{n}").as_str(), format!("{prefix} {n}"), None))
                .collect::<Vec<_>>()
        };
        GameState {
            home_team: Team::with_players("Home", players("h")),
            away_team: Team::with_players("Away", players("a")),
            phase: Phase::Live(HalfInning::top(1)),
            ..GameState::default()
        }
    }

    fn run(state: &mut GameState, action: Action) -> Vec<GameEvent> {
        let mut reducer = Reducer::new(state);
        reducer.dispatch(action);
        reducer.into_events()
    }

    #[test]
    fn test_fourth_ball_walks() {
        let mut state = live_state();
        for _ in 0..3 {
            run(&mut state, Action::AddBall);
        }
        assert_eq!(state.balls, 3);
        let events = run(&mut state, Action::AddBall);
        assert_eq!(state.balls, 0);
        assert_eq!(state.bases.get(Base::First), Some(&PlayerId::from("a1")));
        assert_eq!(state.away_team.current_batter_index(), 1);
        assert!(matches!(events.as_slice(), [GameEvent::Walked { .. }]));
    }

    #[test]
    fn test_third_strike_on_third_out_advances_new_batting_side() {
        let mut state = live_state();
        state.outs = 2;
        state.strikes = 2;
        run(&mut state, Action::AddStrike);
        assert_eq!(state.phase, Phase::Live(HalfInning::bottom(1)));
        assert_eq!(state.outs, 0);
        assert_eq!(state.away_team.current_batter_index(), 0);
        assert_eq!(state.home_team.current_batter_index(), 1);
    }

    #[test]
    fn test_out_of_range_counts_do_not_overflow() {
        let mut state = live_state();
        state.balls = u8::MAX;
        state.strikes = u8::MAX;
        state.outs = u8::MAX;

        run(&mut state, Action::AddBall);
        assert_eq!(state.balls, 0);
        assert_eq!(state.bases.get(Base::First), Some(&PlayerId::from("a1")));

        state.strikes = u8::MAX;
        run(&mut state, Action::AddStrike);
        assert_eq!(state.strikes, 0);
        assert_eq!(state.phase, Phase::Live(HalfInning::bottom(1)));
    }

    #[test]
    fn test_runner_scores_from_base() {
        let mut state = live_state();
        state.bases.set(Base::Third, Some(PlayerId::from("a2")));
        let events = run(
            &mut state,
            Action::AdvanceRunner {
                from: BasePath::Third,
                to: BasePath::Home,
            },
        );
        assert!(state.bases.is_empty());
        assert_eq!(state.score.row(Side::Away)[0], 1);
        assert_eq!(
            events,
            vec![GameEvent::RunScored {
                side: Side::Away,
                inning: 1
            }]
        );
    }

    #[test]
    fn test_scoring_from_empty_base_is_noop() {
        let mut state = live_state();
        let before = state.clone();
        run(
            &mut state,
            Action::AdvanceRunner {
                from: BasePath::Second,
                to: BasePath::Home,
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_return_runner_to_occupied_base_is_noop() {
        let mut state = live_state();
        state.bases.set(Base::Second, Some(PlayerId::from("a1")));
        state.bases.set(Base::First, Some(PlayerId::from("a2")));
        let before = state.clone();
        run(
            &mut state,
            Action::ReturnRunner {
                from: Base::Second,
                to: Base::First,
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_double_sends_first_to_third() {
        let mut state = live_state();
        state.bases.set(Base::First, Some(PlayerId::from("a3")));
        run(
            &mut state,
            Action::Play {
                play: PlayKind::Double,
            },
        );
        assert_eq!(state.bases.get(Base::Third), Some(&PlayerId::from("a3")));
        assert_eq!(state.bases.get(Base::Second), Some(&PlayerId::from("a1")));
        assert_eq!(state.bases.get(Base::First), None);
        assert_eq!(state.score.total(Side::Away), 0);
    }

    #[test]
    fn test_home_run_clears_bases_and_scores_everyone() {
        let mut state = live_state();
        state.bases.set(Base::First, Some(PlayerId::from("a2")));
        state.bases.set(Base::Third, Some(PlayerId::from("a3")));
        run(
            &mut state,
            Action::Play {
                play: PlayKind::HomeRun,
            },
        );
        assert!(state.bases.is_empty());
        assert_eq!(state.score.total(Side::Away), 3);
        assert_eq!(state.away_team.current_batter_index(), 1);
    }

    #[test]
    fn test_switch_sides_outside_live_is_noop() {
        let mut state = GameState::default();
        let before = state.clone();
        run(&mut state, Action::SwitchSides);
        assert_eq!(state, before);
    }

    #[test]
    fn test_bottom_of_last_inning_ends_game() {
        let mut state = live_state();
        state.total_innings = 1;
        state.score = crate::types::Score::new(1);
        state.phase = Phase::Live(HalfInning::bottom(1));
        let events = run(&mut state, Action::EndTeamTurn);
        assert_eq!(state.phase, Phase::Final(HalfInning::bottom(1)));
        assert!(matches!(events.as_slice(), [GameEvent::GameEnded { .. }]));
    }
}
