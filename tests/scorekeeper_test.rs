//! Admin session tests.

use strictly_baseball::{
    Action, GameEvent, GameId, GameSetup, GameState, Phase, Player, Side, Team, Transition,
};
use strictly_scoreboard::{ActionRejected, Scorekeeper};
use tokio::sync::mpsc;

fn one_inning_game() -> GameState {
    let home = Team::with_players("Tigers", vec![Player::new("Ana", None)]);
    let away = Team::with_players("Cubs", vec![Player::new("Beto", None)]);
    GameSetup::new(home, away)
        .total_innings(1)
        .start()
        .expect("Start failed")
}

fn three_outs(keeper: &mut Scorekeeper) {
    for _ in 0..3 {
        keeper.apply(Action::AddOut).expect("Out rejected");
    }
}

#[test]
fn test_new_stamps_game_id() {
    let keeper = Scorekeeper::new(GameId::from("abc1234"), one_inning_game());
    assert_eq!(keeper.state().game_id(), Some(&GameId::from("abc1234")));
    assert!(!keeper.is_game_over());
}

#[test]
fn test_game_ends_automatically_when_over() {
    let mut keeper = Scorekeeper::new(GameId::from("abc1234"), one_inning_game());

    // Top 1: away scores once.
    keeper.apply(Action::AddRun).expect("Run rejected");
    three_outs(&mut keeper);
    assert_eq!(keeper.state().phase(), Phase::Live(strictly_baseball::HalfInning::bottom(1)));

    // Bottom 1: three outs end the scheduled game.
    keeper.apply(Action::AddOut).expect("Out rejected");
    keeper.apply(Action::AddOut).expect("Out rejected");
    let last = keeper.apply(Action::AddOut).expect("Out rejected");

    assert!(matches!(keeper.state().phase(), Phase::Final(_)));
    assert!(keeper.is_game_over());
    assert!(
        last.events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameEnded { .. }))
    );
    assert_eq!(keeper.summary().winner(), Some(Side::Away));
}

#[test]
fn test_walk_off_ends_game_before_third_out() {
    let mut keeper = Scorekeeper::new(GameId::from("abc1234"), one_inning_game());
    three_outs(&mut keeper);

    let transition = keeper.apply(Action::AddRun).expect("Run rejected");
    assert!(transition.is_applied());
    assert!(matches!(keeper.state().phase(), Phase::Final(_)));
    assert_eq!(keeper.summary().winner(), Some(Side::Home));
}

#[test]
fn test_actions_rejected_after_game_over() {
    let mut keeper = Scorekeeper::new(GameId::from("abc1234"), one_inning_game());
    keeper.apply(Action::EndGame).expect("End rejected");

    for action in [Action::AddBall, Action::Undo, Action::EndGame] {
        assert_eq!(
            keeper.apply(action),
            Err(ActionRejected::GameOver(GameId::from("abc1234")))
        );
    }
}

#[test]
fn test_unchanged_action_is_not_published() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut keeper = Scorekeeper::new(GameId::from("abc1234"), one_inning_game()).with_updates(tx);

    assert_eq!(keeper.apply(Action::Undo), Ok(Transition::Unchanged));
    assert!(rx.try_recv().is_err());

    keeper.apply(Action::AddBall).expect("Ball rejected");
    let published = rx.try_recv().expect("Nothing published");
    assert_eq!(published.balls(), 1);
    assert_eq!(published.game_id(), Some(&GameId::from("abc1234")));
}

#[test]
fn test_undo_through_scorekeeper() {
    let mut keeper = Scorekeeper::new(GameId::from("abc1234"), one_inning_game());
    keeper.apply(Action::AddStrike).expect("Strike rejected");
    keeper.apply(Action::Undo).expect("Undo rejected");
    assert_eq!(keeper.state().strikes(), 0);
}
