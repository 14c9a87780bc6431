//! Sync layer tests over an in-process store.

use std::sync::Arc;
use std::time::Duration;
use strictly_baseball::{GameId, GameSetup, GameState, Phase, Player, StateMachine, Team};
use strictly_scoreboard::{
    GameStore, LocalTransport, MemoryStore, PollUpdate, RetryPolicy, SyncError, SyncTransport,
    join_game, spawn_admin_sync, spawn_spectator,
};
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn started() -> StateMachine {
    let home = Team::with_players("Tigers", vec![Player::new("Ana", None)]);
    let away = Team::with_players("Cubs", vec![Player::new("Beto", None)]);
    StateMachine::new(
        GameSetup::new(home, away)
            .game_id(GameId::from("abc1234"))
            .start()
            .expect("Start failed"),
    )
}

fn transport() -> (Arc<MemoryStore>, Arc<dyn SyncTransport>) {
    let store = Arc::new(MemoryStore::new());
    let transport: Arc<dyn SyncTransport> = Arc::new(LocalTransport::new(store.clone()));
    (store, transport)
}

#[tokio::test]
async fn test_local_transport_round_trip() {
    let (_store, transport) = transport();
    let id = GameId::from("abc1234");
    let machine = started();

    assert!(!transport.exists(&id).await);
    assert!(transport.fetch(&id).await.is_none());
    assert!(transport.create(&id, machine.state()).await);
    assert!(transport.exists(&id).await);
    assert_eq!(transport.fetch(&id).await.as_ref(), Some(machine.state()));
}

#[tokio::test]
async fn test_join_existing_game() {
    let (store, transport) = transport();
    let id = GameId::from("abc1234");
    store.save(&id, started().state()).expect("Save failed");

    let state = join_game(transport.as_ref(), &id, RetryPolicy::default())
        .await
        .expect("Join failed");
    assert!(state.is_game_active());
}

#[tokio::test]
async fn test_join_gives_up_after_attempts() {
    let (_store, transport) = transport();
    let id = GameId::from("missing");
    let policy = RetryPolicy::new(3, Duration::from_millis(1));

    let result = join_game(transport.as_ref(), &id, policy).await;
    assert_eq!(
        result,
        Err(SyncError::NotFound {
            game_id: id,
            attempts: 3
        })
    );
}

#[tokio::test]
async fn test_join_succeeds_on_retry() {
    let (store, transport) = transport();
    let id = GameId::from("abc1234");
    let policy = RetryPolicy::new(5, Duration::from_millis(50));

    let writer = {
        let store = store.clone();
        let id = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(60)).await;
            store.save(&id, started().state()).expect("Save failed");
        })
    };

    let state = join_game(transport.as_ref(), &id, policy).await;
    writer.await.expect("Writer failed");
    assert!(state.is_ok());
}

#[tokio::test]
async fn test_admin_sync_pushes_each_change() {
    let (store, transport) = transport();
    let id = GameId::from("abc1234");
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = spawn_admin_sync(transport, id.clone(), Duration::from_secs(60), rx);

    let mut machine = started();
    machine.add_ball();
    tx.send(machine.state().clone()).expect("Send failed");
    machine.add_strike();
    tx.send(machine.state().clone()).expect("Send failed");
    drop(tx);

    timeout(WAIT, handle.finished()).await.expect("Sync did not stop");
    let stored = store.load(&id).expect("Load failed").expect("Game missing");
    assert_eq!(stored.balls(), 1);
    assert_eq!(stored.strikes(), 1);
}

#[tokio::test]
async fn test_spectator_sees_changes_and_end() {
    let (store, transport) = transport();
    let id = GameId::from("abc1234");
    let mut machine = started();
    store.save(&id, machine.state()).expect("Save failed");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _handle = spawn_spectator(transport, id.clone(), Duration::from_millis(10), tx);

    let first = timeout(WAIT, rx.recv()).await.expect("No update");
    assert_eq!(first, Some(PollUpdate::Snapshot(machine.state().clone())));

    machine.add_ball();
    store.save(&id, machine.state()).expect("Save failed");
    let second = timeout(WAIT, rx.recv()).await.expect("No update");
    assert_eq!(second, Some(PollUpdate::Snapshot(machine.state().clone())));

    machine.end_game();
    store.save(&id, machine.state()).expect("Save failed");
    match timeout(WAIT, rx.recv()).await.expect("No update") {
        Some(PollUpdate::Ended(state)) => assert!(matches!(state.phase(), Phase::Final(_))),
        other => panic!("Expected end, got {:?}", other),
    }

    // The poller stops after the end.
    assert_eq!(timeout(WAIT, rx.recv()).await.expect("Channel not closed"), None);
}

#[tokio::test]
async fn test_spectator_reports_missing_once() {
    let (store, transport) = transport();
    let id = GameId::from("abc1234");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _handle = spawn_spectator(transport, id.clone(), Duration::from_millis(10), tx);

    assert_eq!(
        timeout(WAIT, rx.recv()).await.expect("No update"),
        Some(PollUpdate::Missing)
    );

    let state = GameState::default();
    store.save(&id, &state).expect("Save failed");
    assert_eq!(
        timeout(WAIT, rx.recv()).await.expect("No update"),
        Some(PollUpdate::Snapshot(state))
    );
}

#[tokio::test]
async fn test_http_transport_against_server() {
    let store = Arc::new(MemoryStore::new());
    let app = strictly_scoreboard::router(strictly_scoreboard::AppState::new(store.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind failed");
    let addr = listener.local_addr().expect("No local addr");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let transport = strictly_scoreboard::HttpTransport::new(format!("http://{}/", addr));
    assert_eq!(transport.base_url(), format!("http://{}", addr));
    let id = GameId::from("abc1234");
    let mut machine = started();

    assert!(!transport.exists(&id).await);
    assert!(transport.fetch(&id).await.is_none());
    assert!(transport.create(&id, machine.state()).await);
    assert!(transport.exists(&id).await);

    machine.add_strike();
    assert!(transport.push(&id, machine.state()).await);
    assert_eq!(transport.fetch(&id).await.as_ref(), Some(machine.state()));
    assert_eq!(store.load(&id).expect("Load failed").map(|s| s.strikes()), Some(1));

    server.abort();
}

#[tokio::test]
async fn test_http_transport_unreachable_server() {
    let transport = strictly_scoreboard::HttpTransport::new("http://127.0.0.1:1");
    let id = GameId::from("abc1234");
    assert!(transport.fetch(&id).await.is_none());
    assert!(!transport.push(&id, &GameState::default()).await);
    assert!(!transport.exists(&id).await);
}

#[tokio::test]
async fn test_http_transport_id_with_reserved_characters() {
    let store = Arc::new(MemoryStore::new());
    let app = strictly_scoreboard::router(strictly_scoreboard::AppState::new(store.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Bind failed");
    let addr = listener.local_addr().expect("No local addr");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let transport = strictly_scoreboard::HttpTransport::new(format!("http://{}", addr));
    let id = GameId::from("a b&c#d");
    assert!(transport.create(&id, started().state()).await);
    assert!(transport.exists(&id).await);
    assert!(transport.fetch(&id).await.is_some());
    assert!(store.exists(&id).expect("Exists failed"));
    assert!(!transport.exists(&GameId::from("a b")).await);

    server.abort();
}
