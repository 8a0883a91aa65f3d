//! Realtime channel integration tests against the stub backend.

mod fixtures;

use std::{sync::Arc, time::Duration};

use codearena_client::{
    domain::{
        ChannelError, CheatReason, CheatReport, EventEmitter, ParticipantId, RoomCard, RoomId,
        Route, USER_ID_KEY,
    },
    infrastructure::{gateway::HttpGateway, realtime::RealtimeConnection, storage::MemoryStorage},
    usecase::{
        DirectoryStatus, LobbyController, LobbyInput, LobbyUpdate, MountedDirectory, open_lobby,
    },
};
use fixtures::StubBackend;
use serde_json::json;
use tokio::sync::{mpsc, watch};

const WAIT: Duration = Duration::from_secs(5);

async fn connect(server: &StubBackend) -> RealtimeConnection {
    let connection = RealtimeConnection::connect(&server.ws_url())
        .await
        .expect("Failed to connect");
    server.wait_for_sockets(1).await;
    connection
}

async fn next_change(changes: &mut watch::Receiver<u64>) {
    tokio::time::timeout(WAIT, changes.changed())
        .await
        .expect("Timed out waiting for a directory change")
        .expect("Directory dropped");
}

fn ids(rooms: &[RoomCard]) -> Vec<&str> {
    rooms.iter().map(|room| room.id.as_str()).collect()
}

#[tokio::test]
async fn test_dashboard_follows_socket_events() {
    // テスト項目: ダッシュボードが REST のスナップショットとソケットのイベントで更新される
    // given (前提条件):
    let server = StubBackend::start().await;
    server.seed(json!({ "_id": "r1", "name": "First", "players": ["alice"] }));
    let connection = connect(&server).await;
    let gateway = Arc::new(HttpGateway::new(
        &server.base_url(),
        Arc::new(MemoryStorage::new()),
    ));
    let directory = MountedDirectory::mount(gateway, connection.hub());
    let mut changes = directory.changes();
    assert_eq!(directory.loaded().await, DirectoryStatus::Ready);
    changes.mark_unchanged();
    assert_eq!(ids(&directory.rooms().await), ["r1"]);

    // when (操作):
    server.push("roomCreated", json!({ "_id": "r2", "name": "Second" }));
    next_change(&mut changes).await;
    let after_create = directory.rooms().await;

    server.push("roomCreated", json!({ "_id": "r2", "name": "Second" }));
    server.push("noSuchEvent", json!({}));
    server.push_raw("not json");
    server.push(
        "roomUpdated",
        json!({ "_id": "r1", "name": "First", "players": ["alice", "bob", "carol"] }),
    );
    next_change(&mut changes).await;
    let after_update = directory.rooms().await;

    // then (期待する結果):
    assert_eq!(ids(&after_create), ["r2", "r1"]);
    assert_eq!(ids(&after_update), ["r2", "r1"]);
    assert_eq!(after_update[1].participants, 3);
    assert_eq!(directory.search("sec").await.len(), 1);

    drop(directory);
    assert_eq!(connection.hub().handler_count(), 0);
    connection.disconnect().await;
}

#[tokio::test]
async fn test_cheat_report_reaches_backend() {
    // テスト項目: 不正検知イベントがバックエンドに届く
    // given (前提条件):
    let server = StubBackend::start().await;
    let connection = connect(&server).await;
    let report = CheatReport {
        participant_id: ParticipantId::new("alice").unwrap(),
        reason: CheatReason::TabSwitch,
    };

    // when (操作):
    connection.hub().emit_cheat(&report).expect("Emit failed");
    let cheats = server.wait_for_cheats(1).await;

    // then (期待する結果):
    assert_eq!(
        cheats,
        vec![json!({ "participantId": "alice", "reason": "Tab switching detected" })]
    );
    connection.disconnect().await;
}

#[tokio::test]
async fn test_emit_after_disconnect_fails() {
    // テスト項目: 切断後の送信は Closed エラーになる
    // given (前提条件):
    let server = StubBackend::start().await;
    let connection = connect(&server).await;
    let hub = connection.hub().clone();

    // when (操作):
    connection.disconnect().await;
    let result = hub.emit_cheat(&CheatReport {
        participant_id: ParticipantId::new("alice").unwrap(),
        reason: CheatReason::CopyPaste,
    });

    // then (期待する結果):
    assert!(matches!(result, Err(ChannelError::Closed)));
    assert!(hub.is_closed());
}

#[tokio::test]
async fn test_lobby_roster_follows_room_updates() {
    // テスト項目: ロビーの参加者がソケットの更新イベントで増える
    // given (前提条件):
    let server = StubBackend::start().await;
    server.seed(json!({ "_id": "r1", "name": "Lobby", "players": ["alice", "bob"] }));
    let connection = connect(&server).await;
    let storage = Arc::new(MemoryStorage::with_entries([(USER_ID_KEY, "alice")]));
    let gateway = HttpGateway::new(&server.base_url(), storage.clone());
    let room_id = RoomId::new("r1").unwrap();
    let lobby = open_lobby(&gateway, storage.as_ref(), &room_id, 30)
        .await
        .expect("Failed to open lobby");
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let (inputs_tx, inputs_rx) = mpsc::channel(4);
    let events = connection.hub().subscribe(&LobbyController::EVENTS);
    let task = tokio::spawn(LobbyController::new(lobby, updates_tx).run(events, inputs_rx));

    // when (操作):
    server.push(
        "roomUpdated",
        json!({ "_id": "r1", "name": "Lobby", "players": ["alice", "bob", "carol"] }),
    );
    let update = tokio::time::timeout(WAIT, updates_rx.recv())
        .await
        .expect("Timed out waiting for roster update");
    inputs_tx.send(LobbyInput::Leave).await.unwrap();
    let navigation = task.await.unwrap();

    // then (期待する結果):
    assert!(matches!(update, Some(LobbyUpdate::Roster { total: 3, .. })));
    assert_eq!(navigation.route, Route::Dashboard);
    connection.disconnect().await;
}
