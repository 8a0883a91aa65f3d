//! UseCase: ダッシュボードのルーム一覧の同期
//!
//! ## 同期の手順
//! 1. マウント時に `roomCreated` / `roomUpdated` を購読する（取得より先）
//! 2. REST で一覧を 1 回だけ取得し、ローカル状態を丸ごと置き換える
//! 3. 取得中に届いたイベントは購読キューに溜まり、スナップショットの後で到着順に適用される
//!
//! アンマウント（drop）でポンプタスクを中断し、購読を解除します。
//! 中断後に取得が完了しても状態は変わりません。

use std::sync::Arc;

use tokio::{
    sync::{Mutex, mpsc, watch},
    task::JoinHandle,
};

use crate::{
    domain::{
        EventKind, Navigation, Notice, RoomCard, RoomDirectory, RoomEvent, RoomGateway, RoomId,
        RoomStatus, Route, transform_room,
    },
    infrastructure::realtime::{EventHub, SubscriptionGuard},
};

use super::error::JoinRoomError;

/// Outcome of the bootstrap fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryStatus {
    Loading,
    Ready,
    /// The fetch failed; the list stays empty
    Failed(String),
}

struct DirectoryState {
    directory: RoomDirectory,
    status: DirectoryStatus,
}

/// Room list of a mounted dashboard
pub struct MountedDirectory {
    state: Arc<Mutex<DirectoryState>>,
    revision: Arc<watch::Sender<u64>>,
    changes: watch::Receiver<u64>,
    pump: JoinHandle<()>,
    _subscription: SubscriptionGuard,
}

impl MountedDirectory {
    /// Subscribe to room events, then start the bootstrap fetch.
    pub fn mount(gateway: Arc<dyn RoomGateway>, hub: &EventHub) -> Self {
        let (guard, events) = hub
            .subscribe(&[EventKind::RoomCreated, EventKind::RoomUpdated])
            .into_parts();
        let state = Arc::new(Mutex::new(DirectoryState {
            directory: RoomDirectory::new(),
            status: DirectoryStatus::Loading,
        }));
        let (tx, changes) = watch::channel(0);
        let revision = Arc::new(tx);
        let pump = tokio::spawn(pump(gateway, events, state.clone(), revision.clone()));
        tracing::info!("Room directory mounted");

        Self {
            state,
            revision,
            changes,
            pump,
            _subscription: guard,
        }
    }

    /// Rooms in display order (newest created first)
    pub async fn rooms(&self) -> Vec<RoomCard> {
        let state = self.state.lock().await;
        state.directory.rooms().into_iter().cloned().collect()
    }

    /// Case-insensitive search over title and host; the list is not modified
    pub async fn search(&self, query: &str) -> Vec<RoomCard> {
        let state = self.state.lock().await;
        state.directory.search(query).into_iter().cloned().collect()
    }

    pub async fn get(&self, id: &RoomId) -> Option<RoomCard> {
        self.state.lock().await.directory.get(id).cloned()
    }

    pub async fn status(&self) -> DirectoryStatus {
        self.state.lock().await.status.clone()
    }

    /// Wait until the bootstrap fetch has finished
    pub async fn loaded(&self) -> DirectoryStatus {
        let mut changes = self.changes.clone();
        loop {
            let status = self.status().await;
            if status != DirectoryStatus::Loading || changes.changed().await.is_err() {
                return status;
            }
        }
    }

    /// Insert a room the viewer just created.
    ///
    /// Same idempotent insert as a `roomCreated` event, so the server echo
    /// does not add a duplicate.
    pub async fn insert_created(&self, card: RoomCard) -> bool {
        let mut state = self.state.lock().await;
        let inserted = state.directory.insert_front(card);
        if inserted {
            bump(&self.revision);
        }
        inserted
    }

    /// Revision counter bumped on every visible change
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.changes.clone()
    }

    /// Join a room from its card.
    pub async fn join_listed(&self, id: &RoomId) -> Result<Navigation, JoinRoomError> {
        let card = self
            .get(id)
            .await
            .ok_or_else(|| JoinRoomError::RoomNotFound(id.to_string()))?;
        if card.status == RoomStatus::Finished {
            return Err(JoinRoomError::RoomFinished(card.title));
        }
        if card.is_full() {
            return Err(JoinRoomError::RoomFull(card.title));
        }
        tracing::info!("Joining listed room {}", card.id);
        Ok(Navigation::with_notice(
            Route::Room(card.id),
            Notice::info("Joining Room", format!("Joining \"{}\"...", card.title)),
        ))
    }
}

impl Drop for MountedDirectory {
    fn drop(&mut self) {
        self.pump.abort();
        tracing::info!("Room directory unmounted");
    }
}

fn bump(revision: &watch::Sender<u64>) {
    revision.send_modify(|r| *r = r.wrapping_add(1));
}

async fn pump(
    gateway: Arc<dyn RoomGateway>,
    mut events: mpsc::UnboundedReceiver<RoomEvent>,
    state: Arc<Mutex<DirectoryState>>,
    revision: Arc<watch::Sender<u64>>,
) {
    let snapshot = gateway.list_rooms().await;
    {
        let mut state = state.lock().await;
        match snapshot {
            Ok(records) => {
                state.directory.replace_all(records.iter().map(transform_room));
                state.status = DirectoryStatus::Ready;
                tracing::info!("Loaded {} room(s)", state.directory.len());
            }
            Err(e) => {
                tracing::warn!("Failed to fetch rooms: {}", e);
                state.status = DirectoryStatus::Failed(e.to_string());
            }
        }
        // state and revision change under the same lock
        bump(&revision);
    }

    while let Some(event) = events.recv().await {
        let mut state = state.lock().await;
        let changed = state.directory.apply(&event);
        tracing::debug!(
            "Applied {} for room {} (changed: {})",
            event.kind().name(),
            event.record().id,
            changed
        );
        if changed {
            bump(&revision);
        }
    }
}
