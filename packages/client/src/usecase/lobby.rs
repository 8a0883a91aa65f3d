//! UseCase: 待機ロビー
//!
//! ロビーの状態（[`WaitingLobby`]）を 1 秒ごとの tick、`roomUpdated`
//! イベント、利用者の操作で進めます。遷移先が決まった時点で終了します。

use tokio::sync::mpsc;

use crate::{
    domain::{
        EventKind, LobbyError, LocalStorage, Navigation, Notice, RoomEvent, RoomGateway, RoomId,
        WaitingLobby, stored_participant,
    },
    infrastructure::{realtime::Subscription, timer::CountdownTimer},
};

use super::error::LobbyOpenError;

/// User actions in the lobby
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyInput {
    SetReady(bool),
    StartNow,
    Leave,
}

/// What the screen should redraw
#[derive(Debug, Clone, PartialEq)]
pub enum LobbyUpdate {
    /// Countdown advanced; carries the seconds left
    Tick(u32),
    /// Roster or readiness changed
    Roster { ready: usize, total: usize },
    Rejected(LobbyError),
}

/// Load the room record and build the lobby for the stored viewer.
///
/// Room codes are matched without regard to ASCII case; the lobby carries
/// the id exactly as the backend stores it.
pub async fn open_lobby(
    gateway: &dyn RoomGateway,
    storage: &dyn LocalStorage,
    room_id: &RoomId,
    countdown_secs: u32,
) -> Result<WaitingLobby, LobbyOpenError> {
    let rooms = gateway.list_rooms().await?;
    let record = rooms
        .iter()
        .find(|record| record.id.as_str().eq_ignore_ascii_case(room_id.as_str()))
        .ok_or_else(|| LobbyOpenError::RoomNotFound(room_id.clone()))?;
    let viewer = stored_participant(storage);
    tracing::info!("Entered lobby of room {} as {}", record.id, viewer);
    Ok(WaitingLobby::from_record(record, viewer, countdown_secs))
}

/// Notice shown when the player asks for the room code to pass around.
pub fn share_code(room_id: &RoomId) -> Notice {
    Notice::info("Room Code", format!("Share this code with other players: {room_id}"))
}

pub struct LobbyController {
    lobby: WaitingLobby,
    updates: mpsc::UnboundedSender<LobbyUpdate>,
}

impl LobbyController {
    pub fn new(lobby: WaitingLobby, updates: mpsc::UnboundedSender<LobbyUpdate>) -> Self {
        Self { lobby, updates }
    }

    pub fn lobby(&self) -> &WaitingLobby {
        &self.lobby
    }

    /// Subscription kinds the lobby listens to
    pub const EVENTS: [EventKind; 1] = [EventKind::RoomUpdated];

    /// Drive the lobby until it navigates away.
    ///
    /// A closed input channel is treated as leaving the room.
    pub async fn run(
        mut self,
        mut events: Subscription,
        mut inputs: mpsc::Receiver<LobbyInput>,
    ) -> Navigation {
        let mut timer = CountdownTimer::start();
        let mut events_open = true;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    if let Some(navigation) = self.lobby.tick() {
                        tracing::info!("Lobby countdown finished for room {}", self.lobby.room().id);
                        return navigation;
                    }
                    if self.lobby.countdown_running() {
                        self.publish(LobbyUpdate::Tick(self.lobby.remaining()));
                    }
                }

                event = events.recv(), if events_open => match event {
                    Some(RoomEvent::Updated(record)) => {
                        if self.lobby.apply_record(&record) {
                            tracing::debug!("Lobby roster refreshed for room {}", record.id);
                            self.publish_roster();
                        }
                    }
                    Some(RoomEvent::Created(_)) => {}
                    None => {
                        tracing::warn!("Realtime channel closed; lobby updates stopped");
                        events_open = false;
                    }
                },

                input = inputs.recv() => match input {
                    Some(LobbyInput::SetReady(ready)) => match self.lobby.set_viewer_ready(ready) {
                        Ok(()) => self.publish_roster(),
                        Err(e) => self.publish(LobbyUpdate::Rejected(e)),
                    },
                    Some(LobbyInput::StartNow) => match self.lobby.start_now() {
                        Ok(navigation) => {
                            tracing::info!("Host started room {}", self.lobby.room().id);
                            return navigation;
                        }
                        Err(e) => self.publish(LobbyUpdate::Rejected(e)),
                    },
                    Some(LobbyInput::Leave) | None => {
                        tracing::info!("Leaving lobby of room {}", self.lobby.room().id);
                        return self.lobby.leave();
                    }
                },
            }
        }
    }

    fn publish_roster(&self) {
        self.publish(LobbyUpdate::Roster {
            ready: self.lobby.ready_count(),
            total: self.lobby.total(),
        });
    }

    fn publish(&self, update: LobbyUpdate) {
        let _ = self.updates.send(update);
    }
}
