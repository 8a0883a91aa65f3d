//! Waiting lobby: readiness quorum and the pre-battle countdown.
//!
//! The roster comes from the backend room record. The countdown only runs
//! while every participant is ready and pauses as soon as someone is not.

use super::{
    countdown::{Countdown, Tick},
    entity::{LobbyParticipant, RoomRecord},
    error::LobbyError,
    notice::Notice,
    route::{Navigation, Route},
    transform::{DEFAULT_MAX_PARTICIPANTS, host_of},
    value_object::{Difficulty, ParticipantId, RoomId},
};

/// Seconds between full readiness and the automatic start
pub const DEFAULT_LOBBY_COUNTDOWN_SECS: u32 = 30;

/// Room details shown in the lobby
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyRoom {
    pub id: RoomId,
    pub title: String,
    pub host: String,
    pub difficulty: Difficulty,
    pub max_participants: u32,
    pub platforms: Vec<String>,
    /// Battle length in minutes, when the backend reports it
    pub timer_minutes: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct WaitingLobby {
    room: LobbyRoom,
    participants: Vec<LobbyParticipant>,
    viewer: ParticipantId,
    /// Readiness the viewer set locally; applies when the backend reports none
    viewer_ready: Option<bool>,
    countdown: Countdown,
    started: bool,
}

impl WaitingLobby {
    pub fn from_record(record: &RoomRecord, viewer: ParticipantId, countdown_secs: u32) -> Self {
        let mut lobby = Self {
            room: lobby_room(record),
            participants: Vec::new(),
            viewer,
            viewer_ready: None,
            countdown: Countdown::new(countdown_secs),
            started: false,
        };
        lobby.participants = lobby.roster(record);
        lobby.sync_countdown();
        lobby
    }

    /// Refresh room details and roster from a newer record of the same room.
    ///
    /// Records for other rooms are ignored. Returns whether anything was applied.
    pub fn apply_record(&mut self, record: &RoomRecord) -> bool {
        if record.id != self.room.id {
            return false;
        }
        self.room = lobby_room(record);
        self.participants = self.roster(record);
        self.sync_countdown();
        true
    }

    fn roster(&self, record: &RoomRecord) -> Vec<LobbyParticipant> {
        let host = host_of(record);
        record
            .players()
            .iter()
            .filter_map(|name| {
                let id = ParticipantId::new(name.clone()).ok()?;
                let reported = match record.ready.as_deref() {
                    Some(ready) => ready.contains(name),
                    None => self.viewer_ready.filter(|_| id == self.viewer).unwrap_or(true),
                };
                Some(LobbyParticipant::new(id, name.clone(), *name == host, reported))
            })
            .collect()
    }

    /// Run the countdown exactly while the quorum holds
    fn sync_countdown(&mut self) {
        if self.started {
            return;
        }
        if self.all_ready() {
            self.countdown.start();
        } else {
            self.countdown.pause();
        }
    }

    pub fn room(&self) -> &LobbyRoom {
        &self.room
    }

    pub fn participants(&self) -> &[LobbyParticipant] {
        &self.participants
    }

    pub fn viewer(&self) -> &ParticipantId {
        &self.viewer
    }

    pub fn total(&self) -> usize {
        self.participants.len()
    }

    pub fn ready_count(&self) -> usize {
        self.participants.iter().filter(|p| p.ready).count()
    }

    pub fn waiting_for(&self) -> usize {
        self.total() - self.ready_count()
    }

    pub fn all_ready(&self) -> bool {
        !self.participants.is_empty() && self.waiting_for() == 0
    }

    /// `ready / total` in `0.0..=1.0`; an empty roster reports 0
    pub fn progress(&self) -> f64 {
        if self.participants.is_empty() {
            return 0.0;
        }
        self.ready_count() as f64 / self.total() as f64
    }

    pub fn is_host(&self) -> bool {
        self.participants
            .iter()
            .any(|p| p.id == self.viewer && p.is_host)
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Toggle the viewer's readiness.
    pub fn set_viewer_ready(&mut self, ready: bool) -> Result<(), LobbyError> {
        let viewer = self
            .participants
            .iter_mut()
            .find(|p| p.id == self.viewer)
            .ok_or_else(|| LobbyError::NotInRoster(self.viewer.to_string()))?;
        viewer.ready = ready;
        self.viewer_ready = Some(ready);
        self.sync_countdown();
        Ok(())
    }

    /// Whether the host-only "start now" action is offered
    pub fn can_start_now(&self) -> bool {
        !self.started && self.is_host() && self.all_ready() && self.remaining() > 0
    }

    pub fn start_now(&mut self) -> Result<Navigation, LobbyError> {
        if self.started || self.remaining() == 0 {
            return Err(LobbyError::AlreadyStarted);
        }
        if !self.is_host() {
            return Err(LobbyError::NotHost);
        }
        if !self.all_ready() {
            return Err(LobbyError::NotAllReady {
                waiting: self.waiting_for(),
            });
        }
        Ok(self.begin_battle())
    }

    /// One second passed. Returns the transition once the countdown expires.
    pub fn tick(&mut self) -> Option<Navigation> {
        if self.started {
            return None;
        }
        self.sync_countdown();
        match self.countdown.tick() {
            Tick::Expired => Some(self.begin_battle()),
            Tick::Running(_) | Tick::Inactive => None,
        }
    }

    pub fn leave(&mut self) -> Navigation {
        self.countdown.cancel();
        Navigation::to(Route::Dashboard)
    }

    fn begin_battle(&mut self) -> Navigation {
        self.started = true;
        self.countdown.cancel();
        Navigation::with_notice(
            Route::Arena(self.room.id.clone()),
            Notice::info("Battle Starting!", "Get ready to code..."),
        )
    }
}

fn lobby_room(record: &RoomRecord) -> LobbyRoom {
    LobbyRoom {
        id: record.id.clone(),
        title: record.name.clone(),
        host: host_of(record),
        difficulty: record
            .difficulty
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or_default(),
        max_participants: record
            .max_participants
            .unwrap_or(DEFAULT_MAX_PARTICIPANTS),
        platforms: record.platforms.clone().unwrap_or_default(),
        timer_minutes: record.timer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(players: &[&str], ready: Option<&[&str]>) -> RoomRecord {
        let mut record = RoomRecord::new(
            RoomId::new("r1").unwrap(),
            "JavaScript Fundamentals Battle",
            players.iter().map(|p| p.to_string()).collect(),
        );
        record.ready = ready.map(|r| r.iter().map(|p| p.to_string()).collect());
        record
    }

    fn viewer(name: &str) -> ParticipantId {
        ParticipantId::new(name).unwrap()
    }

    #[test]
    fn test_roster_from_record() {
        // テスト項目: レコードから参加者一覧とホストが構築される
        // when (操作):
        let lobby = WaitingLobby::from_record(
            &record(&["alice", "bob", "carol"], Some(&["alice", "bob"])),
            viewer("alice"),
            30,
        );

        // then (期待する結果):
        assert_eq!(lobby.total(), 3);
        assert_eq!(lobby.ready_count(), 2);
        assert_eq!(lobby.waiting_for(), 1);
        assert!(lobby.is_host());
        assert!(lobby.participants()[0].is_host);
        assert!(!lobby.participants()[1].is_host);
        assert!((lobby.progress() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_ready_list_counts_everyone_ready() {
        // テスト項目: ready が報告されない場合は全員準備完了として扱う
        // when (操作):
        let lobby = WaitingLobby::from_record(&record(&["alice", "bob"], None), viewer("bob"), 30);

        // then (期待する結果):
        assert!(lobby.all_ready());
        assert!(!lobby.is_host());
        assert!(lobby.countdown_running());
    }

    #[test]
    fn test_empty_roster_progress_is_zero() {
        // テスト項目: 参加者がいない場合の進捗は 0
        // when (操作):
        let lobby = WaitingLobby::from_record(&record(&[], None), viewer("alice"), 30);

        // then (期待する結果):
        assert_eq!(lobby.progress(), 0.0);
        assert!(!lobby.all_ready());
    }

    #[test]
    fn test_countdown_auto_starts_battle_when_all_ready() {
        // テスト項目: 全員準備完了でカウントダウンが 0 になるとアリーナへ遷移する
        // given (前提条件):
        let mut lobby =
            WaitingLobby::from_record(&record(&["alice", "bob"], None), viewer("bob"), 3);

        // when (操作):
        let first = lobby.tick();
        let second = lobby.tick();
        let third = lobby.tick();
        let fourth = lobby.tick();

        // then (期待する結果):
        assert!(first.is_none());
        assert!(second.is_none());
        let navigation = third.unwrap();
        assert_eq!(navigation.route, Route::Arena(RoomId::new("r1").unwrap()));
        assert_eq!(navigation.notice.unwrap().title, "Battle Starting!");
        assert!(fourth.is_none());
        assert!(lobby.has_started());
    }

    #[test]
    fn test_countdown_pauses_without_quorum() {
        // テスト項目: 準備未完了の参加者がいる間はカウントダウンが止まる
        // given (前提条件):
        let mut lobby = WaitingLobby::from_record(
            &record(&["alice", "bob"], Some(&["alice"])),
            viewer("alice"),
            2,
        );

        // when (操作):
        for _ in 0..10 {
            assert!(lobby.tick().is_none());
        }

        // then (期待する結果):
        assert_eq!(lobby.remaining(), 2);

        // bob が準備完了になると再開する
        lobby.apply_record(&record(&["alice", "bob"], Some(&["alice", "bob"])));
        assert!(lobby.tick().is_none());
        assert!(lobby.tick().is_some());
    }

    #[test]
    fn test_start_now_host_only() {
        // テスト項目: 「今すぐ開始」はホストのみ実行できる
        // given (前提条件):
        let mut guest =
            WaitingLobby::from_record(&record(&["alice", "bob"], None), viewer("bob"), 30);
        let mut host =
            WaitingLobby::from_record(&record(&["alice", "bob"], None), viewer("alice"), 30);

        // when (操作):
        let guest_result = guest.start_now();
        let host_result = host.start_now();

        // then (期待する結果):
        assert_eq!(guest_result.unwrap_err(), LobbyError::NotHost);
        assert!(host.has_started());
        assert_eq!(
            host_result.unwrap().route,
            Route::Arena(RoomId::new("r1").unwrap())
        );
        assert_eq!(host.start_now().unwrap_err(), LobbyError::AlreadyStarted);
    }

    #[test]
    fn test_start_now_requires_quorum() {
        // テスト項目: 全員が準備完了でないと開始できない
        // given (前提条件):
        let mut lobby = WaitingLobby::from_record(
            &record(&["alice", "bob"], Some(&["alice"])),
            viewer("alice"),
            30,
        );

        // then (期待する結果):
        assert!(!lobby.can_start_now());
        assert_eq!(
            lobby.start_now().unwrap_err(),
            LobbyError::NotAllReady { waiting: 1 }
        );
    }

    #[test]
    fn test_viewer_ready_toggle() {
        // テスト項目: 自分の準備状態を切り替えるとカウントダウンが止まる
        // given (前提条件):
        let mut lobby =
            WaitingLobby::from_record(&record(&["alice", "bob"], None), viewer("bob"), 30);

        // when (操作):
        lobby.set_viewer_ready(false).unwrap();

        // then (期待する結果):
        assert_eq!(lobby.ready_count(), 1);
        assert!(!lobby.countdown_running());

        // 更新イベントでも自分の設定は維持される
        lobby.apply_record(&record(&["alice", "bob", "carol"], None));
        assert_eq!(lobby.ready_count(), 2);
        assert_eq!(lobby.total(), 3);
    }

    #[test]
    fn test_viewer_not_in_roster() {
        // テスト項目: 参加者一覧にいない場合は準備状態を変更できない
        // given (前提条件):
        let mut lobby =
            WaitingLobby::from_record(&record(&["alice"], None), viewer("mallory"), 30);

        // then (期待する結果):
        assert_eq!(
            lobby.set_viewer_ready(true).unwrap_err(),
            LobbyError::NotInRoster("mallory".to_string())
        );
    }

    #[test]
    fn test_apply_record_ignores_other_rooms() {
        // テスト項目: 別のルームのレコードは無視される
        // given (前提条件):
        let mut lobby = WaitingLobby::from_record(&record(&["alice"], None), viewer("alice"), 30);
        let other = RoomRecord::new(RoomId::new("r2").unwrap(), "Other", vec!["x".to_string()]);

        // then (期待する結果):
        assert!(!lobby.apply_record(&other));
        assert_eq!(lobby.room().title, "JavaScript Fundamentals Battle");
    }

    #[test]
    fn test_leave_returns_to_dashboard() {
        // テスト項目: 退出するとダッシュボードへ戻る
        // given (前提条件):
        let mut lobby = WaitingLobby::from_record(&record(&["alice"], None), viewer("alice"), 30);

        // then (期待する結果):
        assert_eq!(lobby.leave().route, Route::Dashboard);
        assert!(lobby.tick().is_none());
    }
}
