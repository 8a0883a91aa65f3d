//! Mapping from the backend room record to the dashboard card.

use super::{
    entity::{RoomCard, RoomRecord},
    value_object::{Difficulty, RoomStatus},
};

pub const UNKNOWN_HOST: &str = "Unknown Host";
pub const DEFAULT_MAX_PARTICIPANTS: u32 = 10;
pub const DEFAULT_PLATFORM: &str = "Web";

/// Host display name for a record.
///
/// An explicit non-empty `host` wins, then the first player, then [`UNKNOWN_HOST`].
pub fn host_of(record: &RoomRecord) -> String {
    record
        .host
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .or_else(|| record.players().first().map(String::as_str))
        .unwrap_or(UNKNOWN_HOST)
        .to_string()
}

/// Project a backend record onto a [`RoomCard`]. Never fails.
pub fn transform_room(record: &RoomRecord) -> RoomCard {
    let status = record
        .status
        .as_deref()
        .and_then(|s| s.parse::<RoomStatus>().ok())
        .unwrap_or_default();
    let difficulty = record
        .difficulty
        .as_deref()
        .and_then(|d| d.parse::<Difficulty>().ok())
        .unwrap_or_default();
    let platforms = match record.platforms.as_deref() {
        Some(p) if !p.is_empty() => p.to_vec(),
        _ => vec![DEFAULT_PLATFORM.to_string()],
    };

    RoomCard {
        id: record.id.clone(),
        title: record.name.clone(),
        host: host_of(record),
        host_avatar: None,
        participants: u32::try_from(record.players().len()).unwrap_or(u32::MAX),
        max_participants: record
            .max_participants
            .unwrap_or(DEFAULT_MAX_PARTICIPANTS),
        status,
        difficulty,
        time_left: record.time_left.clone(),
        platforms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomId;

    fn record(players: Vec<&str>) -> RoomRecord {
        RoomRecord::new(
            RoomId::new("r1").unwrap(),
            "Foo",
            players.into_iter().map(String::from).collect(),
        )
    }

    #[test]
    fn test_transform_empty_players() {
        // テスト項目: 参加者がいない場合は 0 人で "Unknown Host"
        // when (操作):
        let card = transform_room(&record(vec![]));

        // then (期待する結果):
        assert_eq!(card.participants, 0);
        assert_eq!(card.host, "Unknown Host");
    }

    #[test]
    fn test_transform_first_player_is_host() {
        // テスト項目: 先頭の参加者がホストになる
        // when (操作):
        let card = transform_room(&record(vec!["A", "B"]));

        // then (期待する結果):
        assert_eq!(card.host, "A");
        assert_eq!(card.participants, 2);
    }

    #[test]
    fn test_transform_defaults() {
        // テスト項目: 任意フィールドが無い場合はデフォルト値が使われる
        // when (操作):
        let card = transform_room(&record(vec!["A"]));

        // then (期待する結果):
        assert_eq!(card.id.as_str(), "r1");
        assert_eq!(card.title, "Foo");
        assert_eq!(card.max_participants, 10);
        assert_eq!(card.status, RoomStatus::Waiting);
        assert_eq!(card.difficulty, Difficulty::Easy);
        assert_eq!(card.platforms, vec!["Web".to_string()]);
        assert_eq!(card.time_left, None);
        assert_eq!(card.host_avatar, None);
    }

    #[test]
    fn test_transform_missing_players_does_not_fail() {
        // テスト項目: players が欠けたレコードでも失敗しない
        // given (前提条件):
        let raw: RoomRecord = serde_json::from_str(r#"{"_id":"r9","name":"Bare"}"#).unwrap();

        // when (操作):
        let card = transform_room(&raw);

        // then (期待する結果):
        assert_eq!(card.participants, 0);
        assert_eq!(card.host, "Unknown Host");
    }

    #[test]
    fn test_transform_uses_backend_fields_when_present() {
        // テスト項目: バックエンドが値を返した場合はそれを使う
        // given (前提条件):
        let raw: RoomRecord = serde_json::from_str(
            r#"{"_id":"r2","name":"Bar","players":["bob","carol"],"host":"You",
                "maxParticipants":4,"status":"live","difficulty":"Hard",
                "platforms":["leetcode","codeforces"],"timeLeft":"02:00"}"#,
        )
        .unwrap();

        // when (操作):
        let card = transform_room(&raw);

        // then (期待する結果):
        assert_eq!(card.host, "You");
        assert_eq!(card.max_participants, 4);
        assert_eq!(card.status, RoomStatus::Live);
        assert_eq!(card.difficulty, Difficulty::Hard);
        assert_eq!(card.platforms, vec!["leetcode", "codeforces"]);
        assert_eq!(card.time_left.as_deref(), Some("02:00"));
    }

    #[test]
    fn test_transform_unknown_labels_fall_back() {
        // テスト項目: 不明なステータスや難易度はデフォルトに戻る
        // given (前提条件):
        let mut raw = record(vec!["A"]);
        raw.status = Some("archived".to_string());
        raw.difficulty = Some("Insane".to_string());
        raw.platforms = Some(vec![]);
        raw.host = Some("  ".to_string());

        // when (操作):
        let card = transform_room(&raw);

        // then (期待する結果):
        assert_eq!(card.status, RoomStatus::Waiting);
        assert_eq!(card.difficulty, Difficulty::Easy);
        assert_eq!(card.platforms, vec!["Web".to_string()]);
        assert_eq!(card.host, "A");
    }
}
