//! Room directory: the dashboard's live room list.
//!
//! Rooms are stored in a map keyed by id, with a separate order vector so
//! the rendered list keeps "newest first" ordering. Only three mutations
//! exist: snapshot replacement, idempotent insert, and update-if-present.

use std::collections::HashMap;

use super::{
    entity::RoomCard,
    event::RoomEvent,
    transform::transform_room,
    value_object::RoomId,
};

#[derive(Debug, Default, Clone)]
pub struct RoomDirectory {
    order: Vec<RoomId>,
    rooms: HashMap<RoomId, RoomCard>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fetched snapshot.
    ///
    /// If the snapshot repeats an id, the first occurrence wins.
    pub fn replace_all(&mut self, cards: impl IntoIterator<Item = RoomCard>) {
        self.order.clear();
        self.rooms.clear();
        for card in cards {
            if self.rooms.contains_key(&card.id) {
                continue;
            }
            self.order.push(card.id.clone());
            self.rooms.insert(card.id.clone(), card);
        }
    }

    /// Put a room at the front unless one with the same id is already listed.
    ///
    /// Returns whether the list changed.
    pub fn insert_front(&mut self, card: RoomCard) -> bool {
        if self.rooms.contains_key(&card.id) {
            return false;
        }
        self.order.insert(0, card.id.clone());
        self.rooms.insert(card.id.clone(), card);
        true
    }

    /// Replace the room with the same id, keeping its position.
    ///
    /// Unknown ids are ignored. Returns whether the list changed.
    pub fn update(&mut self, card: RoomCard) -> bool {
        match self.rooms.get_mut(&card.id) {
            Some(existing) => {
                *existing = card;
                true
            }
            None => false,
        }
    }

    /// Apply a realtime event
    pub fn apply(&mut self, event: &RoomEvent) -> bool {
        let card = transform_room(event.record());
        match event {
            RoomEvent::Created(_) => self.insert_front(card),
            RoomEvent::Updated(_) => self.update(card),
        }
    }

    pub fn get(&self, id: &RoomId) -> Option<&RoomCard> {
        self.rooms.get(id)
    }

    /// Rooms in display order
    pub fn rooms(&self) -> Vec<&RoomCard> {
        self.order.iter().filter_map(|id| self.rooms.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rooms whose title or host contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&RoomCard> {
        filter_rooms(self.rooms(), query)
    }
}

/// Case-insensitive substring filter over title and host. An empty query keeps everything.
pub fn filter_rooms<'a>(
    rooms: impl IntoIterator<Item = &'a RoomCard>,
    query: &str,
) -> Vec<&'a RoomCard> {
    let query = query.to_lowercase();
    rooms
        .into_iter()
        .filter(|room| room.matches_lowercase(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomRecord;

    fn record(id: &str, name: &str, players: &[&str]) -> RoomRecord {
        RoomRecord::new(
            RoomId::new(id).unwrap(),
            name,
            players.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn directory_with(records: &[RoomRecord]) -> RoomDirectory {
        let mut directory = RoomDirectory::new();
        directory.replace_all(records.iter().map(transform_room));
        directory
    }

    #[test]
    fn test_replace_all_keeps_order() {
        // テスト項目: スナップショットの順序が保たれる
        // when (操作):
        let directory = directory_with(&[
            record("r1", "Foo", &["alice"]),
            record("r2", "Bar", &["bob"]),
        ]);

        // then (期待する結果):
        let ids: Vec<_> = directory.rooms().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[test]
    fn test_replace_all_discards_previous_state() {
        // テスト項目: スナップショットは既存の状態を完全に置き換える
        // given (前提条件):
        let mut directory = directory_with(&[record("r1", "Foo", &["alice"])]);

        // when (操作):
        directory.replace_all(vec![transform_room(&record("r2", "Bar", &[]))]);

        // then (期待する結果):
        assert_eq!(directory.len(), 1);
        assert!(directory.get(&RoomId::new("r1").unwrap()).is_none());
    }

    #[test]
    fn test_created_event_inserts_at_front() {
        // テスト項目: roomCreated は先頭に追加される
        // given (前提条件):
        let mut directory = directory_with(&[record("r1", "Foo", &["alice"])]);

        // when (操作):
        let changed = directory.apply(&RoomEvent::Created(record("r2", "Bar", &["bob"])));

        // then (期待する結果):
        assert!(changed);
        assert_eq!(directory.rooms()[0].id.as_str(), "r2");
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_created_event_is_idempotent() {
        // テスト項目: 既存 ID の roomCreated はリストの長さを変えない
        // given (前提条件):
        let mut directory = directory_with(&[record("r1", "Foo", &["alice"])]);

        // when (操作):
        let changed = directory.apply(&RoomEvent::Created(record("r1", "Foo", &["alice"])));

        // then (期待する結果):
        assert!(!changed);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_updated_event_replaces_in_place() {
        // テスト項目: roomUpdated は同じ位置のエントリを置き換える
        // given (前提条件):
        let mut directory = directory_with(&[
            record("r1", "Foo", &["alice"]),
            record("r2", "Bar", &["bob"]),
        ]);

        // when (操作):
        let changed =
            directory.apply(&RoomEvent::Updated(record("r2", "Bar", &["bob", "carol"])));

        // then (期待する結果):
        assert!(changed);
        let rooms = directory.rooms();
        assert_eq!(rooms[1].id.as_str(), "r2");
        assert_eq!(rooms[1].participants, 2);
    }

    #[test]
    fn test_updated_event_for_unknown_id_is_noop() {
        // テスト項目: 未知の ID の roomUpdated はリストを変更しない
        // given (前提条件):
        let mut directory = directory_with(&[record("r1", "Foo", &["alice"])]);
        let before: Vec<RoomCard> = directory.rooms().into_iter().cloned().collect();

        // when (操作):
        let changed = directory.apply(&RoomEvent::Updated(record("zz", "Ghost", &["x"])));

        // then (期待する結果):
        assert!(!changed);
        let after: Vec<RoomCard> = directory.rooms().into_iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_search_filter() {
        // テスト項目: タイトルとホストに対する大文字小文字を区別しない部分一致
        // given (前提条件):
        let directory = directory_with(&[
            record("r1", "Foo Battle", &["alice"]),
            record("r2", "Bar Battle", &["bob"]),
        ]);

        // when (操作) / then (期待する結果):
        let foo = directory.search("foo");
        assert_eq!(foo.len(), 1);
        assert_eq!(foo[0].title, "Foo Battle");

        assert_eq!(directory.search("battle").len(), 2);
        assert!(directory.search("zzz").is_empty());

        let by_host = directory.search("BOB");
        assert_eq!(by_host.len(), 1);
        assert_eq!(by_host[0].id.as_str(), "r2");

        assert_eq!(directory.search("").len(), 2);
    }

    #[test]
    fn test_search_does_not_mutate() {
        // テスト項目: 検索は元のリストを変更しない
        // given (前提条件):
        let directory = directory_with(&[
            record("r1", "Foo Battle", &["alice"]),
            record("r2", "Bar Battle", &["bob"]),
        ]);

        // when (操作):
        let _ = directory.search("foo");

        // then (期待する結果):
        assert_eq!(directory.len(), 2);
    }
}
