//! Core domain models for the CodeArena client.

use serde::{Deserialize, Serialize};

use super::value_object::{Difficulty, ParticipantId, Platform, RoomId, RoomStatus};

/// Room as the backend represents it (`GET /api/room`, `roomCreated`, `roomUpdated`).
///
/// Only `_id` and `name` are required. Everything else is optional so that a
/// partial record still decodes; [`crate::domain::transform_room`] fills the gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    #[serde(rename = "_id")]
    pub id: RoomId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<String>,
    /// Battle duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u32>,
    /// Names of the players who signalled readiness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<Vec<String>>,
}

impl RoomRecord {
    /// Minimal record with just the required fields
    pub fn new(id: RoomId, name: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            players: Some(players),
            host: None,
            max_participants: None,
            status: None,
            difficulty: None,
            platforms: None,
            time_left: None,
            timer: None,
            ready: None,
        }
    }

    /// Player names, empty when the backend omitted the list
    pub fn players(&self) -> &[String] {
        self.players.as_deref().unwrap_or(&[])
    }
}

/// Room projection rendered by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCard {
    pub id: RoomId,
    pub title: String,
    pub host: String,
    pub host_avatar: Option<String>,
    pub participants: u32,
    pub max_participants: u32,
    pub status: RoomStatus,
    pub difficulty: Difficulty,
    /// Only meaningful while the room is waiting
    pub time_left: Option<String>,
    pub platforms: Vec<String>,
}

impl RoomCard {
    pub fn is_full(&self) -> bool {
        self.participants >= self.max_participants
    }

    /// Whether the card's join button is enabled
    pub fn is_joinable(&self) -> bool {
        self.status != RoomStatus::Finished && !self.is_full()
    }

    /// Label of the card's join button
    pub fn join_label(&self) -> &'static str {
        if self.status == RoomStatus::Finished {
            "Finished"
        } else if self.is_full() {
            "Room Full"
        } else {
            "Join Room"
        }
    }

    /// Countdown text, hidden unless the room is still waiting
    pub fn visible_time_left(&self) -> Option<&str> {
        match self.status {
            RoomStatus::Waiting => self.time_left.as_deref(),
            _ => None,
        }
    }

    /// Case-insensitive match of `query` against title and host.
    ///
    /// `query` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query) || self.host.to_lowercase().contains(query)
    }
}

/// Validated room creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub name: String,
    pub difficulty: Difficulty,
    pub max_participants: u32,
    /// Battle length in minutes
    pub timer_minutes: u32,
    pub platforms: Vec<Platform>,
    pub host: String,
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Successful authentication reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: Option<String>,
    pub message: Option<String>,
}

/// Participant of a waiting lobby
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyParticipant {
    pub id: ParticipantId,
    pub name: String,
    pub is_host: bool,
    pub ready: bool,
}

impl LobbyParticipant {
    pub fn new(id: ParticipantId, name: impl Into<String>, is_host: bool, ready: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_host,
            ready,
        }
    }
}
