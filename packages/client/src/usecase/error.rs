//! UseCase 層のエラー定義
//!
//! 各エラーは利用者向けの [`Notice`] に変換できます。

use thiserror::Error;

use crate::domain::{ArenaError, GatewayError, LobbyError, Notice, RoomId, StorageError};

/// Errors of the create-room flow
#[derive(Debug, Error)]
pub enum CreateRoomError {
    #[error("Please select at least one platform.")]
    NoPlatformSelected,

    #[error("Please enter a room title.")]
    TitleRequired,

    #[error("Please select a difficulty.")]
    DifficultyRequired,

    #[error("Invalid max players: {0}")]
    InvalidMaxParticipants(String),

    #[error("Invalid timer: {0}")]
    InvalidTimer(String),

    #[error("A room is already being created")]
    InFlight,

    #[error("Failed to create room: {0}")]
    Gateway(#[from] GatewayError),
}

impl CreateRoomError {
    /// Whether the error was raised before any request was sent
    pub fn is_validation(&self) -> bool {
        !matches!(self, CreateRoomError::Gateway(_) | CreateRoomError::InFlight)
    }

    pub fn notice(&self) -> Notice {
        match self {
            CreateRoomError::Gateway(_) => Notice::error("Failed to create room."),
            other => Notice::error(other.to_string()),
        }
    }
}

/// Errors of the join-room flows (by code and from a room card)
#[derive(Debug, Error)]
pub enum JoinRoomError {
    #[error("Please enter a room code.")]
    EmptyCode,

    #[error("Invalid room code: {0}")]
    InvalidCode(String),

    #[error("Room {0} was not found")]
    RoomNotFound(String),

    #[error("Room {0} is full")]
    RoomFull(String),

    #[error("Room {0} has finished")]
    RoomFinished(String),

    #[error("Already joining a room")]
    InFlight,

    #[error("Failed to look up room: {0}")]
    Gateway(#[from] GatewayError),
}

impl JoinRoomError {
    pub fn notice(&self) -> Notice {
        match self {
            JoinRoomError::Gateway(_) => Notice::error("Failed to join room."),
            other => Notice::error(other.to_string()),
        }
    }
}

/// Errors of the sign-in / sign-up flow
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter your email.")]
    EmailRequired,

    #[error("Please enter your password.")]
    PasswordRequired,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Authentication failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Failed to store session: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn notice(&self) -> Notice {
        match self {
            AuthError::Gateway(GatewayError::Rejected(message)) => Notice::error(message.clone()),
            AuthError::Gateway(_) => Notice::error("Authentication failed. Please try again."),
            AuthError::Storage(_) => Notice::error("Could not save your session."),
            other => Notice::error(other.to_string()),
        }
    }
}

/// Errors when entering a waiting lobby
#[derive(Debug, Error)]
pub enum LobbyOpenError {
    #[error("Room {0} does not exist")]
    RoomNotFound(RoomId),

    #[error("Failed to load room: {0}")]
    Gateway(#[from] GatewayError),
}

impl LobbyOpenError {
    pub fn notice(&self) -> Notice {
        match self {
            LobbyOpenError::RoomNotFound(id) => {
                Notice::error(format!("Room {id} does not exist or has been closed."))
            }
            LobbyOpenError::Gateway(_) => Notice::error("Failed to load room."),
        }
    }
}

impl From<&LobbyError> for Notice {
    fn from(value: &LobbyError) -> Self {
        Notice::error(value.to_string())
    }
}

impl From<&ArenaError> for Notice {
    fn from(value: &ArenaError) -> Self {
        Notice::error(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_room_error_notice() {
        // テスト項目: 通信エラーは汎用メッセージ、検証エラーは個別メッセージになる
        // when (操作):
        let validation = CreateRoomError::NoPlatformSelected;
        let transport = CreateRoomError::Gateway(GatewayError::Api {
            status: 500,
            message: "boom".to_string(),
        });

        // then (期待する結果):
        assert!(validation.is_validation());
        assert_eq!(
            validation.notice().description,
            "Please select at least one platform."
        );
        assert!(!transport.is_validation());
        assert_eq!(transport.notice().description, "Failed to create room.");
        assert!(transport.notice().is_destructive());
    }

    #[test]
    fn test_auth_rejected_notice_uses_backend_message() {
        // テスト項目: バックエンドの拒否メッセージがそのまま表示される
        // when (操作):
        let error = AuthError::Gateway(GatewayError::Rejected("Invalid credentials".to_string()));

        // then (期待する結果):
        assert_eq!(error.notice().description, "Invalid credentials");
    }
}
