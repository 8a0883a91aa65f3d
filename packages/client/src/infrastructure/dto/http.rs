//! HTTP API DTOs for the CodeArena backend.

use serde::{Deserialize, Serialize};

use crate::domain::{AuthSession, Credentials, NewRoom, Registration, RoomRecord};

/// Body of `POST /api/room/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequestDto {
    pub name: String,
    pub difficulty: String,
    pub max_participants: u32,
    /// Minutes
    pub timer: u32,
    pub platforms: Vec<String>,
    pub host: String,
}

impl From<&NewRoom> for CreateRoomRequestDto {
    fn from(room: &NewRoom) -> Self {
        Self {
            name: room.name.clone(),
            difficulty: room.difficulty.as_str().to_string(),
            max_participants: room.max_participants,
            timer: room.timer_minutes,
            platforms: room.platforms.iter().map(|p| p.id().to_string()).collect(),
            host: room.host.clone(),
        }
    }
}

/// Reply of `POST /api/room/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponseDto {
    pub room: RoomRecord,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

impl From<&Credentials> for LoginRequestDto {
    fn from(value: &Credentials) -> Self {
        Self {
            email: value.email.clone(),
            password: value.password.clone(),
        }
    }
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<&Registration> for RegisterRequestDto {
    fn from(value: &Registration) -> Self {
        Self {
            email: value.email.clone(),
            password: value.password.clone(),
            confirm_password: value.confirm_password.clone(),
        }
    }
}

/// Reply of the auth endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponseDto {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponseDto {
    pub fn into_session(self) -> AuthSession {
        AuthSession {
            token: self.token,
            message: self.message,
        }
    }
}

/// Error body some endpoints return alongside a non-2xx status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}
