//! Ports to the outside world.
//!
//! Use cases depend on these traits; `infrastructure` provides the
//! implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    arena::{CheatReport, SubmitKind},
    entity::{AuthSession, Credentials, NewRoom, Registration, RoomRecord},
    error::{ChannelError, GatewayError, PresentationError, StorageError},
    value_object::{ParticipantId, RoomId},
};

/// Local storage key of the session token
pub const TOKEN_KEY: &str = "token";

/// Local storage key of the participant identity
pub const USER_ID_KEY: &str = "userId";

/// Room endpoints of the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomGateway: Send + Sync {
    /// `GET /api/room`
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, GatewayError>;

    /// `POST /api/room/create`
    async fn create_room(&self, room: NewRoom) -> Result<RoomRecord, GatewayError>;
}

/// Authentication endpoints of the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// `POST /api/auth/login`
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, GatewayError>;

    /// `POST /api/auth/register`
    async fn register(&self, registration: Registration) -> Result<AuthSession, GatewayError>;
}

/// Outbound side of the realtime channel
#[cfg_attr(test, mockall::automock)]
pub trait EventEmitter: Send + Sync {
    /// Queue a `cheat-detected` event
    fn emit_cheat(&self, report: &CheatReport) -> Result<(), ChannelError>;
}

/// Client-local key/value storage
#[cfg_attr(test, mockall::automock)]
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Executes code against sample test cases
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeRunner: Send + Sync {
    async fn run(&self, source: &str) -> Result<String, GatewayError>;
}

/// Hands a solution in
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolutionSubmitter: Send + Sync {
    async fn submit(
        &self,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        source: &str,
        kind: SubmitKind,
    ) -> Result<(), GatewayError>;
}

/// Presentation capabilities of the front-end
#[cfg_attr(test, mockall::automock)]
pub trait Presentation: Send + Sync {
    fn request_fullscreen(&self) -> Result<(), PresentationError>;
}

/// Participant identity stored locally, `anonymous` when absent or invalid
pub fn stored_participant(storage: &dyn LocalStorage) -> ParticipantId {
    storage
        .get(USER_ID_KEY)
        .and_then(|id| ParticipantId::new(id).ok())
        .unwrap_or_else(ParticipantId::anonymous)
}
