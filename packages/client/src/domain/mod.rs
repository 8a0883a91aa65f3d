//! Domain layer for the CodeArena client.
//!
//! This module contains the room lifecycle rules (directory, lobby, arena)
//! independent of HTTP, WebSocket and terminal concerns.

pub mod arena;
pub mod countdown;
pub mod directory;
pub mod entity;
pub mod error;
pub mod event;
pub mod lobby;
pub mod notice;
pub mod port;
pub mod route;
pub mod transform;
pub mod value_object;

pub use arena::{
    ARENA_DURATION_SECS, ArenaExit, ArenaPhase, ArenaSession, CheatIncident, CheatReason,
    CheatReport, PageSignal, SubmitKind,
};
pub use countdown::{Countdown, CountdownState, Tick, format_mm_ss};
pub use directory::{RoomDirectory, filter_rooms};
pub use entity::{
    AuthSession, Credentials, LobbyParticipant, NewRoom, Registration, RoomCard, RoomRecord,
};
pub use error::{
    ArenaError, ChannelError, GatewayError, LobbyError, PresentationError, StorageError,
    ValueObjectError,
};
pub use event::{EventKind, RoomEvent};
pub use lobby::{DEFAULT_LOBBY_COUNTDOWN_SECS, LobbyRoom, WaitingLobby};
pub use notice::{Notice, NoticeVariant};
pub use port::{
    AuthGateway, CodeRunner, EventEmitter, LocalStorage, Presentation, RoomGateway,
    SolutionSubmitter, TOKEN_KEY, USER_ID_KEY, stored_participant,
};
pub use route::{Navigation, Route};
pub use transform::{UNKNOWN_HOST, host_of, transform_room};
pub use value_object::{Difficulty, ParticipantId, Platform, RoomCode, RoomId, RoomStatus};

#[cfg(test)]
pub use port::{
    MockAuthGateway, MockCodeRunner, MockEventEmitter, MockLocalStorage, MockPresentation,
    MockRoomGateway, MockSolutionSubmitter,
};
