//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// ParticipantId validation error
    #[error("ParticipantId cannot be empty")]
    ParticipantIdEmpty,

    /// ParticipantId too long error
    #[error("ParticipantId cannot exceed {max} characters (got {actual})")]
    ParticipantIdTooLong { max: usize, actual: usize },

    /// Unknown difficulty label
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Unknown room status label
    #[error("Unknown room status: {0}")]
    UnknownStatus(String),

    /// Unknown judge platform identifier
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

/// Errors returned by the backend gateway (REST)
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure or undecodable body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("API error: {message} (status: {status})")]
    Api { status: u16, message: String },

    /// 2xx response whose body reports failure
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Errors related to the realtime channel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The connection is gone, nothing can be emitted anymore
    #[error("Realtime connection is closed")]
    Closed,

    /// Outbound event could not be serialized
    #[error("Failed to encode event: {0}")]
    Encode(String),

    /// Connection could not be established
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },
}

/// Errors related to client-local storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to presentation capabilities (fullscreen)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresentationError {
    #[error("Fullscreen is not supported by this front-end")]
    Unsupported,

    #[error("Fullscreen request denied: {0}")]
    Denied(String),
}

/// Errors related to Waiting Lobby rules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LobbyError {
    /// Only the host may start early
    #[error("Only the host can start the battle")]
    NotHost,

    /// Someone is still not ready
    #[error("Waiting for {waiting} more participant(s) to be ready")]
    NotAllReady { waiting: usize },

    /// The battle already started (countdown ran out or host started it)
    #[error("The battle has already started")]
    AlreadyStarted,

    /// The viewer is not part of the roster
    #[error("Participant '{0}' is not in this room")]
    NotInRoster(String),
}

/// Errors related to Arena Session rules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// A run is already in flight
    #[error("Code is already running")]
    AlreadyRunning,

    /// A submission is already in flight
    #[error("Submission already in progress")]
    AlreadySubmitting,

    /// The session ended (submitted or disqualified)
    #[error("The arena session is over")]
    SessionOver,

    /// Disqualification confirmed without any anti-cheat incident
    #[error("No anti-cheat incident to confirm")]
    NoPendingIncident,
}
