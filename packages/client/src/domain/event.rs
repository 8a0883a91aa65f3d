//! Events pushed by the backend over the realtime channel.

use super::entity::RoomRecord;

/// Kind of inbound event, used to pick what a subscription receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RoomCreated,
    RoomUpdated,
}

impl EventKind {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::RoomCreated => "roomCreated",
            EventKind::RoomUpdated => "roomUpdated",
        }
    }
}

/// Room lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    Created(RoomRecord),
    Updated(RoomRecord),
}

impl RoomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RoomEvent::Created(_) => EventKind::RoomCreated,
            RoomEvent::Updated(_) => EventKind::RoomUpdated,
        }
    }

    pub fn record(&self) -> &RoomRecord {
        match self {
            RoomEvent::Created(record) | RoomEvent::Updated(record) => record,
        }
    }
}
