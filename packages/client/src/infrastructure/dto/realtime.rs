//! Realtime channel DTOs.
//!
//! Every frame is a JSON text message `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::domain::{CheatReport, RoomEvent, RoomRecord};

/// Envelope used to peek at the event name before decoding the payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Events pushed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "roomCreated")]
    RoomCreated(RoomRecord),
    #[serde(rename = "roomUpdated")]
    RoomUpdated(RoomRecord),
}

impl From<ServerEvent> for RoomEvent {
    fn from(value: ServerEvent) -> Self {
        match value {
            ServerEvent::RoomCreated(record) => RoomEvent::Created(record),
            ServerEvent::RoomUpdated(record) => RoomEvent::Updated(record),
        }
    }
}

impl From<RoomEvent> for ServerEvent {
    fn from(value: RoomEvent) -> Self {
        match value {
            RoomEvent::Created(record) => ServerEvent::RoomCreated(record),
            RoomEvent::Updated(record) => ServerEvent::RoomUpdated(record),
        }
    }
}

/// Events sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "cheat-detected")]
    CheatDetected(CheatReport),
}

/// Decode an inbound text frame.
///
/// Events the client does not know are `Ok(None)`; a known event with a
/// malformed payload is an error.
pub fn decode_server_event(text: &str) -> Result<Option<RoomEvent>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(text)?;
    match envelope.event.as_str() {
        "roomCreated" | "roomUpdated" => {
            let event: ServerEvent = serde_json::from_str(text)?;
            Ok(Some(event.into()))
        }
        _ => Ok(None),
    }
}

pub fn encode_client_event(event: &ClientEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}
