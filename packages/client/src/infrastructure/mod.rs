//! Infrastructure layer: adapters for HTTP, WebSocket, storage and time.

pub mod dto;
pub mod gateway;
pub mod realtime;
pub mod storage;
pub mod timer;

pub use gateway::{
    HttpGateway, OAuthProvider, SampleCodeRunner, SimulatedSubmitter, TerminalPresentation,
};
pub use realtime::{EventHub, RealtimeConnection, Subscription, derive_ws_url};
pub use storage::{FileStorage, MemoryStorage};
pub use timer::CountdownTimer;
