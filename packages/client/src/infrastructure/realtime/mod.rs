//! Realtime channel: WebSocket transport and in-process event fan-out.

pub mod connection;
pub mod hub;

pub use connection::{RealtimeConnection, derive_ws_url};
pub use hub::{EventHub, Subscription, SubscriptionGuard};
