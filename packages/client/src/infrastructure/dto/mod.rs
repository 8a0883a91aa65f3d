//! Wire formats of the backend (REST and realtime).

pub mod http;
pub mod realtime;
