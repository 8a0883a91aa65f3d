//! Gateways implementing the domain ports.

pub mod http;
pub mod simulated;

pub use http::{HttpGateway, OAuthProvider};
pub use simulated::{SampleCodeRunner, SimulatedSubmitter, TerminalPresentation};
