//! CodeArena client library.
//!
//! Headless room lifecycle (directory, lobby, arena with anti-cheat) plus a
//! terminal front-end that drives it against the CodeArena backend.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use ui::run as run_client;
