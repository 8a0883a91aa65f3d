//! Terminal front-end.

mod input;
mod render;
mod runner;
mod screen;
pub mod state; // 画面から共有するため public

pub use runner::run;
