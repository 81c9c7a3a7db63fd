//! Terminal Snake
//!
//! - `game`: rules engine and state model
//! - `input`: key events to game intents
//! - `render`: ratatui drawing of the board and HUD
//! - `metrics`: per-process session record (high score, timer)
//! - `modes`: the interactive terminal session

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
