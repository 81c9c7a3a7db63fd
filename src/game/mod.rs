//! Core game logic module for Snake
//!
//! Movement, collisions, food, obstacles and scoring, with no terminal I/O.
//! Randomness and wall time are injected through [`GameEngine::with_parts`]
//! so every rule can be driven deterministically.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod obstacles;
pub mod placement;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, Difficulty, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::{Food, FoodKind};
pub use obstacles::Obstacles;
pub use placement::PlacementError;
pub use state::{CollisionType, GameState, Position, Snake, Termination};
