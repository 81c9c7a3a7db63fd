use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Difficulty picked once at session start
///
/// Fixes the tick interval, the obstacle count after a reset and how many
/// obstacles each score milestone adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Real-time budget of one tick
    pub fn tick_interval(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(100),
            Self::Hard => Duration::from_millis(80),
        }
    }

    /// Obstacles placed by a reset
    pub fn initial_obstacles(self) -> usize {
        match self {
            Self::Easy => 4,
            Self::Medium => 6,
            Self::Hard => 12,
        }
    }

    /// Obstacles added each time the score crosses a milestone
    pub fn obstacle_increment(self) -> usize {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Menu shortcut: '1', '2' or '3'
    pub fn from_menu_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Easy),
            '2' => Some(Self::Medium),
            '3' => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Snake length after a reset
    pub initial_snake_length: usize,
    pub difficulty: Difficulty,

    /// Points for ordinary food
    pub food_value: u32,
    /// Points for special food
    pub special_food_value: u32,
    /// Probability that a freshly spawned food is special
    pub special_food_chance: f64,
    /// How long special food stays on the board, in milliseconds
    pub special_food_lifetime_ms: u64,

    /// Score interval between obstacle escalations
    pub milestone_step: u32,
    /// Random draws tried before placement falls back to scanning free cells
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 20,
            initial_snake_length: 3,
            difficulty: Difficulty::Easy,
            food_value: 10,
            special_food_value: 30,
            special_food_chance: 0.15,
            special_food_lifetime_ms: 5_000,
            milestone_step: 50,
            max_placement_attempts: 1_000,
        }
    }
}

impl GameConfig {
    /// Default rules on a custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Small grid used by tests
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn special_food_lifetime(&self) -> Duration {
        Duration::from_millis(self.special_food_lifetime_ms)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Load a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations a reset could not satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_snake_length < 3 {
            return Err(ConfigError::Invalid(format!(
                "initial_snake_length must be at least 3, got {}",
                self.initial_snake_length
            )));
        }
        if self.grid_height == 0 || self.grid_width / 2 + 1 < self.initial_snake_length {
            return Err(ConfigError::Invalid(format!(
                "a {}x{} grid cannot hold a snake of length {} starting at its centre",
                self.grid_width, self.grid_height, self.initial_snake_length
            )));
        }
        // snake + obstacles + food, with at least one cell left to move into
        let needed = self.initial_snake_length + self.difficulty.initial_obstacles() + 2;
        if self.cell_count() < needed {
            return Err(ConfigError::Invalid(format!(
                "grid has {} cells, {} difficulty needs at least {}",
                self.cell_count(),
                self.difficulty,
                needed
            )));
        }
        if !(0.0..=1.0).contains(&self.special_food_chance) {
            return Err(ConfigError::Invalid(format!(
                "special_food_chance must be within [0, 1], got {}",
                self.special_food_chance
            )));
        }
        if self.milestone_step == 0 {
            return Err(ConfigError::Invalid("milestone_step must be positive".into()));
        }
        Ok(())
    }
}
