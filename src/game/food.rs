//! The single food item on the board

use std::time::Duration;

use rand::Rng;

use super::config::GameConfig;
use super::placement::{PlacementError, pick_free_cell};
use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Normal,
    /// Worth more, disappears after a while
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    /// Clock reading when this food was placed
    pub spawned_at: Duration,
}

impl Food {
    /// Ordinary food at a fixed cell
    pub fn at(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
            spawned_at: Duration::ZERO,
        }
    }

    /// Special food at a fixed cell, placed at `spawned_at`
    pub fn special_at(position: Position, spawned_at: Duration) -> Self {
        Self {
            position,
            kind: FoodKind::Special,
            spawned_at,
        }
    }

    pub fn is_special(&self) -> bool {
        self.kind == FoodKind::Special
    }

    pub fn is_at(&self, pos: Position) -> bool {
        self.position == pos
    }

    /// Move to a random cell where `is_blocked` is false
    ///
    /// The new food is special with `config.special_food_chance` unless
    /// `force_normal` is set. On error the food is left unchanged.
    pub fn spawn<R, F>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
        force_normal: bool,
        now: Duration,
        is_blocked: F,
    ) -> Result<(), PlacementError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let special =
            !force_normal && rng.gen_bool(config.special_food_chance.clamp(0.0, 1.0));
        let position = pick_free_cell(
            rng,
            config.grid_width,
            config.grid_height,
            config.max_placement_attempts,
            is_blocked,
        )?;

        self.position = position;
        self.kind = if special {
            FoodKind::Special
        } else {
            FoodKind::Normal
        };
        self.spawned_at = now;
        Ok(())
    }

    /// Special food whose lifetime has run out; ordinary food never expires
    pub fn is_expired(&self, now: Duration, lifetime: Duration) -> bool {
        self.is_special() && now.saturating_sub(self.spawned_at) >= lifetime
    }

    /// Points awarded for eating this food
    pub fn value(&self, config: &GameConfig) -> u32 {
        match self.kind {
            FoodKind::Normal => config.food_value,
            FoodKind::Special => config.special_food_value,
        }
    }
}
