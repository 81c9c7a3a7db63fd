use rand::Rng;

use super::config::GameConfig;
use super::placement::{PlacementError, pick_free_cell};
use super::state::Position;

/// Static blocking cells; only grow during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Obstacles {
    cells: Vec<Position>,
}

impl Obstacles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Add obstacles on free cells until there are `target` of them
    ///
    /// `is_blocked` marks cells taken by the snake and the food; existing
    /// obstacles are skipped as well. Returns how many were added. If the
    /// board fills up midway the obstacles placed so far are kept.
    pub fn spawn_additional<R, F>(
        &mut self,
        target: usize,
        rng: &mut R,
        config: &GameConfig,
        is_blocked: F,
    ) -> Result<usize, PlacementError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let before = self.cells.len();
        while self.cells.len() < target {
            let pos = pick_free_cell(
                rng,
                config.grid_width,
                config.grid_height,
                config.max_placement_attempts,
                |p| is_blocked(p) || self.contains(p),
            )?;
            self.cells.push(pos);
        }
        Ok(self.cells.len() - before)
    }
}

impl FromIterator<Position> for Obstacles {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut obstacles = Obstacles::new();
        for pos in iter {
            if !obstacles.contains(pos) {
                obstacles.cells.push(pos);
            }
        }
        obstacles
    }
}
