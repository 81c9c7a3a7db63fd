//! Picking free cells for food and obstacles

use rand::Rng;
use rand::seq::IteratorRandom;
use thiserror::Error;

use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free cell left on the {width}x{height} board")]
    BoardFull { width: usize, height: usize },
}

/// Pick a uniformly random cell for which `is_blocked` is false
///
/// Rejection sampling is tried `max_attempts` times; after that every free
/// cell is enumerated, so a crowded board still terminates and a full one
/// reports [`PlacementError::BoardFull`].
pub fn pick_free_cell<R, F>(
    rng: &mut R,
    width: usize,
    height: usize,
    max_attempts: usize,
    is_blocked: F,
) -> Result<Position, PlacementError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let full = PlacementError::BoardFull { width, height };
    if width == 0 || height == 0 {
        return Err(full);
    }

    for _ in 0..max_attempts {
        let pos = Position::new(
            rng.gen_range(0..width) as i32,
            rng.gen_range(0..height) as i32,
        );
        if !is_blocked(pos) {
            return Ok(pos);
        }
    }

    (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
        .filter(|&pos| !is_blocked(pos))
        .choose(rng)
        .ok_or(full)
}
