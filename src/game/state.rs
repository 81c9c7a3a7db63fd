use std::collections::VecDeque;

use super::action::Direction;
use super::config::Difficulty;
use super::food::Food;
use super::obstacles::Obstacles;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Inside `[0, width) x [0, height)`
    pub fn in_bounds(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Heading used by the next move
    pub direction: Direction,
}

impl Snake {
    /// Straight snake with its head at `head`, body trailing behind it
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |pos| Some(pos.moved_in_direction(back)))
            .take(length)
            .collect();

        Self { body, direction }
    }

    /// Starting snake for a grid: head on the centre cell, heading right
    pub fn starting(grid_width: usize, grid_height: usize, length: usize) -> Self {
        let head = Position::new((grid_width / 2) as i32, (grid_height / 2) as i32);
        Self::new(head, Direction::Right, length)
    }

    pub fn reset(&mut self, grid_width: usize, grid_height: usize, length: usize) {
        *self = Self::starting(grid_width, grid_height, length);
    }

    /// Change heading; a 180-degree reversal is silently ignored
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Cell the head moves into on the next advance
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// True if any segment, head or tail included, sits on `pos`
    pub fn collides_with(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Step one cell along the heading
    ///
    /// Returns false and leaves the body untouched if the new head would land
    /// on a segment. The tail is dropped unless `grow` is set.
    pub fn advance(&mut self, grow: bool) -> bool {
        let new_head = self.next_head();
        if self.collides_with(new_head) {
            return false;
        }

        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle
    Obstacle,
}

/// Why a run is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Collision(CollisionType),
    /// No free cell was left to place food or obstacles on
    BoardFull,
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Obstacles,
    pub grid_width: usize,
    pub grid_height: usize,
    pub difficulty: Difficulty,
    pub score: u32,
    /// Ticks simulated so far
    pub steps: u32,
    pub is_alive: bool,
    pub termination: Option<Termination>,
    /// Highest `score / milestone_step` already rewarded with obstacles
    pub last_milestone: u32,
}

impl GameState {
    pub fn new(
        snake: Snake,
        food: Food,
        obstacles: Obstacles,
        grid_width: usize,
        grid_height: usize,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            snake,
            food,
            obstacles,
            grid_width,
            grid_height,
            difficulty,
            score: 0,
            steps: 0,
            is_alive: true,
            termination: None,
            last_milestone: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.grid_width, self.grid_height)
    }

    pub fn terminate(&mut self, termination: Termination) {
        self.is_alive = false;
        self.termination = Some(termination);
    }
}
