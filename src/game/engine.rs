use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info, warn};

use super::{
    action::Action,
    clock::{Clock, MonotonicClock},
    config::{Difficulty, GameConfig},
    food::Food,
    obstacles::Obstacles,
    placement::PlacementError,
    state::{CollisionType, GameState, Position, Snake, Termination},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Points gained this step
    pub points: u32,
    /// Whether special food timed out and was replaced
    pub food_expired: bool,
    /// Obstacles added by a milestone this step
    pub obstacles_added: usize,
    /// Why the run ended, if it ended this step
    pub termination: Option<Termination>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn running(info: StepInfo) -> Self {
        Self {
            terminated: false,
            info,
        }
    }

    fn ended(termination: Option<Termination>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                termination,
                ..Default::default()
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
    clock: Box<dyn Clock>,
}

impl GameEngine<ThreadRng> {
    /// Engine with thread-local randomness and the real monotonic clock
    pub fn new(config: GameConfig) -> Self {
        Self::with_parts(config, rand::thread_rng(), Box::new(MonotonicClock::new()))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Engine with an explicit random source and clock
    pub fn with_parts(config: GameConfig, rng: R, clock: Box<dyn Clock>) -> Self {
        Self { config, rng, clock }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Takes effect on the next [`reset`](Self::reset)
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    /// Start a new run: centred snake, fresh obstacles and food, zero score
    pub fn reset(&mut self) -> Result<GameState, PlacementError> {
        let config = &self.config;
        let snake = Snake::starting(
            config.grid_width,
            config.grid_height,
            config.initial_snake_length,
        );

        let mut obstacles = Obstacles::new();
        obstacles.spawn_additional(
            config.difficulty.initial_obstacles(),
            &mut self.rng,
            config,
            |pos| snake.collides_with(pos),
        )?;

        let mut food = Food::at(snake.head());
        food.spawn(
            &mut self.rng,
            config,
            false,
            self.clock.now(),
            |pos| snake.collides_with(pos) || obstacles.contains(pos),
        )?;

        info!(
            difficulty = %config.difficulty,
            obstacles = obstacles.len(),
            "new run"
        );

        Ok(GameState::new(
            snake,
            food,
            obstacles,
            config.grid_width,
            config.grid_height,
            config.difficulty,
        ))
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult::ended(state.termination);
        }

        if let Action::Move(direction) = action {
            state.snake.set_direction(direction);
        }

        let next_head = state.snake.next_head();

        if let Some(collision) = self.check_collision(state, next_head) {
            return self.finish(state, Termination::Collision(collision));
        }

        let mut info = StepInfo::default();
        let now = self.clock.now();

        let grow = state.food.is_at(next_head);
        if grow {
            info.ate_food = true;
            info.points = state.food.value(&self.config);
            state.score += info.points;
            if let Err(err) = self.respawn_food(state, next_head, false, now) {
                return self.board_full(state, err);
            }
        }

        if state
            .food
            .is_expired(now, self.config.special_food_lifetime())
        {
            debug!(position = ?state.food.position, "special food expired");
            info.food_expired = true;
            if let Err(err) = self.respawn_food(state, next_head, true, now) {
                return self.board_full(state, err);
            }
        }

        if !state.snake.advance(grow) {
            return self.finish(state, Termination::Collision(CollisionType::SelfCollision));
        }

        match self.escalate_obstacles(state) {
            Ok(added) => info.obstacles_added = added,
            Err(err) => return self.board_full(state, err),
        }

        state.steps += 1;
        StepResult::running(info)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so it still counts
        if state.snake.collides_with(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if state.obstacles.contains(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Replace the food, avoiding the snake, the obstacles and the cell the
    /// head is about to enter
    fn respawn_food(
        &mut self,
        state: &mut GameState,
        next_head: Position,
        force_normal: bool,
        now: std::time::Duration,
    ) -> Result<(), PlacementError> {
        let GameState {
            snake,
            food,
            obstacles,
            ..
        } = &mut *state;
        food.spawn(&mut self.rng, &self.config, force_normal, now, |pos| {
            pos == next_head || snake.collides_with(pos) || obstacles.contains(pos)
        })?;
        debug!(position = ?food.position, special = food.is_special(), "food spawned");
        Ok(())
    }

    /// Grow the obstacle set once per newly reached score milestone
    fn escalate_obstacles(&mut self, state: &mut GameState) -> Result<usize, PlacementError> {
        let milestone = state
            .score
            .checked_div(self.config.milestone_step)
            .unwrap_or(0);
        if milestone <= state.last_milestone {
            return Ok(0);
        }
        state.last_milestone = milestone;

        let target = state.obstacles.len() + state.difficulty.obstacle_increment();
        let GameState {
            snake,
            food,
            obstacles,
            ..
        } = &mut *state;
        let added = obstacles.spawn_additional(target, &mut self.rng, &self.config, |pos| {
            snake.collides_with(pos) || food.is_at(pos)
        })?;

        info!(
            milestone,
            score = state.score,
            obstacles = state.obstacles.len(),
            "milestone reached"
        );
        Ok(added)
    }

    fn finish(&self, state: &mut GameState, termination: Termination) -> StepResult {
        state.terminate(termination);
        state.steps += 1;
        info!(score = state.score, steps = state.steps, ?termination, "run over");
        StepResult::ended(Some(termination))
    }

    fn board_full(&self, state: &mut GameState, err: PlacementError) -> StepResult {
        warn!(%err, "board saturated");
        self.finish(state, Termination::BoardFull)
    }
}
