use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use terminal_snake::game::{
    Action, CollisionType, Difficulty, Direction, Food, GameConfig, GameEngine, GameState,
    ManualClock, Obstacles, Position, Snake, Termination,
};

fn engine(config: GameConfig, seed: u64) -> (GameEngine<StdRng>, ManualClock) {
    let clock = ManualClock::new();
    let engine = GameEngine::with_parts(config, StdRng::seed_from_u64(seed), Box::new(clock.clone()));
    (engine, clock)
}

fn fixed_obstacles(cells: &[(i32, i32)]) -> Obstacles {
    cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

#[test]
fn moving_right_from_the_centre() {
    let (mut engine, _) = engine(GameConfig::default(), 1);
    let mut state = engine.reset().unwrap();
    state.obstacles = Obstacles::new();
    state.food = Food::at(Position::new(0, 0));
    assert_eq!(state.snake.head(), Position::new(20, 10));

    let result = engine.step(&mut state, Action::Continue);

    assert!(!result.terminated);
    assert!(state.is_alive);
    assert_eq!(state.snake.head(), Position::new(21, 10));
    assert_eq!(state.snake.len(), 3);
    assert!(!state.snake.collides_with(Position::new(18, 10)));
}

#[test]
fn leaving_the_board_ends_the_run_without_moving() {
    let (mut engine, _) = engine(GameConfig::default(), 2);
    let mut state = GameState::new(
        Snake::new(Position::new(20, 0), Direction::Up, 3),
        Food::at(Position::new(5, 5)),
        Obstacles::new(),
        40,
        20,
        Difficulty::Easy,
    );
    let before = state.snake.clone();

    let result = engine.step(&mut state, Action::Continue);

    assert!(result.terminated);
    assert_eq!(
        state.termination,
        Some(Termination::Collision(CollisionType::Wall))
    );
    assert_eq!(state.snake, before);

    // further ticks do nothing
    let again = engine.step(&mut state, Action::Move(Direction::Left));
    assert!(again.terminated);
    assert_eq!(state.snake, before);
}

#[test]
fn eating_ordinary_food() {
    let (mut engine, _) = engine(GameConfig::default(), 3);
    let mut state = engine.reset().unwrap();
    state.obstacles = fixed_obstacles(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
    state.food = Food::at(Position::new(21, 10));

    let result = engine.step(&mut state, Action::Continue);

    assert!(result.info.ate_food);
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 4);
    assert_ne!(state.food.position, Position::new(21, 10));
    assert!(!state.snake.collides_with(state.food.position));
    assert!(!state.obstacles.contains(state.food.position));
}

#[test]
fn easy_milestones_add_one_obstacle_each() {
    let (mut engine, _) = engine(GameConfig::default(), 4);
    let mut state = engine.reset().unwrap();
    let obstacle_cells = [(0, 0), (39, 0), (0, 19), (39, 19)];
    state.obstacles = fixed_obstacles(&obstacle_cells);

    // five ordinary meals in a straight line: 10, 20, ..., 50
    let mut counts = Vec::new();
    for x in 21..=30 {
        state.food = Food::at(Position::new(x, 10));
        let result = engine.step(&mut state, Action::Continue);
        assert!(!result.terminated, "died at x = {x}");
        counts.push(state.obstacles.len());

        // only keep the obstacles the milestones added, off the path
        let mut cells: Vec<_> = state.obstacles.iter().copied().collect();
        for cell in cells.iter_mut() {
            if cell.y == 10 {
                cell.y = 11;
            }
        }
        state.obstacles = cells.into_iter().collect();
    }

    assert_eq!(state.score, 100);
    // crossing 50 (5th meal) adds one, crossing 100 (10th meal) adds one more
    assert_eq!(counts, vec![4, 4, 4, 4, 5, 5, 5, 5, 5, 6]);
    assert_eq!(state.last_milestone, 2);
}

#[test]
fn special_food_times_out_on_the_clock_not_on_ticks() {
    let config = GameConfig {
        special_food_chance: 0.0,
        ..GameConfig::default()
    };
    let (mut engine, clock) = engine(config, 5);
    let mut state = engine.reset().unwrap();
    state.obstacles = Obstacles::new();
    state.snake = Snake::new(Position::new(3, 10), Direction::Right, 3);
    state.food = Food::special_at(Position::new(0, 0), Duration::ZERO);

    // many ticks inside the lifetime leave it alone
    for _ in 0..30 {
        clock.advance(Duration::from_millis(100));
        let result = engine.step(&mut state, Action::Continue);
        assert!(!result.info.food_expired);
    }
    assert!(state.food.is_special());

    clock.set(Duration::from_millis(4_999));
    engine.step(&mut state, Action::Move(Direction::Down));
    assert!(state.food.is_special());

    clock.set(Duration::from_millis(5_000));
    let result = engine.step(&mut state, Action::Continue);
    assert!(result.info.food_expired);
    assert!(!state.food.is_special());
}

#[test]
fn random_play_keeps_invariants() {
    let config = GameConfig::new(12, 8).with_difficulty(Difficulty::Medium);
    let (mut engine, clock) = engine(config, 99);
    let mut driver = StdRng::seed_from_u64(2024);
    let mut state = engine.reset().unwrap();
    let mut runs = 0;

    for _ in 0..5_000 {
        let before_len = state.snake.len();
        let before_obstacles = state.obstacles.len();
        let before_score = state.score;

        let action = if driver.gen_bool(0.3) {
            Action::Move(*Direction::ALL.choose(&mut driver).unwrap())
        } else {
            Action::Continue
        };
        clock.advance(Duration::from_millis(250));
        let result = engine.step(&mut state, action);

        if result.terminated {
            runs += 1;
            state = engine.reset().unwrap();
            continue;
        }

        let expected_len = before_len + usize::from(result.info.ate_food);
        assert_eq!(state.snake.len(), expected_len);
        assert!(state.obstacles.len() >= before_obstacles);
        assert!(matches!(state.score - before_score, 0 | 10 | 30));

        let segments: HashSet<_> = state.snake.iter().copied().collect();
        assert_eq!(segments.len(), state.snake.len());
        assert!(state.snake.iter().all(|p| state.is_in_bounds(*p)));
        assert!(!state.snake.collides_with(state.food.position));
        assert!(!state.obstacles.contains(state.food.position));
        assert!(state.obstacles.iter().all(|p| !state.snake.collides_with(*p)));
        assert_eq!(state.last_milestone, state.score / 50);
    }

    assert!(runs > 0);
}
