use anyhow::{Context, Result, bail};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::game::{
    Action, Difficulty, Direction, GameConfig, GameEngine, GameState, MonotonicClock,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Turns typed ahead of the snake; further presses are dropped until a tick
/// consumes one
const MAX_PENDING_TURNS: usize = 3;

/// Interactive session: one difficulty, any number of runs, one high score
pub struct HumanMode {
    engine: GameEngine<StdRng>,
    /// `None` while the difficulty menu is up
    state: Option<GameState>,
    /// Difficulties whose obstacles fit on the configured board
    playable: Vec<Difficulty>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Turns pressed but not yet applied, oldest first
    pending_turns: VecDeque<Direction>,
}

impl HumanMode {
    /// Without a `difficulty` the session opens on the difficulty menu
    pub fn new(
        config: GameConfig,
        difficulty: Option<Difficulty>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let playable: Vec<Difficulty> = Difficulty::ALL
            .into_iter()
            .filter(|&d| config.clone().with_difficulty(d).validate().is_ok())
            .collect();
        if playable.is_empty() {
            bail!(
                "The {}x{} board is too small for any difficulty",
                config.grid_width,
                config.grid_height
            );
        }

        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let engine = GameEngine::with_parts(config, rng, Box::new(MonotonicClock::new()));

        let mut mode = Self {
            engine,
            state: None,
            playable,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_turns: VecDeque::with_capacity(MAX_PENDING_TURNS),
        };
        if let Some(difficulty) = difficulty {
            mode.start(difficulty)?;
        }
        Ok(mode)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even if the loop failed
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session closed"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = new_tick_timer(self.tick_interval());

        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }

                    // Difficulty may have just been picked
                    if tick_timer.period() != self.tick_interval() {
                        tick_timer = new_tick_timer(self.tick_interval());
                    }
                    if !self.should_quit {
                        self.draw(terminal)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if self.is_running() {
                        self.update_game();
                        self.metrics.update();
                    }
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn tick_interval(&self) -> Duration {
        self.engine.config().difficulty.tick_interval()
    }

    fn is_running(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.is_alive)
    }

    fn is_over(&self) -> bool {
        self.state.as_ref().is_some_and(|state| !state.is_alive)
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| match &self.state {
                None => self.renderer.render_difficulty_menu(frame, &self.playable),
                Some(state) => self.renderer.render(frame, state, &self.metrics),
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if self.is_running() && self.pending_turns.len() < MAX_PENDING_TURNS {
                    self.pending_turns.push_back(direction);
                }
            }
            KeyAction::SelectDifficulty(difficulty) => {
                if self.state.is_none() {
                    if self.playable.contains(&difficulty) {
                        self.start(difficulty)?;
                    } else {
                        warn!(%difficulty, "board too small for this difficulty");
                    }
                }
            }
            KeyAction::Restart => {
                if self.is_over() {
                    self.reset_game()?;
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(())
    }

    fn start(&mut self, difficulty: Difficulty) -> Result<()> {
        self.engine
            .config()
            .clone()
            .with_difficulty(difficulty)
            .validate()
            .with_context(|| format!("Configuration does not fit the {difficulty} difficulty"))?;
        self.engine.set_difficulty(difficulty);
        self.reset_game()
    }

    fn update_game(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let action = Action::from(self.pending_turns.pop_front());
        let result = self.engine.step(state, action);

        if result.terminated {
            let new_record = self.metrics.on_game_over(state.score);
            info!(
                score = state.score,
                high_score = self.metrics.high_score,
                new_record,
                "game over"
            );
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = Some(self.engine.reset().context("Failed to start a new run")?);
        self.metrics.on_game_start();
        self.pending_turns.clear();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Fixed-rate tick; a late tick shifts the schedule instead of bursting
fn new_tick_timer(period: Duration) -> Interval {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
