use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Difficulty, GameState, Position};
use crate::metrics::GameMetrics;

/// What occupies one board cell, in drawing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
    SnakeHead,
    SnakeBody,
    Food,
    SpecialFood,
}

impl Cell {
    pub fn at(state: &GameState, pos: Position) -> Cell {
        if state.food.is_at(pos) {
            if state.food.is_special() {
                Cell::SpecialFood
            } else {
                Cell::Food
            }
        } else if pos == state.snake.head() {
            Cell::SnakeHead
        } else if state.snake.collides_with(pos) {
            Cell::SnakeBody
        } else if state.obstacles.contains(pos) {
            Cell::Obstacle
        } else {
            Cell::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            Cell::Empty => Span::raw("  "),
            Cell::Obstacle => Span::styled("# ", Style::default().fg(Color::DarkGray)),
            Cell::SnakeHead => Span::styled(
                "O ",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::SnakeBody => Span::styled("o ", Style::default().fg(Color::Green)),
            Cell::Food => Span::styled(
                "* ",
                Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
            ),
            Cell::SpecialFood => Span::styled(
                "@ ",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Draws game state; never mutates it
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // HUD
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_hud(state, metrics), chunks[0]);

        if state.is_alive {
            frame.render_widget(self.render_grid(state), chunks[1]);
        } else {
            frame.render_widget(self.render_game_over(state, metrics), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Start screen listing the difficulty choices; those missing from
    /// `playable` are shown dimmed and cannot be picked
    pub fn render_difficulty_menu(&self, frame: &mut Frame, playable: &[Difficulty]) {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select Difficulty",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
            let line = if playable.contains(difficulty) {
                Line::from(vec![
                    Span::styled(
                        format!("{}. ", index + 1),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(difficulty.label()),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{}. {} (board too small)", index + 1, difficulty.label()),
                    Style::default().fg(Color::DarkGray),
                ))
            };
            text.push(line);
        }

        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Choose (1-3), Q to quit",
            Style::default().fg(Color::Gray),
        )));

        let widget = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Snake "),
        );
        frame.render_widget(widget, frame.area());
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..state.grid_height)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid_width)
                    .map(|x| Cell::at(state, Position::new(x as i32, y as i32)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Plain)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_hud(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let high_score = metrics.high_score.max(if state.is_alive { 0 } else { state.score });
        let text = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::LightCyan)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::LightRed)),
            Span::styled(high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::LightGreen)),
            Span::styled(state.difficulty.label(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let bold_white = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from("Better luck next time."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.score.to_string(), bold_white),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.max(state.score).to_string(), bold_white),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("@", Style::default().fg(Color::LightYellow)),
            Span::raw(" = 30 pts for 5s | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
