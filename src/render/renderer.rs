use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::effects::ParticleSystem;
use crate::game::{Direction, GameState, Position};
use crate::metrics::SessionMetrics;
use crate::scores::ScoreLedger;

const HEAD_COLOR: Color = Color::Cyan;
const BODY_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Rgb(255, 0, 85);
const GRID_COLOR: Color = Color::DarkGray;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        particles: &ParticleSystem,
        ledger: &ScoreLedger,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

        let stats = self.render_stats(chunks[0], state, ledger, metrics);
        frame.render_widget(stats, chunks[0]);

        // Centre the playfield horizontally
        let game_area = Layout::horizontal([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(chunks[1])[1];

        if state.is_alive {
            let grid = self.render_grid(game_area, state, particles);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.render_game_over(game_area, state, ledger);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(
        &self,
        _area: Rect,
        state: &GameState,
        particles: &ParticleSystem,
    ) -> Paragraph<'_> {
        // One glyph per cell; where several particles share a cell the
        // largest wins.
        let mut sparks: HashMap<Position, (f32, (u8, u8, u8))> = HashMap::new();
        for (cell, size, color) in particles.cells() {
            let entry = sparks.entry(cell).or_insert((size, color));
            if size > entry.0 {
                *entry = (size, color);
            }
        }

        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if let Some(&(size, (r, g, b))) = sparks.get(&pos) {
                    Span::styled(spark_glyph(size), Style::default().fg(Color::Rgb(r, g, b)))
                } else if pos == state.snake.head() {
                    Span::styled(
                        head_glyph(state.snake.direction),
                        Style::default()
                            .fg(HEAD_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("■ ", Style::default().fg(BODY_COLOR))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Faint dot lattice in place of grid lines
                    Span::styled("· ", Style::default().fg(GRID_COLOR))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        state: &GameState,
        ledger: &ScoreLedger,
        metrics: &SessionMetrics,
    ) -> Paragraph<'_> {
        let best = ledger
            .best()
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(best, Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        ledger: &ScoreLedger,
    ) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("FINAL SCORE: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "TOP 3 SCORES",
                Style::default()
                    .fg(HEAD_COLOR)
                    .add_modifier(Modifier::BOLD),
            )]),
        ];

        for (rank, score) in ledger.scores().iter().enumerate() {
            text.push(Line::from(vec![Span::styled(
                format!("{}. {}", rank + 1, score),
                Style::default().fg(Color::White),
            )]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(HEAD_COLOR)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(HEAD_COLOR)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The head points where the snake is going.
fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

/// Heavier glyphs for larger sparks.
fn spark_glyph(size: f32) -> &'static str {
    if size >= 2.0 {
        "● "
    } else if size >= 1.0 {
        "• "
    } else {
        "· "
    }
}
