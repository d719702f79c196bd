use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Cell, Heading};
use crate::metrics::GameMetrics;
use crate::session::{SessionSnapshot, SessionState};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &SessionSnapshot<'_>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Main area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Center the main area horizontally
        let main_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match snapshot.state {
            SessionState::Menu => self.render_menu(snapshot, metrics),
            SessionState::DifficultySelect => self.render_difficulty(snapshot),
            SessionState::ColorSelect => self.render_colors(snapshot),
            SessionState::Countdown => self.render_countdown(main_area, snapshot),
            SessionState::Playing => self.render_grid(snapshot),
            SessionState::GameOver => self.render_game_over(snapshot),
        };
        frame.render_widget(body, main_area);

        frame.render_widget(self.render_controls(snapshot.state), chunks[2]);
    }

    fn render_grid(&self, snapshot: &SessionSnapshot<'_>) -> Paragraph<'static> {
        let board = snapshot.board;
        let head = snapshot.snake.head();
        let color = snapshot.selected_color();
        let head_style = Style::default()
            .fg(rgb(color.secondary))
            .add_modifier(Modifier::BOLD);
        let body_style = Style::default().fg(rgb(color.primary));

        let mut lines = Vec::with_capacity(board.rows() as usize);

        for y in 0..board.rows() {
            let mut spans = Vec::with_capacity(board.columns() as usize);

            for x in 0..board.columns() {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled(head_glyph(snapshot.heading), head_style)
                } else if snapshot.snake.contains(cell) {
                    Span::styled("■ ", body_style)
                } else if cell == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
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
        snapshot: &SessionSnapshot<'_>,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Attempts: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", snapshot.attempts_remaining, snapshot.max_attempts),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(
        &self,
        snapshot: &SessionSnapshot<'_>,
        metrics: &GameMetrics,
    ) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Attempts remaining: {}",
                snapshot.attempts_remaining
            )),
            Line::from(format!(
                "Difficulty: {}    Color: {}",
                snapshot.selected_difficulty().name,
                snapshot.selected_color().name
            )),
            Line::from(""),
            key_hint("Enter", "play", Color::Green),
            key_hint("D", "difficulty", Color::Cyan),
            key_hint("C", "snake color", Color::Cyan),
            key_hint("Q", "quit", Color::Red),
        ];

        if snapshot.attempts_remaining == 0 {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                "No attempts left",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(last) = metrics.last_score {
            text.push(Line::from(""));
            text.push(Line::from(format!("Last score: {}", last)));
        }

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Menu "))
    }

    fn render_difficulty(&self, snapshot: &SessionSnapshot<'_>) -> Paragraph<'static> {
        let entries = snapshot
            .difficulties
            .iter()
            .map(|d| format!("{} ({} steps/s)", d.name, d.speed));
        self.render_selection(" Difficulty ", entries, snapshot.difficulty, Color::Yellow)
    }

    fn render_colors(&self, snapshot: &SessionSnapshot<'_>) -> Paragraph<'static> {
        let mut lines = vec![Line::from("")];
        for (i, color) in snapshot.colors.iter().enumerate() {
            let marker = if i == snapshot.color { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::raw(format!("{}{}. ", marker, i + 1)),
                Span::styled("■ ■ ■ ", Style::default().fg(rgb(color.primary))),
                Span::styled(color.name.clone(), Style::default().fg(rgb(color.secondary))),
            ]));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Snake color "))
    }

    fn render_selection(
        &self,
        title: &'static str,
        entries: impl Iterator<Item = String>,
        selected: usize,
        highlight: Color,
    ) -> Paragraph<'static> {
        let mut lines = vec![Line::from("")];
        for (i, entry) in entries.enumerate() {
            let line = format!("{}. {}", i + 1, entry);
            lines.push(if i == selected {
                Line::from(Span::styled(
                    format!("> {}", line),
                    Style::default().fg(highlight).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", line))
            });
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title))
    }

    fn render_countdown(&self, area: Rect, snapshot: &SessionSnapshot<'_>) -> Paragraph<'static> {
        let seconds = snapshot.countdown_remaining.unwrap_or(0);
        let padding = (area.height / 2).saturating_sub(2) as usize;

        let mut text = vec![Line::from(""); padding];
        text.push(Line::from(Span::styled(
            "Get ready!",
            Style::default().fg(Color::Yellow),
        )));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            format!("Starting in {}", seconds),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Snake "))
    }

    fn render_game_over(&self, snapshot: &SessionSnapshot<'_>) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!(
                "Attempts remaining: {}",
                snapshot.attempts_remaining
            )),
            Line::from(""),
        ];

        if snapshot.attempts_remaining > 0 {
            text.push(key_hint("R", "restart", Color::Green));
        } else {
            text.push(Line::from(Span::styled(
                "No attempts left",
                Style::default().fg(Color::Red),
            )));
        }
        text.push(key_hint("M", "menu", Color::Cyan));
        text.push(key_hint("Q", "quit", Color::Red));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: SessionState) -> Paragraph<'static> {
        let text = match state {
            SessionState::Countdown | SessionState::Playing => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" for menu"),
            ]),
            SessionState::DifficultySelect | SessionState::ColorSelect => Line::from(vec![
                Span::styled("1-9", Style::default().fg(Color::Cyan)),
                Span::raw(" to select | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to go back"),
            ]),
            SessionState::Menu | SessionState::GameOver => Line::from(vec![
                Span::styled("Ctrl+C", Style::default().fg(Color::Red)),
                Span::raw(" to quit at any time"),
            ]),
        };

        Paragraph::new(vec![text]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Right => "▶ ",
        Heading::Left => "◀ ",
        Heading::Up => "▲ ",
        Heading::Down => "▼ ",
    }
}

fn key_hint(key: &'static str, label: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            key,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}", label)),
    ])
}
