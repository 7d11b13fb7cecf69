use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::{Palette, Theme};
use crate::game::{CollisionType, GamePhase, Position, Snapshot};
use crate::metrics::GameMetrics;

const CELL_WIDTH: u16 = 2;

/// A short message drawn over the grid until `until`
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    until: Instant,
}

pub struct Renderer {
    theme: Theme,
    notice: Option<Notice>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            notice: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Show `text` over the grid for `duration`, replacing any earlier notice
    pub fn show_notice(&mut self, text: impl Into<String>, duration: Duration) {
        self.notice = Some(Notice {
            text: text.into(),
            until: Instant::now() + duration,
        });
    }

    /// The notice text, if it has not expired yet
    pub fn active_notice(&self) -> Option<&str> {
        self.active_notice_at(Instant::now())
    }

    fn active_notice_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| now < notice.until)
            .map(|notice| notice.text.as_str())
    }

    /// When the current notice disappears; the frame needs a redraw then
    pub fn notice_deadline(&self) -> Option<Instant> {
        self.notice
            .as_ref()
            .map(|notice| notice.until)
            .filter(|until| Instant::now() < *until)
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let palette = self.theme.palette();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics, &palette);
        frame.render_widget(stats, chunks[0]);

        // Grid plus its border, centred in the game area
        let side = u16::try_from(snapshot.grid_size).unwrap_or(u16::MAX);
        let game_area = centered_rect(
            side.saturating_mul(CELL_WIDTH).saturating_add(2),
            side.saturating_add(2),
            chunks[1],
        );

        match snapshot.phase {
            GamePhase::Running => {
                frame.render_widget(self.render_grid(snapshot, game_area, &palette), game_area);
            }
            GamePhase::Paused => {
                frame.render_widget(self.render_grid(snapshot, game_area, &palette), game_area);
                let popup = centered_rect(24, 5, game_area);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_paused(&palette), popup);
            }
            GamePhase::GameOver => {
                frame.render_widget(self.render_game_over(snapshot, metrics, &palette), game_area);
            }
        }

        if let Some(text) = self.active_notice() {
            let width = u16::try_from(text.chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(4);
            let mut popup = centered_rect(width, 3, game_area);
            popup.y = game_area.bottom().saturating_sub(popup.height);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_notice(text, &palette), popup);
        }

        let controls = self.render_controls(&palette);
        frame.render_widget(controls, chunks[2]);
    }

    /// Only the cells that fit inside `area` are built
    fn render_grid(&self, snapshot: &Snapshot, area: Rect, palette: &Palette) -> Paragraph<'_> {
        let head = snapshot.head();
        let (cols, rows) = visible_extent(snapshot.grid_size, area);
        let mut lines = Vec::with_capacity(rows);

        for y in 0..rows {
            let mut spans = Vec::with_capacity(cols);

            for x in 0..cols {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(palette.snake_head)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(palette.snake_body))
                } else if pos == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default()
                            .fg(palette.food)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.obstacles.contains(&pos) {
                    Span::styled("# ", Style::default().fg(palette.obstacle))
                } else {
                    Span::styled(". ", Style::default().fg(palette.empty))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(palette.border))
                .style(Style::default().bg(palette.background))
                .title(" Snake "),
        )
    }

    fn render_stats(
        &self,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        palette: &Palette,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(palette.label);
        let value = Style::default().fg(palette.text);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(snapshot.level().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self, palette: &Palette) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(palette.label)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(palette.text),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.label))
                .style(Style::default().bg(palette.background)),
        )
    }

    fn render_game_over(
        &self,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
        palette: &Palette,
    ) -> Paragraph<'_> {
        let cause = match snapshot.collision {
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            Some(CollisionType::Obstacle) => "You hit an obstacle",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default()
                    .fg(palette.food)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(palette.text))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(palette.label)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Food eaten: ", Style::default().fg(palette.label)),
                Span::styled(
                    metrics.food_eaten.to_string(),
                    Style::default().fg(palette.text),
                ),
                Span::raw("   "),
                Span::styled("Moves: ", Style::default().fg(palette.label)),
                Span::styled(snapshot.ticks.to_string(), Style::default().fg(palette.text)),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(palette.label)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(palette.text),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(palette.empty)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(palette.snake_body)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(palette.empty)),
                Span::styled(
                    "Q",
                    Style::default()
                        .fg(palette.food)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(palette.empty)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.food))
                .style(Style::default().bg(palette.background)),
        )
    }

    fn render_notice<'a>(&self, text: &'a str, palette: &Palette) -> Paragraph<'a> {
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(palette.label)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.label))
                .style(Style::default().bg(palette.background)),
        )
    }

    fn render_controls(&self, palette: &Palette) -> Paragraph<'_> {
        let key = Style::default().fg(palette.snake_head);
        let colorblind = if self.theme.colorblind { "on" } else { "off" };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" move | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("T", key),
            Span::raw(" theme | "),
            Span::styled("C", key),
            Span::raw(format!(" colorblind ({colorblind}) | ")),
            Span::styled("Q", Style::default().fg(palette.food)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Columns and rows of the grid that fit inside the bordered `area`
fn visible_extent(grid_size: usize, area: Rect) -> (usize, usize) {
    let cols = usize::from(area.width.saturating_sub(2) / CELL_WIDTH);
    let rows = usize::from(area.height.saturating_sub(2));
    (grid_size.min(cols), grid_size.min(rows))
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
