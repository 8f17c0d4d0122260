use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameSnapshot, Phase, Position};
use crate::metrics::GameMetrics;
use crate::scoring::{DEFAULT_TOP, Leaderboard, ScoreReceipt};

const LEADERBOARD_WIDTH: u16 = 32;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &GameSnapshot,
        metrics: &GameMetrics,
        leaderboard: &Leaderboard,
        receipt: Option<&ScoreReceipt>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board and leaderboard
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(LEADERBOARD_WIDTH)])
            .split(chunks[1]);

        if snapshot.phase == Phase::Ended {
            let game_over = self.render_game_over(snapshot, receipt);
            frame.render_widget(game_over, body[0]);
        } else {
            let grid = self.render_grid(snapshot);
            frame.render_widget(grid, body[0]);
        }

        let board = self.render_leaderboard(body[1], leaderboard, receipt);
        frame.render_widget(board, body[1]);

        let controls = self.render_controls(snapshot.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_height as usize);

        for y in 0..snapshot.grid_height as i32 {
            let mut spans = Vec::with_capacity(snapshot.grid_width as usize);

            for x in 0..snapshot.grid_width as i32 {
                let pos = Position::new(x, y);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match snapshot.phase {
            Phase::Ready => " Snake | press Enter to start ",
            Phase::Paused => " Paused ",
            Phase::Playing | Phase::Ended => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(match snapshot.phase {
                        Phase::Paused => Color::Yellow,
                        _ => Color::White,
                    }))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.length().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}/s", snapshot.moves_per_second()), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        snapshot: &GameSnapshot,
        receipt: Option<&ScoreReceipt>,
    ) -> Paragraph<'_> {
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
                Span::styled("    Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.length().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if let Some(receipt) = receipt {
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("Rank: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("#{}", receipt.rank),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            if receipt.is_new_record {
                text.push(Line::from(Span::styled(
                    format!("New personal best! (previous: {})", receipt.previous_best),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
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
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_leaderboard(
        &self,
        area: Rect,
        leaderboard: &Leaderboard,
        receipt: Option<&ScoreReceipt>,
    ) -> Paragraph<'_> {
        let highlight = receipt.map(|r| r.entry.id.as_str());
        let name_width = area.width.saturating_sub(14) as usize;

        let mut lines: Vec<Line> = leaderboard
            .top_entries(DEFAULT_TOP)
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if Some(entry.id.as_str()) == highlight {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let name: String = entry.player_name.chars().take(name_width).collect();
                Line::from(Span::styled(
                    format!("{:>2}. {:<name_width$} {:>6}", i + 1, name, entry.score),
                    style,
                ))
            })
            .collect();

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No scores yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Leaderboard "),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
        ];

        match phase {
            Phase::Ready => {
                spans.push(Span::styled("Enter", key));
                spans.push(Span::raw(" to start | "));
            }
            Phase::Playing => {
                spans.push(Span::styled("Space", key));
                spans.push(Span::raw(" to pause | "));
            }
            Phase::Paused => {
                spans.push(Span::styled("Space", key));
                spans.push(Span::raw(" to resume | "));
            }
            Phase::Ended => {}
        }

        spans.push(Span::styled("R", key));
        spans.push(Span::raw(" to restart | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
