use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{
    FoodKind, GameEngine, GameOverCause, GameOverReport, GameState, Phase, Position, PowerUpKind,
    CollisionType,
};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &GameEngine,
        metrics: &GameMetrics,
        last_game: Option<&GameOverReport>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(engine, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match engine.phase() {
            Phase::Ready => self.render_menu(engine),
            Phase::Running => self.render_grid(engine.snapshot()),
            Phase::GameOver => self.render_game_over(engine, last_game),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(self.render_controls(engine.phase()), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let invincible = state.effects.is_invincible();
        let mut lines = Vec::with_capacity(state.grid.height);

        for y in 0..state.grid.height {
            let mut spans = Vec::with_capacity(state.grid.width);

            for x in 0..state.grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    let color = if invincible { Color::Magenta } else { Color::Cyan };
                    Span::styled(
                        "■ ",
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    let color = if invincible {
                        Color::LightMagenta
                    } else {
                        Color::Green
                    };
                    Span::styled("□ ", Style::default().fg(color))
                } else if state.obstacles.contains(&pos) {
                    Span::styled("█ ", Style::default().fg(Color::Gray))
                } else if pos == state.food.position {
                    match state.food.kind {
                        FoodKind::Normal => Span::styled(
                            "O ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        FoodKind::Bonus => Span::styled(
                            "$ ",
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                    }
                } else if let Some(power_up) = state.power_up.filter(|p| p.position == pos) {
                    Span::styled(
                        format!("{} ", power_up_glyph(power_up.kind)),
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
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

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let state = engine.snapshot();
        let difficulty = &engine.profile().name;
        let best = engine
            .high_scores(difficulty)
            .first()
            .map(u32::to_string)
            .unwrap_or_else(|| "-".to_string());

        let mut spans = vec![
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
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(difficulty.clone(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        for (kind, left) in state.effects.active() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("{} {:.1}s", kind.label(), left.as_secs_f32()),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_menu(&self, engine: &GameEngine) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (index, profile) in engine.profiles().iter().enumerate() {
            let selected = profile.name == engine.profile().name;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let best = engine
                .high_scores(&profile.name)
                .first()
                .map(|score| format!("best {}", score))
                .unwrap_or_else(|| "no scores yet".to_string());

            text.push(Line::from(vec![
                Span::styled(format!("{}{}. {:<8}", marker, index + 1, profile.name), style),
                Span::styled(
                    format!(" {:>4}ms  {}", profile.tick_interval_ms, best),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Pickups: ", Style::default().fg(Color::Yellow)),
            Span::raw(
                PowerUpKind::ALL
                    .iter()
                    .map(|kind| format!("{} {}", power_up_glyph(*kind), kind.label()))
                    .collect::<Vec<_>>()
                    .join("   "),
            ),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(
        &self,
        engine: &GameEngine,
        report: Option<&GameOverReport>,
    ) -> Paragraph<'_> {
        let state = engine.snapshot();
        let reason = match report.map(|r| r.cause) {
            Some(GameOverCause::Collision(CollisionType::Wall)) => "Hit the wall",
            Some(GameOverCause::Collision(CollisionType::SelfCollision)) => "Bit your own tail",
            Some(GameOverCause::Collision(CollisionType::Obstacle)) => "Crashed into a block",
            Some(GameOverCause::BoardFull) => "The board is full!",
            None => "",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(rank) = report.and_then(|r| r.rank) {
            text.push(Line::from(Span::styled(
                format!("New high score! #{}", rank),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        let difficulty = &engine.profile().name;
        text.push(Line::from(Span::styled(
            format!("Top scores ({})", difficulty),
            Style::default().fg(Color::Yellow),
        )));
        for (index, score) in engine.high_scores(difficulty).iter().enumerate() {
            let highlight = report.and_then(|r| r.rank) == Some(index + 1);
            let style = if highlight {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            text.push(Line::from(Span::styled(
                format!("{}. {}", index + 1, score),
                style,
            )));
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
            Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "1-9",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to change level or ", Style::default().fg(Color::Gray)),
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

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let text = match phase {
            Phase::Running => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" / "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" / drag to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
            Phase::Ready | Phase::GameOver => Line::from(vec![
                Span::styled("1-9", Style::default().fg(Color::Cyan)),
                Span::raw(" pick level | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn power_up_glyph(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::Speed => '»',
        PowerUpKind::BonusPoints => '+',
        PowerUpKind::Shrink => '-',
        PowerUpKind::Invincibility => '*',
    }
}
