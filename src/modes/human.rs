use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;
use tracing::debug;

use crate::game::{GameEngine, GameOverReport, Phase, TickOutcome};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::persistence::ScoreWriter;
use crate::render::Renderer;
use crate::scheduler::TickScheduler;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    /// `None` keeps scores in memory only
    scores_path: Option<PathBuf>,
    writer: Option<ScoreWriter>,
    last_game: Option<GameOverReport>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, scores_path: Option<PathBuf>) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::default(),
            scores_path,
            writer: None,
            last_game: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        if let Some(writer) = self.writer.take() {
            writer.finish().await;
        }

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut scheduler = TickScheduler::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = scheduler.fired() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.engine,
                            &self.metrics,
                            self.last_game.as_ref(),
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Next tick is armed only once the previous one has finished
            if self.engine.phase() == Phase::Running {
                if !scheduler.is_scheduled() {
                    scheduler.schedule_in(self.engine.tick_interval());
                }
            } else {
                scheduler.cancel();
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => self.engine.request_direction(direction),
                    KeyAction::SelectDifficulty(index) => {
                        if self.engine.phase() != Phase::Running {
                            if let Some(name) =
                                self.engine.profiles().get(index).map(|p| p.name.clone())
                            {
                                self.start_game(&name)?;
                            }
                        }
                    }
                    KeyAction::Start => {
                        if self.engine.phase() != Phase::Running {
                            let name = self.engine.profile().name.clone();
                            self.start_game(&name)?;
                        }
                    }
                    KeyAction::Restart => {
                        self.engine.restart()?;
                        self.on_session_started();
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.swipe.handle_mouse_event(mouse) {
                    self.engine.request_direction(direction);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn start_game(&mut self, difficulty: &str) -> Result<()> {
        self.engine.start_session(difficulty)?;
        self.on_session_started();
        Ok(())
    }

    fn on_session_started(&mut self) {
        self.metrics.on_game_start();
        self.last_game = None;
    }

    fn update_game(&mut self) {
        match self.engine.tick() {
            TickOutcome::Advanced { info, .. } => self.metrics.on_tick(&info),
            TickOutcome::GameOver(report) => {
                self.metrics.on_game_over();
                self.persist_scores();
                self.last_game = Some(report);
            }
            TickOutcome::Idle => {}
        }
    }

    /// Hand the table to the background writer; the in-memory copy stays authoritative
    fn persist_scores(&mut self) {
        let Some(path) = &self.scores_path else {
            debug!("no scores file, high scores kept in memory");
            return;
        };
        let writer = self
            .writer
            .get_or_insert_with(|| ScoreWriter::spawn(path.clone()));
        writer.save(self.engine.high_score_table().clone());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
