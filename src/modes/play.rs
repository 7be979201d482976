use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::interval;

use crate::effects::ParticleSystem;
use crate::game::{Command, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;
use crate::scores::{FileStore, ScoreLedger};

/// The interactive game: owns every piece of mutable state and drives
/// the update/render cycle from a single task.
pub struct PlayMode {
    config: GameConfig,
    engine: GameEngine,
    state: GameState,
    particles: ParticleSystem,
    ledger: ScoreLedger,
    store: FileStore,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_turn: Option<Direction>,
}

impl PlayMode {
    pub fn new(config: GameConfig, mut store: FileStore) -> Self {
        // The daily reset check runs here, once per launch.
        let ledger = ScoreLedger::load(&mut store, Local::now());

        let mut engine = GameEngine::new(config.clone());
        let state = engine.reset();
        let particles = ParticleSystem::new(config.cell_size, config.particles_per_burst);

        Self {
            config,
            engine,
            state,
            particles,
            ledger,
            store,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_turn: None,
        }
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Two independent clocks: the simulation advances at tick rate,
        // frames are drawn at frame rate whether or not the game moved.
        let mut tick_timer = interval(self.config.tick_interval());
        let mut render_timer = interval(self.config.frame_interval());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation tick; frozen after game-over until restart
                _ = tick_timer.tick() => {
                    if self.state.is_alive {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.particles.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.particles,
                            &self.ledger,
                            &self.metrics,
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
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    // One accepted change per tick; reversals never latch.
                    if self.state.is_alive
                        && self.pending_turn.is_none()
                        && !self.state.snake.direction.is_opposite(direction)
                    {
                        self.pending_turn = Some(direction);
                    }
                }
                KeyAction::Restart => {
                    if !self.state.is_alive {
                        self.restart();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let command = self
            .pending_turn
            .take()
            .map(Command::Turn)
            .unwrap_or(Command::Continue);

        let result = self.engine.step(&mut self.state, command);

        if result.info.ate_food {
            // The new head sits on the cell the food occupied.
            self.particles.burst(self.state.snake.head());
        }

        if result.terminated && !self.state.is_alive {
            self.metrics.on_game_over(self.state.score);
            // Persistence failures stay invisible; the run is over either way.
            let _ = self.ledger.record(self.state.score, &mut self.store);
        }
    }

    fn restart(&mut self) {
        self.state = self.engine.reset();
        self.particles.clear();
        self.pending_turn = None;
        self.metrics.on_game_start();
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
