use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future;
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};

use crate::game::{Command, GameEngine, GamePhase, GameSession, TickScheduler};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::prefs::{PreferenceStore, Preferences};
use crate::render::{Renderer, Theme, ThemeMode};

/// How long the colorblind toggle notice stays on screen
const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Keyboard-driven game in the terminal.
///
/// Input, ticks and drawing all happen on one task: each `select!` arm runs
/// to completion before the next is polled, so a key press is always applied
/// between two ticks and every frame sees a settled state.
pub struct HumanMode {
    session: GameSession,
    scheduler: TickScheduler,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    prefs_store: PreferenceStore,
    prefs: Preferences,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        engine: GameEngine,
        prefs_store: PreferenceStore,
        theme_mode: ThemeMode,
    ) -> Result<Self> {
        let session = GameSession::new(engine).context("Failed to start game")?;
        let prefs = prefs_store.load();

        let mut scheduler = TickScheduler::new();
        scheduler.start(session.tick_interval());

        Ok(Self {
            session,
            scheduler,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(Theme::new(theme_mode, prefs.colorblind)),
            input_handler: InputHandler::new(),
            prefs_store,
            prefs,
            should_quit: false,
        })
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

        loop {
            self.metrics.update();
            let snapshot = self.session.snapshot();
            terminal
                .draw(|frame| self.renderer.render(frame, &snapshot, &self.metrics))
                .context("Failed to draw frame")?;

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, re-armed with the speed the game has now
                _ = self.scheduler.wait() => {
                    self.on_tick()?;
                }

                // Redraw once a notice has run out
                _ = notice_expiry(self.renderer.notice_deadline()) => {}

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.apply_command(command)?,
                KeyAction::ToggleColorblind => self.toggle_colorblind(),
                KeyAction::ToggleTheme => {
                    let mut theme = self.renderer.theme();
                    theme.mode = theme.mode.toggled();
                    self.renderer.set_theme(theme);
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn apply_command(&mut self, command: Command) -> Result<()> {
        let applied = self.session.apply(command)?;

        // A restart is the only way back from a stopped timer
        if applied && command == Command::Restart {
            self.scheduler.start(self.session.tick_interval());
        }

        self.pump_events();
        Ok(())
    }

    fn on_tick(&mut self) -> Result<()> {
        self.session.tick()?;
        self.scheduler
            .reschedule(self.session.phase(), self.session.tick_interval());
        self.pump_events();
        Ok(())
    }

    fn pump_events(&mut self) {
        for event in self.session.drain_events() {
            self.metrics.observe(&event);
        }
    }

    fn toggle_colorblind(&mut self) {
        self.prefs.colorblind = !self.prefs.colorblind;
        let mut theme = self.renderer.theme();
        theme.colorblind = self.prefs.colorblind;
        self.renderer.set_theme(theme);

        let state = if self.prefs.colorblind { "on" } else { "off" };
        info!("colorblind mode {}", state);
        self.renderer
            .show_notice(format!("Colorblind mode {state}"), NOTICE_DURATION);
        if let Err(e) = self.prefs_store.save(&self.prefs) {
            error!("{:#}", e);
        }
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

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }
}

async fn notice_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => future::pending().await,
    }
}
