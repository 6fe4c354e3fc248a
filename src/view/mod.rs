//! TUI rendering and the event loop (impure shell).

pub mod charts;
pub mod constants;
pub mod form;
mod help;
mod layout;
pub mod loading_indicator;
pub mod results;
mod styles;
pub mod tabs;
#[cfg(test)]
mod test_support;

pub use help::render_help_overlay;
pub use layout::render_layout;
pub use loading_indicator::LoadingIndicator;
pub use styles::{ColorConfig, Styles};

use crate::client::{ClientSettings, HttpSearchClient, SearchBackend, SearchDispatcher};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::AppError;
use crate::state::{
    handle_action, handle_form_key, AppState, Command, Completion, FocusPane, Notice,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Poll interval while a search is in flight (spinner frame rate).
const LOADING_TICK: Duration = Duration::from_millis(100);

/// Poll interval when idle.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    dispatcher: SearchDispatcher,
    styles: Styles,
    export_dir: PathBuf,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Builds the key bindings and HTTP client first so a bad config or TLS
    /// setup fails before the terminal enters raw mode, then sets up the
    /// alternate screen.
    pub fn new(config: &ResolvedConfig) -> Result<Self, TuiError> {
        let key_bindings =
            KeyBindings::with_overrides(&config.keybindings).map_err(AppError::from)?;
        let client =
            HttpSearchClient::new(ClientSettings::from(config)).map_err(AppError::from)?;
        let backend: Arc<dyn SearchBackend> = Arc::new(client);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::new_with(
            terminal,
            AppState::new(config.default_mode),
            key_bindings,
            SearchDispatcher::new(backend),
            Styles::with_color_config(ColorConfig::new(config.color)),
            config.export_dir.clone(),
        ))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Assemble an app from already-constructed parts.
    pub fn new_with(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        dispatcher: SearchDispatcher,
        styles: Styles,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            dispatcher,
            styles,
            export_dir,
        }
    }

    /// Current application state.
    pub fn state(&self) -> &AppState {
        &self.app_state
    }

    /// Mutable application state.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C).
    /// Redraws on key input, on arriving search outcomes, and on timer ticks
    /// while a search is loading (spinner animation).
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = if self.app_state.search.is_loading() {
                LOADING_TICK
            } else {
                IDLE_TICK
            };

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            } else {
                dirty |= self.app_state.tick();
            }

            dirty |= self.poll_outcomes();

            if dirty {
                self.draw()?;
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // Escape closes help overlay if visible (before key binding dispatch)
        if key.code == KeyCode::Esc && self.app_state.help_visible {
            self.app_state.help_visible = false;
            return false;
        }

        let command = if self.app_state.focus == FocusPane::Form && !self.app_state.help_visible {
            handle_form_key(&mut self.app_state, key)
        } else {
            match self.key_bindings.get(key) {
                Some(action) => handle_action(&mut self.app_state, action),
                None => Command::None,
            }
        };

        self.execute(command)
    }

    /// Perform the side effect a state transition requested.
    ///
    /// Returns true if app should quit
    fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::None => false,
            Command::Search(pending) => {
                debug!(
                    generation = pending.generation,
                    offset = pending.request.offset(),
                    "Handing search to dispatcher"
                );
                self.dispatcher.dispatch(pending);
                false
            }
            Command::Export => {
                self.export_selection();
                false
            }
            Command::Quit => true,
        }
    }

    fn export_selection(&mut self) {
        match self.app_state.search.export() {
            Ok(Some(artifact)) => match artifact.write_to(&self.export_dir) {
                Ok(path) => {
                    self.app_state.notice = Some(Notice::info(format!(
                        "Exported {} records to {}",
                        artifact.rows(),
                        path.display()
                    )));
                }
                Err(err) => {
                    warn!(error = %err, "Export failed");
                    self.app_state.notice = Some(Notice::error(err.to_string()));
                }
            },
            Ok(None) => debug!("Export requested with nothing selected"),
            Err(err) => {
                warn!(error = %err, "Export encoding failed");
                self.app_state.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    /// Apply every search outcome that has arrived.
    ///
    /// Returns whether anything was applied.
    pub fn poll_outcomes(&mut self) -> bool {
        let mut applied = false;
        for outcome in self.dispatcher.drain() {
            if self.app_state.complete(outcome.generation, outcome.result) == Completion::Applied {
                applied = true;
            }
        }
        applied
    }

    /// Render the current state.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal
            .draw(|frame| render_layout(frame, state, styles))?;
        Ok(())
    }

    /// Backend, for inspecting rendered output.
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
