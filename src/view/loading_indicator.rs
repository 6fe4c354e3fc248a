//! Loading indicator for the header.
//!
//! A braille spinner while a search is in flight, nothing otherwise.
//! The animation frame is owned by `AppState::loading_tick` and advanced
//! by the event loop timer.

use crate::state::SearchStatus;
use ratatui::{style::Style, text::Span};

/// Spinner animation frames.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Text shown after the spinner.
pub const LOADING_TEXT: &str = "Searching...";

/// Stateless spinner widget.
#[derive(Debug, Clone)]
pub struct LoadingIndicator<'a> {
    status: &'a SearchStatus,
    tick: usize,
    style: Style,
}

impl<'a> LoadingIndicator<'a> {
    /// Indicator for `status` at animation frame `tick`.
    pub fn new(status: &'a SearchStatus, tick: usize, style: Style) -> Self {
        Self {
            status,
            tick,
            style,
        }
    }

    /// Render as a span; empty unless loading.
    pub fn render(&self) -> Span<'static> {
        match self.status {
            SearchStatus::Loading { .. } => {
                let frame = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];
                Span::styled(format!("{frame} {LOADING_TEXT}"), self.style)
            }
            SearchStatus::Idle | SearchStatus::Success | SearchStatus::Failed { .. } => {
                Span::raw("")
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "loading_indicator_tests.rs"]
mod tests;
