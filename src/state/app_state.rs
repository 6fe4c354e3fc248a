//! Application state (pure).
//!
//! AppState is the single source of truth for the TUI. It wraps the
//! [`SearchOrchestrator`] (domain lifecycle) with presentation state:
//! which pane has focus, cursors, the active chart and transient notices.

use crate::charts::ChartKind;
use crate::client::SearchResponse;
use crate::model::{FormField, HitId, SearchError, SearchMode};
use crate::state::{Completion, PendingSearch, SearchOrchestrator};

// ===== Command =====

/// Side effect requested by a pure state transition.
///
/// The event loop executes commands; state handlers never do I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do.
    None,
    /// Send this search to the backend.
    Search(PendingSearch),
    /// Encode the selection and write it to the export directory.
    Export,
    /// Leave the application.
    Quit,
}

impl From<Option<PendingSearch>> for Command {
    fn from(pending: Option<PendingSearch>) -> Self {
        pending.map_or(Command::None, Command::Search)
    }
}

// ===== FocusPane =====

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Search form. Keystrokes are text input.
    #[default]
    Form,
    /// Results table, or the charts in aggregation mode.
    Results,
}

// ===== Notice =====

/// Severity of a status-bar notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation (export written).
    Info,
    /// Something went wrong outside the search lifecycle.
    Error,
}

/// One-line message shown in the status bar until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text.
    pub text: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

// ===== AppState =====

/// Everything the view renders.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search lifecycle and results.
    pub search: SearchOrchestrator,

    /// Which pane has keyboard focus.
    pub focus: FocusPane,

    /// Index into `mode.fields()` of the input being edited.
    pub active_field: usize,

    /// Cursor position inside the active input, in chars.
    pub cursor: usize,

    /// Highlighted row of the results table.
    pub row_cursor: usize,

    /// Chart tab shown in aggregation mode.
    pub chart: ChartKind,

    /// Highlighted bucket of the active chart.
    pub bucket_cursor: usize,

    /// Whether the help overlay is visible.
    pub help_visible: bool,

    /// Status-bar notice.
    pub notice: Option<Notice>,

    /// Animation frame of the loading spinner, advanced on timer ticks.
    pub loading_tick: usize,
}

impl AppState {
    /// Initial state in `mode`, form focused when the mode has inputs.
    pub fn new(mode: SearchMode) -> Self {
        let focus = if mode.fields().is_empty() {
            FocusPane::Results
        } else {
            FocusPane::Form
        };
        Self {
            search: SearchOrchestrator::new(mode),
            focus,
            active_field: 0,
            cursor: 0,
            row_cursor: 0,
            chart: ChartKind::default(),
            bucket_cursor: 0,
            help_visible: false,
            notice: None,
            loading_tick: 0,
        }
    }

    /// Active mode.
    pub fn mode(&self) -> SearchMode {
        self.search.mode()
    }

    /// Switch mode, resetting search and presentation state.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.search.set_mode(mode);
        self.reset_cursors();
        self.notice = None;
        self.focus = if mode.fields().is_empty() {
            FocusPane::Results
        } else {
            FocusPane::Form
        };
    }

    /// Field currently being edited, if the mode has any.
    pub fn current_field(&self) -> Option<FormField> {
        self.mode().fields().get(self.active_field).copied()
    }

    /// Move to the next input, wrapping. Cursor goes to the end of its text.
    pub fn next_field(&mut self) {
        let count = self.mode().fields().len();
        if count == 0 {
            return;
        }
        self.active_field = (self.active_field + 1) % count;
        self.cursor_to_end();
    }

    /// Move to the previous input, wrapping.
    pub fn prev_field(&mut self) {
        let count = self.mode().fields().len();
        if count == 0 {
            return;
        }
        self.active_field = (self.active_field + count - 1) % count;
        self.cursor_to_end();
    }

    /// Focus the form, unless the mode has no inputs.
    pub fn focus_form(&mut self) {
        if self.mode().fields().is_empty() {
            return;
        }
        self.focus = FocusPane::Form;
        self.cursor_to_end();
    }

    /// Focus the results (or charts).
    pub fn focus_results(&mut self) {
        self.focus = FocusPane::Results;
    }

    /// Start a new search and move focus to the results.
    pub fn submit(&mut self) -> PendingSearch {
        self.notice = None;
        self.row_cursor = 0;
        self.bucket_cursor = 0;
        self.focus = FocusPane::Results;
        self.search.submit()
    }

    /// Feed a search outcome to the orchestrator and keep cursors in range.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<SearchResponse, SearchError>,
    ) -> Completion {
        let completion = self.search.complete(generation, outcome);
        if completion == Completion::Applied {
            self.clamp_row_cursor();
            self.clamp_bucket_cursor();
        }
        completion
    }

    /// Advance the spinner while a search is in flight.
    ///
    /// Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if !self.search.is_loading() {
            return false;
        }
        self.loading_tick = self.loading_tick.wrapping_add(1);
        true
    }

    /// Id of the highlighted row.
    pub fn highlighted_hit(&self) -> Option<HitId> {
        self.search
            .results()
            .hits()
            .get(self.row_cursor)
            .map(|hit| hit.id().clone())
    }

    /// Keep the row cursor inside the current page.
    pub fn clamp_row_cursor(&mut self) {
        let len = self.search.results().hits().len();
        self.row_cursor = self.row_cursor.min(len.saturating_sub(1));
    }

    /// Keep the bucket cursor inside the active chart.
    pub fn clamp_bucket_cursor(&mut self) {
        let len = self.bucket_count();
        self.bucket_cursor = self.bucket_cursor.min(len.saturating_sub(1));
    }

    /// Number of selectable elements in the active chart.
    pub fn bucket_count(&self) -> usize {
        self.search
            .chart_series()
            .category(self.chart)
            .map_or(0, |series| series.points.len())
    }

    fn reset_cursors(&mut self) {
        self.active_field = 0;
        self.cursor = 0;
        self.row_cursor = 0;
        self.bucket_cursor = 0;
        self.chart = ChartKind::default();
    }

    fn cursor_to_end(&mut self) {
        self.cursor = self
            .current_field()
            .map_or(0, |field| self.search.form().get(field).chars().count());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchMode::default())
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
