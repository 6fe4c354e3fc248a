//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.
//! I/O requested by a transition is returned as a [`Command`].

pub mod action_handler;
pub mod app_state;
pub mod form_input_handler;
pub mod orchestrator;
pub mod selection;

// Re-export for convenience
pub use action_handler::handle_action;
pub use app_state::{AppState, Command, FocusPane, Notice, NoticeKind};
pub use form_input_handler::handle_form_key;
pub use orchestrator::{Completion, DrillDown, PendingSearch, SearchOrchestrator, SearchStatus};
pub use selection::SelectionSet;
