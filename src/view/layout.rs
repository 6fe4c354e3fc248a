//! Screen layout.
//!
//! Pure layout logic: splits the frame into header, mode tabs, search form,
//! error line, content area and status bar, then delegates each area to its
//! widget.

use crate::model::SearchMode;
use crate::state::{AppState, FocusPane, NoticeKind};
use crate::view::constants::{
    ERROR_LINE_HEIGHT, HEADER_HEIGHT, MODE_BAR_HEIGHT, STATUS_BAR_HEIGHT,
};
use crate::view::form::SearchFormView;
use crate::view::loading_indicator::LoadingIndicator;
use crate::view::{charts, help, results, tabs, Styles};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Application title.
pub const TITLE: &str = "Clear Check";

/// Line under the title.
pub const SUBTITLE: &str = "Let's run a clear check on this Entity";

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &Styles) {
    let mode = state.mode();
    let [header_area, tabs_area, form_area, error_area, content_area, status_area] =
        Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(MODE_BAR_HEIGHT),
            Constraint::Length(SearchFormView::height(mode)),
            Constraint::Length(ERROR_LINE_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(frame.area());

    render_header(frame, header_area, state, styles);
    tabs::render_mode_tabs(frame, tabs_area, mode, styles);

    let editing = (state.focus == FocusPane::Form).then_some((state.active_field, state.cursor));
    frame.render_widget(
        SearchFormView::new(mode, state.search.form(), editing, styles),
        form_area,
    );

    if let Some(message) = state.search.error_message() {
        frame.render_widget(
            Paragraph::new(Span::styled(message, styles.error)),
            error_area,
        );
    }

    if mode.is_aggregation() {
        charts::render_aggregation(frame, content_area, state, styles);
    } else {
        results::render_results(frame, content_area, state, styles);
    }

    render_status_bar(frame, status_area, state, styles);

    if state.help_visible {
        help::render_help_overlay(frame, styles);
    }
}

/// Title with the loading spinner, then the subtitle.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles) {
    let spinner =
        LoadingIndicator::new(state.search.status(), state.loading_tick, styles.info).render();
    let lines = vec![
        Line::from(vec![
            Span::styled(TITLE, styles.title),
            Span::raw("  "),
            spinner,
        ]),
        Line::from(Span::styled(SUBTITLE, styles.muted)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Keyboard hints for the focused pane and mode.
pub fn build_keyboard_hints(focus: FocusPane, mode: SearchMode) -> &'static str {
    match (focus, mode.is_aggregation()) {
        (FocusPane::Form, _) => {
            "Enter: search | Tab: next field | Esc: leave form | Ctrl+n/p: type | Ctrl+c: quit"
        }
        (FocusPane::Results, false) => {
            "/: edit | j/k: row | Space: select | a: all | e: export | h/l: page | m: type | ?: help | q: quit"
        }
        (FocusPane::Results, true) => {
            "r: run | Tab: chart | h/l: bar | Enter: details | x: close | m: type | ?: help | q: quit"
        }
    }
}

/// Notice if any, otherwise keyboard hints.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles) {
    let line = match &state.notice {
        Some(notice) => {
            let style = match notice.kind {
                NoticeKind::Info => styles.info,
                NoticeKind::Error => styles.error,
            };
            Line::from(Span::styled(notice.text.clone(), style))
        }
        None => Line::from(Span::styled(
            build_keyboard_hints(state.focus, state.mode()),
            styles.muted,
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
