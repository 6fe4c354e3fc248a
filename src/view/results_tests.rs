//! Tests for the results table.

use super::*;
use crate::client::SearchResponse;
use crate::model::SearchMode;
use crate::query::pagination;
use crate::view::test_support::buffer_to_string;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;

// ===== Test Helpers =====

fn state_with_hits(count: usize, total: u64) -> AppState {
    let mut state = AppState::new(SearchMode::BasicPerson);
    let pending = state.submit();
    let hits: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "_id": format!("hit-{i}"),
                "_source": {
                    "Excluding Agency": "HHS",
                    "First": format!("Person{i}"),
                    "Last": "Doe",
                }
            })
        })
        .collect();
    let body = json!({ "hits": { "total": { "value": total }, "hits": hits } });
    let response = SearchResponse::from_slice(body.to_string().as_bytes()).unwrap();
    state.complete(pending.generation, Ok(response));
    state
}

fn render(state: &AppState, width: u16, height: u16) -> String {
    let styles = Styles::default();
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_results(frame, frame.area(), state, &styles))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

// ===== Helpers =====

#[test]
fn truncate_keeps_short_text() {
    assert_eq!(truncate("HHS", 10), "HHS");
    assert_eq!(truncate("exactly", 7), "exactly");
}

#[test]
fn truncate_adds_ellipsis_within_width() {
    let cut = truncate("Department of Health", 8);
    assert_eq!(cut, "Departm…");
    assert_eq!(cut.width(), 8);
}

#[test]
fn truncate_counts_wide_characters() {
    // Each CJK character is two cells wide.
    let cut = truncate("東京都港区", 5);
    assert!(cut.width() <= 5);
    assert!(cut.ends_with('…'));
}

#[test]
fn truncate_to_zero_is_empty() {
    assert_eq!(truncate("anything", 0), "");
}

#[test]
fn range_caption_formats_bounds() {
    assert_eq!(
        range_caption(Some((11, 20)), 95).as_deref(),
        Some("Showing 11 - 20 of 95 results")
    );
    assert_eq!(range_caption(None, 0), None);
}

#[test]
fn column_widths_fit_inside_table() {
    let widths = column_widths(120);
    let used: u16 = widths.iter().sum::<u16>() + CHECKBOX_WIDTH + 7;
    assert!(used <= 120);
    assert!(widths.iter().all(|w| *w > 0));
}

#[test]
fn column_widths_degrade_to_zero_when_tiny() {
    assert_eq!(column_widths(5), [0; 7]);
}

#[test]
fn pagination_line_marks_current_page() {
    let styles = Styles::default();
    let items = pagination::page_numbers(10, 1);
    let line = pagination_line(&items, 1, 10, false, &styles);
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

    assert_eq!(text, "« ‹ [1] 2 3 4 5 6 7 ... 10 › »");
    // First/previous disabled on page 1, next/last enabled.
    assert_eq!(line.spans[0].style, styles.muted);
    assert_eq!(line.spans.last().map(|s| s.style), Some(styles.key));
}

#[test]
fn pagination_line_is_disabled_while_loading() {
    let styles = Styles::default();
    let items = pagination::page_numbers(10, 4);
    let line = pagination_line(&items, 4, 10, true, &styles);

    assert_eq!(line.spans[0].style, styles.muted);
    assert_eq!(line.spans.last().map(|s| s.style), Some(styles.muted));
}

// ===== Rendering =====

#[test]
fn idle_state_shows_hint() {
    let text = render(&AppState::default(), 100, 10);
    assert!(text.contains(IDLE_HINT));
}

#[test]
fn zero_hits_shows_no_records_found() {
    let state = state_with_hits(0, 0);
    let text = render(&state, 100, 10);
    assert!(text.contains(NO_RECORDS));
}

#[test]
fn table_shows_headers_rows_and_caption() {
    let state = state_with_hits(10, 95);
    let text = render(&state, 160, 20);

    assert!(text.contains("Excluding Agency"));
    assert!(text.contains("Person3"));
    assert!(text.contains("N/A"));
    assert!(text.contains("Showing 1 - 10 of 95 results"));
    assert!(text.contains("[1]"));
}

#[test]
fn checkbox_column_reflects_selection() {
    let mut state = state_with_hits(3, 3);
    state.search.set_all_selected(true);
    let text = render(&state, 160, 10);

    // Header checkbox plus one per row.
    assert_eq!(text.matches("[x]").count(), 4);
    assert!(text.contains("(3 selected)"));
}

#[test]
fn single_page_hides_pagination_bar() {
    let state = state_with_hits(3, 3);
    let text = render(&state, 160, 10);
    assert!(!text.contains('«'));
}
