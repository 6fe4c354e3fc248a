//! Key action handler for the results pane (pure).
//!
//! Maps a bound [`KeyAction`] onto AppState. Paging actions move between
//! result pages in hit modes and between chart elements in aggregation
//! mode. Returns the side effect the event loop must perform.

use crate::model::KeyAction;
use crate::state::{AppState, Command};
use tracing::debug;

/// Apply `action` to `state`.
pub fn handle_action(state: &mut AppState, action: KeyAction) -> Command {
    if state.help_visible && !matches!(action, KeyAction::Help | KeyAction::Quit) {
        state.help_visible = false;
        return Command::None;
    }
    debug!(?action, "Handling key action");

    let aggregation = state.mode().is_aggregation();
    match action {
        KeyAction::Quit => Command::Quit,
        KeyAction::Help => {
            state.help_visible = !state.help_visible;
            Command::None
        }
        KeyAction::FocusForm => {
            state.focus_form();
            Command::None
        }
        KeyAction::NextMode => {
            state.set_mode(state.mode().next());
            Command::None
        }
        KeyAction::PrevMode => {
            state.set_mode(state.mode().prev());
            Command::None
        }
        KeyAction::Rerun => {
            state.notice = None;
            let page = state.search.page();
            Command::Search(state.search.execute_search(page))
        }

        KeyAction::ScrollUp if aggregation => {
            state.bucket_cursor = state.bucket_cursor.saturating_sub(1);
            Command::None
        }
        KeyAction::ScrollDown if aggregation => {
            move_bucket_cursor(state, 1);
            Command::None
        }
        KeyAction::ScrollUp => {
            state.row_cursor = state.row_cursor.saturating_sub(1);
            Command::None
        }
        KeyAction::ScrollDown => {
            state.row_cursor += 1;
            state.clamp_row_cursor();
            Command::None
        }

        KeyAction::ToggleSelect => {
            if let Some(id) = state.highlighted_hit() {
                state.search.toggle_selection(&id);
            }
            Command::None
        }
        KeyAction::ToggleSelectAll => {
            let checked = !state.search.is_all_selected();
            state.search.set_all_selected(checked);
            Command::None
        }
        KeyAction::Export if aggregation => Command::None,
        KeyAction::Export => Command::Export,

        KeyAction::Previous if aggregation => {
            state.bucket_cursor = state.bucket_cursor.saturating_sub(1);
            Command::None
        }
        KeyAction::Next if aggregation => {
            move_bucket_cursor(state, 1);
            Command::None
        }
        KeyAction::First if aggregation => {
            state.bucket_cursor = 0;
            Command::None
        }
        KeyAction::Last if aggregation => {
            state.bucket_cursor = state.bucket_count().saturating_sub(1);
            Command::None
        }
        KeyAction::Previous => page_command(state, |s| s.search.prev_page()),
        KeyAction::Next => page_command(state, |s| s.search.next_page()),
        KeyAction::First => page_command(state, |s| s.search.first_page()),
        KeyAction::Last => page_command(state, |s| s.search.last_page()),

        KeyAction::NextChart | KeyAction::PrevChart if !aggregation => Command::None,
        KeyAction::NextChart => {
            state.chart = state.chart.next();
            state.clamp_bucket_cursor();
            Command::None
        }
        KeyAction::PrevChart => {
            state.chart = state.chart.prev();
            state.clamp_bucket_cursor();
            Command::None
        }
        KeyAction::DrillDown => {
            if aggregation && state.chart.supports_drill_down() {
                state.search.select_bucket(state.bucket_cursor);
            }
            Command::None
        }
        KeyAction::CloseDetail => {
            state.search.close_drill_down();
            Command::None
        }
    }
}

fn move_bucket_cursor(state: &mut AppState, delta: usize) {
    state.bucket_cursor = state.bucket_cursor.saturating_add(delta);
    state.clamp_bucket_cursor();
}

fn page_command(
    state: &mut AppState,
    step: impl FnOnce(&mut AppState) -> Option<crate::state::PendingSearch>,
) -> Command {
    let command = Command::from(step(state));
    if matches!(command, Command::Search(_)) {
        state.row_cursor = 0;
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::client::SearchResponse;
    use crate::model::SearchMode;
    use crate::state::FocusPane;
    use serde_json::json;

    fn hits(ids: &[&str], total: u64) -> SearchResponse {
        let hits: Vec<_> = ids.iter().map(|id| json!({ "_id": id })).collect();
        serde_json::from_value(json!({ "hits": { "total": total, "hits": hits } })).unwrap()
    }

    fn loaded(total: u64) -> AppState {
        let mut state = AppState::new(SearchMode::BasicPerson);
        let pending = state.submit();
        state.complete(pending.generation, Ok(hits(&["a", "b", "c"], total)));
        state
    }

    fn aggregated() -> AppState {
        let mut state = AppState::new(SearchMode::AggregationTemplate);
        let pending = state.submit();
        let resp: SearchResponse = serde_json::from_value(json!({
            "aggregations": { "by_agency": { "buckets": [
                { "key": "A", "doc_count": 5 },
                { "key": "B", "doc_count": 4 },
                { "key": "C", "doc_count": 3 }
            ] } }
        }))
        .unwrap();
        state.complete(pending.generation, Ok(resp));
        state
    }

    #[test]
    fn quit_returns_quit_command() {
        let mut state = AppState::default();
        assert_eq!(handle_action(&mut state, KeyAction::Quit), Command::Quit);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut state = loaded(3);
        handle_action(&mut state, KeyAction::Help);
        assert!(state.help_visible);

        handle_action(&mut state, KeyAction::ScrollDown);
        assert!(!state.help_visible);
        assert_eq!(state.row_cursor, 0);
    }

    #[test]
    fn space_toggles_highlighted_row() {
        let mut state = loaded(3);
        handle_action(&mut state, KeyAction::ScrollDown);
        handle_action(&mut state, KeyAction::ToggleSelect);
        assert_eq!(state.search.selection().ids()[0].as_str(), "b");
    }

    #[test]
    fn row_cursor_stays_on_page() {
        let mut state = loaded(3);
        for _ in 0..10 {
            handle_action(&mut state, KeyAction::ScrollDown);
        }
        assert_eq!(state.row_cursor, 2);
    }

    #[test]
    fn select_all_toggles() {
        let mut state = loaded(3);
        handle_action(&mut state, KeyAction::ToggleSelectAll);
        assert!(state.search.is_all_selected());
        handle_action(&mut state, KeyAction::ToggleSelectAll);
        assert!(state.search.selection().is_empty());
    }

    #[test]
    fn next_pages_in_hit_mode() {
        let mut state = loaded(95);
        state.row_cursor = 2;
        let command = handle_action(&mut state, KeyAction::Next);
        match command {
            Command::Search(pending) => assert_eq!(pending.request.offset(), 10),
            other => panic!("expected search, got {other:?}"),
        }
        assert_eq!(state.row_cursor, 0);
    }

    #[test]
    fn previous_on_first_page_does_nothing() {
        let mut state = loaded(95);
        assert_eq!(handle_action(&mut state, KeyAction::Previous), Command::None);
    }

    #[test]
    fn export_requested_only_in_hit_modes() {
        let mut state = loaded(3);
        assert_eq!(handle_action(&mut state, KeyAction::Export), Command::Export);

        let mut state = aggregated();
        assert_eq!(handle_action(&mut state, KeyAction::Export), Command::None);
    }

    #[test]
    fn next_mode_resets_and_focuses_form() {
        let mut state = loaded(95);
        handle_action(&mut state, KeyAction::NextMode);
        assert_eq!(state.mode(), SearchMode::AdvancedPerson);
        assert_eq!(state.focus, FocusPane::Form);
        assert!(state.search.results().is_empty());
    }

    #[test]
    fn rerun_keeps_current_page() {
        let mut state = loaded(95);
        if let Command::Search(pending) = handle_action(&mut state, KeyAction::Last) {
            state.complete(pending.generation, Ok(hits(&["z"], 95)));
        }
        match handle_action(&mut state, KeyAction::Rerun) {
            Command::Search(pending) => assert_eq!(pending.request.offset(), 90),
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn bucket_cursor_moves_in_aggregation_mode() {
        let mut state = aggregated();
        handle_action(&mut state, KeyAction::Last);
        assert_eq!(state.bucket_cursor, 2);
        handle_action(&mut state, KeyAction::Next);
        assert_eq!(state.bucket_cursor, 2);
        handle_action(&mut state, KeyAction::First);
        assert_eq!(state.bucket_cursor, 0);
    }

    #[test]
    fn drill_down_opens_highlighted_bucket() {
        let mut state = aggregated();
        handle_action(&mut state, KeyAction::Next);
        handle_action(&mut state, KeyAction::DrillDown);
        assert_eq!(
            state.search.drill_down().map(|d| d.bucket.key.as_str()),
            Some("B")
        );

        handle_action(&mut state, KeyAction::CloseDetail);
        assert!(state.search.drill_down().is_none());
    }

    #[test]
    fn trend_chart_has_no_drill_down() {
        let mut state = aggregated();
        handle_action(&mut state, KeyAction::NextChart);
        handle_action(&mut state, KeyAction::NextChart);
        assert_eq!(state.chart, ChartKind::Trend);
        assert_eq!(state.bucket_count(), 0);

        handle_action(&mut state, KeyAction::DrillDown);
        assert!(state.search.drill_down().is_none());
    }
}
