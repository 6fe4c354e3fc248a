//! Tests for form keyboard handling.

use super::*;
use crate::model::{FormField, SearchMode};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn type_str(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        handle_form_key(state, key(KeyCode::Char(ch)));
    }
}

#[test]
fn typing_fills_active_field() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    type_str(&mut state, "Smith");
    assert_eq!(state.search.form().get(FormField::SearchText), "Smith");
    assert_eq!(state.cursor, 5);
}

#[test]
fn insert_in_middle_handles_multibyte() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    type_str(&mut state, "Jose");
    handle_form_key(&mut state, key(KeyCode::Left));
    handle_form_key(&mut state, key(KeyCode::Backspace));
    type_str(&mut state, "é");
    // "Jose" -> cursor before 'e' -> delete 's' -> insert 'é'
    assert_eq!(state.search.form().get(FormField::SearchText), "Joée");
}

#[test]
fn delete_removes_char_at_cursor() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    type_str(&mut state, "abc");
    handle_form_key(&mut state, key(KeyCode::Home));
    handle_form_key(&mut state, key(KeyCode::Delete));
    assert_eq!(state.search.form().get(FormField::SearchText), "bc");
    assert_eq!(state.cursor, 0);
}

#[test]
fn backspace_at_start_is_noop() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    handle_form_key(&mut state, key(KeyCode::Backspace));
    assert_eq!(state.search.form().get(FormField::SearchText), "");
}

#[test]
fn tab_cycles_fields_of_mode() {
    let mut state = AppState::new(SearchMode::AdvancedPerson);
    type_str(&mut state, "Ada");
    handle_form_key(&mut state, key(KeyCode::Tab));
    type_str(&mut state, "MD");
    handle_form_key(&mut state, key(KeyCode::Tab));
    type_str(&mut state, "USA");
    handle_form_key(&mut state, key(KeyCode::Tab));

    assert_eq!(state.current_field(), Some(FormField::SearchText));
    assert_eq!(state.cursor, 3);
    assert_eq!(state.search.form().get(FormField::State), "MD");
    assert_eq!(state.search.form().get(FormField::Country), "USA");

    handle_form_key(&mut state, key(KeyCode::BackTab));
    assert_eq!(state.current_field(), Some(FormField::Country));
}

#[test]
fn enter_submits_with_field_values() {
    let mut state = AppState::new(SearchMode::Exclusion);
    type_str(&mut state, "HHS");

    let command = handle_form_key(&mut state, key(KeyCode::Enter));

    match command {
        Command::Search(pending) => {
            assert_eq!(
                pending.request.params()["agency"],
                crate::query::ParamValue::Text("HHS".into())
            );
        }
        other => panic!("expected search, got {other:?}"),
    }
    assert_eq!(state.focus, FocusPane::Results);
    assert!(state.search.is_loading());
}

#[test]
fn esc_leaves_form() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    handle_form_key(&mut state, key(KeyCode::Esc));
    assert_eq!(state.focus, FocusPane::Results);
}

#[test]
fn ctrl_n_switches_mode_and_clears_fields() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    type_str(&mut state, "text");
    handle_form_key(&mut state, ctrl('n'));

    assert_eq!(state.mode(), SearchMode::AdvancedPerson);
    assert!(state.search.form().is_blank());
    assert_eq!(state.cursor, 0);
}

#[test]
fn ctrl_c_quits() {
    let mut state = AppState::default();
    assert_eq!(handle_form_key(&mut state, ctrl('c')), Command::Quit);
}

#[test]
fn ignored_when_results_focused() {
    let mut state = AppState::new(SearchMode::BasicPerson);
    state.focus_results();
    assert_eq!(
        handle_form_key(&mut state, key(KeyCode::Char('x'))),
        Command::None
    );
    assert!(state.search.form().is_blank());
}

#[test]
fn aggregation_mode_has_no_field_to_type_into() {
    let mut state = AppState::new(SearchMode::AggregationTemplate);
    state.focus = FocusPane::Form;
    type_str(&mut state, "x");
    assert!(state.search.form().is_blank());
    assert_eq!(state.cursor, 0);
}
