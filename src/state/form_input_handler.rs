//! Keyboard handler for the search form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::{AppState, Command, FocusPane};

/// Handle a keystroke while the form has focus.
///
/// # Key Bindings
/// - printable chars: insert at the cursor
/// - Backspace/Delete: remove before/at the cursor
/// - Left/Right/Home/End: move the cursor
/// - Tab/Shift+Tab: next/previous input
/// - Enter: run the search from page 1
/// - Esc: leave the form (focus results)
/// - Ctrl+N/Ctrl+P: next/previous search mode
/// - Ctrl+C: quit
///
/// Returns `Command::None` without touching state if the form is not focused.
pub fn handle_form_key(state: &mut AppState, key: KeyEvent) -> Command {
    if state.focus != FocusPane::Form {
        return Command::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Command::Quit,
            KeyCode::Char('n') => {
                state.set_mode(state.mode().next());
                Command::None
            }
            KeyCode::Char('p') => {
                state.set_mode(state.mode().prev());
                Command::None
            }
            _ => Command::None,
        };
    }

    match key.code {
        KeyCode::Enter => Command::Search(state.submit()),
        KeyCode::Esc => {
            state.focus_results();
            Command::None
        }
        KeyCode::Tab => {
            state.next_field();
            Command::None
        }
        KeyCode::BackTab => {
            state.prev_field();
            Command::None
        }
        KeyCode::Char(ch) => {
            insert_char(state, ch);
            Command::None
        }
        KeyCode::Backspace => {
            if state.cursor > 0 {
                state.cursor -= 1;
                remove_char(state);
            }
            Command::None
        }
        KeyCode::Delete => {
            remove_char(state);
            Command::None
        }
        KeyCode::Left => {
            state.cursor = state.cursor.saturating_sub(1);
            Command::None
        }
        KeyCode::Right => {
            state.cursor = (state.cursor + 1).min(field_len(state));
            Command::None
        }
        KeyCode::Home => {
            state.cursor = 0;
            Command::None
        }
        KeyCode::End => {
            state.cursor = field_len(state);
            Command::None
        }
        _ => Command::None,
    }
}

fn field_len(state: &AppState) -> usize {
    state
        .current_field()
        .map_or(0, |field| state.search.form().get(field).chars().count())
}

/// Byte index of char position `cursor` in `text`.
fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map_or(text.len(), |(idx, _)| idx)
}

fn insert_char(state: &mut AppState, ch: char) {
    let Some(field) = state.current_field() else {
        return;
    };
    let cursor = state.cursor;
    let buffer = state.search.form_mut().buffer_mut(field);
    let at = byte_index(buffer, cursor);
    buffer.insert(at, ch);
    state.cursor += 1;
}

fn remove_char(state: &mut AppState) {
    let Some(field) = state.current_field() else {
        return;
    };
    let cursor = state.cursor;
    let buffer = state.search.form_mut().buffer_mut(field);
    if cursor < buffer.chars().count() {
        let at = byte_index(buffer, cursor);
        buffer.remove(at);
    }
}

#[cfg(test)]
#[path = "form_input_handler_tests.rs"]
mod tests;
