//! Keyboard bindings configuration.

use crate::config::loader::ConfigError;
use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::{BTreeMap, HashMap};

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
/// Only consulted while focus is outside the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Every key bound to `action`, for the help overlay.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| format!("{:?}", key.code));
        keys
    }

    /// Defaults with the `[keybindings]` table applied on top.
    ///
    /// Each entry maps an action name to a key (`next = "n"`,
    /// `quit = "ctrl+q"`). An overridden action loses its default keys, and
    /// a key taken from another action moves to the new one.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidKeyBinding` for an unknown action or key.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut keys = Self::default();
        for (name, spec) in overrides {
            let invalid = |reason: String| ConfigError::InvalidKeyBinding {
                action: name.clone(),
                reason,
            };
            let action: KeyAction = name.parse().map_err(invalid)?;
            let key = parse_key(spec).map_err(invalid)?;
            keys.bindings.retain(|_, bound| *bound != action);
            keys.bindings.insert(key, action);
        }
        Ok(keys)
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

/// Parse a key such as `x`, `G`, `ctrl+q`, `enter` or `shift+tab`.
///
/// Uppercase letters carry SHIFT, matching what the terminal reports.
pub fn parse_key(spec: &str) -> Result<KeyEvent, String> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = spec.split('+').collect();
    // "ctrl++" binds the plus key itself
    if spec.ends_with("++") {
        parts.truncate(parts.len().saturating_sub(2));
        parts.push("+");
    }
    let Some((last, prefixes)) = parts.split_last() else {
        return Err(format!("empty key '{spec}'"));
    };

    for prefix in prefixes {
        match prefix.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            other => return Err(format!("unknown modifier '{other}' in '{spec}'")),
        }
    }

    let mut chars = last.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => {
            if c.is_ascii_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c)
        }
        _ => match last.to_ascii_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::BackTab
            }
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "" => return Err(format!("empty key '{spec}'")),
            other => return Err(format!("unknown key '{other}'")),
        },
    };
    Ok(KeyEvent::new(code, modifiers))
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;

        // Form and mode
        keys.bind(KeyCode::Char('/'), none, KeyAction::FocusForm);
        keys.bind(KeyCode::Char('i'), none, KeyAction::FocusForm);
        keys.bind(KeyCode::Char('m'), none, KeyAction::NextMode);
        keys.bind(KeyCode::Char('M'), shift, KeyAction::PrevMode);
        keys.bind(KeyCode::Char('r'), none, KeyAction::Rerun);

        // Vim-style row movement
        keys.bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        keys.bind(KeyCode::Up, none, KeyAction::ScrollUp);
        keys.bind(KeyCode::Down, none, KeyAction::ScrollDown);

        // Selection and export
        keys.bind(KeyCode::Char(' '), none, KeyAction::ToggleSelect);
        keys.bind(KeyCode::Char('a'), none, KeyAction::ToggleSelectAll);
        keys.bind(KeyCode::Char('e'), none, KeyAction::Export);

        // Paging
        keys.bind(KeyCode::Char('h'), none, KeyAction::Previous);
        keys.bind(KeyCode::Char('l'), none, KeyAction::Next);
        keys.bind(KeyCode::Left, none, KeyAction::Previous);
        keys.bind(KeyCode::Right, none, KeyAction::Next);
        keys.bind(KeyCode::Char('g'), none, KeyAction::First);
        keys.bind(KeyCode::Char('G'), shift, KeyAction::Last);
        keys.bind(KeyCode::Home, none, KeyAction::First);
        keys.bind(KeyCode::End, none, KeyAction::Last);

        // Charts
        keys.bind(KeyCode::Tab, none, KeyAction::NextChart);
        keys.bind(KeyCode::BackTab, shift, KeyAction::PrevChart);
        keys.bind(KeyCode::Enter, none, KeyAction::DrillDown);
        keys.bind(KeyCode::Char('x'), none, KeyAction::CloseDetail);

        // Application controls
        keys.bind(KeyCode::Char('?'), none, KeyAction::Help);
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn vim_and_arrow_keys_move_rows() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::ScrollDown)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyAction::ScrollUp)
        );
    }

    #[test]
    fn uppercase_g_with_shift_jumps_to_last() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::Last),
            "Uppercase 'G' (shift+g) should map to Last"
        );
    }

    #[test]
    fn space_toggles_selection_and_e_exports() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(KeyAction::ToggleSelect)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('e'), KeyModifiers::NONE)),
            Some(KeyAction::Export)
        );
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn unbound_key_is_none() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    fn overrides(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(action, key)| (action.to_string(), key.to_string()))
            .collect()
    }

    #[test]
    fn parse_key_handles_chars_modifiers_and_names() {
        assert_eq!(
            parse_key("x"),
            Ok(key(KeyCode::Char('x'), KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("G"),
            Ok(key(KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
        assert_eq!(
            parse_key("ctrl+q"),
            Ok(key(KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key("shift+tab"),
            Ok(key(KeyCode::BackTab, KeyModifiers::SHIFT))
        );
        assert_eq!(
            parse_key("PageDown"),
            Ok(key(KeyCode::PageDown, KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key("ctrl++"),
            Ok(key(KeyCode::Char('+'), KeyModifiers::CONTROL))
        );
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert!(parse_key("").is_err());
        assert!(parse_key("hyper+x").is_err());
        assert!(parse_key("f13x").is_err());
    }

    #[test]
    fn override_replaces_default_keys_of_action() {
        let bindings = KeyBindings::with_overrides(&overrides(&[("export", "ctrl+s")])).unwrap();

        assert_eq!(
            bindings.get(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(KeyAction::Export)
        );
        assert_eq!(bindings.get(key(KeyCode::Char('e'), KeyModifiers::NONE)), None);
        assert_eq!(
            bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn override_can_steal_a_key_from_another_action() {
        let bindings = KeyBindings::with_overrides(&overrides(&[("next_mode", "j")])).unwrap();

        assert_eq!(
            bindings.get(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(KeyAction::NextMode)
        );
        assert_eq!(bindings.keys_for(KeyAction::ScrollDown).len(), 1);
    }

    #[test]
    fn unknown_action_or_key_is_config_error() {
        let err = KeyBindings::with_overrides(&overrides(&[("teleport", "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyBinding { ref action, .. } if action == "teleport"));

        let err = KeyBindings::with_overrides(&overrides(&[("quit", "hyper+q")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyBinding { .. }));
    }

    #[test]
    fn empty_overrides_equal_defaults() {
        assert_eq!(
            KeyBindings::with_overrides(&BTreeMap::new()).unwrap(),
            KeyBindings::default()
        );
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.keys_for(KeyAction::FocusForm).len(), 2);
        assert_eq!(bindings.keys_for(KeyAction::Quit).len(), 2);
    }
}
