//! Domain-level keyboard actions independent of key bindings.

use std::fmt;
use std::str::FromStr;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Bindings only apply outside the search form; while the form has focus,
/// keystrokes are text input (see `state::form_input_handler`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Form
    /// Move focus into the search form. Default: / or i
    FocusForm,
    /// Switch to the next search mode (clears all fields and results). Default: m
    NextMode,
    /// Switch to the previous search mode. Default: M
    PrevMode,
    /// Re-run the current search on the current page. Default: r
    Rerun,

    // Results table
    /// Move row cursor up. Default: k/↑
    ScrollUp,
    /// Move row cursor down. Default: j/↓
    ScrollDown,
    /// Toggle export selection of the row under the cursor. Default: Space
    ToggleSelect,
    /// Select every row on the page, or clear if all are selected. Default: a
    ToggleSelectAll,
    /// Export selected rows to `selected_records.xlsx`. Default: e
    Export,

    // Paging (hit modes) / bar cursor (aggregation mode)
    /// Previous page, or previous bar in the chart view. Default: h/←
    Previous,
    /// Next page, or next bar in the chart view. Default: l/→
    Next,
    /// First page, or first bar. Default: g/Home
    First,
    /// Last page, or last bar. Default: G/End
    Last,

    // Charts
    /// Show the next chart. Default: Tab
    NextChart,
    /// Show the previous chart. Default: Shift+Tab
    PrevChart,
    /// Open drill-down detail for the bar under the cursor. Default: Enter
    DrillDown,
    /// Close the drill-down detail panel. Default: x
    CloseDetail,

    // Application
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Every action with its config-file name.
    pub const NAMES: [(KeyAction, &'static str); 19] = [
        (KeyAction::FocusForm, "focus_form"),
        (KeyAction::NextMode, "next_mode"),
        (KeyAction::PrevMode, "prev_mode"),
        (KeyAction::Rerun, "rerun"),
        (KeyAction::ScrollUp, "scroll_up"),
        (KeyAction::ScrollDown, "scroll_down"),
        (KeyAction::ToggleSelect, "toggle_select"),
        (KeyAction::ToggleSelectAll, "toggle_select_all"),
        (KeyAction::Export, "export"),
        (KeyAction::Previous, "previous"),
        (KeyAction::Next, "next"),
        (KeyAction::First, "first"),
        (KeyAction::Last, "last"),
        (KeyAction::NextChart, "next_chart"),
        (KeyAction::PrevChart, "prev_chart"),
        (KeyAction::DrillDown, "drill_down"),
        (KeyAction::CloseDetail, "close_detail"),
        (KeyAction::Help, "help"),
        (KeyAction::Quit, "quit"),
    ];

    /// Name used in the `[keybindings]` config table.
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(action, _)| *action == self)
            .map_or("", |(_, name)| name)
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(action, _)| *action)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn actions_are_hashable_and_distinct() {
        let set: HashSet<KeyAction> = [
            KeyAction::Previous,
            KeyAction::Next,
            KeyAction::Previous,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for (action, name) in KeyAction::NAMES {
            assert_eq!(name.parse::<KeyAction>(), Ok(action));
            assert_eq!(action.to_string(), name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("teleport".parse::<KeyAction>().is_err());
    }

    #[test]
    fn actions_are_copy() {
        let action = KeyAction::Export;
        let copied = action;
        assert_eq!(action, copied);
    }
}
