//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Dismissal hint drawn on the bottom border.
pub const CLOSE_HINT: &str = " Press Esc or ? to close ";

/// Shortcut table: category, then (keys, description) pairs.
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Form",
        &[
            ("/ or i", "Edit the search form"),
            ("Tab/S-Tab", "Next/previous input (while editing)"),
            ("Enter", "Run the search from page 1"),
            ("Esc", "Leave the form"),
            ("m/M", "Next/previous search type"),
            ("r", "Re-run the current search"),
        ],
    ),
    (
        "Results",
        &[
            ("j/↓ k/↑", "Move the row cursor"),
            ("Space", "Select the row for export"),
            ("a", "Select or clear the whole page"),
            ("e", "Export selected rows to xlsx"),
        ],
    ),
    (
        "Paging",
        &[
            ("h/← l/→", "Previous/next page"),
            ("g/Home", "First page"),
            ("G/End", "Last page"),
        ],
    ),
    (
        "Charts",
        &[
            ("Tab/S-Tab", "Next/previous chart"),
            ("h/l j/k", "Move between bars"),
            ("Enter", "Show agency details"),
            ("x", "Close details"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle this help"), ("q/Ctrl+c", "Quit")],
    ),
];

/// Width of the key column.
const KEY_COLUMN_WIDTH: usize = 12;

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &Styles) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.focused_border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(Span::styled(
        CLOSE_HINT,
        styles.muted.add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
///
/// Percentages above 100 are treated as 100.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = percent_of(area.width, percent_x);
    let popup_height = percent_of(area.height, percent_y);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

fn build_help_content(styles: &Styles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, (category, entries)) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, styles.section)));
        lines.extend(entries.iter().map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN_WIDTH$}"), styles.key),
                Span::raw(*description),
            ])
        }));
    }
    lines
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
