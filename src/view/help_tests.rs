//! Tests for help overlay widget

use super::*;
use crate::view::test_support::buffer_to_string;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(width: u16, height: u16) -> String {
    let styles = Styles::default();
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| render_help_overlay(frame, &styles))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn centered_rect_is_centered() {
    let rect = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
    assert_eq!(rect, Rect::new(25, 10, 50, 20));
}

#[test]
fn centered_rect_respects_area_offset() {
    let rect = centered_rect(50, 50, Rect::new(10, 5, 20, 10));
    assert_eq!(rect, Rect::new(15, 7, 10, 5));
}

/// Struct literal so large sizes are not clamped by `Rect::new`.
fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[test]
fn centered_rect_on_very_wide_terminal() {
    let popup = centered_rect(100, 80, rect(0, 0, 1000, 300));
    assert_eq!(popup, rect(0, 30, 1000, 240));

    let max = centered_rect(100, 100, rect(0, 0, u16::MAX, u16::MAX));
    assert_eq!(max.width, u16::MAX);
    assert_eq!(max.height, u16::MAX);
}

#[test]
fn centered_rect_caps_percent_at_full_size() {
    let popup = centered_rect(250, 50, rect(0, 0, 40, 20));
    assert_eq!(popup, rect(0, 5, 40, 10));
}

#[test]
fn overlay_has_title_and_close_hint() {
    let text = render(100, 50);
    assert!(text.contains("Keyboard Shortcuts"));
    assert!(text.contains(CLOSE_HINT.trim()));
}

#[test]
fn overlay_lists_every_category() {
    let text = render(100, 50);
    for category in ["Form", "Results", "Paging", "Charts", "Application"] {
        assert!(text.contains(category), "missing category {category}");
    }
}

#[test]
fn overlay_lists_export_and_quit_keys() {
    let text = render(100, 50);
    assert!(text.contains("Export selected rows to xlsx"));
    assert!(text.contains("q/Ctrl+c"));
    assert!(text.contains("Close details"));
}

#[test]
fn overlay_survives_tiny_terminal() {
    let text = render(10, 4);
    assert_eq!(text.lines().count(), 4);
}
