//! Tests for the loading indicator.

use super::*;

#[test]
fn idle_renders_nothing() {
    let span = LoadingIndicator::new(&SearchStatus::Idle, 3, Style::default()).render();
    assert_eq!(span.content, "");
}

#[test]
fn success_and_failure_render_nothing() {
    let success = LoadingIndicator::new(&SearchStatus::Success, 0, Style::default()).render();
    let failed = SearchStatus::Failed { message: "boom" };
    let failure = LoadingIndicator::new(&failed, 0, Style::default()).render();

    assert_eq!(success.content, "");
    assert_eq!(failure.content, "");
}

#[test]
fn loading_shows_spinner_and_text() {
    let status = SearchStatus::Loading {
        generation: 1,
        page: 1,
    };
    let span = LoadingIndicator::new(&status, 0, Style::default()).render();
    assert_eq!(span.content, "⠋ Searching...");
}

#[test]
fn spinner_frame_wraps_with_tick() {
    let status = SearchStatus::Loading {
        generation: 1,
        page: 1,
    };
    let first = LoadingIndicator::new(&status, 1, Style::default()).render();
    let wrapped = LoadingIndicator::new(&status, 1 + SPINNER_FRAMES.len(), Style::default())
        .render();
    assert_eq!(first.content, wrapped.content);
    assert!(first.content.starts_with('⠙'));
}
