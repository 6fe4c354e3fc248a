//! Event loop tests: key routing, dispatch, outcome handling and export.

use super::*;
use crate::client::SearchResponse;
use crate::model::{SearchError, SearchMode};
use crate::query::SearchRequest;
use crate::state::NoticeKind;
use crate::view::test_support::buffer_to_string;
use crossterm::event::{KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use serde_json::json;
use std::sync::Mutex;
use std::time::Instant;

// ===== Test Helpers =====

/// Search backend answering every request with the same body.
struct CannedBackend {
    body: Vec<u8>,
    seen: Mutex<Vec<SearchRequest>>,
}

impl CannedBackend {
    fn hits(count: usize, total: u64) -> Self {
        let hits: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "_id": format!("hit-{i}"),
                    "_source": { "First": format!("Person{i}"), "Last": "Doe" }
                })
            })
            .collect();
        let body = json!({ "hits": { "total": { "value": total }, "hits": hits } });
        Self {
            body: body.to_string().into_bytes(),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            body: b"not json".to_vec(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl SearchBackend for CannedBackend {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        SearchResponse::from_slice(&self.body)
    }
}

fn create_test_app(backend: Arc<CannedBackend>, export_dir: PathBuf) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
    TuiApp::new_with(
        terminal,
        AppState::new(SearchMode::BasicPerson),
        KeyBindings::default(),
        SearchDispatcher::new(backend),
        Styles::default(),
        export_dir,
    )
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
    for ch in text.chars() {
        app.handle_key(press(KeyCode::Char(ch)));
    }
}

/// Poll until an outcome is applied or five seconds pass.
fn wait_for_outcome(app: &mut TuiApp<TestBackend>) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if app.poll_outcomes() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

/// In-memory log sink for a thread-local tracing subscriber.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn text(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

// ===== Errors =====

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

// ===== Key routing =====

#[test]
fn typing_goes_into_the_form() {
    let mut app = create_test_app(Arc::new(CannedBackend::hits(0, 0)), PathBuf::from("."));
    type_text(&mut app, "qa");

    // 'q' is text while the form has focus, not quit.
    assert_eq!(app.state().search.form().get(crate::model::FormField::SearchText), "qa");
}

#[test]
fn ctrl_c_quits_from_the_form() {
    let mut app = create_test_app(Arc::new(CannedBackend::hits(0, 0)), PathBuf::from("."));
    let quit = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(quit);
}

#[test]
fn q_quits_from_results() {
    let mut app = create_test_app(Arc::new(CannedBackend::hits(0, 0)), PathBuf::from("."));
    app.handle_key(press(KeyCode::Esc));
    assert_eq!(app.state().focus, FocusPane::Results);
    assert!(app.handle_key(press(KeyCode::Char('q'))));
}

#[test]
fn key_release_is_ignored() {
    let mut app = create_test_app(Arc::new(CannedBackend::hits(0, 0)), PathBuf::from("."));
    let release = KeyEvent {
        code: KeyCode::Char('x'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    app.handle_key(release);
    assert!(app.state().search.form().is_blank());
}

#[test]
fn esc_closes_help_overlay() {
    let mut app = create_test_app(Arc::new(CannedBackend::hits(0, 0)), PathBuf::from("."));
    app.handle_key(press(KeyCode::Esc));
    app.handle_key(press(KeyCode::Char('?')));
    assert!(app.state().help_visible);

    app.handle_key(press(KeyCode::Esc));
    assert!(!app.state().help_visible);
}

// ===== Search lifecycle =====

#[test]
fn enter_dispatches_and_outcome_is_applied() {
    let backend = Arc::new(CannedBackend::hits(10, 42));
    let mut app = create_test_app(Arc::clone(&backend), PathBuf::from("."));

    type_text(&mut app, "Doe");
    app.handle_key(press(KeyCode::Enter));
    assert!(app.state().search.is_loading());

    assert!(wait_for_outcome(&mut app));
    assert!(!app.state().search.is_loading());
    assert_eq!(app.state().search.results().total(), 42);
    assert_eq!(app.state().search.total_pages(), 5);

    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].offset(), 0);
}

#[test]
fn next_page_requests_following_offset() {
    let backend = Arc::new(CannedBackend::hits(10, 42));
    let mut app = create_test_app(Arc::clone(&backend), PathBuf::from("."));

    app.handle_key(press(KeyCode::Enter));
    assert!(wait_for_outcome(&mut app));
    app.handle_key(press(KeyCode::Char('l')));
    assert!(wait_for_outcome(&mut app));

    assert_eq!(app.state().search.page(), 2);
    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.last().map(SearchRequest::offset), Some(10));
}

#[test]
fn failed_search_shows_generic_error() {
    let mut app = create_test_app(Arc::new(CannedBackend::failing()), PathBuf::from("."));
    app.handle_key(press(KeyCode::Enter));
    assert!(wait_for_outcome(&mut app));

    assert_eq!(
        app.state().search.error_message(),
        Some(SearchError::USER_MESSAGE)
    );
    app.draw().unwrap();
    let text = buffer_to_string(app.backend().buffer());
    assert!(text.contains(SearchError::USER_MESSAGE));
}

#[test]
fn draw_renders_results_table() {
    let mut app = create_test_app(Arc::new(CannedBackend::hits(3, 3)), PathBuf::from("."));
    app.handle_key(press(KeyCode::Enter));
    assert!(wait_for_outcome(&mut app));

    app.draw().unwrap();
    let text = buffer_to_string(app.backend().buffer());
    assert!(text.contains("Person2"));
    assert!(text.contains("Showing 1 - 3 of 3 results"));
}

// ===== Export =====

#[test]
fn export_writes_selected_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_test_app(
        Arc::new(CannedBackend::hits(3, 3)),
        dir.path().to_path_buf(),
    );
    app.handle_key(press(KeyCode::Enter));
    assert!(wait_for_outcome(&mut app));

    app.handle_key(press(KeyCode::Char(' ')));
    app.handle_key(press(KeyCode::Char('e')));

    let notice = app.state().notice.clone().expect("export notice");
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(notice.text.starts_with("Exported 1 records"));
    assert!(dir.path().join("selected_records.xlsx").exists());
}

#[test]
fn export_without_selection_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_test_app(
        Arc::new(CannedBackend::hits(3, 3)),
        dir.path().to_path_buf(),
    );
    app.handle_key(press(KeyCode::Enter));
    assert!(wait_for_outcome(&mut app));

    app.handle_key(press(KeyCode::Char('e')));

    assert!(app.state().notice.is_none());
    assert!(!dir.path().join("selected_records.xlsx").exists());
}

// ===== Logging =====

#[test]
fn failed_outcome_is_logged_once_and_stale_one_not_at_all() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut app = create_test_app(Arc::new(CannedBackend::failing()), PathBuf::from("."));
        let first = app.app_state.submit();
        app.dispatcher.dispatch(first);
        let second = app.app_state.submit();
        app.dispatcher.dispatch(second);

        // Drain until both outcomes have been handled.
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline
            && (app.state().search.is_loading()
                || !log.text().contains("Dropping stale search response"))
        {
            app.poll_outcomes();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.state().search.is_loading());
    });

    let text = log.text();
    assert!(text.contains("Dropping stale search response"));
    assert_eq!(text.matches("Search failed").count(), 1, "log was:\n{text}");
}
