//! Background execution of searches.
//!
//! Each dispatched search runs on its own short-lived thread and posts a
//! [`SearchOutcome`] back over an mpsc channel. The UI thread drains the
//! channel between frames; it never blocks on the network.

use crate::client::{SearchBackend, SearchResponse};
use crate::model::SearchError;
use crate::state::PendingSearch;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Result of one dispatched search, tagged with its generation.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Generation the search was stamped with.
    pub generation: u64,
    /// Decoded response or failure.
    pub result: Result<SearchResponse, SearchError>,
}

/// Runs searches off the UI thread.
pub struct SearchDispatcher {
    backend: Arc<dyn SearchBackend>,
    tx: Sender<SearchOutcome>,
    rx: Receiver<SearchOutcome>,
}

impl SearchDispatcher {
    /// Dispatcher over `backend`.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { backend, tx, rx }
    }

    /// Run `pending` on a background thread.
    ///
    /// There is no cancellation: a superseded search still completes and
    /// its outcome is dropped as stale by the orchestrator.
    pub fn dispatch(&self, pending: PendingSearch) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let generation = pending.generation;

        let spawned = std::thread::Builder::new()
            .name(format!("search-{generation}"))
            .spawn(move || {
                let result = backend.search(&pending.request);
                let _ = tx.send(SearchOutcome { generation, result });
            });

        if let Err(err) = spawned {
            error!(error = %err, generation, "Failed to spawn search thread");
            let _ = self.tx.send(SearchOutcome {
                generation,
                result: Err(SearchError::Transport(format!(
                    "could not start search: {err}"
                ))),
            });
        }
    }

    /// Every outcome that has arrived, without blocking.
    pub fn drain(&self) -> Vec<SearchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}
