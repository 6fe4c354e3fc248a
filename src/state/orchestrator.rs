//! Search lifecycle state machine (pure).
//!
//! SearchOrchestrator owns the active mode, the form, the current page and
//! everything derived from the last response. It never performs I/O:
//! a search action returns a [`PendingSearch`] for the caller to dispatch,
//! and the outcome is fed back through [`SearchOrchestrator::complete`].
//!
//! Every dispatched search carries a generation number. Only the outcome of
//! the most recent generation is applied; anything older is stale and
//! dropped, so a slow response can never overwrite a newer one.

use crate::charts::{self, ChartSet};
use crate::client::SearchResponse;
use crate::export::{self, ExportArtifact};
use crate::model::{
    AggregationBucket, Aggregations, ExportError, FormField, HitId, ResultSet, SearchError,
    SearchForm, SearchMode,
};
use crate::query::{self, pagination, PageItem, SearchRequest};
use crate::state::SelectionSet;
use tracing::{debug, info, warn};

// ===== Types =====

/// Lifecycle of the latest search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Nothing searched since the last reset.
    #[default]
    Idle,
    /// A request is in flight.
    Loading {
        /// Generation of the in-flight request.
        generation: u64,
        /// Page requested; becomes current only when the search succeeds.
        page: u32,
    },
    /// The latest search succeeded.
    Success,
    /// The latest search failed; prior data is kept.
    Failed {
        /// Message shown to the operator.
        message: &'static str,
    },
}

/// A search the caller must dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Generation to report back with the outcome.
    pub generation: u64,
    /// Request to send.
    pub request: SearchRequest,
}

/// What [`SearchOrchestrator::complete`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome belonged to the latest search and was applied.
    Applied,
    /// A newer search was started since; the outcome was dropped.
    Stale,
}

/// The agency bucket opened for detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillDown {
    /// Bucket index in the aggregation result.
    pub index: usize,
    /// Copy of the bucket.
    pub bucket: AggregationBucket,
}

// ===== SearchOrchestrator =====

/// Mode, form, page and request lifecycle.
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    mode: SearchMode,
    form: SearchForm,
    page: u32,
    status: SearchStatus,
    results: ResultSet,
    selection: SelectionSet,
    aggregations: Aggregations,
    drill_down: Option<DrillDown>,
    generation: u64,
}

impl SearchOrchestrator {
    /// Fresh orchestrator in `mode`, nothing searched.
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            form: SearchForm::new(),
            page: 1,
            status: SearchStatus::Idle,
            results: ResultSet::default(),
            selection: SelectionSet::new(),
            aggregations: Aggregations::default(),
            drill_down: None,
            generation: 0,
        }
    }

    // ----- Mode and form -----

    /// Switch mode. Switching to a different mode resets all search state.
    pub fn set_mode(&mut self, mode: SearchMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = %self.mode, to = %mode, "Switching search mode");
        self.mode = mode;
        self.reset_search_state();
    }

    /// Clear form values, results, selection, aggregations, drill-down and
    /// error, return to page 1 and invalidate any in-flight request.
    pub fn reset_search_state(&mut self) {
        self.form.clear();
        self.results = ResultSet::default();
        self.selection.clear();
        self.aggregations = Aggregations::default();
        self.drill_down = None;
        self.page = 1;
        self.status = SearchStatus::Idle;
        self.generation += 1;
    }

    /// Mutable access to the form.
    pub fn form_mut(&mut self) -> &mut SearchForm {
        &mut self.form
    }

    /// Replace one field value.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    // ----- Searching -----

    /// Start a new search from page 1.
    pub fn submit(&mut self) -> PendingSearch {
        self.execute_search(1)
    }

    /// The single entry point for every search.
    ///
    /// Builds the request from the current mode and field values, stamps it
    /// with a new generation and enters `Loading`. The current page stays
    /// on the last loaded one until the response is applied.
    pub fn execute_search(&mut self, page: u32) -> PendingSearch {
        let page = page.max(1);
        self.generation += 1;
        self.status = SearchStatus::Loading {
            generation: self.generation,
            page,
        };
        let request = query::build_request(self.mode, &self.form, page);
        info!(
            mode = self.mode.template_id(),
            page,
            generation = self.generation,
            "Dispatching search"
        );
        PendingSearch {
            generation: self.generation,
            request,
        }
    }

    /// Jump to `page`, clamped to the valid range, re-running the search.
    ///
    /// `None` when there is nothing to page through, in aggregation mode,
    /// or while a request is in flight.
    pub fn go_to_page(&mut self, page: u32) -> Option<PendingSearch> {
        let total = self.total_pages();
        if total == 0 || self.mode.is_aggregation() || self.is_loading() {
            return None;
        }
        Some(self.execute_search(page.clamp(1, total)))
    }

    /// Next page, if not on the last one.
    pub fn next_page(&mut self) -> Option<PendingSearch> {
        if self.page >= self.total_pages() {
            return None;
        }
        self.go_to_page(self.page + 1)
    }

    /// Previous page, if not on the first one.
    pub fn prev_page(&mut self) -> Option<PendingSearch> {
        if self.page <= 1 {
            return None;
        }
        self.go_to_page(self.page - 1)
    }

    /// First page, if not already there.
    pub fn first_page(&mut self) -> Option<PendingSearch> {
        if self.page <= 1 {
            return None;
        }
        self.go_to_page(1)
    }

    /// Last page, if not already there.
    pub fn last_page(&mut self) -> Option<PendingSearch> {
        let last = self.total_pages();
        if self.page >= last {
            return None;
        }
        self.go_to_page(last)
    }

    /// Apply the outcome of search `generation`.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<SearchResponse, SearchError>,
    ) -> Completion {
        let requested = match self.status {
            SearchStatus::Loading { generation: g, page } if g == generation => page,
            _ => {
                debug!(
                    generation,
                    latest = self.generation,
                    "Dropping stale search response"
                );
                return Completion::Stale;
            }
        };

        let applied = outcome.and_then(|response| self.apply(response, requested));
        match applied {
            Ok(()) => {
                self.status = SearchStatus::Success;
            }
            Err(err) => {
                warn!(error = %err, mode = self.mode.template_id(), "Search failed");
                self.status = SearchStatus::Failed {
                    message: err.user_message(),
                };
            }
        }
        Completion::Applied
    }

    fn apply(&mut self, response: SearchResponse, page: u32) -> Result<(), SearchError> {
        if self.mode.is_aggregation() {
            let aggregations = response.into_aggregations();
            info!(
                buckets = aggregations.buckets.len(),
                source = ?aggregations.source,
                "Aggregation search completed"
            );
            self.aggregations = aggregations;
            self.drill_down = None;
        } else {
            let results = response.into_result_set()?;
            info!(
                hits = results.hits().len(),
                total = results.total(),
                page,
                "Search completed"
            );
            self.page = page;
            self.results = results;
            self.selection.clear();
            self.drill_down = None;
        }
        Ok(())
    }

    // ----- Selection -----

    /// Toggle export selection of `id`.
    pub fn toggle_selection(&mut self, id: &HitId) {
        self.selection.toggle(id);
    }

    /// Header checkbox: `true` selects exactly the current page, `false` clears.
    pub fn set_all_selected(&mut self, checked: bool) {
        if checked {
            self.selection.select_all(self.results.page_ids());
        } else {
            self.selection.clear();
        }
    }

    // ----- Drill-down -----

    /// Open detail for bucket `index`.
    ///
    /// Selecting the bucket already shown closes it; an out-of-range index
    /// is ignored.
    pub fn select_bucket(&mut self, index: usize) {
        if self.drill_down.as_ref().is_some_and(|d| d.index == index) {
            self.drill_down = None;
            return;
        }
        if let Some(bucket) = self.aggregations.bucket(index) {
            self.drill_down = Some(DrillDown {
                index,
                bucket: bucket.clone(),
            });
        }
    }

    /// Close the detail panel.
    pub fn close_drill_down(&mut self) {
        self.drill_down = None;
    }

    // ----- Export -----

    /// Encode the selected hits, `None` when nothing is selected.
    pub fn export(&self) -> Result<Option<ExportArtifact>, ExportError> {
        export::export(&self.results, &self.selection)
    }

    // ----- Queries -----

    /// Active mode.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Current form values.
    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    /// 1-based page of the rows currently held.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Lifecycle status.
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, SearchStatus::Loading { .. })
    }

    /// Error message of the latest search, if it failed.
    pub fn error_message(&self) -> Option<&'static str> {
        match self.status {
            SearchStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Hits of the last successful hit search.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Number of result pages.
    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.results.total())
    }

    /// Compact page sequence for the pagination bar.
    pub fn page_numbers(&self) -> Vec<PageItem> {
        pagination::page_numbers(self.total_pages(), self.page)
    }

    /// Rows shown on the current page.
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        pagination::visible_range(self.page, self.results.total())
    }

    /// Whether pagination controls are shown at all.
    pub fn shows_pagination(&self) -> bool {
        !self.mode.is_aggregation() && self.total_pages() > 1
    }

    /// Export selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Header checkbox state.
    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.results.hits().len())
    }

    /// Aggregations of the last successful aggregation search.
    pub fn aggregations(&self) -> &Aggregations {
        &self.aggregations
    }

    /// Chart series derived from the current aggregations.
    pub fn chart_series(&self) -> ChartSet {
        charts::chart_series(&self.aggregations)
    }

    /// Open drill-down, if any.
    pub fn drill_down(&self) -> Option<&DrillDown> {
        self.drill_down.as_ref()
    }

    /// "No Records Found": the latest hit search succeeded with zero hits.
    pub fn shows_no_records(&self) -> bool {
        !self.mode.is_aggregation()
            && self.status == SearchStatus::Success
            && self.results.is_empty()
    }
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new(SearchMode::default())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
