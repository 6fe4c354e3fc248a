//! Export selection.
//!
//! SelectionSet holds the ids of hits marked for export. It only ever
//! refers to hits of the current page: the orchestrator clears it on
//! every successful hit search and on mode change.

use crate::model::HitId;
use std::collections::HashSet;

/// Ids marked for export, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<HitId>,
    // Membership index over `ids`.
    index: HashSet<HitId>,
}

impl SelectionSet {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &HitId) {
        if self.index.remove(id) {
            self.ids.retain(|selected| selected != id);
        } else {
            self.index.insert(id.clone());
            self.ids.push(id.clone());
        }
    }

    /// Replace the selection with exactly `page_ids`.
    ///
    /// Duplicates in `page_ids` are kept once.
    pub fn select_all(&mut self, page_ids: impl IntoIterator<Item = HitId>) {
        self.clear();
        for id in page_ids {
            if self.index.insert(id.clone()) {
                self.ids.push(id);
            }
        }
    }

    /// Drop every id.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.index.clear();
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: &HitId) -> bool {
        self.index.contains(id)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[HitId] {
        &self.ids
    }

    /// Header checkbox state: the page is non-empty and every hit on it is selected.
    pub fn is_all_selected(&self, page_hit_count: usize) -> bool {
        page_hit_count > 0 && self.ids.len() == page_hit_count
    }
}
