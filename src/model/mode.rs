//! Search modes and the form fields each mode activates.
//!
//! A [`SearchMode`] is a closed tag: it decides which inputs are shown,
//! which template the server runs and which payload shape is emitted.
//! All per-mode behavior is an exhaustive `match`, never a string switch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== SearchMode =====

/// One of the six mutually exclusive search variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Free-text person search (`basic_person_search`).
    #[default]
    #[serde(rename = "basic_person_search")]
    BasicPerson,
    /// Name plus state/country filters (`advanced_person_search`).
    #[serde(rename = "advanced_person_search")]
    AdvancedPerson,
    /// Agency and exclusion type filters (`exclusion_search`).
    #[serde(rename = "exclusion_search")]
    Exclusion,
    /// Creation date window (`date_range_search`).
    #[serde(rename = "date_range_search")]
    DateRange,
    /// Classification term plus optional free text (`classification_search`).
    #[serde(rename = "classification_search")]
    Classification,
    /// Bucket counts by agency; no hits, no pagination (`aggregation_template`).
    #[serde(rename = "aggregation_template")]
    AggregationTemplate,
}

impl SearchMode {
    /// All modes in selector order.
    pub const ALL: [SearchMode; 6] = [
        SearchMode::BasicPerson,
        SearchMode::AdvancedPerson,
        SearchMode::Exclusion,
        SearchMode::DateRange,
        SearchMode::Classification,
        SearchMode::AggregationTemplate,
    ];

    /// Stored search-template id the server executes for this mode.
    pub fn template_id(self) -> &'static str {
        match self {
            SearchMode::BasicPerson => "basic_person_search",
            SearchMode::AdvancedPerson => "advanced_person_search",
            SearchMode::Exclusion => "exclusion_search",
            SearchMode::DateRange => "date_range_search",
            SearchMode::Classification => "classification_search",
            SearchMode::AggregationTemplate => "aggregation_template",
        }
    }

    /// Human-readable label for the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::BasicPerson => "Basic Person Search",
            SearchMode::AdvancedPerson => "Advanced Person Search",
            SearchMode::Exclusion => "Exclusion Search",
            SearchMode::DateRange => "Date Range Search",
            SearchMode::Classification => "Classification/Entity Search",
            SearchMode::AggregationTemplate => "Aggregation Template",
        }
    }

    /// Input fields shown for this mode, in display order.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            SearchMode::BasicPerson => &[FormField::SearchText],
            SearchMode::AdvancedPerson => {
                &[FormField::SearchText, FormField::State, FormField::Country]
            }
            SearchMode::Exclusion => &[FormField::Agency, FormField::ExclusionType],
            SearchMode::DateRange => &[FormField::StartDate, FormField::EndDate],
            SearchMode::Classification => &[FormField::Classification, FormField::SearchText],
            SearchMode::AggregationTemplate => &[],
        }
    }

    /// Whether responses for this mode carry aggregation buckets instead of hits.
    pub fn is_aggregation(self) -> bool {
        matches!(self, SearchMode::AggregationTemplate)
    }

    /// Next mode in selector order, wrapping from last to first.
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous mode in selector order, wrapping from first to last.
    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            SearchMode::BasicPerson => 0,
            SearchMode::AdvancedPerson => 1,
            SearchMode::Exclusion => 2,
            SearchMode::DateRange => 3,
            SearchMode::Classification => 4,
            SearchMode::AggregationTemplate => 5,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown template id passed to [`SearchMode::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown search mode '{0}'")]
pub struct UnknownSearchMode(pub String);

impl FromStr for SearchMode {
    type Err = UnknownSearchMode;

    /// Parse a template id (`exclusion_search`) into a mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.template_id() == s)
            .ok_or_else(|| UnknownSearchMode(s.to_string()))
    }
}

// ===== FormField =====

/// A text input the operator can fill in.
///
/// The set of active fields depends on the mode; inactive fields keep
/// no value because a mode change clears the whole form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Free text; sent as `query_string` or `name` depending on mode.
    SearchText,
    /// US state (advanced person search).
    State,
    /// Country (advanced person search).
    Country,
    /// Excluding agency (exclusion search).
    Agency,
    /// Exclusion type (exclusion search).
    ExclusionType,
    /// Start of the date window, `YYYY-MM-DD`.
    StartDate,
    /// End of the date window, `YYYY-MM-DD`.
    EndDate,
    /// Classification term, e.g. `Individual`.
    Classification,
}

impl FormField {
    /// Every field, used when clearing the form.
    pub const ALL: [FormField; 8] = [
        FormField::SearchText,
        FormField::State,
        FormField::Country,
        FormField::Agency,
        FormField::ExclusionType,
        FormField::StartDate,
        FormField::EndDate,
        FormField::Classification,
    ];

    /// Placeholder hint shown while the input is empty.
    pub fn placeholder(self, mode: SearchMode) -> &'static str {
        match (self, mode) {
            (FormField::SearchText, SearchMode::BasicPerson) => {
                "Enter search text (use quotes for exact match)"
            }
            (FormField::SearchText, SearchMode::AdvancedPerson) => "Enter name",
            (FormField::SearchText, _) => "Enter search text",
            (FormField::State, _) => "Enter state",
            (FormField::Country, _) => "Enter country",
            (FormField::Agency, _) => "Enter agency",
            (FormField::ExclusionType, _) => "Enter exclusion type",
            (FormField::StartDate, _) => "Start date (YYYY-MM-DD)",
            (FormField::EndDate, _) => "End date (YYYY-MM-DD)",
            (FormField::Classification, _) => "Enter Classification (e.g. Individual)",
        }
    }

    /// Short label rendered in front of the input box.
    pub fn label(self, mode: SearchMode) -> &'static str {
        match (self, mode) {
            (FormField::SearchText, SearchMode::AdvancedPerson) => "Name",
            (FormField::SearchText, _) => "Search",
            (FormField::State, _) => "State",
            (FormField::Country, _) => "Country",
            (FormField::Agency, _) => "Agency",
            (FormField::ExclusionType, _) => "Exclusion Type",
            (FormField::StartDate, _) => "Start Date",
            (FormField::EndDate, _) => "End Date",
            (FormField::Classification, _) => "Classification",
        }
    }
}

// ===== Tests =====
