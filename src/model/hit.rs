//! Matched records and the columns they are displayed and exported under.

use crate::model::HitId;
use std::collections::HashMap;

/// Rendered in place of any missing or empty field.
pub const NOT_AVAILABLE: &str = "N/A";

// ===== Hit =====

/// One matched record returned by a non-aggregation search.
///
/// Identity is `id`. Field values are optional strings: `None` means the
/// source document did not carry the field (or carried `null`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    id: HitId,
    fields: HashMap<String, Option<String>>,
}

impl Hit {
    /// Create a hit from its id and source fields.
    pub fn new(id: HitId, fields: HashMap<String, Option<String>>) -> Self {
        Self { id, fields }
    }

    /// Hit identity.
    pub fn id(&self) -> &HitId {
        &self.id
    }

    /// Raw value of a source field, if present and non-empty.
    ///
    /// Empty strings are treated as absent so that every fallback
    /// (N/A, alias precedence) sees the same notion of "populated".
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|value| value.as_deref())
            .filter(|value| !value.is_empty())
    }

    /// Display value for a column, `N/A` when unpopulated.
    pub fn display(&self, column: Column) -> &str {
        column
            .source_fields()
            .iter()
            .find_map(|name| self.field(name))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// All seven column values in display order.
    pub fn row(&self) -> [&str; 7] {
        Column::ALL.map(|column| self.display(column))
    }
}

// ===== Column =====

/// Fixed display/export column.
///
/// Most columns read one source field; `AliasCrossReference` reads
/// `Cross-Reference` first and falls back to `Alias`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `Excluding Agency`
    ExcludingAgency,
    /// `Classification`
    Classification,
    /// `First`
    FirstName,
    /// `Last`
    LastName,
    /// `Zip Code`
    ZipCode,
    /// `Additional Comments`
    AdditionalComments,
    /// `Cross-Reference`, else `Alias`
    AliasCrossReference,
}

impl Column {
    /// Columns in display and export order.
    pub const ALL: [Column; 7] = [
        Column::ExcludingAgency,
        Column::Classification,
        Column::FirstName,
        Column::LastName,
        Column::ZipCode,
        Column::AdditionalComments,
        Column::AliasCrossReference,
    ];

    /// Header text.
    pub fn header(self) -> &'static str {
        match self {
            Column::ExcludingAgency => "Excluding Agency",
            Column::Classification => "Classification",
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::ZipCode => "Zip Code",
            Column::AdditionalComments => "Additional Comments",
            Column::AliasCrossReference => "Alias/Cross-Reference",
        }
    }

    /// Source fields consulted, first populated wins.
    pub fn source_fields(self) -> &'static [&'static str] {
        match self {
            Column::ExcludingAgency => &["Excluding Agency"],
            Column::Classification => &["Classification"],
            Column::FirstName => &["First"],
            Column::LastName => &["Last"],
            Column::ZipCode => &["Zip Code"],
            Column::AdditionalComments => &["Additional Comments"],
            Column::AliasCrossReference => &["Cross-Reference", "Alias"],
        }
    }
}

// ===== ResultSet =====

/// The current page of hits plus the server-side total.
///
/// `total` counts every match; `hits` only holds the requested page,
/// so `total >= hits.len()` in well-formed responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    hits: Vec<Hit>,
    total: u64,
}

impl ResultSet {
    /// Create a result set.
    pub fn new(hits: Vec<Hit>, total: u64) -> Self {
        Self { hits, total }
    }

    /// Hits on the current page, in server order.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    /// Total number of matches across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether the current page holds no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Ids of the hits on the current page.
    pub fn page_ids(&self) -> Vec<HitId> {
        self.hits.iter().map(|hit| hit.id().clone()).collect()
    }

    /// Find a hit on the current page by id.
    pub fn get(&self, id: &HitId) -> Option<&Hit> {
        self.hits.iter().find(|hit| hit.id() == id)
    }
}

// ===== Tests =====
