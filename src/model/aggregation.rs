//! Aggregation buckets returned by the aggregation template.

/// A named group with a document count.
///
/// Agency buckets may carry nested exclusion-type buckets used by the
/// drill-down panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationBucket {
    /// Bucket key (agency name, exclusion type, ...).
    pub key: String,
    /// Number of documents in the bucket.
    pub doc_count: u64,
    /// Nested `by_exclusion_type` buckets, when the server returned them.
    pub exclusion_types: Option<Vec<AggregationBucket>>,
}

impl AggregationBucket {
    /// Create a leaf bucket without nested sub-buckets.
    pub fn new(key: impl Into<String>, doc_count: u64) -> Self {
        Self {
            key: key.into(),
            doc_count,
            exclusion_types: None,
        }
    }

    /// Attach nested exclusion-type buckets.
    pub fn with_exclusion_types(mut self, buckets: Vec<AggregationBucket>) -> Self {
        self.exclusion_types = Some(buckets);
        self
    }
}

/// A date-histogram bucket from the optional `by_month` aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    /// Display label (`key_as_string`, or the raw key when absent).
    pub label: String,
    /// Number of documents in the interval.
    pub doc_count: u64,
}

/// Which top-level aggregation the agency buckets were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketSource {
    /// `by_excluding_agency` (preferred).
    ByExcludingAgency,
    /// `by_agency` (fallback).
    ByAgency,
    /// Neither aggregation was present.
    #[default]
    Missing,
}

impl BucketSource {
    /// Aggregation name on the wire, if any.
    pub fn aggregation_name(self) -> Option<&'static str> {
        match self {
            BucketSource::ByExcludingAgency => Some("by_excluding_agency"),
            BucketSource::ByAgency => Some("by_agency"),
            BucketSource::Missing => None,
        }
    }
}

/// Aggregation data of the last successful aggregation search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregations {
    /// Agency buckets in server order.
    pub buckets: Vec<AggregationBucket>,
    /// Aggregation the buckets came from.
    pub source: BucketSource,
    /// Real monthly counts, when the template returns a `by_month` histogram.
    pub monthly: Option<Vec<TimeBucket>>,
}

impl Aggregations {
    /// Sum of `doc_count` across all agency buckets.
    pub fn total_doc_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.doc_count).sum()
    }

    /// Bucket at `index`, if in range.
    pub fn bucket(&self, index: usize) -> Option<&AggregationBucket> {
        self.buckets.get(index)
    }
}
