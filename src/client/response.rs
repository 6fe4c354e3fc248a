//! Decoding of search-template responses.
//!
//! The wire shape is only partially fixed: hit searches return a `hits`
//! section, the aggregation template returns `aggregations`, and either
//! may be missing. Decoding is lenient about everything the UI does not
//! read and strict about the pieces it does.

use crate::model::{
    AggregationBucket, Aggregations, BucketSource, Hit, HitId, ResultSet, SearchError, TimeBucket,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

// ===== SearchResponse =====

/// A decoded response body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    hits: Option<HitsSection>,
    #[serde(default)]
    aggregations: Option<RawAggregations>,
}

impl SearchResponse {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, SearchError> {
        serde_json::from_slice(body).map_err(|e| SearchError::Decode(e.to_string()))
    }

    /// Whether the body carried a `hits` section.
    pub fn has_hits(&self) -> bool {
        self.hits.is_some()
    }

    /// Convert the `hits` section into a [`ResultSet`].
    ///
    /// Fails with [`SearchError::UnexpectedShape`] when the section is
    /// missing, and with [`SearchError::Decode`] when a hit has an empty id.
    pub fn into_result_set(self) -> Result<ResultSet, SearchError> {
        let section = self.hits.ok_or(SearchError::UnexpectedShape("hits"))?;
        let total = section.total.map(Total::value);

        let hits = section
            .hits
            .into_iter()
            .map(RawHit::into_hit)
            .collect::<Result<Vec<_>, _>>()?;

        // Servers that omit the total still told us how many hits they sent.
        let total = total.unwrap_or(hits.len() as u64);
        Ok(ResultSet::new(hits, total))
    }

    /// Convert the `aggregations` section.
    ///
    /// Agency buckets come from `by_excluding_agency`, else `by_agency`;
    /// a response without either yields empty aggregations.
    pub fn into_aggregations(self) -> Aggregations {
        let Some(raw) = self.aggregations else {
            return Aggregations::default();
        };

        let (source, agg) = match (raw.by_excluding_agency, raw.by_agency) {
            (Some(agg), _) => (BucketSource::ByExcludingAgency, Some(agg)),
            (None, Some(agg)) => (BucketSource::ByAgency, Some(agg)),
            (None, None) => (BucketSource::Missing, None),
        };

        Aggregations {
            buckets: agg.map(RawBucketAgg::into_buckets).unwrap_or_default(),
            source,
            monthly: raw.by_month.map(|months| {
                months
                    .buckets
                    .into_iter()
                    .map(|bucket| TimeBucket {
                        label: bucket
                            .key_as_string
                            .unwrap_or_else(|| key_to_string(bucket.key)),
                        doc_count: bucket.doc_count,
                    })
                    .collect()
            }),
        }
    }
}

// ===== Hits =====

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct HitsSection {
    #[serde(default)]
    hits: Vec<RawHit>,
    #[serde(default)]
    total: Option<Total>,
}

/// `hits.total` is `{"value": n, "relation": ...}` on current servers and a
/// bare integer on older ones.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
enum Total {
    Count(u64),
    Object { value: u64 },
}

impl Total {
    fn value(self) -> u64 {
        match self {
            Total::Count(n) | Total::Object { value: n } => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source", default)]
    source: Map<String, Value>,
}

impl RawHit {
    fn into_hit(self) -> Result<Hit, SearchError> {
        let id = HitId::new(self.id).map_err(|e| SearchError::Decode(e.to_string()))?;
        let fields: HashMap<String, Option<String>> = self
            .source
            .into_iter()
            .map(|(name, value)| (name, field_value(value)))
            .collect();
        Ok(Hit::new(id, fields))
    }
}

fn field_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ===== Aggregations =====

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct RawAggregations {
    #[serde(default)]
    by_excluding_agency: Option<RawBucketAgg>,
    #[serde(default)]
    by_agency: Option<RawBucketAgg>,
    #[serde(default)]
    by_month: Option<RawHistogram>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawBucketAgg {
    #[serde(default)]
    buckets: Vec<RawBucket>,
}

impl RawBucketAgg {
    fn into_buckets(self) -> Vec<AggregationBucket> {
        self.buckets.into_iter().map(RawBucket::into_bucket).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawBucket {
    key: Value,
    #[serde(default)]
    doc_count: u64,
    #[serde(default)]
    by_exclusion_type: Option<RawBucketAgg>,
}

impl RawBucket {
    fn into_bucket(self) -> AggregationBucket {
        let bucket = AggregationBucket::new(key_to_string(self.key), self.doc_count);
        match self.by_exclusion_type {
            Some(nested) => bucket.with_exclusion_types(nested.into_buckets()),
            None => bucket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawHistogram {
    #[serde(default)]
    buckets: Vec<RawTimeBucket>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawTimeBucket {
    key: Value,
    #[serde(default)]
    key_as_string: Option<String>,
    #[serde(default)]
    doc_count: u64,
}

fn key_to_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
