//! Aggregation → chart series transform (pure).
//!
//! [`chart_series`] is recomputed from the current [`Aggregations`] on
//! every render and never stored. The view layer consumes the series as
//! plain data (labels, values, colors, titles); how they are drawn is its
//! business.

pub mod palette;

pub use palette::ChartColor;

use crate::model::{AggregationBucket, Aggregations};

/// Number of buckets shown by the doughnut and polar charts.
pub const TOP_N: usize = 5;

/// Labels of the monthly trend placeholder.
pub const TREND_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Which of the four charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    /// Document count per agency, all buckets.
    #[default]
    Bar,
    /// Top-5 distribution.
    Doughnut,
    /// Monthly trend.
    Trend,
    /// Top-5 distribution, polar area.
    Polar,
}

impl ChartKind {
    /// Charts in tab order.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Doughnut,
        ChartKind::Trend,
        ChartKind::Polar,
    ];

    /// Chart heading.
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Document Count by Agency",
            ChartKind::Doughnut => "Top 5 Agencies Distribution",
            ChartKind::Trend => "Monthly Trend",
            ChartKind::Polar => "Agency Distribution (Polar)",
        }
    }

    /// Whether clicking an element of this chart opens agency drill-down.
    pub fn supports_drill_down(self) -> bool {
        !matches!(self, ChartKind::Trend)
    }

    /// Next chart tab, wrapping.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous chart tab, wrapping.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One plotted element.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Category label (bucket key).
    pub label: String,
    /// Plotted value (doc count).
    pub value: u64,
    /// Fill color.
    pub color: ChartColor,
    /// Outline color.
    pub border: ChartColor,
}

/// A categorical series (bar, doughnut, polar).
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    /// Chart this series feeds.
    pub kind: ChartKind,
    /// Points in bucket order. Point `i` corresponds to bucket `i`.
    pub points: Vec<SeriesPoint>,
}

impl CategorySeries {
    /// Sum of all plotted values.
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Largest plotted value (0 when empty).
    pub fn max(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    /// Whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tooltip text for the point at `index`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let point = self.points.get(index)?;
        Some(match self.kind {
            ChartKind::Bar => format!("Count: {}", point.value),
            _ => format!("{}: {} documents", point.label, point.value),
        })
    }
}

/// The monthly trend series.
///
/// There is no temporal aggregation unless the template returns a
/// `by_month` histogram; without one the trend is a labelled placeholder
/// with no values rather than invented numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendSeries {
    /// Real counts from the `by_month` aggregation.
    Monthly {
        /// Interval labels.
        labels: Vec<String>,
        /// Doc count per interval.
        values: Vec<u64>,
    },
    /// No temporal data available.
    Placeholder {
        /// Fixed month labels.
        labels: Vec<String>,
    },
}

impl TrendSeries {
    /// Axis labels.
    pub fn labels(&self) -> &[String] {
        match self {
            TrendSeries::Monthly { labels, .. } | TrendSeries::Placeholder { labels } => labels,
        }
    }

    /// Plotted values; empty for the placeholder.
    pub fn values(&self) -> &[u64] {
        match self {
            TrendSeries::Monthly { values, .. } => values,
            TrendSeries::Placeholder { .. } => &[],
        }
    }

    /// Whether this is the placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TrendSeries::Placeholder { .. })
    }
}

/// All four series derived from one aggregation result.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    /// Every bucket.
    pub bar: CategorySeries,
    /// First five buckets.
    pub doughnut: CategorySeries,
    /// First five buckets.
    pub polar: CategorySeries,
    /// Monthly trend.
    pub trend: TrendSeries,
}

impl ChartSet {
    /// Categorical series for a chart kind (`None` for the trend).
    pub fn category(&self, kind: ChartKind) -> Option<&CategorySeries> {
        match kind {
            ChartKind::Bar => Some(&self.bar),
            ChartKind::Doughnut => Some(&self.doughnut),
            ChartKind::Polar => Some(&self.polar),
            ChartKind::Trend => None,
        }
    }
}

/// Derive every chart series from the aggregation data.
pub fn chart_series(aggregations: &Aggregations) -> ChartSet {
    let top = &aggregations.buckets[..aggregations.buckets.len().min(TOP_N)];
    ChartSet {
        bar: category(ChartKind::Bar, &aggregations.buckets, palette::BAR),
        doughnut: category(ChartKind::Doughnut, top, palette::DOUGHNUT),
        polar: category(ChartKind::Polar, top, palette::POLAR),
        trend: trend(aggregations),
    }
}

/// Percentage share of `value` in `total`, 0 when the total is 0.
pub fn share_percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    value as f64 * 100.0 / total as f64
}

fn category(kind: ChartKind, buckets: &[AggregationBucket], colors: &[ChartColor]) -> CategorySeries {
    let points = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let color = palette::cycle(colors, i);
            SeriesPoint {
                label: bucket.key.clone(),
                value: bucket.doc_count,
                color,
                border: match kind {
                    ChartKind::Bar => color.opaque(),
                    _ => palette::SLICE_BORDER,
                },
            }
        })
        .collect();
    CategorySeries { kind, points }
}

fn trend(aggregations: &Aggregations) -> TrendSeries {
    match &aggregations.monthly {
        Some(months) => TrendSeries::Monthly {
            labels: months.iter().map(|m| m.label.clone()).collect(),
            values: months.iter().map(|m| m.doc_count).collect(),
        },
        None => TrendSeries::Placeholder {
            labels: TREND_MONTHS.iter().map(|m| m.to_string()).collect(),
        },
    }
}

#[cfg(test)]
#[path = "charts_tests.rs"]
mod tests;
