//! Aggregation view: chart tabs, the active chart and the drill-down panel.
//!
//! Terminals cannot draw doughnuts or polar areas, so those two render as
//! ranked share lists: the doughnut shows each slice's share of the total,
//! the polar list scales each bar to the largest bucket.

use crate::charts::{palette, share_percent, CategorySeries, ChartKind, TrendSeries};
use crate::state::{AppState, DrillDown, FocusPane, SearchStatus};
use crate::view::constants::{
    CHART_TABS_HEIGHT, DRILL_DOWN_WIDTH_PERCENT, MAX_BAR_WIDTH, MIN_BAR_WIDTH,
};
use crate::view::results::truncate;
use crate::view::{tabs, Styles};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Shown before the aggregation has been run.
pub const RUN_HINT: &str = "Press r to run the aggregation template.";

/// Shown when the aggregation returned no agency buckets.
pub const NO_BUCKETS: &str = "No aggregation buckets returned";

/// Shown instead of invented numbers when there is no monthly data.
pub const TREND_UNAVAILABLE: &str = "Monthly trend not available";

/// Width of the proportional bar in share lists.
const SHARE_BAR_WIDTH: usize = 20;

/// Render the aggregation content area.
pub fn render_aggregation(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles) {
    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(CHART_TABS_HEIGHT), Constraint::Min(0)]).areas(area);
    tabs::render_chart_tabs(frame, tabs_area, state.chart, styles);

    let search = &state.search;
    if search.aggregations().buckets.is_empty() {
        let text = if *search.status() == SearchStatus::Success {
            NO_BUCKETS
        } else {
            RUN_HINT
        };
        let paragraph = Paragraph::new(Span::styled(text, styles.muted))
            .alignment(Alignment::Center)
            .block(chart_block(state.chart, false, styles));
        frame.render_widget(paragraph, body_area);
        return;
    }

    let (chart_area, panel_area) = match search.drill_down() {
        Some(_) => {
            let [chart, panel] = Layout::horizontal([
                Constraint::Percentage(100 - DRILL_DOWN_WIDTH_PERCENT),
                Constraint::Percentage(DRILL_DOWN_WIDTH_PERCENT),
            ])
            .areas(body_area);
            (chart, Some(panel))
        }
        None => (body_area, None),
    };

    let [plot_area, tooltip_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(chart_area);

    let charts = search.chart_series();
    let focused = state.focus == FocusPane::Results;
    let cursor = focused.then_some(state.bucket_cursor);

    match charts.category(state.chart) {
        Some(series) => {
            match series.kind {
                ChartKind::Bar => render_bar_chart(frame, plot_area, series, cursor, styles),
                _ => render_share_list(frame, plot_area, series, cursor, styles),
            }
            if let Some(tooltip) = series.tooltip(state.bucket_cursor) {
                let line = Line::from(vec![
                    Span::raw(tooltip),
                    Span::styled("   Enter: details", styles.muted),
                ]);
                frame.render_widget(Paragraph::new(line), tooltip_area);
            }
        }
        None => render_trend(frame, plot_area, &charts.trend, styles),
    }

    if let (Some(panel), Some(drill)) = (panel_area, search.drill_down()) {
        render_drill_down(frame, panel, drill, styles);
    }
}

fn chart_block(kind: ChartKind, focused: bool, styles: &Styles) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(styles.pane_border(focused))
        .title(format!(" {} ", kind.title()))
}

// ===== Bar chart =====

/// Bar width that fits `count` bars into `inner_width` cells.
pub fn bar_width(inner_width: u16, count: usize) -> u16 {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    // One cell of gap per bar.
    (inner_width / count)
        .saturating_sub(1)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

fn render_bar_chart(
    frame: &mut Frame,
    area: Rect,
    series: &CategorySeries,
    cursor: Option<usize>,
    styles: &Styles,
) {
    let block = chart_block(series.kind, cursor.is_some(), styles);
    let width = bar_width(block.inner(area).width, series.points.len());

    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let fill = styles.chart_style(point.color);
            let label_style = if cursor == Some(index) {
                styles.cursor
            } else {
                styles.muted
            };
            Bar::default()
                .value(point.value)
                .label(Line::styled(
                    truncate(&point.label, usize::from(width)),
                    label_style,
                ))
                .style(fill)
                .value_style(fill.add_modifier(Modifier::REVERSED))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(series.max().max(1));

    frame.render_widget(chart, area);
}

// ===== Share lists (doughnut, polar) =====

/// One formatted share-list row, without styling.
pub fn share_row(label: &str, value: u64, total: u64, max: u64, kind: ChartKind) -> String {
    let fraction = match kind {
        ChartKind::Polar => share_percent(value, max) / 100.0,
        _ => share_percent(value, total) / 100.0,
    };
    let filled = (fraction * SHARE_BAR_WIDTH as f64).round() as usize;
    let bar = "■".repeat(filled.min(SHARE_BAR_WIDTH));
    format!(
        "{:<24} {:>7}  {:>5.1}%  {}",
        truncate(label, 24),
        value,
        share_percent(value, total),
        bar
    )
}

fn render_share_list(
    frame: &mut Frame,
    area: Rect,
    series: &CategorySeries,
    cursor: Option<usize>,
    styles: &Styles,
) {
    let total = series.total();
    let max = series.max();

    let mut lines: Vec<Line> = series
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let swatch = Span::styled("● ", styles.chart_style(point.color));
            let row = share_row(&point.label, point.value, total, max, series.kind);
            let row_style = if cursor == Some(index) {
                styles.cursor
            } else {
                styles.chart_style(point.border)
            };
            Line::from(vec![swatch, Span::styled(row, row_style)])
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Total: {total} documents"),
        styles.section,
    )));

    let block = chart_block(series.kind, cursor.is_some(), styles);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ===== Monthly trend =====

fn render_trend(frame: &mut Frame, area: Rect, trend: &TrendSeries, styles: &Styles) {
    let block = chart_block(ChartKind::Trend, false, styles);

    if trend.is_placeholder() {
        let lines = vec![
            Line::from(Span::styled(TREND_UNAVAILABLE, styles.section)),
            Line::from(Span::styled(
                "The aggregation template returned no by_month histogram.",
                styles.muted,
            )),
            Line::default(),
            Line::from(Span::styled(trend.labels().join("   "), styles.muted)),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let values = trend.values();
    let data: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v as f64))
        .collect();
    let max = values.iter().copied().max().unwrap_or(0);
    let last_x = values.len().saturating_sub(1).max(1) as f64;

    let dataset = Dataset::default()
        .name("Documents")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(styles.chart_style(palette::TREND_LINE))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(styles.muted)
                .bounds([0.0, last_x])
                .labels(trend.labels().to_vec()),
        )
        .y_axis(
            Axis::default()
                .style(styles.muted)
                .bounds([0.0, max.max(1) as f64])
                .labels(vec!["0".to_string(), max.to_string()]),
        );

    frame.render_widget(chart, area);
}

// ===== Drill-down =====

fn render_drill_down(frame: &mut Frame, area: Rect, drill: &DrillDown, styles: &Styles) {
    let bucket = &drill.bucket;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Document Count: ", styles.section),
            Span::raw(bucket.doc_count.to_string()),
        ]),
        Line::default(),
    ];

    match &bucket.exclusion_types {
        Some(types) if !types.is_empty() => {
            lines.push(Line::from(Span::styled("Exclusion Types", styles.section)));
            lines.extend(
                types
                    .iter()
                    .map(|t| Line::from(format!("{}: {} documents", t.key, t.doc_count))),
            );
        }
        _ => lines.push(Line::from(Span::styled(
            "No exclusion type breakdown returned",
            styles.muted,
        ))),
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("x: close", styles.muted)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.focused_border)
        .title(format!(" {} ", bucket.key));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
#[path = "charts_tests.rs"]
mod tests;
