//! Tab bar widgets: the mode selector and the chart selector.
//!
//! Both are ratatui `Tabs`; selection state lives in `AppState`
//! (`search.mode()` and `chart`).

use crate::charts::ChartKind;
use crate::model::SearchMode;
use crate::view::Styles;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Render a bordered tab bar.
///
/// # Behavior
/// - One tab per title, in order
/// - Highlights the selected tab if `Some(index)` and index is in bounds
/// - Out-of-bounds indices are treated as `None`
pub fn render_tab_bar(
    frame: &mut Frame,
    area: Rect,
    titles: &[&str],
    selected: Option<usize>,
    block_title: &str,
    styles: &Styles,
) {
    let lines: Vec<Line> = titles.iter().map(|title| Line::from(*title)).collect();
    let validated_selection = selected.filter(|&idx| idx < titles.len());

    let mut tabs = Tabs::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles.border)
                .title(block_title.to_string()),
        )
        .style(styles.muted);

    // Tabs cannot express "no selection", so only highlight with one.
    if let Some(idx) = validated_selection {
        tabs = tabs.highlight_style(styles.active).select(idx);
    }

    frame.render_widget(tabs, area);
}

/// Mode selector: every search mode, the active one highlighted.
pub fn render_mode_tabs(frame: &mut Frame, area: Rect, mode: SearchMode, styles: &Styles) {
    let titles: Vec<&str> = SearchMode::ALL.iter().map(|m| m.label()).collect();
    let selected = SearchMode::ALL.iter().position(|m| *m == mode);
    render_tab_bar(frame, area, &titles, selected, " Search Type (m/M) ", styles);
}

/// Chart selector shown in aggregation mode.
pub fn render_chart_tabs(frame: &mut Frame, area: Rect, chart: ChartKind, styles: &Styles) {
    let titles: Vec<&str> = ChartKind::ALL.iter().map(|k| k.title()).collect();
    let selected = ChartKind::ALL.iter().position(|k| *k == chart);
    render_tab_bar(frame, area, &titles, selected, " Charts (Tab) ", styles);
}
