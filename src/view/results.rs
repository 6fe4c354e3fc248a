//! Results table, range caption and pagination bar.

use crate::model::{Column, ResultSet};
use crate::query::PageItem;
use crate::state::{AppState, FocusPane, SelectionSet};
use crate::view::constants::{CHECKBOX_WIDTH, RESULTS_FOOTER_HEIGHT};
use crate::view::Styles;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown after a successful search with zero hits.
pub const NO_RECORDS: &str = "No Records Found";

/// Shown before the first search.
pub const IDLE_HINT: &str = "Fill in the form and press Enter to search.";

/// Relative widths of the seven data columns.
const COLUMN_WEIGHTS: [u32; 7] = [16, 12, 11, 11, 8, 24, 18];

// ===== Text helpers =====

/// Truncate `text` to `width` terminal cells, ending in `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// "Showing a - b of N results", or `None` without hits.
pub fn range_caption(range: Option<(u64, u64)>, total: u64) -> Option<String> {
    range.map(|(first, last)| format!("Showing {first} - {last} of {total} results"))
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

// ===== Rendering =====

/// Render the hit-mode content area.
pub fn render_results(frame: &mut Frame, area: Rect, state: &AppState, styles: &Styles) {
    let search = &state.search;

    if search.shows_no_records() {
        render_centered(frame, area, NO_RECORDS, styles.section, styles);
        return;
    }
    if search.results().hits().is_empty() {
        render_centered(frame, area, IDLE_HINT, styles.muted, styles);
        return;
    }

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(RESULTS_FOOTER_HEIGHT)])
            .areas(area);

    render_table(
        frame,
        table_area,
        search.results(),
        search.selection(),
        search.is_all_selected(),
        (state.focus == FocusPane::Results).then_some(state.row_cursor),
        styles,
    );

    let [caption_area, pages_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(footer_area);

    if let Some(caption) = range_caption(search.visible_range(), search.results().total()) {
        let selected = search.selection().len();
        let mut spans = vec![Span::raw(caption)];
        if selected > 0 {
            spans.push(Span::styled(format!("  ({selected} selected)"), styles.info));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), caption_area);
    }

    if search.shows_pagination() {
        let line = pagination_line(
            &search.page_numbers(),
            search.page(),
            search.total_pages(),
            search.is_loading(),
            styles,
        );
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), pages_area);
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    results: &ResultSet,
    selection: &SelectionSet,
    all_selected: bool,
    cursor: Option<usize>,
    styles: &Styles,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.pane_border(cursor.is_some()))
        .title(" Results ");
    let inner_width = block.inner(area).width;
    let widths = column_widths(inner_width);

    let header = Row::new(
        std::iter::once(Cell::from(checkbox(all_selected))).chain(
            Column::ALL
                .iter()
                .zip(&widths)
                .map(|(column, width)| Cell::from(truncate(column.header(), usize::from(*width)))),
        ),
    )
    .style(styles.table_header);

    let rows: Vec<Row> = results
        .hits()
        .iter()
        .map(|hit| {
            let cells = hit
                .row()
                .into_iter()
                .zip(&widths)
                .map(|(value, width)| Cell::from(truncate(value, usize::from(*width))));
            Row::new(
                std::iter::once(Cell::from(checkbox(selection.contains(hit.id())))).chain(cells),
            )
        })
        .collect();

    let constraints: Vec<Constraint> = std::iter::once(Constraint::Length(CHECKBOX_WIDTH))
        .chain(widths.iter().map(|w| Constraint::Length(*w)))
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(styles.cursor);

    let mut table_state = TableState::default().with_selected(cursor);
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Widths of the seven data columns for a table `inner_width` cells wide.
pub fn column_widths(inner_width: u16) -> [u16; 7] {
    // Checkbox column plus one space between each of the eight columns.
    let available = u32::from(inner_width.saturating_sub(CHECKBOX_WIDTH + 7));
    let total_weight: u32 = COLUMN_WEIGHTS.iter().sum();
    COLUMN_WEIGHTS.map(|weight| u16::try_from(available * weight / total_weight).unwrap_or(0))
}

/// Pagination bar: `« ‹ 1 2 [3] 4 ... 10 › »`.
///
/// Every control is drawn disabled while a search is loading.
pub fn pagination_line(
    items: &[PageItem],
    current: u32,
    total_pages: u32,
    loading: bool,
    styles: &Styles,
) -> Line<'static> {
    let nav = |text: &'static str, enabled: bool| {
        let enabled = enabled && !loading;
        Span::styled(text, if enabled { styles.key } else { styles.muted })
    };
    let page_style = if loading { styles.muted } else { Style::default() };

    let mut spans = vec![nav("« ", current > 1), nav("‹ ", current > 1)];
    for item in items {
        match item {
            PageItem::Page(page) if *page == current => {
                spans.push(Span::styled(format!("[{page}]"), styles.active));
            }
            PageItem::Page(page) => spans.push(Span::styled(page.to_string(), page_style)),
            PageItem::Ellipsis => spans.push(Span::styled("...", styles.muted)),
        }
        spans.push(Span::raw(" "));
    }
    spans.push(nav("› ", current < total_pages));
    spans.push(nav("»", current < total_pages));
    Line::from(spans)
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: Style, styles: &Styles) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border)
        .title(" Results ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [middle] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), style)).alignment(Alignment::Center),
        middle,
    );
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
