//! Search form widget: one labelled input per field of the active mode.

use crate::model::{SearchForm, SearchMode};
use crate::view::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown in place of inputs for modes without any.
pub const NO_INPUTS_HINT: &str = "This search has no inputs. Press r to run it.";

/// Form widget.
///
/// `editing` is `Some((field_index, cursor))` while the form has focus;
/// the cursor is a char index into that field's text.
pub struct SearchFormView<'a> {
    mode: SearchMode,
    form: &'a SearchForm,
    editing: Option<(usize, usize)>,
    styles: &'a Styles,
}

impl<'a> SearchFormView<'a> {
    /// Create the widget.
    pub fn new(
        mode: SearchMode,
        form: &'a SearchForm,
        editing: Option<(usize, usize)>,
        styles: &'a Styles,
    ) -> Self {
        Self {
            mode,
            form,
            editing,
            styles,
        }
    }

    /// Rows needed to render the form, borders included.
    pub fn height(mode: SearchMode) -> u16 {
        let rows = mode.fields().len().max(1);
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
    }

    fn field_line(&self, index: usize) -> Line<'static> {
        let fields = self.mode.fields();
        let field = fields[index];
        let label_width = fields
            .iter()
            .map(|f| f.label(self.mode).chars().count())
            .max()
            .unwrap_or(0);
        let label = format!("{:>width$}: ", field.label(self.mode), width = label_width);
        let value = self.form.get(field);

        let mut spans = vec![Span::styled(label, self.styles.section)];

        match self.editing {
            Some((active, cursor)) if active == index => {
                // Split around the cursor like a text input.
                let before: String = value.chars().take(cursor).collect();
                let mut rest = value.chars().skip(cursor);
                let cursor_char = rest.next().map_or_else(|| " ".to_string(), String::from);
                let after: String = rest.collect();

                spans.push(Span::raw(before));
                spans.push(Span::styled(cursor_char, self.styles.cursor));
                spans.push(Span::raw(after));
                if value.is_empty() {
                    spans.push(Span::styled(field.placeholder(self.mode), self.styles.muted));
                }
            }
            _ if value.is_empty() => {
                spans.push(Span::styled(field.placeholder(self.mode), self.styles.muted));
            }
            _ => spans.push(Span::raw(value.to_string())),
        }

        Line::from(spans)
    }
}

impl Widget for SearchFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.editing.is_some();
        let title = if focused {
            " Search (Enter: run, Esc: leave) "
        } else {
            " Search (/ to edit) "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.pane_border(focused))
            .title(title);

        let lines: Vec<Line> = if self.mode.fields().is_empty() {
            vec![Line::from(Span::styled(NO_INPUTS_HINT, self.styles.muted))]
        } else {
            (0..self.mode.fields().len())
                .map(|index| self.field_line(index))
                .collect()
        };

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
