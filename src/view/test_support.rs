//! Shared helpers for rendering tests.

use ratatui::buffer::Buffer;

/// Buffer contents as text, one line per row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
