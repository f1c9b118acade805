//! HTML rendering of buffered table rows

use std::fmt::Write;

use crate::data::constants::{TABLE_DATA_CELL_STYLE, TABLE_HEADER_CELL_STYLE, TABLE_STYLE};

/// Render rows as an HTML table. The first row is always the header row.
///
/// Empty cells become `&nbsp;`; no rows renders nothing.
pub fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    let _ = write!(output, "<table style=\"{}\"><tbody>", TABLE_STYLE);

    for (index, row) in rows.iter().enumerate() {
        let (tag, style) = if index == 0 {
            ("th", TABLE_HEADER_CELL_STYLE)
        } else {
            ("td", TABLE_DATA_CELL_STYLE)
        };

        output.push_str("<tr>");
        for cell in row {
            let content = if cell.is_empty() { "&nbsp;" } else { cell };
            let _ = write!(output, "<{tag} style=\"{style}\">{content}</{tag}>");
        }
        output.push_str("</tr>");
    }

    output.push_str("</tbody></table>");
    output
}
