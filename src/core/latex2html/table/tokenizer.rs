//! Brace- and escape-aware splitting of one table line into cells

use crate::core::latex2html::markup::process_inline_commands;

/// Table-control directives that never carry cell data
const CONTROL_PREFIXES: &[&str] = &[
    "\\hline",
    "\\toprule",
    "\\midrule",
    "\\bottomrule",
    "\\centering",
    "\\\\",
];

/// Result of scanning one table line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRowScan {
    /// Processed cells, in source order
    pub cells: Vec<String>,
    /// Final brace depth; non-zero means the line had unbalanced braces
    pub brace_depth: i32,
}

impl TableRowScan {
    pub fn is_balanced(&self) -> bool {
        self.brace_depth == 0
    }
}

/// Split `line` into processed cells, or `None` if it carries no row data
pub fn parse_table_row(line: &str) -> Option<Vec<String>> {
    scan_table_row(line).map(|scan| scan.cells)
}

/// Scan `line` into cells, keeping brace bookkeeping for diagnostics.
///
/// Every cell is passed through the inline pipeline as soon as it ends.
pub fn scan_table_row(line: &str) -> Option<TableRowScan> {
    if CONTROL_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return None;
    }
    if !line.contains('&') && !line.ends_with("\\\\") {
        return None;
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut prev: Option<char> = None;

    for (i, ch) in line.char_indices() {
        let escaped = prev == Some('\\');
        match ch {
            '{' if !escaped => {
                depth += 1;
                current.push(ch);
            }
            '}' if !escaped => {
                depth -= 1;
                current.push(ch);
            }
            '&' if !escaped && depth == 0 => {
                cells.push(process_inline_commands(current.trim()));
                current.clear();
            }
            '\\' if depth == 0 && line[i..].starts_with("\\\\") => {
                cells.push(process_inline_commands(current.trim()));
                return Some(TableRowScan { cells, brace_depth: depth });
            }
            _ => current.push(ch),
        }
        prev = Some(ch);
    }

    if !current.trim().is_empty() && depth == 0 {
        cells.push(process_inline_commands(current.trim()));
    }

    if cells.is_empty() {
        None
    } else {
        Some(TableRowScan { cells, brace_depth: depth })
    }
}

/// Pad with empty cells or truncate so the row has exactly `columns` cells.
///
/// A `columns` of 0 means unconstrained and leaves the row as is.
pub fn conform_row(mut row: Vec<String>, columns: usize) -> Vec<String> {
    if columns > 0 {
        row.resize(columns, String::new());
    }
    row
}
