//! Environment handling for LaTeX to HTML conversion
//!
//! This module holds the per-line handlers of the state machine: document
//! structure (title block, abstract, sections), the buffering environments
//! (tables, lists), the incrementally rendered references list, and the
//! equation and figure containers. Handlers are selected by
//! [`super::rules::LINE_RULES`].

use std::fmt::Write;

use tracing::debug;

use super::context::{EnvironmentContext, HtmlConverter, ListKind, SectionKind};
use super::markup::process_inline_commands;
use super::table::{conform_row, count_columns, render_table, scan_table_row, MAX_TABLE_COLUMNS};
use super::utils::{braced_argument, command_argument, skip_optional_argument};
use crate::data::constants::{
    ABSTRACT_STYLE, AUTHOR_STYLE, DATE_STYLE, FIGCAPTION_STYLE, FIGURE_STYLE, LIST_STYLE,
    MATH_DISPLAY_STYLE, PARAGRAPH_STYLE, REFERENCES_LIST_STYLE, REFERENCE_ITEM_STYLE,
    SECTION_STYLE, SUBSECTION_STYLE, TITLE_BLOCK_STYLE, TITLE_STYLE,
};
use crate::utils::error::{ConversionResult, ConversionWarning};

// =============================================================================
// Block renderers
// =============================================================================

/// Render list items as `<ul>` or `<ol>`; no items renders nothing
pub fn render_list(items: &[String], kind: ListKind) -> String {
    if items.is_empty() {
        return String::new();
    }

    let tag = kind.html_tag();
    let mut output = format!("<{} style=\"{}\">", tag, LIST_STYLE);
    for item in items {
        let _ = write!(output, "<li>{}</li>", item);
    }
    let _ = write!(output, "</{}>", tag);
    output
}

// =============================================================================
// Title block
// =============================================================================

pub fn handle_title(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    push_title_fragment(conv, line, "title", "h1", TITLE_STYLE);
    Ok(())
}

pub fn handle_author(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    push_title_fragment(conv, line, "author", "p", AUTHOR_STYLE);
    Ok(())
}

pub fn handle_date(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    push_title_fragment(conv, line, "date", "p", DATE_STYLE);
    Ok(())
}

fn push_title_fragment(
    conv: &mut HtmlConverter,
    line: &str,
    command: &str,
    tag: &str,
    style: &str,
) {
    let Some(raw) = command_argument(line, command) else {
        return;
    };
    let fragment = format!(
        "<{tag} style=\"{style}\">{}</{tag}>",
        process_inline_commands(raw)
    );
    conv.state.title_page_content.push(fragment);
}

/// `\maketitle`: emit the buffered title fragments as one centered block
pub fn handle_maketitle(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    let state = &mut conv.state;
    let _ = write!(
        state.html,
        "<div style=\"{}\">{}</div>",
        TITLE_BLOCK_STYLE,
        state.title_page_content.concat()
    );
    state.title_page_content.clear();
    state.title_page = true;
    Ok(())
}

// =============================================================================
// Abstract and sections
// =============================================================================

pub fn begin_abstract(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    conv.state.enter(EnvironmentContext::Abstract);
    let _ = write!(
        conv.state.html,
        "<div class=\"abstract\" style=\"{}\"><strong>Abstract:</strong> ",
        ABSTRACT_STYLE
    );
    Ok(())
}

pub fn end_abstract(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    if conv.state.leave(EnvironmentContext::Abstract).is_none() {
        return conv.state.malformed("\\end{abstract} without \\begin{abstract}");
    }
    conv.state.html.push_str("</div>");
    Ok(())
}

pub fn handle_section(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    match command_argument(line, "section") {
        Some(title) => open_section(conv, title, false),
        None => Ok(()),
    }
}

pub fn handle_starred_section(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    match command_argument(line, "section*") {
        Some(title) => open_section(conv, title, true),
        None => Ok(()),
    }
}

fn open_section(conv: &mut HtmlConverter, title: &str, starred: bool) -> ConversionResult<()> {
    flush_table(conv);
    if conv.state.in_references() {
        close_section(conv);
    }
    close_lists(conv);
    close_section(conv);

    let state = &mut conv.state;
    state.current_section_title = title.to_string();

    if starred && state.current_section_title.trim().eq_ignore_ascii_case("references") {
        state.enter(EnvironmentContext::Section(SectionKind::References));
        let _ = write!(
            state.html,
            "<h2 style=\"{}\">References</h2><div class=\"references\"><ul style=\"{}\">",
            SECTION_STYLE, REFERENCES_LIST_STYLE
        );
    } else {
        state.enter(EnvironmentContext::Section(SectionKind::Plain));
        let _ = write!(
            state.html,
            "<h2 style=\"{}\">{}</h2><div>",
            SECTION_STYLE,
            process_inline_commands(title)
        );
    }
    Ok(())
}

/// Close the open section, emitting the closer that matches its kind
fn close_section(conv: &mut HtmlConverter) {
    let state = &mut conv.state;
    match state.leave(EnvironmentContext::Section(SectionKind::Plain)) {
        Some(EnvironmentContext::Section(SectionKind::References)) => {
            state.html.push_str("</ul></div>")
        }
        Some(_) => state.html.push_str("</div>"),
        None => {}
    }
}

pub fn handle_subsection(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    if let Some(title) = command_argument(line, "subsection") {
        conv.state.current_section_title = title.to_string();
        let _ = write!(
            conv.state.html,
            "<h3 style=\"{}\">{}</h3>",
            SUBSECTION_STYLE,
            process_inline_commands(title)
        );
    }
    Ok(())
}

// =============================================================================
// Tables
// =============================================================================

/// `\begin{table}`: open table mode without a column constraint
pub fn begin_table(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    let state = &mut conv.state;
    state.enter(EnvironmentContext::Table);
    state.table_float = true;
    state.table_rows.clear();
    state.table_column_count = 0;
    Ok(())
}

/// `\begin{tabular}{spec}`: open table mode and take the column count from the spec
pub fn begin_tabular(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    let rest = line.strip_prefix("\\begin{tabular}").unwrap_or("");
    let spec = braced_argument(skip_optional_argument(rest)).map(|(spec, _)| spec);

    let state = &mut conv.state;
    state.enter(EnvironmentContext::Table);
    state.table_rows.clear();
    let declared = spec.map(count_columns).unwrap_or(0);
    state.table_column_count = if declared > MAX_TABLE_COLUMNS {
        state.warn(format!(
            "column spec declares {} columns; the table is left unconstrained",
            declared
        ));
        0
    } else {
        declared
    };
    debug!(
        line = state.line_number,
        columns = state.table_column_count,
        "tabular column spec"
    );
    Ok(())
}

pub fn end_tabular(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    if !conv.state.in_table() {
        return conv.state.malformed("\\end{tabular} without an open table");
    }
    flush_table(conv);
    Ok(())
}

pub fn end_table(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    let was_float = std::mem::take(&mut conv.state.table_float);
    if conv.state.in_table() {
        flush_table(conv);
    } else if !was_float {
        return conv.state.malformed("\\end{table} without \\begin{table}");
    }
    Ok(())
}

/// Tokenize one line inside a table and buffer the resulting row
pub fn handle_table_row(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    let Some(scan) = scan_table_row(line) else {
        return Ok(());
    };
    if !scan.is_balanced() {
        conv.state.malformed("unbalanced braces in table row")?;
    }

    let state = &mut conv.state;
    let columns = state.table_column_count;
    let found = scan.cells.len();
    if columns > 0 && found > columns {
        state.warn(format!(
            "table row has {} cells but the column spec declares {}; extra cells dropped",
            found, columns
        ));
    }
    state.table_rows.push(conform_row(scan.cells, columns));
    Ok(())
}

/// Render and clear the buffered table, if one is open
pub fn flush_table(conv: &mut HtmlConverter) {
    let state = &mut conv.state;
    if state.leave(EnvironmentContext::Table).is_none() {
        return;
    }

    let columns = state.table_column_count;
    let rows: Vec<Vec<String>> = std::mem::take(&mut state.table_rows)
        .into_iter()
        .map(|row| conform_row(row, columns))
        .collect();
    state.html.push_str(&render_table(&rows));
    state.table_column_count = 0;
}

// =============================================================================
// Lists
// =============================================================================

pub fn begin_itemize(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    open_list(conv, ListKind::Itemize);
    Ok(())
}

pub fn begin_enumerate(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    open_list(conv, ListKind::Enumerate);
    Ok(())
}

pub fn end_itemize(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    close_list(conv, ListKind::Itemize)
}

pub fn end_enumerate(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    close_list(conv, ListKind::Enumerate)
}

/// Open a list. An already open list is suspended and resumes when the new
/// one closes; its items are kept.
fn open_list(conv: &mut HtmlConverter, kind: ListKind) {
    let state = &mut conv.state;
    if let Some(outer) = state.list_kind() {
        let items = std::mem::take(&mut state.list_items);
        state.suspended_lists.push((outer, items));
    }
    state.enter(EnvironmentContext::List(kind));
    state.list_items.clear();
}

fn close_list(conv: &mut HtmlConverter, kind: ListKind) -> ConversionResult<()> {
    match conv.state.list_kind() {
        None => {
            return conv
                .state
                .malformed(format!("\\end{{{}}} without an open list", kind.env_name()));
        }
        Some(open) if open != kind => {
            conv.state.malformed(format!(
                "\\end{{{}}} closes an open {}",
                kind.env_name(),
                open.env_name()
            ))?;
        }
        Some(_) => {}
    }
    finish_innermost_list(conv);
    Ok(())
}

/// Render the innermost list. If it was nested, attach it to the last item
/// of the list it interrupted; otherwise append it to the output.
fn finish_innermost_list(conv: &mut HtmlConverter) {
    let state = &mut conv.state;
    let Some(EnvironmentContext::List(kind)) =
        state.leave(EnvironmentContext::List(ListKind::Itemize))
    else {
        return;
    };

    let rendered = render_list(&std::mem::take(&mut state.list_items), kind);
    match state.suspended_lists.pop() {
        Some((outer, mut items)) => {
            if !rendered.is_empty() {
                match items.last_mut() {
                    Some(last) => last.push_str(&rendered),
                    None => items.push(rendered),
                }
            }
            state.enter(EnvironmentContext::List(outer));
            state.list_items = items;
        }
        None => state.html.push_str(&rendered),
    }
}

/// Render and close every open list, innermost first
pub fn close_lists(conv: &mut HtmlConverter) {
    while conv.state.list_kind().is_some() {
        finish_innermost_list(conv);
    }
}

/// `\item text` inside a list; empty items are dropped
pub fn handle_item(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    let rest = line.strip_prefix("\\item").unwrap_or(line);
    let text = process_inline_commands(rest.trim());
    if !text.is_empty() {
        conv.state.list_items.push(text);
    }
    Ok(())
}

// =============================================================================
// References
// =============================================================================

/// `\bibitem[label]{key} text` → `<li id="key">` appended immediately
pub fn handle_bibitem(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    let rest = line.strip_prefix("\\bibitem").unwrap_or(line).trim_start();
    let rest = skip_optional_argument(rest);
    let (key, text) = match braced_argument(rest) {
        Some((key, text)) => (key.trim(), text),
        None => ("", rest),
    };

    let text = process_inline_commands(text.trim());
    let state = &mut conv.state;
    if key.is_empty() {
        let _ = write!(
            state.html,
            "<li style=\"{}\">{}</li>",
            REFERENCE_ITEM_STYLE, text
        );
    } else {
        let _ = write!(
            state.html,
            "<li id=\"{}\" style=\"{}\">{}</li>",
            key.replace('"', "&quot;"),
            REFERENCE_ITEM_STYLE,
            text
        );
    }
    Ok(())
}

// =============================================================================
// Equations and figures
// =============================================================================

pub fn begin_equation(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    conv.state.enter(EnvironmentContext::Equation);
    let _ = write!(
        conv.state.html,
        "<div class=\"math-display\" style=\"{}\">",
        MATH_DISPLAY_STYLE
    );
    Ok(())
}

pub fn end_equation(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    if conv.state.leave(EnvironmentContext::Equation).is_none() {
        return conv.state.malformed("\\end{equation} without \\begin{equation}");
    }
    conv.state.html.push_str("</div>");
    Ok(())
}

/// One line of display math, kept as its own span
pub fn handle_equation_content(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    let math = process_inline_commands(line);
    if !math.is_empty() {
        let _ = write!(
            conv.state.html,
            "<span class=\"math-display-content\">{}</span>",
            math
        );
    }
    Ok(())
}

pub fn begin_figure(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    conv.state.enter(EnvironmentContext::Figure);
    let _ = write!(
        conv.state.html,
        "<div class=\"figure\" style=\"{}\">",
        FIGURE_STYLE
    );
    Ok(())
}

pub fn end_figure(conv: &mut HtmlConverter, _line: &str) -> ConversionResult<()> {
    if conv.state.leave(EnvironmentContext::Figure).is_none() {
        return conv.state.malformed("\\end{figure} without \\begin{figure}");
    }
    conv.state.html.push_str("</div>");
    Ok(())
}

pub fn handle_caption(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    if let Some(caption) = command_argument(line, "caption") {
        let _ = write!(
            conv.state.html,
            "<figcaption style=\"{}\">{}</figcaption>",
            FIGCAPTION_STYLE,
            process_inline_commands(caption)
        );
    }
    Ok(())
}

// =============================================================================
// Text
// =============================================================================

/// Plain text becomes a paragraph inside the abstract or a section; preamble
/// noise elsewhere is discarded
pub fn handle_text(conv: &mut HtmlConverter, line: &str) -> ConversionResult<()> {
    let state = &mut conv.state;
    if !(state.in_abstract() || state.in_section()) {
        return Ok(());
    }
    let text = process_inline_commands(line);
    if !text.is_empty() {
        let _ = write!(state.html, "<p style=\"{}\">{}</p>", PARAGRAPH_STYLE, text);
    }
    Ok(())
}

// =============================================================================
// End of input
// =============================================================================

/// Close everything still open so the output never ends inside a container.
///
/// Order: table, references, lists, section, equation, figure, abstract, title page.
/// Lists close before a plain section, as they do on a section switch.
pub fn finish_document(conv: &mut HtmlConverter) {
    if conv.state.in_table() {
        report_unclosed(conv, "tabular");
        flush_table(conv);
    }
    conv.state.table_float = false;

    if conv.state.in_references() {
        close_section(conv);
    }

    if let Some(kind) = conv.state.list_kind() {
        report_unclosed(conv, kind.env_name());
        close_lists(conv);
    }

    close_section(conv);

    if conv.state.leave(EnvironmentContext::Equation).is_some() {
        report_unclosed(conv, "equation");
        conv.state.html.push_str("</div>");
    }

    if conv.state.leave(EnvironmentContext::Figure).is_some() {
        report_unclosed(conv, "figure");
        conv.state.html.push_str("</div>");
    }

    if conv.state.leave(EnvironmentContext::Abstract).is_some() {
        report_unclosed(conv, "abstract");
        conv.state.html.push_str("</div>");
    }

    // The title block is emitted complete by \maketitle; fragments declared
    // without \maketitle are not shown, as in LaTeX.
    if !conv.state.title_page_content.is_empty() {
        debug!("title fields declared without \\maketitle");
        conv.state.title_page_content.clear();
    }
    conv.state.title_page = false;
}

fn report_unclosed(conv: &mut HtmlConverter, env: &str) {
    conv.state.warn_global(
        ConversionWarning::new(
            format!("environment '{}' was not closed; flushed at end of input", env),
            None,
        )
        .with_suggestion(format!("add \\end{{{}}}", env)),
    );
}
