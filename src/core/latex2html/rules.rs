//! Line classification
//!
//! Every logical line is matched against [`LINE_RULES`] in order and the first
//! rule whose predicate holds handles it. Structural commands come first, then
//! the context-dependent consumers (references, lists, tables, equations,
//! figures), then plain text.

use super::context::{ConversionState, HtmlConverter};
use super::environment::*;
use super::utils::{command_argument, is_begin, is_end, starts_with_command};
use crate::data::constants::NO_OUTPUT_DIRECTIVES;
use crate::utils::error::ConversionResult;

/// Handler signature shared by all rules
pub type LineHandler = fn(&mut HtmlConverter, &str) -> ConversionResult<()>;

/// One classification rule
#[derive(Clone, Copy)]
pub struct LineRule {
    pub name: &'static str,
    pub matches: fn(&ConversionState, &str) -> bool,
    pub apply: LineHandler,
}

macro_rules! rule {
    ($name:literal, $matches:expr, $apply:expr) => {
        LineRule {
            name: $name,
            matches: $matches,
            apply: $apply,
        }
    };
}

/// Classification rules, highest priority first
pub static LINE_RULES: &[LineRule] = &[
    // Title block
    rule!("title", |_, l| command_argument(l, "title").is_some(), handle_title),
    rule!("author", |_, l| command_argument(l, "author").is_some(), handle_author),
    rule!("date", |_, l| command_argument(l, "date").is_some(), handle_date),
    rule!("maketitle", |_, l| starts_with_command(l, "maketitle"), handle_maketitle),
    // Abstract
    rule!("begin_abstract", |_, l| is_begin(l, "abstract"), begin_abstract),
    rule!("end_abstract", |_, l| is_end(l, "abstract"), end_abstract),
    // Sections
    rule!("section", |_, l| command_argument(l, "section").is_some(), handle_section),
    rule!(
        "section_starred",
        |_, l| command_argument(l, "section*").is_some(),
        handle_starred_section
    ),
    rule!(
        "subsection",
        |_, l| command_argument(l, "subsection").is_some(),
        handle_subsection
    ),
    // Tables
    rule!("begin_table", |_, l| is_begin(l, "table"), begin_table),
    rule!("begin_tabular", |_, l| is_begin(l, "tabular"), begin_tabular),
    rule!("end_table", |_, l| is_end(l, "table"), end_table),
    rule!("end_tabular", |_, l| is_end(l, "tabular"), end_tabular),
    // Lists
    rule!("begin_itemize", |_, l| is_begin(l, "itemize"), begin_itemize),
    rule!("begin_enumerate", |_, l| is_begin(l, "enumerate"), begin_enumerate),
    rule!("end_itemize", |_, l| is_end(l, "itemize"), end_itemize),
    rule!("end_enumerate", |_, l| is_end(l, "enumerate"), end_enumerate),
    // Display containers
    rule!("begin_equation", |_, l| is_begin(l, "equation"), begin_equation),
    rule!("end_equation", |_, l| is_end(l, "equation"), end_equation),
    rule!("begin_figure", |_, l| is_begin(l, "figure"), begin_figure),
    rule!("end_figure", |_, l| is_end(l, "figure"), end_figure),
    // Context-dependent consumers
    rule!(
        "bibitem",
        |s, l| s.in_references() && starts_with_command(l, "bibitem"),
        handle_bibitem
    ),
    rule!(
        "item",
        |s, l| s.list_kind().is_some() && starts_with_command(l, "item"),
        handle_item
    ),
    rule!("table_row", |s, _| s.in_table(), handle_table_row),
    rule!("equation_content", |s, _| s.in_equation(), handle_equation_content),
    rule!(
        "caption",
        |s, l| s.in_figure() && command_argument(l, "caption").is_some(),
        handle_caption
    ),
    // Everything else
    rule!("text", |_, l| !is_directive(l), handle_text),
];

/// Lines that never produce output on their own
pub fn is_directive(line: &str) -> bool {
    match line.strip_prefix('\\') {
        Some(rest) => NO_OUTPUT_DIRECTIVES.iter().any(|d| rest.starts_with(d)),
        None => false,
    }
}

/// First rule matching `line` in the current state
pub fn classify_line(state: &ConversionState, line: &str) -> Option<&'static LineRule> {
    LINE_RULES.iter().find(|rule| (rule.matches)(state, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::latex2html::context::{EnvironmentContext, ListKind, SectionKind};

    fn rule_name(state: &ConversionState, line: &str) -> Option<&'static str> {
        classify_line(state, line).map(|r| r.name)
    }

    #[test]
    fn test_structural_commands_win() {
        let mut state = ConversionState::default();
        state.enter(EnvironmentContext::Table);
        assert_eq!(rule_name(&state, "\\begin{itemize}"), Some("begin_itemize"));
        assert_eq!(rule_name(&state, "\\section{Next}"), Some("section"));
        assert_eq!(rule_name(&state, "a & b \\\\"), Some("table_row"));
    }

    #[test]
    fn test_context_consumers() {
        let mut state = ConversionState::default();
        assert_eq!(rule_name(&state, "\\item stray"), Some("text"));
        assert_eq!(rule_name(&state, "\\bibitem{x} y"), Some("text"));

        state.enter(EnvironmentContext::List(ListKind::Itemize));
        assert_eq!(rule_name(&state, "\\item A"), Some("item"));
        assert_eq!(rule_name(&state, "\\itemsep 2pt"), Some("text"));

        state.enter(EnvironmentContext::Section(SectionKind::References));
        assert_eq!(rule_name(&state, "\\bibitem{x} y"), Some("bibitem"));

        let mut figure = ConversionState::default();
        figure.enter(EnvironmentContext::Figure);
        assert_eq!(rule_name(&figure, "\\caption{A plot}"), Some("caption"));
        assert_eq!(rule_name(&state, "\\caption{A plot}"), Some("text"));
    }

    #[test]
    fn test_directives_have_no_rule() {
        let state = ConversionState::default();
        for line in [
            "\\documentclass{article}",
            "\\usepackage[utf8]{inputenc}",
            "\\begin{document}",
            "\\end{document}",
            "\\bibliographystyle{plain}",
            "\\centering",
        ] {
            assert!(classify_line(&state, line).is_none(), "{}", line);
        }
    }

    #[test]
    fn test_starred_section_is_distinct() {
        let state = ConversionState::default();
        assert_eq!(rule_name(&state, "\\section*{References}"), Some("section_starred"));
        assert_eq!(rule_name(&state, "\\section{}"), Some("text"));
    }
}
