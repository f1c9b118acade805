//! Core state and structures for LaTeX to HTML conversion
//!
//! This module contains the conversion options, the environment contexts and
//! the per-call conversion state.

use tracing::{debug, trace, warn};

use super::environment::finish_document;
use super::rules::classify_line;
use super::utils::split_lines;
use crate::data::constants::DEFAULT_COMPILE_URL;
use crate::utils::error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning,
};

// =============================================================================
// LaTeX → HTML Conversion Options
// =============================================================================

/// Options for LaTeX to HTML conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Strict mode: unbalanced table braces and stray `\end{...}` lines fail the
    /// conversion instead of producing a warning
    /// Default: false
    pub strict: bool,

    /// Target of the "compile it externally" link in fallback and error messages
    /// Default: `https://www.overleaf.com`
    pub compile_url: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            strict: false,
            compile_url: DEFAULT_COMPILE_URL.to_string(),
        }
    }
}

impl HtmlOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict mode options (errors on malformed structure)
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Use a different external compile link
    pub fn with_compile_url(mut self, url: impl Into<String>) -> Self {
        self.compile_url = url.into();
        self
    }
}

// =============================================================================
// Environment Contexts
// =============================================================================

/// List flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `itemize` → `<ul>`
    Itemize,
    /// `enumerate` → `<ol>`
    Enumerate,
}

impl ListKind {
    pub fn env_name(self) -> &'static str {
        match self {
            ListKind::Itemize => "itemize",
            ListKind::Enumerate => "enumerate",
        }
    }

    pub fn html_tag(self) -> &'static str {
        match self {
            ListKind::Itemize => "ul",
            ListKind::Enumerate => "ol",
        }
    }
}

/// Section flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Ordinary `\section` or `\section*`
    Plain,
    /// `\section*{References}`: bibliography items render as list entries
    References,
}

/// An open environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentContext {
    Abstract,
    Section(SectionKind),
    Table,
    List(ListKind),
    Equation,
    Figure,
}

impl EnvironmentContext {
    /// Whether two contexts occupy the same slot (same variant, any kind)
    fn same_slot(self, other: EnvironmentContext) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    pub fn name(self) -> &'static str {
        match self {
            EnvironmentContext::Abstract => "abstract",
            EnvironmentContext::Section(SectionKind::Plain) => "section",
            EnvironmentContext::Section(SectionKind::References) => "references",
            EnvironmentContext::Table => "table",
            EnvironmentContext::List(kind) => kind.env_name(),
            EnvironmentContext::Equation => "equation",
            EnvironmentContext::Figure => "figure",
        }
    }
}

// =============================================================================
// Conversion State
// =============================================================================

/// Conversion state for one call, mutated line by line
#[derive(Debug, Default)]
pub struct ConversionState {
    /// Open environments; at most one entry per context variant
    pub env_stack: Vec<EnvironmentContext>,
    /// Set once the title block has been emitted
    pub title_page: bool,
    /// Raw title of the most recent section
    pub current_section_title: String,
    /// Buffered table rows
    pub table_rows: Vec<Vec<String>>,
    /// Declared column count, 0 = unconstrained
    pub table_column_count: usize,
    /// Inside a `table` float (its `\end{table}` may follow `\end{tabular}`)
    pub table_float: bool,
    /// Buffered items of the open list
    pub list_items: Vec<String>,
    /// Outer lists interrupted by a nested list, innermost last
    pub suspended_lists: Vec<(ListKind, Vec<String>)>,
    /// Title, author and date fragments waiting for `\maketitle`
    pub title_page_content: Vec<String>,
    /// Accumulated output
    pub html: String,
    /// 1-based number of the line being processed
    pub line_number: usize,
    /// Non-fatal issues
    pub warnings: Vec<ConversionWarning>,
    /// Conversion options
    pub options: HtmlOptions,
}

impl ConversionState {
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn is_open(&self, env: EnvironmentContext) -> bool {
        self.env_stack.contains(&env)
    }

    pub fn in_table(&self) -> bool {
        self.is_open(EnvironmentContext::Table)
    }

    pub fn in_equation(&self) -> bool {
        self.is_open(EnvironmentContext::Equation)
    }

    pub fn in_figure(&self) -> bool {
        self.is_open(EnvironmentContext::Figure)
    }

    pub fn in_abstract(&self) -> bool {
        self.is_open(EnvironmentContext::Abstract)
    }

    pub fn in_references(&self) -> bool {
        self.is_open(EnvironmentContext::Section(SectionKind::References))
    }

    /// Any section, including the references section
    pub fn in_section(&self) -> bool {
        self.section_kind().is_some()
    }

    pub fn section_kind(&self) -> Option<SectionKind> {
        self.env_stack.iter().find_map(|e| match e {
            EnvironmentContext::Section(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        self.env_stack.iter().find_map(|e| match e {
            EnvironmentContext::List(kind) => Some(*kind),
            _ => None,
        })
    }

    /// Push `env`, replacing any open context in the same slot
    pub fn enter(&mut self, env: EnvironmentContext) {
        self.env_stack.retain(|e| !e.same_slot(env));
        debug!(line = self.line_number, env = env.name(), "enter environment");
        self.env_stack.push(env);
    }

    /// Remove the context in `env`'s slot; returns the removed context
    pub fn leave(&mut self, env: EnvironmentContext) -> Option<EnvironmentContext> {
        let pos = self.env_stack.iter().position(|e| e.same_slot(env))?;
        let left = self.env_stack.remove(pos);
        debug!(line = self.line_number, env = left.name(), "leave environment");
        Some(left)
    }

    /// Record a non-fatal issue at the current line
    pub fn warn(&mut self, message: impl Into<String>) {
        let warning = ConversionWarning::new(message, Some(self.line_number));
        warn!(line = self.line_number, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Record a non-fatal issue that has no source line
    pub fn warn_global(&mut self, warning: ConversionWarning) {
        warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Warn in lenient mode, fail in strict mode
    pub fn malformed(&mut self, message: impl Into<String>) -> ConversionResult<()> {
        let message = message.into();
        if self.options.strict {
            Err(ConversionError::parse_at_line(message, self.line_number))
        } else {
            self.warn(message);
            Ok(())
        }
    }
}

// =============================================================================
// HTML Converter
// =============================================================================

/// Line-oriented LaTeX to HTML converter
pub struct HtmlConverter {
    pub state: ConversionState,
}

impl Default for HtmlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::with_options(HtmlOptions::default())
    }

    /// Create a converter with custom options
    pub fn with_options(options: HtmlOptions) -> Self {
        Self {
            state: ConversionState::new(options),
        }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.state.options
    }

    /// Classify one trimmed, non-empty line and run its handler
    pub fn process_line(&mut self, line: &str) -> ConversionResult<()> {
        self.state.line_number += 1;
        match classify_line(&self.state, line) {
            Some(rule) => {
                trace!(line = self.state.line_number, rule = rule.name, "classified");
                (rule.apply)(self, line)
            }
            None => Ok(()),
        }
    }

    /// Flush everything still open at end of input
    pub fn finish(&mut self) {
        finish_document(self);
    }

    /// Convert a whole document. The content is empty when nothing rendered.
    pub fn convert_document(&mut self, input: &str) -> ConversionResult<ConversionOutput> {
        for line in split_lines(input) {
            self.process_line(&line)?;
        }
        self.finish();

        let state = &mut self.state;
        Ok(ConversionOutput::with_warnings(
            std::mem::take(&mut state.html),
            std::mem::take(&mut state.warnings),
        ))
    }
}
