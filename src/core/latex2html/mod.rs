//! LaTeX to HTML conversion module
//!
//! This module renders a LaTeX source document as an HTML fragment for live
//! preview. It is a line-oriented state machine, not a TeX engine: each logical
//! line is classified by an ordered rule list and either changes the open
//! environment or contributes markup.
//!
//! # Module Structure
//!
//! - `context`: Options, environment contexts, conversion state and `HtmlConverter`
//! - `rules`: Ordered line classification rules
//! - `environment`: Per-line handlers and block renderers (lists, sections, end of input)
//! - `markup`: The inline command pipeline (formatting, math, symbols, escaping)
//! - `table`: Table row tokenizer, column spec parsing and table rendering
//! - `utils`: Line splitting and brace scanning helpers
//!
//! # Example
//!
//! ```rust
//! use texpreview::core::latex2html::{latex_to_html, HtmlConverter};
//!
//! let html = latex_to_html("\\section{Intro}\nHello \\textbf{world}.");
//! assert!(html.contains("<strong>world</strong>"));
//!
//! // Drive the state machine directly
//! let mut converter = HtmlConverter::new();
//! let output = converter.convert_document("\\begin{abstract}\nShort.\n\\end{abstract}").unwrap();
//! assert!(output.content.starts_with("<div class=\"abstract\""));
//! ```

// Submodules
pub mod context;
pub mod environment;
pub mod markup;
pub mod rules;
pub mod table;
pub mod utils;

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::data::constants::{error_message, fallback_message};
use crate::utils::error::{ConversionError, ConversionOutput, ConversionResult};

// Re-export main types for convenience
pub use context::{
    ConversionState, EnvironmentContext, HtmlConverter, HtmlOptions, ListKind, SectionKind,
};
pub use markup::process_inline_commands;

// =============================================================================
// Public API Functions
// =============================================================================

/// Convert a LaTeX document to an HTML fragment.
///
/// Never fails: input without previewable content yields a fallback message and
/// a failed conversion yields an error message, both pointing to an external
/// compile service.
pub fn latex_to_html(input: &str) -> String {
    latex_to_html_with_options(input, &HtmlOptions::default())
}

/// Convert a LaTeX document to an HTML fragment with custom options
pub fn latex_to_html_with_options(input: &str, options: &HtmlOptions) -> String {
    latex_to_html_with_diagnostics(input, options).content
}

/// Convert a LaTeX document, keeping the warnings collected along the way.
///
/// A failed conversion is rendered as the error message; its warnings are lost.
pub fn latex_to_html_with_diagnostics(input: &str, options: &HtmlOptions) -> ConversionOutput {
    match try_latex_to_html(input, options) {
        Ok(output) => output,
        Err(err) => {
            error!("{}", err);
            ConversionOutput::new(render_error(&err, options))
        }
    }
}

/// Render a conversion error as the HTML error message
pub fn render_error(err: &ConversionError, options: &HtmlOptions) -> String {
    error_message(&escape_text(&err.to_string()), &options.compile_url)
}

/// Convert a LaTeX document, reporting failure as an error.
///
/// Empty output is replaced with the fallback message. Panics inside the
/// converter are reported as [`ConversionError::InternalError`].
pub fn try_latex_to_html(input: &str, options: &HtmlOptions) -> ConversionResult<ConversionOutput> {
    let mut output = catch_internal_errors(|| {
        HtmlConverter::with_options(options.clone()).convert_document(input)
    })?;

    if output.content.is_empty() {
        debug!("no previewable content, using fallback message");
        output.content = fallback_message(&options.compile_url);
    }
    Ok(output)
}

/// Run a conversion, turning a panic into [`ConversionError::InternalError`]
fn catch_internal_errors<F>(convert: F) -> ConversionResult<ConversionOutput>
where
    F: FnOnce() -> ConversionResult<ConversionOutput>,
{
    match panic::catch_unwind(AssertUnwindSafe(convert)) {
        Ok(converted) => converted,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            Err(ConversionError::internal(message))
        }
    }
}

/// Escape text for interpolation into markup
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
