//! Core conversion modules
//!
//! This module contains the conversion engine:
//! - `latex2html`: LaTeX to HTML preview converter (line-oriented state machine)

pub mod latex2html;

// Re-export main types and functions from latex2html
pub use latex2html::{
    latex_to_html, latex_to_html_with_diagnostics, latex_to_html_with_options,
    try_latex_to_html, ConversionState, EnvironmentContext, HtmlConverter, HtmlOptions,
};
