//! # texpreview
//!
//! Fast LaTeX → HTML previewer written in Rust.
//!
//! ## Features
//!
//! - **Live Preview**: Renders the common structure of an article (title block,
//!   abstract, sections, lists, tables, references, equations, figures) as an
//!   HTML fragment
//! - **Inline Markup**: Text formatting, citations, links, colors, inline math
//!   with Greek letters, math symbols and fractions
//! - **Never Fails**: Input without previewable content yields a fallback
//!   message; a failed conversion yields an error message instead of a panic
//! - **Diagnostics**: Unclosed environments and malformed table rows are
//!   reported as warnings, or as errors in strict mode
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use texpreview::{apply_preview_styles, latex_to_html};
//!
//! let html = latex_to_html(r"\section{Intro}
//! Hello \textbf{world}.");
//! assert!(html.contains("<strong>world</strong>"));
//!
//! // Wrap it for display
//! let page = apply_preview_styles(&html);
//! assert!(page.starts_with("<div style="));
//! ```
//!
//! ### Strict Mode and Diagnostics
//!
//! ```rust
//! use texpreview::{latex_to_html_with_diagnostics, try_latex_to_html, HtmlOptions};
//!
//! let output = latex_to_html_with_diagnostics(
//!     "\\begin{itemize}\n\\item one",
//!     &HtmlOptions::default(),
//! );
//! assert!(output.has_warnings());
//!
//! assert!(try_latex_to_html("\\end{figure}", &HtmlOptions::strict()).is_err());
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static mappings and constants
pub mod data;

/// Feature modules - presentation helpers
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion functions
pub use core::latex2html;
pub use core::latex2html::{
    latex_to_html, latex_to_html_with_diagnostics, latex_to_html_with_options,
    process_inline_commands, try_latex_to_html, ConversionState, EnvironmentContext,
    HtmlConverter, HtmlOptions,
};

// Re-export data modules
pub use data::colors;
pub use data::constants;
pub use data::symbols;

// Re-export feature modules
pub use features::preview;
pub use features::preview::apply_preview_styles;

// Re-export utilities
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};
