//! Fixed HTML fragments, inline styles and messages used by the preview renderer

// ============================================================================
// Messages
// ============================================================================

/// Default target for the "compile it externally" link
pub const DEFAULT_COMPILE_URL: &str = "https://www.overleaf.com";

/// Name shown on the external compile link
pub const COMPILE_SERVICE_NAME: &str = "Overleaf";

/// Shown when nothing previewable was recognized
pub fn fallback_message(compile_url: &str) -> String {
    format!(
        "<p>No previewable content found. Please copy the LaTeX code and compile it in {}.</p>",
        compile_link(compile_url)
    )
}

/// Shown when the conversion failed; `description` must already be HTML-safe
pub fn error_message(description: &str, compile_url: &str) -> String {
    format!(
        "<p style=\"color: #e53e3e; text-align: center; font-size: 1rem; margin-top: 1rem;\">Error parsing LaTeX: {}. Please copy the LaTeX code and compile it in {}.</p>",
        description,
        compile_link(compile_url)
    )
}

fn compile_link(compile_url: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" class=\"text-blue-600 hover:underline\">{}</a>",
        compile_url.replace('"', "%22"),
        COMPILE_SERVICE_NAME
    )
}

// ============================================================================
// Inline styles
// ============================================================================

pub const TITLE_STYLE: &str =
    "font-size: 1.8rem; font-weight: bold; text-align: center; margin-bottom: 1.5rem;";
pub const AUTHOR_STYLE: &str = "text-align: center; font-size: 1.2rem; margin-bottom: 1rem;";
pub const DATE_STYLE: &str = "text-align: center; font-size: 1.2rem; margin-bottom: 1.5rem;";
pub const TITLE_BLOCK_STYLE: &str = "text-align: center; margin-bottom: 2rem;";

pub const ABSTRACT_STYLE: &str = "font-style: italic; margin-bottom: 1.5rem;";
pub const SECTION_STYLE: &str =
    "font-size: 1.4rem; font-weight: bold; margin-top: 1.5rem; margin-bottom: 0.5rem;";
pub const SUBSECTION_STYLE: &str =
    "font-size: 1.2rem; font-weight: bold; margin-top: 1rem; margin-bottom: 0.5rem;";
pub const REFERENCES_LIST_STYLE: &str = "margin-top: 0.5rem;";
pub const REFERENCE_ITEM_STYLE: &str = "margin-bottom: 0.5rem;";
pub const PARAGRAPH_STYLE: &str = "margin-bottom: 1rem;";

pub const MATH_DISPLAY_STYLE: &str = "text-align: center; margin: 1rem 0;";
pub const FIGURE_STYLE: &str = "text-align: center; margin: 1.5rem 0;";
pub const FIGCAPTION_STYLE: &str = "font-size: 0.9rem; color: #666; margin-top: 0.5rem;";

pub const TABLE_STYLE: &str = "width: 100%; border-collapse: collapse; margin: 1rem 0;";
pub const TABLE_HEADER_CELL_STYLE: &str = "border: 1px solid #e2e8f0; padding: 0.5rem; text-align: left; font-weight: bold; background-color: #f7fafc;";
pub const TABLE_DATA_CELL_STYLE: &str =
    "border: 1px solid #e2e8f0; padding: 0.5rem; text-align: left;";
pub const LIST_STYLE: &str = "margin-left: 2rem; margin-bottom: 1rem;";

pub const CITATION_LINK_STYLE: &str = "color: #0000FF;";
pub const URL_LINK_STYLE: &str = "color: #000099;";
pub const MONOSPACE_STYLE: &str = "font-family: monospace;";

/// Container applied by the preview wrapper
pub const PREVIEW_CONTAINER_STYLE: &str = "font-family: 'Times New Roman', Times, serif; font-size: 12pt; line-height: 1.5; text-align: justify; max-width: 800px; margin: 0 auto; padding: 2rem; background: #fff; border: 1px solid #e2e8f0; border-radius: 0.5rem; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); max-height: 600px; overflow-y: auto;";

// ============================================================================
// Directives
// ============================================================================

/// Commands that never produce output on their own line (preamble and layout noise)
pub const NO_OUTPUT_DIRECTIVES: &[&str] = &[
    "documentclass",
    "usepackage",
    "begin{document}",
    "end{document}",
    "maketitle",
    "titlepage",
    "begin{titlepage}",
    "end{titlepage}",
    "nocite",
    "bibliographystyle",
    "bibliography",
    "toprule",
    "midrule",
    "bottomrule",
    "onehalfspacing",
    "centering",
];
