//! WASM bindings for texpreview
//!
//! This module provides JavaScript-accessible functions for LaTeX → HTML previews.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

/// LaTeX to HTML conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize, Default)]
pub struct HtmlConvertOptions {
    /// Fail on malformed structure instead of warning
    #[serde(default)]
    pub strict: bool,
    /// Link target for the "compile it externally" hint
    #[serde(default, rename = "compileUrl")]
    pub compile_url: Option<String>,
    /// Wrap the output in the preview container
    #[serde(default)]
    pub wrap: bool,
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert a LaTeX document to an HTML fragment
///
/// Always returns HTML: the preview, the fallback message or the error message.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "latexToHtml")]
pub fn latex_to_html_wasm(input: &str) -> String {
    crate::latex_to_html(input)
}

/// Convert a LaTeX document with options
///
/// # Arguments
/// * `input` - LaTeX source
/// * `options` - `{ strict?: boolean, compileUrl?: string, wrap?: boolean }`
///
/// # Returns
/// `{ output, success, error, warnings }`. On failure `output` still holds
/// the rendered error message.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "latexToHtmlWithOptions")]
pub fn latex_to_html_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: HtmlConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();

    let mut html_opts = if opts.strict {
        crate::HtmlOptions::strict()
    } else {
        crate::HtmlOptions::default()
    };
    if let Some(url) = opts.compile_url {
        html_opts = html_opts.with_compile_url(url);
    }

    let wrap = |html: String| {
        if opts.wrap {
            crate::apply_preview_styles(&html)
        } else {
            html
        }
    };

    let result = match crate::try_latex_to_html(input, &html_opts) {
        Ok(output) => ConvertResult {
            warnings: output.warnings.iter().map(|w| w.to_string()).collect(),
            output: wrap(output.content),
            success: true,
            error: None,
        },
        Err(err) => ConvertResult {
            output: wrap(crate::latex2html::render_error(&err, &html_opts)),
            success: false,
            error: Some(err.to_string()),
            warnings: vec![],
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Wrap an HTML fragment in the preview container
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "applyPreviewStyles")]
pub fn apply_preview_styles_wasm(html: &str) -> String {
    crate::apply_preview_styles(html)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
