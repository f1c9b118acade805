//! Preview container
//!
//! Wraps converted HTML in the fixed paper-like container used by the live
//! preview pane (serif body text, 800px column, scrollable).

use crate::data::constants::PREVIEW_CONTAINER_STYLE;

/// Wrap an HTML fragment in the preview container
pub fn apply_preview_styles(html: &str) -> String {
    format!("<div style=\"{}\">{}</div>", PREVIEW_CONTAINER_STYLE, html)
}
