//! Data layer - Static mappings and constants
//!
//! This module contains all static data used for LaTeX → HTML previews:
//! - Math symbol mappings
//! - xcolor named colors
//! - Fixed HTML fragments, styles and messages

pub mod colors;
pub mod constants;
pub mod symbols;

// Re-export commonly used items
pub use colors::{css_color, NAMED_COLORS};
pub use constants::{error_message, fallback_message, DEFAULT_COMPILE_URL};
pub use symbols::{lookup_symbol, GREEK_LETTERS, MATH_SYMBOLS};
