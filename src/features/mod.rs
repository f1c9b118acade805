//! Feature modules - presentation helpers around the converter
//!
//! - Preview container styling

pub mod preview;

pub use preview::apply_preview_styles;
