//! Table support
//!
//! Tables are buffering environments: rows are tokenized as they arrive and
//! rendered in one piece when the environment closes.
//!
//! ```text
//! raw line -> tokenizer (cells through the inline pipeline) -> conform -> buffer -> render
//! ```

mod colspec;
mod render;
mod tokenizer;


// Re-export public API
pub use colspec::{count_columns, MAX_TABLE_COLUMNS};
pub use render::render_table;
pub use tokenizer::{conform_row, parse_table_row, scan_table_row, TableRowScan};
