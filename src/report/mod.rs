//! Result presentation: preview table and file export.

pub mod export;
pub mod table;

pub use export::{DEFAULT_EXPORT_PATH, ExportError, ExportFormat, write_rows};
pub use table::{DEFAULT_PREVIEW_ROWS, render_table};
