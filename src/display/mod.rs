//! Display formatting for terminal output
//!
//! Turns round-trip records into the text, table, or JSON report printed by
//! the binary.

pub mod report;

pub use report::{format_json, format_record_line, format_table, format_text, ReportFormat};
