//! CLI output formatting module

pub mod table;

pub use table::{format_report, TableFormatter};
