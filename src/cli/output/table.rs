//! Table output for the placement report using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::Report;
use crate::services::address_key;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// One row per host; application names are joined onto separate lines.
    pub fn format_report(&self, report: &Report) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Host").add_attribute(Attribute::Bold),
            Cell::new("Instances").add_attribute(Attribute::Bold),
            Cell::new("Applications").add_attribute(Attribute::Bold),
        ]);

        for host in report {
            let host_cell = if self.use_colors && address_key(&host.host).is_none() {
                // Not an IP address; these sort ahead of every real host
                Cell::new(display_host(&host.host)).fg(Color::Yellow)
            } else {
                Cell::new(display_host(&host.host))
            };

            table.add_row(vec![
                host_cell,
                Cell::new(host.apps.len()),
                Cell::new(host.apps.join("\n")),
            ]);
        }

        format!(
            "{table}\n{} hosts, {} instances",
            report.len(),
            report.placement_count()
        )
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a report with terminal-appropriate colors
pub fn format_report(report: &Report) -> String {
    TableFormatter::new().format_report(report)
}

fn display_host(host: &str) -> &str {
    if host.is_empty() {
        "(none)"
    } else {
        host
    }
}

fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}
