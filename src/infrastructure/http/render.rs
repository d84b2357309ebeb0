//! HTML rendering of a placement report.

use std::fmt::Write;

use crate::domain::models::Report;

/// Render the report as the placement page: one heading and list per host.
pub fn render_html(report: &Report) -> String {
    let mut html = String::from("<h1>CF Application Placements</h1>");

    for host in report {
        let _ = write!(html, "<h2>Host: {}</h2><ul>", escape_html(&host.host));
        for app in &host.apps {
            let _ = write!(html, "<li>{}</li>", escape_html(app));
        }
        html.push_str("</ul>");
    }

    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
