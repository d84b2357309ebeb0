//! HTTP presentation of the placement report

pub mod render;
pub mod server;

pub use render::render_html;
pub use server::{router, serve, ReportAppState};
