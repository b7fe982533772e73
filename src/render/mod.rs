//! Chart renderers with pluggable backends.
//!
//! This module provides:
//! - The backend-agnostic [`RenderBackend`] trait
//! - One renderer per chart kind, picked by [`render_graph`]
//! - Page styling from presentation options
//! - An SVG DOM backend (browser) and a recording backend (headless)

pub mod backend;
mod chrome;
pub mod histogram;
pub mod logfile;
pub mod recorder;
pub mod scatter;
pub mod style;
pub mod time_series;

#[cfg(target_arch = "wasm32")]
pub mod svg;

pub use backend::{RenderBackend, TextNode};
pub use logfile::{LogCursor, LogState};
pub use recorder::{Op, RecordingBackend};
pub use style::{apply_style, style_rules, Palette};

#[cfg(target_arch = "wasm32")]
pub use svg::SvgBackend;

use chrono::{DateTime, Utc};

use crate::config::StreamConfig;
use crate::error::Result;
use crate::session::Session;
use crate::types::Graph;

/// What a render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A chart was drawn from this many points
    Drawn(usize),
    /// Fewer than two usable points; the previous chart was left in place
    TooFewPoints(usize),
    /// This many new log lines were appended
    LogAppended(usize),
}

/// Draw one graph update with the renderer for its kind.
pub fn render_graph<B: RenderBackend + ?Sized>(
    graph: &Graph,
    session: &mut Session,
    backend: &mut B,
    config: &StreamConfig,
    received_at: DateTime<Utc>,
) -> Result<RenderOutcome> {
    match graph {
        Graph::Histogram(g) => histogram::render(g, backend, config.axis_ticks),
        Graph::TimeSeries(g) => time_series::render(g, backend, config.axis_ticks),
        Graph::Scatter(g) => scatter::render(g, backend, config.axis_ticks),
        Graph::Log(g) => logfile::render(g, &mut session.log_cursor, backend, received_at),
    }
}

/// Shortest decimal form of a bar value.
pub(crate) fn format_value(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-0.125), "-0.125");
    }
}
