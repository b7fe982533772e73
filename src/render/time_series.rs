//! Time-series renderer: a continuous line through chronologically sorted points.

use chrono::DateTime;

use super::backend::RenderBackend;
use super::chrome::{draw_axis, draw_title};
use super::style::apply_style;
use super::RenderOutcome;
use crate::error::Result;
use crate::layout::{
    compute_cartesian, format_number_tick, format_time_tick, AxisGeometry, AxisSide, PLOT_ORIGIN,
};
use crate::types::{Point, TimeSeriesGraph};

/// Parse a time-series key into milliseconds since the Unix epoch.
///
/// Keys are RFC 3339 timestamps; plain numbers are taken as epoch
/// milliseconds.
#[allow(clippy::cast_precision_loss)]
pub fn parse_timestamp(key: &str) -> Option<f64> {
    let key = key.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(key) {
        let millis = time.timestamp_millis() as f64;
        let sub_millis = f64::from(time.timestamp_subsec_nanos() % 1_000_000) / 1_000_000.0;
        return Some(millis + sub_millis);
    }
    key.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Points sorted by timestamp, ties broken by key.
pub fn points(graph: &TimeSeriesGraph) -> Vec<Point> {
    let mut keyed: Vec<(&str, Point)> = graph
        .values
        .iter()
        .filter_map(|(key, value)| {
            let x = parse_timestamp(key)?;
            Some((key.as_str(), Point::new(x, *value)))
        })
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| a.x.total_cmp(&b.x).then_with(|| ka.cmp(kb)));
    keyed.into_iter().map(|(_, point)| point).collect()
}

pub fn render<B: RenderBackend + ?Sized>(
    graph: &TimeSeriesGraph,
    backend: &mut B,
    tick_count: usize,
) -> Result<RenderOutcome> {
    let points = points(graph);
    let Some(layout) = compute_cartesian(&points, graph.size) else {
        return Ok(RenderOutcome::TooFewPoints(points.len()));
    };

    apply_style(&graph.presentation, backend)?;

    backend.clear_chart()?;
    backend.begin_chart(layout.outer_width, layout.outer_height, PLOT_ORIGIN)?;
    draw_title(backend, &graph.presentation.label, layout.label)?;

    let line: Vec<(f64, f64)> = points.iter().map(|p| layout.project(*p)).collect();
    backend.draw_polyline(&line, "line")?;

    let y_axis = AxisGeometry::build(
        &layout.y,
        AxisSide::Left,
        (0.0, 0.0),
        tick_count,
        format_number_tick,
    );
    draw_axis(backend, &y_axis, "y axis")?;

    let x_axis = AxisGeometry::build(
        &layout.x,
        AxisSide::Bottom,
        (0.0, layout.x_axis_offset()),
        tick_count,
        format_time_tick,
    );
    draw_axis(backend, &x_axis, "x axis")?;

    Ok(RenderOutcome::Drawn(points.len()))
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
    use crate::types::{PlotSize, Presentation};

    fn graph(values: &[(&str, f64)]) -> TimeSeriesGraph {
        TimeSeriesGraph {
            presentation: Presentation::default(),
            size: PlotSize::default(),
            values: values.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_parse_rfc3339_nano() {
        let millis = parse_timestamp("2024-01-02T03:04:05.250000001Z").unwrap();
        assert!((millis - 1_704_164_645_250.000_001).abs() < 1e-3);
        let offset = parse_timestamp("2024-01-02T04:04:05+01:00").unwrap();
        assert_eq!(offset, 1_704_164_645_000.0);
    }

    #[test]
    fn test_parse_epoch_millis_fallback() {
        assert_eq!(parse_timestamp("1000"), Some(1000.0));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_points_are_chronological() {
        let points = points(&graph(&[
            ("2024-01-01T00:00:03Z", 3.0),
            ("2024-01-01T00:00:01Z", 1.0),
            ("2024-01-01T00:00:02Z", 2.0),
        ]));
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1.0, 2.0, 3.0]);
        assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn test_ties_broken_by_key() {
        // Same instant written two ways; "+00:00" sorts before "Z".
        let points = points(&graph(&[
            ("2024-01-01T00:00:01Z", 1.0),
            ("2024-01-01T00:00:01+00:00", 2.0),
        ]));
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![2.0, 1.0]);
    }

    #[test]
    fn test_chronological_even_when_keys_sort_differently() {
        let points = points(&graph(&[
            ("2024-01-01T01:00:00+01:00", 1.0),
            ("2024-01-01T00:30:00Z", 2.0),
        ]));
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1.0, 2.0]);
    }
}
