//! Scatter plot renderer: one marker per `"x|discriminator"` entry.

use super::backend::RenderBackend;
use super::chrome::{draw_axis, draw_title};
use super::style::apply_style;
use super::RenderOutcome;
use crate::error::Result;
use crate::layout::{
    compute_cartesian, format_number_tick, AxisGeometry, AxisSide, MARKER_RADIUS, PLOT_ORIGIN,
};
use crate::types::{Point, ScatterGraph};

/// The x coordinate encoded in a scatter key.
///
/// Everything after the first `|` only keeps keys with equal x distinct.
pub fn parse_key(key: &str) -> Option<f64> {
    let x = key.split_once('|').map_or(key, |(x, _)| x);
    x.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Points in feed order.
pub fn points(graph: &ScatterGraph) -> Vec<Point> {
    graph
        .values
        .iter()
        .filter_map(|(key, y)| {
            let Some(x) = parse_key(key) else {
                log::debug!("skipping scatter key {key:?}");
                return None;
            };
            Some(Point::new(x, *y))
        })
        .collect()
}

pub fn render<B: RenderBackend + ?Sized>(
    graph: &ScatterGraph,
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

    for point in &points {
        backend.draw_circle(layout.project(*point), MARKER_RADIUS, "dot")?;
    }

    let y_axis = AxisGeometry::build(
        &layout.y,
        AxisSide::Left,
        (layout.y_axis_offset(), 0.0),
        tick_count,
        format_number_tick,
    );
    draw_axis(backend, &y_axis, "y axis")?;

    let x_axis = AxisGeometry::build(
        &layout.x,
        AxisSide::Bottom,
        (0.0, layout.x_axis_offset()),
        tick_count,
        format_number_tick,
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

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("1.5|a"), Some(1.5));
        assert_eq!(parse_key("2|x|y"), Some(2.0));
        assert_eq!(parse_key("3"), Some(3.0));
        assert_eq!(parse_key("|a"), None);
        assert_eq!(parse_key("q|1"), None);
    }

    #[test]
    fn test_points_keep_feed_order_and_duplicates() {
        let graph = ScatterGraph {
            presentation: Presentation::default(),
            size: PlotSize::default(),
            values: [("5|a", 1.0), ("1|b", 2.0), ("5|c", 3.0), ("bad", 4.0)]
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
        };
        assert_eq!(
            points(&graph),
            vec![Point::new(5.0, 1.0), Point::new(1.0, 2.0), Point::new(5.0, 3.0)]
        );
    }
}
