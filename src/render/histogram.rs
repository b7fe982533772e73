//! Histogram renderer: one bar per bucket, labelled with its count.

use super::backend::{RenderBackend, TextNode};
use super::chrome::{draw_axis, draw_title};
use super::style::apply_style;
use super::{format_value, RenderOutcome};
use crate::error::Result;
use crate::layout::{
    compute_orientation, format_number_tick, histogram_x_domain, histogram_y_domain,
    AxisGeometry, LinearScale, OrientationSpec, PLOT_ORIGIN,
};
use crate::types::{HistogramGraph, Point};

/// Bucket points sorted by bucket start.
///
/// Keys that are not numbers are skipped.
pub fn points(graph: &HistogramGraph) -> Vec<Point> {
    let mut points: Vec<Point> = graph
        .values
        .iter()
        .filter_map(|(key, count)| {
            let x = key.trim().parse::<f64>().ok().filter(|x| x.is_finite())?;
            Some(Point::new(x, *count))
        })
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points
}

pub fn render<B: RenderBackend + ?Sized>(
    graph: &HistogramGraph,
    backend: &mut B,
    tick_count: usize,
) -> Result<RenderOutcome> {
    let points = points(graph);
    let (axis_length, bar_length) = graph.orientation.lengths(graph.size);
    let Some(spec) = compute_orientation(points.len(), axis_length, bar_length, graph.orientation)
    else {
        return Ok(RenderOutcome::TooFewPoints(points.len()));
    };
    let Some(x_domain) = histogram_x_domain(&points, graph.bucket) else {
        return Ok(RenderOutcome::TooFewPoints(0));
    };

    apply_style(&graph.presentation, backend)?;

    let x = LinearScale::new(x_domain, spec.range_x);
    let y = LinearScale::new(histogram_y_domain(&points), spec.range_y);
    let dx = x.length_of(graph.bucket);

    backend.clear_chart()?;
    backend.begin_chart(spec.outer_width, spec.outer_height, PLOT_ORIGIN)?;
    draw_title(backend, &graph.presentation.label, spec.label)?;

    for point in &points {
        draw_bar(backend, &spec, *point, &x, &y, dx)?;
    }

    let axis = AxisGeometry::build(
        &x,
        spec.axis_side,
        spec.axis_offset,
        tick_count,
        format_number_tick,
    );
    draw_axis(backend, &axis, "axis")?;

    Ok(RenderOutcome::Drawn(points.len()))
}

fn draw_bar<B: RenderBackend + ?Sized>(
    backend: &mut B,
    spec: &OrientationSpec,
    point: Point,
    x: &LinearScale,
    y: &LinearScale,
    dx: f64,
) -> Result<()> {
    let y_px = y.apply(point.y);
    let origin = spec.translate(x.apply(point.x), y_px);

    backend.begin_group("bar")?;
    backend.draw_rect(spec.bar_rect(y_px, dx).translate(origin), "")?;

    let text = format_value(point.y);
    let metrics = backend.measure_text(&text, "");
    let placement = spec.value_label(y_px, dx, metrics);
    let node = TextNode::new(&text, origin.0 + placement.x, origin.1 + placement.y)
        .class(placement.class.as_str())
        .align(placement.anchor, placement.baseline);
    backend.draw_text(&node)?;
    backend.end_group()
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
    use crate::layout::Orientation;
    use crate::types::{PlotSize, Presentation};
    use indexmap::IndexMap;

    fn graph(values: &[(&str, f64)]) -> HistogramGraph {
        HistogramGraph {
            presentation: Presentation::default(),
            size: PlotSize::default(),
            orientation: Orientation::Tall,
            bucket: 1.0,
            values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn test_points_sorted_by_bucket() {
        let points = points(&graph(&[("10", 1.0), ("-5", 3.0), ("2.5", 7.0)]));
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-5.0, 2.5, 10.0]);
    }

    #[test]
    fn test_points_sort_numerically_not_lexically() {
        let points = points(&graph(&[("100", 1.0), ("20", 1.0), ("3", 1.0)]));
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 20.0, 100.0]);
    }

    #[test]
    fn test_unparseable_keys_are_skipped() {
        let points = points(&graph(&[("abc", 1.0), ("1", 2.0), ("NaN", 4.0)]));
        assert_eq!(points, vec![Point::new(1.0, 2.0)]);
    }
}
