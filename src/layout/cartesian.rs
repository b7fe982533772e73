//! Fixed left-to-right, bottom-to-top layout for time-series and scatter plots.

use super::geometry::Anchor;
use super::scale::{extent, LinearScale};
use crate::types::{PlotSize, Point};

/// Radius of a scatter plot marker.
pub const MARKER_RADIUS: f64 = 3.5;

const WIDTH_PADDING: f64 = 65.0;
const HEIGHT_PADDING: f64 = 105.0;
const LABEL_OFFSET: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianLayout {
    pub x: LinearScale,
    pub y: LinearScale,
    pub outer_width: f64,
    pub outer_height: f64,
    pub label: Anchor,
}

/// Scales spanning the full extent of both coordinates, with no padding.
///
/// Returns `None` for fewer than two points.
pub fn compute_cartesian(points: &[Point], size: PlotSize) -> Option<CartesianLayout> {
    if points.len() <= 1 {
        return None;
    }
    let x_domain = extent(points.iter().map(|p| p.x))?;
    let y_domain = extent(points.iter().map(|p| p.y))?;

    Some(CartesianLayout {
        x: LinearScale::new(x_domain, (0.0, size.width)),
        y: LinearScale::new(y_domain, (size.height, 0.0)),
        outer_width: size.width + WIDTH_PADDING,
        outer_height: size.height + HEIGHT_PADDING,
        label: Anchor {
            x: size.width * 0.5,
            y: size.height + LABEL_OFFSET,
            rotate: 0.0,
        },
    })
}

impl CartesianLayout {
    /// Vertical position of the x axis: at y = 0 when zero is in view,
    /// otherwise along the bottom.
    pub fn x_axis_offset(&self) -> f64 {
        self.y.apply(self.y.domain().0.max(0.0))
    }

    /// Horizontal position of the y axis: at x = 0 when zero is in view,
    /// otherwise along the left edge.
    pub fn y_axis_offset(&self) -> f64 {
        self.x.apply(self.x.domain().0.max(0.0))
    }

    pub fn project(&self, point: Point) -> (f64, f64) {
        (self.x.apply(point.x), self.y.apply(point.y))
    }
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
    fn test_full_extent_domains() {
        let points = [Point::new(10.0, -2.0), Point::new(30.0, 6.0), Point::new(20.0, 0.0)];
        let layout = compute_cartesian(&points, PlotSize::new(200.0, 100.0)).unwrap();
        assert_eq!(layout.x.domain(), (10.0, 30.0));
        assert_eq!(layout.y.domain(), (-2.0, 6.0));
        assert_eq!(layout.outer_width, 265.0);
        assert_eq!(layout.outer_height, 205.0);
        assert_eq!(layout.project(Point::new(10.0, 6.0)), (0.0, 0.0));
        assert_eq!(layout.project(Point::new(30.0, -2.0)), (200.0, 100.0));
    }

    #[test]
    fn test_axis_offsets_follow_zero() {
        let points = [Point::new(-10.0, -2.0), Point::new(10.0, 6.0)];
        let layout = compute_cartesian(&points, PlotSize::new(200.0, 80.0)).unwrap();
        assert_eq!(layout.y_axis_offset(), 100.0);
        assert_eq!(layout.x_axis_offset(), 60.0);
    }

    #[test]
    fn test_axis_offsets_without_zero_in_view() {
        let points = [Point::new(5.0, 10.0), Point::new(10.0, 20.0)];
        let layout = compute_cartesian(&points, PlotSize::new(200.0, 80.0)).unwrap();
        assert_eq!(layout.y_axis_offset(), 0.0);
        assert_eq!(layout.x_axis_offset(), 80.0);
    }

    #[test]
    fn test_needs_two_points() {
        assert!(compute_cartesian(&[Point::new(1.0, 1.0)], PlotSize::default()).is_none());
    }
}
