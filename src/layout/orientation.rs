//! Orientation-aware histogram geometry.
//!
//! A histogram is laid out along two lengths: the *axis length*, over which
//! the buckets are spread, and the *bar length*, the longest a bar can grow.
//! In the `Tall` orientation bars grow upwards from an axis along the bottom;
//! in the `Wide` orientation bars grow rightwards from an axis on the left.

use super::geometry::{Anchor, AxisSide, Baseline, Rect, TextAnchor, TextMetrics};
use crate::types::PlotSize;

/// Extra room a label needs beyond its own length to fit inside a bar.
pub const LABEL_MARGIN: f64 = 30.0;

/// Gap between a value label and the end of its bar.
pub const LABEL_OFFSET: f64 = 6.0;

/// Space added along the bar direction for the title and the value labels.
const BAR_PADDING: f64 = 105.0;

/// Space added along the axis direction for tick labels.
const AXIS_PADDING: f64 = 65.0;

/// Distance of the wide-orientation title from the axis.
const WIDE_LABEL_OFFSET: f64 = -35.0;

/// Distance of the tall-orientation title below the bars.
const TALL_LABEL_OFFSET: f64 = 50.0;

/// Bar direction of a histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Bars run horizontally, axis on the left
    Wide,
    /// Bars run vertically, axis along the bottom
    #[default]
    Tall,
}

impl Orientation {
    pub const fn from_wide(wide: bool) -> Self {
        if wide {
            Self::Wide
        } else {
            Self::Tall
        }
    }

    /// Split a plot size into `(axis_length, bar_length)`.
    pub const fn lengths(self, size: PlotSize) -> (f64, f64) {
        match self {
            Self::Wide => (size.height, size.width),
            Self::Tall => (size.width, size.height),
        }
    }

    /// Extent of a measured label along the bar direction.
    pub const fn along_bar(self, metrics: TextMetrics) -> f64 {
        match self {
            Self::Wide => metrics.width,
            Self::Tall => metrics.height,
        }
    }
}

/// Inside/outside decision for a bar's value label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    Inside,
    Outside,
}

impl LabelClass {
    /// Style class the backend tags the label with.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

/// Where a value label goes, relative to its bar's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub class: LabelClass,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
}

/// Decide whether a label of length `label_length` fits inside a bar of
/// pixel extent `bar_extent`.
///
/// The comparison is strict: a bar exactly `label_length + LABEL_MARGIN`
/// long gets an outside label.
pub fn place_label(bar_extent: f64, label_length: f64) -> LabelClass {
    if bar_extent > label_length + LABEL_MARGIN {
        LabelClass::Inside
    } else {
        LabelClass::Outside
    }
}

/// Geometry of a histogram in one orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationSpec {
    pub orientation: Orientation,
    pub axis_side: AxisSide,
    /// Translation applied to the axis
    pub axis_offset: (f64, f64),
    /// Pixel range of the bucket scale
    pub range_x: (f64, f64),
    /// Pixel range of the count scale
    pub range_y: (f64, f64),
    pub outer_width: f64,
    pub outer_height: f64,
    /// Title label position
    pub label: Anchor,
    /// `axis_length / point_count`
    pub slot_width: f64,
    pub axis_length: f64,
    pub bar_length: f64,
}

/// Compute histogram geometry for `point_count` bars.
///
/// Returns `None` when there are fewer than two points: no meaningful scale
/// exists and the caller must skip rendering.
pub fn compute_orientation(
    point_count: usize,
    axis_length: f64,
    bar_length: f64,
    orientation: Orientation,
) -> Option<OrientationSpec> {
    if point_count <= 1 {
        return None;
    }

    let slot_width = axis_length / point_count as f64;
    let span = axis_length - slot_width;

    let spec = match orientation {
        Orientation::Wide => OrientationSpec {
            orientation,
            axis_side: AxisSide::Left,
            axis_offset: (0.0, 0.0),
            range_x: (0.0, span),
            range_y: (0.0, bar_length),
            outer_width: bar_length + BAR_PADDING,
            outer_height: axis_length + AXIS_PADDING,
            label: Anchor {
                x: WIDE_LABEL_OFFSET,
                y: span * 0.5,
                rotate: -90.0,
            },
            slot_width,
            axis_length,
            bar_length,
        },
        Orientation::Tall => OrientationSpec {
            orientation,
            axis_side: AxisSide::Bottom,
            axis_offset: (0.0, bar_length),
            range_x: (0.0, span),
            range_y: (bar_length, 0.0),
            outer_width: axis_length + AXIS_PADDING,
            outer_height: bar_length + BAR_PADDING,
            label: Anchor {
                x: span * 0.5,
                y: bar_length + TALL_LABEL_OFFSET,
                rotate: 0.0,
            },
            slot_width,
            axis_length,
            bar_length,
        },
    };
    Some(spec)
}

impl OrientationSpec {
    /// Origin of a bar given its scaled bucket (`x_px`) and count (`y_px`).
    pub fn translate(&self, x_px: f64, y_px: f64) -> (f64, f64) {
        match self.orientation {
            Orientation::Wide => (0.0, x_px),
            Orientation::Tall => (x_px, y_px),
        }
    }

    /// Thickness of a bar one bucket (`dx` pixels) wide, keeping a 1px gutter
    /// and never thinner than 1px.
    pub fn bar_thickness(dx: f64) -> f64 {
        (dx - 1.0).max(1.0)
    }

    /// Pixel length of a bar whose count scales to `y_px`.
    pub fn bar_extent(&self, y_px: f64) -> f64 {
        match self.orientation {
            Orientation::Wide => y_px,
            Orientation::Tall => self.bar_length - y_px,
        }
    }

    /// Bar rectangle relative to the bar origin.
    pub fn bar_rect(&self, y_px: f64, dx: f64) -> Rect {
        let thickness = Self::bar_thickness(dx);
        let extent = self.bar_extent(y_px);
        match self.orientation {
            Orientation::Wide => Rect::new(0.0, 1.0, extent, thickness),
            Orientation::Tall => Rect::new(1.0, 0.0, thickness, extent),
        }
    }

    /// Place a value label of measured size `metrics` on the bar whose count
    /// scales to `y_px`.
    pub fn value_label(&self, y_px: f64, dx: f64, metrics: TextMetrics) -> LabelPlacement {
        let extent = self.bar_extent(y_px);
        let length = self.orientation.along_bar(metrics);
        let class = place_label(extent, length);
        match self.orientation {
            Orientation::Wide => LabelPlacement {
                x: match class {
                    LabelClass::Inside => extent - LABEL_OFFSET - length,
                    LabelClass::Outside => extent + LABEL_OFFSET,
                },
                y: dx * 0.5,
                class,
                anchor: TextAnchor::Start,
                baseline: Baseline::Middle,
            },
            // The bar origin is its top end; labels hang below it or sit above it.
            Orientation::Tall => LabelPlacement {
                x: dx * 0.5,
                y: match class {
                    LabelClass::Inside => LABEL_OFFSET + length,
                    LabelClass::Outside => -LABEL_OFFSET,
                },
                class,
                anchor: TextAnchor::Middle,
                baseline: Baseline::Auto,
            },
        }
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
    use test_case::test_case;

    #[test]
    fn test_too_few_points() {
        assert!(compute_orientation(0, 500.0, 500.0, Orientation::Tall).is_none());
        assert!(compute_orientation(1, 500.0, 500.0, Orientation::Wide).is_none());
        assert!(compute_orientation(2, 500.0, 500.0, Orientation::Wide).is_some());
    }

    #[test]
    fn test_wide_geometry() {
        let spec = compute_orientation(4, 400.0, 300.0, Orientation::Wide).unwrap();
        assert_eq!(spec.axis_side, AxisSide::Left);
        assert_eq!(spec.outer_width, 405.0);
        assert_eq!(spec.outer_height, 465.0);
        assert_eq!(spec.slot_width, 100.0);
        assert_eq!(spec.range_x, (0.0, 300.0));
        assert_eq!(spec.range_y, (0.0, 300.0));
        assert_eq!(spec.label, Anchor { x: -35.0, y: 150.0, rotate: -90.0 });
        assert_eq!(spec.translate(120.0, 80.0), (0.0, 120.0));
    }

    #[test]
    fn test_tall_geometry() {
        let spec = compute_orientation(4, 400.0, 300.0, Orientation::Tall).unwrap();
        assert_eq!(spec.axis_side, AxisSide::Bottom);
        assert_eq!(spec.axis_offset, (0.0, 300.0));
        assert_eq!(spec.outer_width, 465.0);
        assert_eq!(spec.outer_height, 405.0);
        assert_eq!(spec.range_y, (300.0, 0.0));
        assert_eq!(spec.label, Anchor { x: 150.0, y: 350.0, rotate: 0.0 });
        assert_eq!(spec.translate(120.0, 80.0), (120.0, 80.0));
    }

    #[test_case(2, 500.0, 500.0)]
    #[test_case(3, 120.0, 800.0)]
    #[test_case(50, 10.0, 20.0)]
    #[test_case(1000, 500.0, 1.0)]
    fn test_orientations_mirror(count: usize, axis: f64, bar: f64) {
        let wide = compute_orientation(count, axis, bar, Orientation::Wide).unwrap();
        let tall = compute_orientation(count, axis, bar, Orientation::Tall).unwrap();
        assert!(wide.outer_width > 0.0 && wide.outer_height > 0.0);
        assert!(tall.outer_width > 0.0 && tall.outer_height > 0.0);

        let swapped = compute_orientation(count, bar, axis, Orientation::Wide).unwrap();
        assert_eq!(swapped.outer_width - 105.0, tall.outer_width - 65.0);
        assert_eq!(swapped.outer_height - 65.0, tall.outer_height - 105.0);
        assert_eq!(wide.outer_width - 105.0, tall.outer_height - 105.0);
        assert_eq!(wide.outer_height - 65.0, tall.outer_width - 65.0);
    }

    #[test_case(100.0, 20.0, LabelClass::Inside ; "long bar")]
    #[test_case(50.0, 20.0, LabelClass::Outside ; "exact boundary")]
    #[test_case(50.5, 20.0, LabelClass::Inside ; "just past boundary")]
    #[test_case(10.0, 20.0, LabelClass::Outside ; "short bar")]
    #[test_case(0.0, 0.0, LabelClass::Outside ; "empty bar")]
    fn test_place_label(extent: f64, length: f64, expected: LabelClass) {
        assert_eq!(place_label(extent, length), expected);
    }

    #[test]
    fn test_bar_thickness_minimum() {
        assert_eq!(OrientationSpec::bar_thickness(0.2), 1.0);
        assert_eq!(OrientationSpec::bar_thickness(1.5), 1.0);
        assert_eq!(OrientationSpec::bar_thickness(10.0), 9.0);
    }

    #[test]
    fn test_bar_rects() {
        let wide = compute_orientation(2, 100.0, 200.0, Orientation::Wide).unwrap();
        assert_eq!(wide.bar_rect(150.0, 20.0), Rect::new(0.0, 1.0, 150.0, 19.0));

        let tall = compute_orientation(2, 100.0, 200.0, Orientation::Tall).unwrap();
        assert_eq!(tall.bar_rect(50.0, 20.0), Rect::new(1.0, 0.0, 19.0, 150.0));
    }

    #[test]
    fn test_wide_value_label() {
        let spec = compute_orientation(2, 100.0, 200.0, Orientation::Wide).unwrap();
        let metrics = TextMetrics { width: 20.0, height: 12.0 };

        let inside = spec.value_label(150.0, 20.0, metrics);
        assert_eq!(inside.class, LabelClass::Inside);
        assert_eq!(inside.x, 124.0);
        assert_eq!(inside.y, 10.0);

        let outside = spec.value_label(50.0, 20.0, metrics);
        assert_eq!(outside.class, LabelClass::Outside);
        assert_eq!(outside.x, 56.0);
    }

    #[test]
    fn test_tall_value_label_measures_height() {
        let spec = compute_orientation(2, 100.0, 200.0, Orientation::Tall).unwrap();
        let metrics = TextMetrics { width: 500.0, height: 12.0 };

        // 150px tall bar, 12px tall text: inside despite the wide text.
        let inside = spec.value_label(50.0, 20.0, metrics);
        assert_eq!(inside.class, LabelClass::Inside);
        assert_eq!(inside.x, 10.0);
        assert_eq!(inside.y, 18.0);

        // Exactly 42px tall bar: outside, above the bar.
        let outside = spec.value_label(158.0, 20.0, metrics);
        assert_eq!(outside.class, LabelClass::Outside);
        assert_eq!(outside.y, -6.0);
    }
}
