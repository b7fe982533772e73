//! Layout engine for computing chart geometry.
//!
//! This module handles:
//! - Linear scales and data extents
//! - Orientation-aware histogram geometry (bar rects, value-label placement)
//! - Fixed Cartesian layout for time-series and scatter plots
//! - Axis tick generation
//!
//! Everything here is pure; drawing happens in [`crate::render`].

mod axis;
mod cartesian;
mod geometry;
mod orientation;
mod scale;

pub use axis::{format_number_tick, format_time_tick, AxisGeometry, Tick, TICK_PADDING, TICK_SIZE};
pub use cartesian::{compute_cartesian, CartesianLayout, MARKER_RADIUS};
pub use geometry::{Anchor, AxisSide, Baseline, Rect, TextAnchor, TextMetrics};
pub use orientation::{
    compute_orientation, place_label, LabelClass, LabelPlacement, Orientation, OrientationSpec,
    LABEL_MARGIN, LABEL_OFFSET,
};
pub use scale::{extent, histogram_x_domain, histogram_y_domain, nice_ticks, LinearScale};

/// Offset of the plot origin inside the chart surface.
pub const PLOT_ORIGIN: (f64, f64) = (50.0, 50.0);
