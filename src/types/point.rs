use serde::{Deserialize, Serialize};

/// A plot-ready data point.
///
/// Time-series points carry their timestamp as milliseconds since the Unix
/// epoch in `x`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Plot area size in pixels, excluding margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: f64,
    pub height: f64,
}

impl PlotSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replace non-positive or non-finite dimensions with the fallback's.
    pub fn or(self, fallback: Self) -> Self {
        let pick = |value: f64, default: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        };
        Self {
            width: pick(self.width, fallback.width),
            height: pick(self.height, fallback.height),
        }
    }
}

impl Default for PlotSize {
    fn default() -> Self {
        Self::new(500.0, 500.0)
    }
}
