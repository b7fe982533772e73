//! Render backend trait for pluggable rendering implementations.
//!
//! This module defines the `RenderBackend` trait that abstracts the drawing
//! primitives the chart renderers need, allowing the browser SVG backend and
//! the headless recorder to be used interchangeably.

use crate::error::Result;
use crate::layout::{Baseline, Rect, TextAnchor, TextMetrics};

/// A text node to draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    /// Style class; empty for none
    pub class: &'a str,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    /// Rotation in degrees around `(x, y)`
    pub rotate: f64,
    /// Bold, slightly larger text (chart titles)
    pub emphasis: bool,
}

impl<'a> TextNode<'a> {
    pub fn new(text: &'a str, x: f64, y: f64) -> Self {
        Self {
            text,
            x,
            y,
            class: "",
            anchor: TextAnchor::Start,
            baseline: Baseline::Auto,
            rotate: 0.0,
            emphasis: false,
        }
    }

    pub fn class(mut self, class: &'a str) -> Self {
        self.class = class;
        self
    }

    pub fn align(mut self, anchor: TextAnchor, baseline: Baseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn emphasis(mut self) -> Self {
        self.emphasis = true;
        self
    }
}

/// Trait for render backends
///
/// Chart primitives are drawn into the surface opened by the most recent
/// [`begin_chart`](Self::begin_chart), in plot coordinates (the backend
/// applies the plot origin). Groups nest; primitives go into the innermost
/// open group.
pub trait RenderBackend {
    /// Remove any chart drawn so far.
    fn clear_chart(&mut self) -> Result<()>;

    /// Open a new chart surface of the given outer size with its plot origin
    /// at `origin`.
    fn begin_chart(&mut self, outer_width: f64, outer_height: f64, origin: (f64, f64))
        -> Result<()>;

    /// Open a group tagged with `class`.
    fn begin_group(&mut self, class: &str) -> Result<()>;

    /// Close the innermost open group.
    fn end_group(&mut self) -> Result<()>;

    fn draw_rect(&mut self, rect: Rect, class: &str) -> Result<()>;

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), class: &str) -> Result<()>;

    /// Draw a connected line through `points`.
    fn draw_polyline(&mut self, points: &[(f64, f64)], class: &str) -> Result<()>;

    fn draw_circle(&mut self, center: (f64, f64), radius: f64, class: &str) -> Result<()>;

    fn draw_text(&mut self, node: &TextNode<'_>) -> Result<()>;

    /// Rendered size of `text` with style class `class` on the current chart.
    fn measure_text(&mut self, text: &str, class: &str) -> TextMetrics;

    /// Set the page title.
    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Replace the style override block with `rules`.
    fn set_style_overrides(&mut self, rules: &[String]) -> Result<()>;

    /// Remove every log line shown so far.
    fn clear_log(&mut self) -> Result<()>;

    /// Append one line to the log view.
    fn append_log_line(&mut self, timestamp: &str, line: &str) -> Result<()>;

    /// Bring the newest log line into view.
    fn scroll_log_to_end(&mut self) -> Result<()>;
}
