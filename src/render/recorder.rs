//! Headless backend that records drawing calls.
//!
//! Used off the browser: in tests, benches, and anywhere the draw list
//! itself is the output. Text is measured with a fixed-pitch estimate.

use super::backend::{RenderBackend, TextNode};
use crate::error::Result;
use crate::layout::{Baseline, Rect, TextAnchor, TextMetrics};

/// Estimated advance of one character.
pub const CHAR_WIDTH: f64 = 7.0;
/// Estimated line height.
pub const LINE_HEIGHT: f64 = 12.0;

/// One recorded drawing call, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    BeginChart {
        outer_width: f64,
        outer_height: f64,
        origin: (f64, f64),
    },
    BeginGroup(String),
    EndGroup,
    Rect {
        rect: Rect,
        class: String,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        class: String,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        class: String,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        class: String,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        class: String,
        anchor: TextAnchor,
        baseline: Baseline,
        rotate: f64,
    },
}

/// Recording backend.
///
/// `ops` holds the current chart only; [`RenderBackend::clear_chart`]
/// empties it. Page state (title, style overrides, log lines) is kept
/// alongside.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub ops: Vec<Op>,
    pub title: Option<String>,
    pub style_rules: Vec<String>,
    /// `(timestamp, line)` pairs in display order
    pub log_lines: Vec<(String, String)>,
    /// Number of times the chart was cleared
    pub clears: usize,
    pub scrolls: usize,
    /// `(text, class)` of every measurement request
    pub measured: Vec<(String, String)>,
    open_groups: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded text nodes with class `class`.
    pub fn texts_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Op> + 'a {
        self.ops
            .iter()
            .filter(move |op| matches!(op, Op::Text { class: c, .. } if c == class))
    }

    /// Recorded rectangles.
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            Op::Rect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    /// Recorded circle centers.
    pub fn circles(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Circle { center, .. } => Some(*center),
            _ => None,
        })
    }

    /// Log lines without their timestamps.
    pub fn log_text(&self) -> Vec<&str> {
        self.log_lines.iter().map(|(_, line)| line.as_str()).collect()
    }

    pub fn has_chart(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, Op::BeginChart { .. }))
    }
}

impl RenderBackend for RecordingBackend {
    fn clear_chart(&mut self) -> Result<()> {
        self.ops.clear();
        self.open_groups = 0;
        self.clears += 1;
        Ok(())
    }

    fn begin_chart(
        &mut self,
        outer_width: f64,
        outer_height: f64,
        origin: (f64, f64),
    ) -> Result<()> {
        self.ops.push(Op::BeginChart {
            outer_width,
            outer_height,
            origin,
        });
        Ok(())
    }

    fn begin_group(&mut self, class: &str) -> Result<()> {
        self.open_groups += 1;
        self.ops.push(Op::BeginGroup(class.to_string()));
        Ok(())
    }

    fn end_group(&mut self) -> Result<()> {
        if self.open_groups == 0 {
            return Err("end_group without an open group".into());
        }
        self.open_groups -= 1;
        self.ops.push(Op::EndGroup);
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, class: &str) -> Result<()> {
        self.ops.push(Op::Rect {
            rect,
            class: class.to_string(),
        });
        Ok(())
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), class: &str) -> Result<()> {
        self.ops.push(Op::Line {
            from,
            to,
            class: class.to_string(),
        });
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], class: &str) -> Result<()> {
        self.ops.push(Op::Polyline {
            points: points.to_vec(),
            class: class.to_string(),
        });
        Ok(())
    }

    fn draw_circle(&mut self, center: (f64, f64), radius: f64, class: &str) -> Result<()> {
        self.ops.push(Op::Circle {
            center,
            radius,
            class: class.to_string(),
        });
        Ok(())
    }

    fn draw_text(&mut self, node: &TextNode<'_>) -> Result<()> {
        self.ops.push(Op::Text {
            text: node.text.to_string(),
            x: node.x,
            y: node.y,
            class: node.class.to_string(),
            anchor: node.anchor,
            baseline: node.baseline,
            rotate: node.rotate,
        });
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str, class: &str) -> TextMetrics {
        self.measured.push((text.to_string(), class.to_string()));
        TextMetrics {
            width: text.chars().count() as f64 * CHAR_WIDTH,
            height: LINE_HEIGHT,
        }
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }

    fn set_style_overrides(&mut self, rules: &[String]) -> Result<()> {
        self.style_rules = rules.to_vec();
        Ok(())
    }

    fn clear_log(&mut self) -> Result<()> {
        self.log_lines.clear();
        Ok(())
    }

    fn append_log_line(&mut self, timestamp: &str, line: &str) -> Result<()> {
        self.log_lines.push((timestamp.to_string(), line.to_string()));
        Ok(())
    }

    fn scroll_log_to_end(&mut self) -> Result<()> {
        self.scrolls += 1;
        Ok(())
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
    fn test_clear_drops_chart_but_keeps_page_state() {
        let mut backend = RecordingBackend::new();
        backend.set_title("t").unwrap();
        backend.append_log_line("now", "line").unwrap();
        backend.begin_chart(10.0, 10.0, (0.0, 0.0)).unwrap();
        backend.clear_chart().unwrap();
        assert!(backend.ops.is_empty());
        assert!(!backend.has_chart());
        assert_eq!(backend.title.as_deref(), Some("t"));
        assert_eq!(backend.log_text(), ["line"]);
    }

    #[test]
    fn test_unbalanced_end_group_fails() {
        let mut backend = RecordingBackend::new();
        assert!(backend.end_group().is_err());
        backend.begin_group("bar").unwrap();
        assert!(backend.end_group().is_ok());
    }

    #[test]
    fn test_fixed_pitch_measure() {
        let mut backend = RecordingBackend::new();
        let metrics = backend.measure_text("123", "bar");
        assert_eq!(metrics.width, 21.0);
        assert_eq!(metrics.height, 12.0);
    }
}
