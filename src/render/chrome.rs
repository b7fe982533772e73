//! Chart titles and axes, shared by the chart renderers.

use super::backend::{RenderBackend, TextNode};
use crate::error::Result;
use crate::layout::{Anchor, AxisGeometry, Baseline, TextAnchor};

/// Draw the chart label centered on `anchor`.
pub(super) fn draw_title<B: RenderBackend + ?Sized>(
    backend: &mut B,
    label: &str,
    anchor: Anchor,
) -> Result<()> {
    if label.is_empty() {
        return Ok(());
    }
    let node = TextNode::new(label, anchor.x, anchor.y)
        .class("label")
        .align(TextAnchor::Middle, Baseline::Auto)
        .rotate(anchor.rotate)
        .emphasis();
    backend.draw_text(&node)
}

/// Draw an axis inside a group tagged `class`.
pub(super) fn draw_axis<B: RenderBackend + ?Sized>(
    backend: &mut B,
    axis: &AxisGeometry,
    class: &str,
) -> Result<()> {
    backend.begin_group(class)?;
    let (from, to) = axis.domain_line();
    backend.draw_line(from, to, "domain")?;
    for tick in &axis.ticks {
        let (mark_from, mark_to) = axis.tick_mark(tick);
        backend.draw_line(mark_from, mark_to, "tick")?;
        let ((x, y), anchor, baseline) = axis.tick_label(tick);
        backend.draw_text(&TextNode::new(&tick.label, x, y).align(anchor, baseline))?;
    }
    backend.end_group()
}
