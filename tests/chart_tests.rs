//! Time-series and scatter plot rendering tests
//!
//! Point ordering, projection, axes placement, and page styling.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{chart_size, dispatcher_with, groups, texts, PayloadBuilder};
use streamplot::render::{Op, RecordingBackend, RenderOutcome};

fn polyline(backend: &RecordingBackend) -> Vec<(f64, f64)> {
    backend
        .ops
        .iter()
        .find_map(|op| match op {
            Op::Polyline { points, class } if class == "line" => Some(points.clone()),
            _ => None,
        })
        .expect("no line drawn")
}

/// Lines drawn with class `domain`, in order.
fn domain_lines(backend: &RecordingBackend) -> Vec<((f64, f64), (f64, f64))> {
    backend
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Line { from, to, class } if class == "domain" => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_time_series_line_is_chronological() {
    let mut d = dispatcher_with(&["ts"]);
    let json = PayloadBuilder::time_series()
        .size(300.0, 100.0)
        .points(&[
            ("2024-05-01T10:00:02Z", 30.0),
            ("2024-05-01T10:00:00Z", 10.0),
            ("2024-05-01T10:00:01Z", 20.0),
        ])
        .build();
    assert_eq!(d.on_chart_event("ts", &json), Some(RenderOutcome::Drawn(3)));

    let line = polyline(d.backend());
    assert_eq!(line, vec![(0.0, 100.0), (150.0, 50.0), (300.0, 0.0)]);
    assert_eq!(chart_size(d.backend()), (365.0, 205.0));
}

#[test]
fn test_time_series_axes() {
    let mut d = dispatcher_with(&["ts"]);
    let json = PayloadBuilder::time_series()
        .size(300.0, 100.0)
        .points(&[("2024-05-01T10:00:00Z", -5.0), ("2024-05-01T10:00:10Z", 5.0)])
        .build();
    d.on_chart_event("ts", &json);
    let backend = d.backend();
    assert_eq!(groups(backend), ["y axis", "x axis"]);

    // y axis on the left edge; x axis where y = 0.
    let lines = domain_lines(backend);
    assert_eq!(lines[0], ((0.0, 100.0), (0.0, 0.0)));
    assert_eq!(lines[1], ((0.0, 50.0), (300.0, 50.0)));

    // Ten seconds of data gets whole-second ticks.
    let x_labels: Vec<String> = backend
        .ops
        .iter()
        .skip_while(|op| !matches!(op, Op::BeginGroup(c) if c == "x axis"))
        .filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(x_labels.first().map(String::as_str), Some("10:00:00"));
    assert_eq!(x_labels.last().map(String::as_str), Some("10:00:10"));
}

#[test]
fn test_time_series_single_point_is_skipped() {
    let mut d = dispatcher_with(&["ts"]);
    let json = PayloadBuilder::time_series()
        .point("2024-05-01T10:00:00Z", 1.0)
        .point("not a time", 2.0)
        .build();
    assert_eq!(
        d.on_chart_event("ts", &json),
        Some(RenderOutcome::TooFewPoints(1))
    );
}

#[test]
fn test_scatter_markers_in_feed_order() {
    let mut d = dispatcher_with(&["sc"]);
    let json = PayloadBuilder::scatter()
        .size(100.0, 100.0)
        .points(&[("10|a", 0.0), ("0|b", 10.0), ("10|c", 10.0), ("5|d", 5.0)])
        .build();
    assert_eq!(d.on_chart_event("sc", &json), Some(RenderOutcome::Drawn(4)));

    let backend = d.backend();
    let centers: Vec<(f64, f64)> = backend.circles().collect();
    assert_eq!(
        centers,
        vec![(100.0, 100.0), (0.0, 0.0), (100.0, 0.0), (50.0, 50.0)]
    );
    assert!(backend.ops.iter().all(|op| match op {
        Op::Circle { radius, class, .. } => *radius == 3.5 && class == "dot",
        _ => true,
    }));
}

#[test]
fn test_scatter_axes_cross_at_zero() {
    let mut d = dispatcher_with(&["sc"]);
    let json = PayloadBuilder::scatter()
        .size(200.0, 100.0)
        .points(&[("-10|a", -10.0), ("10|b", 10.0)])
        .build();
    d.on_chart_event("sc", &json);
    let lines = domain_lines(d.backend());
    // y axis at x = 0, x axis at y = 0
    assert_eq!(lines[0], ((100.0, 100.0), (100.0, 0.0)));
    assert_eq!(lines[1], ((0.0, 50.0), (200.0, 50.0)));
}

#[test]
fn test_presentation_overrides() {
    let mut d = dispatcher_with(&["sc"]);
    let json = PayloadBuilder::scatter()
        .label("requests")
        .colors("#111,#eee,orange")
        .font_size("14px")
        .points(&[("1|a", 1.0), ("2|b", 2.0)])
        .build();
    d.on_chart_event("sc", &json);

    let backend = d.backend();
    assert_eq!(backend.title.as_deref(), Some("requests"));
    assert_eq!(
        backend.style_rules,
        vec![
            "body { background-color: #111 }",
            ".axis path, .axis line { stroke: #eee }",
            "text, text.outside { fill: #eee }",
            "text.inside { fill: #111 }",
            "pre.lines { color: #eee }",
            ".dot, .bar { fill: orange }",
            "path.line { stroke: orange }",
            "body { font-size: 14px }",
        ]
    );
    assert_eq!(texts(backend, "label"), ["requests"]);
}

#[test]
fn test_dropped_options_stop_applying() {
    let mut d = dispatcher_with(&["sc"]);
    let styled = PayloadBuilder::scatter()
        .colors(",,red")
        .points(&[("1|a", 1.0), ("2|b", 2.0)])
        .build();
    d.on_chart_event("sc", &styled);
    assert_eq!(d.backend().style_rules.len(), 2);

    let plain = PayloadBuilder::scatter()
        .points(&[("1|a", 1.0), ("2|b", 2.0)])
        .build();
    d.on_chart_event("sc", &plain);
    assert!(d.backend().style_rules.is_empty());
    assert!(texts(d.backend(), "label").is_empty());
}
