//! Browser tests for the SVG backend and the stream entry point.
//!
//! Run with: wasm-pack test --headless --firefox
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use streamplot::render::{render_graph, RenderBackend, RenderOutcome, SvgBackend};
use streamplot::{ChartStream, Graph, Session, StreamConfig};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn host() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn histogram_draws_svg() {
    let host = host();
    let mut backend = SvgBackend::new(host.clone()).unwrap();
    let graph = Graph::from_json(
        r#"{"Layout": "histogram", "Label": "sizes", "Values": {"0": 3, "1": 40}}"#,
        StreamConfig::default().default_size(),
    )
    .unwrap();
    let outcome = render_graph(
        &graph,
        &mut Session::new(),
        &mut backend,
        &StreamConfig::default(),
        chrono::Utc::now(),
    )
    .unwrap();
    assert_eq!(outcome, RenderOutcome::Drawn(2));

    let svg = host.query_selector("svg").unwrap().unwrap();
    assert_eq!(svg.get_attribute("width").as_deref(), Some("565"));
    assert_eq!(host.query_selector_all("g.bar rect").unwrap().length(), 2);
    assert_eq!(
        web_sys::window().unwrap().document().unwrap().title(),
        "sizes"
    );
    let label = host.query_selector("text.label").unwrap().unwrap();
    assert_eq!(label.get_attribute("font-size").as_deref(), Some("1.1em"));
}

#[wasm_bindgen_test]
fn redraw_replaces_svg() {
    let host = host();
    let mut backend = SvgBackend::new(host.clone()).unwrap();
    for _ in 0..2 {
        backend.begin_chart(100.0, 100.0, (50.0, 50.0)).unwrap();
        backend.draw_circle((1.0, 1.0), 3.5, "dot").unwrap();
    }
    assert_eq!(host.query_selector_all("svg").unwrap().length(), 1);
}

#[wasm_bindgen_test]
fn measured_text_has_size() {
    let mut backend = SvgBackend::new(host()).unwrap();
    backend.begin_chart(100.0, 100.0, (0.0, 0.0)).unwrap();
    let metrics = backend.measure_text("12345", "bar");
    assert!(metrics.width > 0.0);
    assert!(metrics.height > 0.0);
}

#[wasm_bindgen_test]
fn log_lines_append() {
    let host = host();
    let mut backend = SvgBackend::new(host.clone()).unwrap();
    backend.append_log_line("t0", "<b>not markup</b>").unwrap();
    backend.scroll_log_to_end().unwrap();
    let pre = host.query_selector("pre.lines").unwrap().unwrap();
    assert_eq!(
        pre.text_content().unwrap(),
        "[t0] <b>not markup</b>\n"
    );
    assert!(pre.query_selector("b").unwrap().is_none());
}

#[wasm_bindgen_test]
fn stream_starts_idle() {
    let stream = ChartStream::new(host(), JsValue::UNDEFINED).unwrap();
    assert_eq!(stream.state(), "idle");
    assert_eq!(stream.charts().length(), 0);
}
