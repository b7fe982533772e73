//! Stream dispatcher tests
//!
//! Discovery, deduplication, error envelopes, and what happens to bad
//! updates.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{changed, dispatcher, dispatcher_with, PayloadBuilder, RecordedSubscriptions};
use streamplot::render::{RecordingBackend, RenderOutcome};
use streamplot::stream::DefaultOutcome;
use streamplot::{ConnectionState, StreamConfig, StreamDispatcher};

fn two_bars() -> String {
    PayloadBuilder::histogram()
        .points(&[("0", 1.0), ("1", 2.0)])
        .build()
}

#[test]
fn test_duplicate_discovery_subscribes_once() {
    let mut d = dispatcher();
    let mut subs = RecordedSubscriptions::default();
    assert_eq!(
        d.on_message(&changed("cpu"), &mut subs),
        DefaultOutcome::Subscribed("cpu".into())
    );
    assert_eq!(
        d.on_message(&changed("cpu"), &mut subs),
        DefaultOutcome::AlreadyRegistered
    );
    assert_eq!(subs.ids, ["cpu"]);
    assert_eq!(d.session().registry.len(), 1);
}

#[test]
fn test_registry_keeps_discovery_order() {
    let d = dispatcher_with(&["b", "a", "c", "a"]);
    let ids: Vec<&str> = d.session().registry.iter().collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn test_error_envelopes_change_nothing() {
    let mut d = dispatcher_with(&["cpu"]);
    let mut subs = RecordedSubscriptions::default();
    for message in [
        r#"{"type": "error", "message": "upstream failed"}"#,
        r#"{"error": "read /var/log/app.log: permission denied"}"#,
    ] {
        assert_eq!(d.on_message(message, &mut subs), DefaultOutcome::ErrorEnvelope);
    }
    assert!(subs.ids.is_empty());
    assert_eq!(d.state(), ConnectionState::Connected);
    assert_eq!(d.session().registry.len(), 1);
}

#[test]
fn test_unrecognized_messages_are_ignored() {
    let mut d = dispatcher();
    let mut subs = RecordedSubscriptions::default();
    for message in ["", "not json", "{}", r#"{"changed": null}"#, "42"] {
        assert_eq!(d.on_message(message, &mut subs), DefaultOutcome::Ignored);
    }
    assert!(d.session().registry.is_empty());
}

#[test]
fn test_discovery_then_update_draws() {
    let mut d = dispatcher();
    let mut subs = RecordedSubscriptions::default();
    d.on_open();
    d.on_message(&changed("cpu"), &mut subs);
    assert_eq!(d.on_chart_event("cpu", &two_bars()), Some(RenderOutcome::Drawn(2)));
    assert!(d.backend().has_chart());
}

#[test]
fn test_unknown_layout_is_skipped() {
    let mut d = dispatcher_with(&["pie"]);
    let json = PayloadBuilder::new("pie-chart").point("0", 1.0).build();
    assert_eq!(d.on_chart_event("pie", &json), None);
    assert!(!d.backend().has_chart());
    assert!(d.backend().style_rules.is_empty());
}

#[test]
fn test_malformed_update_keeps_previous_chart() {
    let mut d = dispatcher_with(&["cpu"]);
    d.on_chart_event("cpu", &two_bars());
    let before = d.backend().ops.clone();

    assert_eq!(d.on_chart_event("cpu", "{not json"), None);
    assert_eq!(d.on_chart_event("cpu", r#"{"Layout": "histogram", "Values": [1, 2]}"#), None);
    assert_eq!(d.backend().ops, before);
}

#[test]
fn test_every_update_is_a_full_redraw() {
    let mut d = dispatcher_with(&["cpu"]);
    d.on_chart_event("cpu", &two_bars());
    let first_len = d.backend().ops.len();
    d.on_chart_event("cpu", &two_bars());
    assert_eq!(d.backend().ops.len(), first_len);
    assert_eq!(d.backend().clears, 2);
}

#[test]
fn test_connection_states() {
    let mut d = dispatcher();
    assert_eq!(d.state(), ConnectionState::Idle);
    d.on_open();
    d.on_open();
    assert_eq!(d.state(), ConnectionState::Connected);
    d.on_closed();
    assert_eq!(d.state(), ConnectionState::Closed);
}

#[test]
fn test_reset_forgets_charts() {
    let mut d = dispatcher_with(&["cpu"]);
    d.reset();
    assert!(d.session().registry.is_empty());
    assert_eq!(d.state(), ConnectionState::Idle);
    assert_eq!(d.on_chart_event("cpu", &two_bars()), None);
}

#[test]
fn test_configured_default_size() {
    let config = StreamConfig {
        default_width: 200.0,
        default_height: 100.0,
        ..StreamConfig::default()
    };
    let mut d = StreamDispatcher::new(RecordingBackend::new(), config);
    let mut subs = RecordedSubscriptions::default();
    d.on_message(&changed("cpu"), &mut subs);
    d.on_chart_event("cpu", &two_bars());
    assert_eq!(common::chart_size(d.backend()), (265.0, 205.0));
}
