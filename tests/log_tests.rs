//! Log tail tests
//!
//! Appending only unseen lines, resetting on a new label, and receipt
//! timestamps.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{at, dispatcher_with, PayloadBuilder};
use streamplot::render::{LogState, RenderOutcome};

fn hello_world() -> String {
    PayloadBuilder::logfile("a", 2)
        .line(0, "hello")
        .line(1, "world")
        .build()
}

#[test]
fn test_appends_exactly_the_new_line() {
    let mut d = dispatcher_with(&["log"]);
    assert_eq!(
        d.on_chart_event_at("log", &hello_world(), at(0)),
        Some(RenderOutcome::LogAppended(2))
    );

    let next = PayloadBuilder::logfile("a", 3)
        .line(0, "hello")
        .line(1, "world")
        .line(2, "!")
        .build();
    assert_eq!(
        d.on_chart_event_at("log", &next, at(1)),
        Some(RenderOutcome::LogAppended(1))
    );
    assert_eq!(d.backend().log_text(), ["hello", "world", "!"]);
}

#[test]
fn test_replay_never_duplicates() {
    let mut d = dispatcher_with(&["log"]);
    d.on_chart_event_at("log", &hello_world(), at(0));
    assert_eq!(
        d.on_chart_event_at("log", &hello_world(), at(1)),
        Some(RenderOutcome::LogAppended(0))
    );
    assert_eq!(d.backend().log_text(), ["hello", "world"]);
    assert_eq!(d.backend().scrolls, 2);
}

#[test]
fn test_new_label_clears_and_restarts() {
    let mut d = dispatcher_with(&["log"]);
    d.on_chart_event_at("log", &hello_world(), at(0));
    assert_eq!(d.session().log_cursor.state(), LogState::Streaming);

    let other = PayloadBuilder::logfile("b", 1).line(0, "fresh").build();
    d.on_chart_event_at("log", &other, at(1));
    assert_eq!(d.backend().log_text(), ["fresh"]);
    assert_eq!(d.session().log_cursor.last_label(), Some("b"));
    assert_eq!(d.session().log_cursor.last_line(), 1);
}

#[test]
fn test_new_label_with_larger_count_restarts_at_zero() {
    let mut d = dispatcher_with(&["log"]);
    let old = PayloadBuilder::logfile("a", 5).line(4, "old").build();
    d.on_chart_event_at("log", &old, at(0));
    assert_eq!(d.session().log_cursor.last_line(), 5);

    let lines: Vec<String> = (0..10).map(|i| format!("b{i}")).collect();
    let next = (0..10u64)
        .zip(&lines)
        .fold(PayloadBuilder::logfile("b", 10), |builder, (i, line)| {
            builder.line(i, line)
        })
        .build();
    assert_eq!(
        d.on_chart_event_at("log", &next, at(1)),
        Some(RenderOutcome::LogAppended(10))
    );
    assert_eq!(d.backend().log_text(), lines);
    assert_eq!(d.session().log_cursor.last_line(), 10);
}

#[test]
fn test_window_gaps_are_skipped() {
    let mut d = dispatcher_with(&["log"]);
    // Only the last two of five lines are still retained by the source.
    let late = PayloadBuilder::logfile("a", 5)
        .line(3, "four")
        .line(4, "five")
        .build();
    d.on_chart_event_at("log", &late, at(0));
    assert_eq!(d.backend().log_text(), ["four", "five"]);
    assert_eq!(d.session().log_cursor.last_line(), 5);
}

#[test]
fn test_lines_carry_receipt_timestamp() {
    let mut d = dispatcher_with(&["log"]);
    d.on_chart_event_at("log", &hello_world(), at(90));
    let stamps: Vec<&str> = d
        .backend()
        .log_lines
        .iter()
        .map(|(stamp, _)| stamp.as_str())
        .collect();
    assert_eq!(stamps, ["2024-01-01T00:01:30.000Z", "2024-01-01T00:01:30.000Z"]);
}

#[test]
fn test_log_updates_apply_presentation() {
    let mut d = dispatcher_with(&["log"]);
    let json = PayloadBuilder::logfile("app.log", 1)
        .colors("black,white")
        .line(0, "x")
        .build();
    d.on_chart_event_at("log", &json, at(0));
    let backend = d.backend();
    assert_eq!(backend.title.as_deref(), Some("app.log"));
    assert!(backend
        .style_rules
        .contains(&"pre.lines { color: white }".to_string()));
    assert!(!backend.has_chart());
}

#[test]
fn test_non_string_lines_are_shown_as_json() {
    let mut d = dispatcher_with(&["log"]);
    let json = PayloadBuilder::logfile("a", 2)
        .line(0, "text")
        .raw("1", serde_json::json!({"level": "warn"}))
        .build();
    d.on_chart_event_at("log", &json, at(0));
    assert_eq!(d.backend().log_text(), ["text", r#"{"level":"warn"}"#]);
}
