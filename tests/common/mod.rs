//! Common test utilities: payload builders and a recording dispatcher.
//!
//! Payloads are built as JSON text so tests go through the same decoding
//! path as the feed.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Map, Value};

use streamplot::render::{Op, RecordingBackend};
use streamplot::stream::{StreamDispatcher, Subscriptions};
use streamplot::{Result, StreamConfig};

// ============================================================================
// Payload Builder
// ============================================================================

/// Builder for a feed payload in its wire shape.
///
/// `Values` entries are written in insertion order.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    fields: Map<String, Value>,
    values: Vec<(String, Value)>,
}

impl PayloadBuilder {
    pub fn new(layout: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("Layout".into(), json!(layout));
        Self {
            fields,
            values: Vec::new(),
        }
    }

    pub fn histogram() -> Self {
        Self::new("histogram")
    }

    pub fn time_series() -> Self {
        Self::new("time-series")
    }

    pub fn scatter() -> Self {
        Self::new("scatterplot")
    }

    pub fn logfile(label: &str, count: u64) -> Self {
        Self::new("logfile").label(label).count(count)
    }

    fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn label(self, label: &str) -> Self {
        self.field("Label", json!(label))
    }

    pub fn size(self, width: f64, height: f64) -> Self {
        self.field("Width", json!(width)).field("Height", json!(height))
    }

    pub fn wide(self) -> Self {
        self.field("Wide", json!(true))
    }

    pub fn bucket(self, bucket: f64) -> Self {
        self.field("Bucket", json!(bucket))
    }

    pub fn colors(self, colors: &str) -> Self {
        self.field("Colors", json!(colors))
    }

    pub fn font_size(self, size: &str) -> Self {
        self.field("FontSize", json!(size))
    }

    pub fn count(self, count: u64) -> Self {
        self.field("Count", json!(count))
    }

    /// Add a numeric value.
    pub fn point(self, key: &str, value: f64) -> Self {
        self.raw(key, json!(value))
    }

    /// Add numeric values in order.
    pub fn points(self, points: &[(&str, f64)]) -> Self {
        points
            .iter()
            .fold(self, |builder, (key, value)| builder.point(key, *value))
    }

    /// Add a log line at `index`.
    pub fn line(self, index: u64, line: &str) -> Self {
        self.raw(&index.to_string(), json!(line))
    }

    /// Add a raw value, replacing any earlier value for `key`.
    pub fn raw(mut self, key: &str, value: Value) -> Self {
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.values.push((key.to_string(), value)),
        }
        self
    }

    pub fn build(&self) -> String {
        let values: Vec<String> = self
            .values
            .iter()
            .map(|(key, value)| format!("{}:{value}", Value::from(key.as_str())))
            .collect();
        let fields = Value::Object(self.fields.clone()).to_string();
        let head = fields.strip_suffix('}').unwrap();
        format!("{head},\"Values\":{{{}}}}}", values.join(","))
    }
}

// ============================================================================
// Dispatcher Helpers
// ============================================================================

/// Subscriptions that only remember what was asked for.
#[derive(Debug, Default)]
pub struct RecordedSubscriptions {
    pub ids: Vec<String>,
}

impl Subscriptions for RecordedSubscriptions {
    fn subscribe(&mut self, chart_id: &str) -> Result<()> {
        self.ids.push(chart_id.to_string());
        Ok(())
    }
}

pub type TestDispatcher = StreamDispatcher<RecordingBackend>;

pub fn dispatcher() -> TestDispatcher {
    StreamDispatcher::new(RecordingBackend::new(), StreamConfig::default())
}

/// A connected dispatcher with `ids` already discovered.
pub fn dispatcher_with(ids: &[&str]) -> TestDispatcher {
    let mut dispatcher = dispatcher();
    let mut subscriptions = RecordedSubscriptions::default();
    dispatcher.on_open();
    for id in ids {
        dispatcher.on_message(&changed(id), &mut subscriptions);
    }
    dispatcher
}

/// Discovery envelope for `id`.
pub fn changed(id: &str) -> String {
    json!({ "changed": id }).to_string()
}

/// A fixed receipt time, `seconds` past 2024-01-01T00:00:00Z.
pub fn at(seconds: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        + chrono::Duration::seconds(i64::from(seconds))
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// Outer size of the chart currently on the backend.
pub fn chart_size(backend: &RecordingBackend) -> (f64, f64) {
    backend
        .ops
        .iter()
        .find_map(|op| match op {
            Op::BeginChart {
                outer_width,
                outer_height,
                ..
            } => Some((*outer_width, *outer_height)),
            _ => None,
        })
        .expect("no chart drawn")
}

/// Text of every recorded text node with class `class`.
pub fn texts(backend: &RecordingBackend, class: &str) -> Vec<String> {
    backend
        .texts_with_class(class)
        .filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Classes of groups opened on the current chart, in order.
pub fn groups(backend: &RecordingBackend) -> Vec<String> {
    backend
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::BeginGroup(class) => Some(class.clone()),
            _ => None,
        })
        .collect()
}
