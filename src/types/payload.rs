use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Chart type declared by a payload's `Layout` field
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Bucketed bar chart
    #[serde(rename = "histogram")]
    Histogram,
    /// Line chart over timestamps
    #[serde(rename = "time-series")]
    TimeSeries,
    /// Unordered (x, y) markers
    #[serde(rename = "scatterplot")]
    Scatterplot,
    /// Append-only text lines
    #[serde(rename = "logfile")]
    Logfile,
}

impl LayoutKind {
    /// Every layout kind the feed can declare.
    pub const ALL: [Self; 4] = [
        Self::Histogram,
        Self::TimeSeries,
        Self::Scatterplot,
        Self::Logfile,
    ];

    /// Name used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::TimeSeries => "time-series",
            Self::Scatterplot => "scatterplot",
            Self::Logfile => "logfile",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::UnknownLayout(s.to_string()))
    }
}

/// A graph update exactly as the feed encodes it.
///
/// Every field is optional on the wire. Fields the server sends for its own
/// bookkeeping (`Min`, `Max`, `Sum`, `Filtered`, `Errors`, `Window`,
/// `Allowed`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GraphPayload {
    /// Layout kind name, see [`LayoutKind`]
    pub layout: String,
    /// Chart title; also used as the page title
    pub label: String,
    /// Key to value mapping; numbers for charts, strings for logfiles
    pub values: IndexMap<String, serde_json::Value>,
    /// Plot width in pixels
    pub width: f64,
    /// Plot height in pixels
    pub height: f64,
    /// Horizontal bars (histogram only)
    pub wide: bool,
    /// Bin width (histogram only)
    pub bucket: f64,
    /// Comma-separated "background,foreground,bar" colors
    pub colors: Option<String>,
    /// CSS font size applied to the whole page
    pub font_size: Option<String>,
    /// Total lines produced so far (logfile only)
    pub count: u64,
}

impl GraphPayload {
    /// Decode a payload from the JSON body of a named feed event.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// The declared layout kind.
    pub fn kind(&self) -> Result<LayoutKind> {
        if self.layout.is_empty() {
            return Err(ChartError::Payload("no Layout given".to_string()));
        }
        self.layout.parse()
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
    fn test_decode_histogram_payload_from_server() {
        let data = r#"{
            "Values": {"0": 2, "1": 5},
            "Layout": "histogram",
            "Bucket": 1,
            "Label": "latency",
            "Wide": true,
            "Width": 400,
            "Height": 300,
            "Allowed": null,
            "Colors": "black,white,red",
            "FontSize": "12px",
            "Min": 0, "Max": 1, "Sum": 7,
            "Count": 7, "Filtered": 0, "Errors": 0
        }"#;
        let payload = GraphPayload::from_json(data).unwrap();
        assert_eq!(payload.kind().unwrap(), LayoutKind::Histogram);
        assert_eq!(payload.label, "latency");
        assert!(payload.wide);
        assert_eq!(payload.width, 400.0);
        assert_eq!(payload.bucket, 1.0);
        assert_eq!(payload.colors.as_deref(), Some("black,white,red"));
        assert_eq!(payload.font_size.as_deref(), Some("12px"));
        assert_eq!(payload.count, 7);
        assert_eq!(payload.values.len(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let payload = GraphPayload::from_json(r#"{"Layout": "logfile"}"#).unwrap();
        assert!(payload.values.is_empty());
        assert_eq!(payload.count, 0);
        assert!(payload.colors.is_none());
    }

    #[test]
    fn test_missing_layout_is_invalid() {
        let payload = GraphPayload::from_json(r#"{"Values": {"0": 1}}"#).unwrap();
        assert!(matches!(payload.kind(), Err(ChartError::Payload(_))));
    }

    #[test]
    fn test_values_keep_feed_order() {
        let payload =
            GraphPayload::from_json(r#"{"Values": {"9|1": 1, "2|2": 2, "5|3": 3}}"#).unwrap();
        let keys: Vec<&str> = payload.values.keys().map(String::as_str).collect();
        assert_eq!(keys, ["9|1", "2|2", "5|3"]);
    }

    #[test]
    fn test_unknown_layout_kind() {
        let err = "pie".parse::<LayoutKind>().unwrap_err();
        assert!(matches!(err, ChartError::UnknownLayout(name) if name == "pie"));
    }

    #[test]
    fn test_layout_kind_names_round_trip() {
        for kind in LayoutKind::ALL {
            assert_eq!(kind.as_str().parse::<LayoutKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            GraphPayload::from_json("{not json"),
            Err(ChartError::Json(_))
        ));
    }
}
