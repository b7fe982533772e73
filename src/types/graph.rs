//! Typed graph updates.
//!
//! A [`GraphPayload`] carries every option for every chart kind. [`Graph`]
//! narrows it to one variant per [`LayoutKind`] holding only the fields that
//! kind uses.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::{GraphPayload, LayoutKind, PlotSize};
use crate::error::Result;
use crate::layout::Orientation;

/// Presentation options shared by every chart kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub label: String,
    pub colors: Option<String>,
    pub font_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramGraph {
    pub presentation: Presentation,
    pub size: PlotSize,
    pub orientation: Orientation,
    /// Bin width, always positive
    pub bucket: f64,
    /// Bucket start (as sent) to count
    pub values: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesGraph {
    pub presentation: Presentation,
    pub size: PlotSize,
    /// Timestamp (as sent) to value
    pub values: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGraph {
    pub presentation: Presentation,
    pub size: PlotSize,
    /// `"x|discriminator"` to y, in feed order
    pub values: IndexMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGraph {
    pub presentation: Presentation,
    /// Total lines produced by the source so far
    pub count: u64,
    /// Retained lines by index
    pub lines: BTreeMap<u64, String>,
}

/// A graph update narrowed to its layout kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Graph {
    Histogram(HistogramGraph),
    TimeSeries(TimeSeriesGraph),
    Scatter(ScatterGraph),
    Log(LogGraph),
}

impl Graph {
    /// Narrow a wire payload.
    ///
    /// Missing or non-positive plot dimensions fall back to `default_size`.
    /// Value entries that are not numbers are dropped for chart kinds; log
    /// entries whose key is not a line index are dropped.
    pub fn from_payload(payload: GraphPayload, default_size: PlotSize) -> Result<Self> {
        let kind = payload.kind()?;
        let size = PlotSize::new(payload.width, payload.height).or(default_size);
        let presentation = Presentation {
            label: payload.label,
            colors: payload.colors,
            font_size: payload.font_size,
        };

        Ok(match kind {
            LayoutKind::Histogram => Self::Histogram(HistogramGraph {
                presentation,
                size,
                orientation: Orientation::from_wide(payload.wide),
                bucket: if payload.bucket.is_finite() && payload.bucket > 0.0 {
                    payload.bucket
                } else {
                    1.0
                },
                values: numeric_values(payload.values),
            }),
            LayoutKind::TimeSeries => Self::TimeSeries(TimeSeriesGraph {
                presentation,
                size,
                values: numeric_values(payload.values),
            }),
            LayoutKind::Scatterplot => Self::Scatter(ScatterGraph {
                presentation,
                size,
                values: numeric_values(payload.values),
            }),
            LayoutKind::Logfile => Self::Log(LogGraph {
                presentation,
                count: payload.count,
                lines: log_lines(payload.values),
            }),
        })
    }

    /// Decode and narrow the JSON body of a named feed event.
    pub fn from_json(data: &str, default_size: PlotSize) -> Result<Self> {
        Self::from_payload(GraphPayload::from_json(data)?, default_size)
    }

    pub fn kind(&self) -> LayoutKind {
        match self {
            Self::Histogram(_) => LayoutKind::Histogram,
            Self::TimeSeries(_) => LayoutKind::TimeSeries,
            Self::Scatter(_) => LayoutKind::Scatterplot,
            Self::Log(_) => LayoutKind::Logfile,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        match self {
            Self::Histogram(g) => &g.presentation,
            Self::TimeSeries(g) => &g.presentation,
            Self::Scatter(g) => &g.presentation,
            Self::Log(g) => &g.presentation,
        }
    }
}

fn numeric_values(values: IndexMap<String, serde_json::Value>) -> IndexMap<String, f64> {
    values
        .into_iter()
        .filter_map(|(key, value)| match value.as_f64() {
            Some(v) => Some((key, v)),
            None => {
                log::debug!("dropping non-numeric value for key {key:?}: {value}");
                None
            }
        })
        .collect()
}

fn log_lines(values: IndexMap<String, serde_json::Value>) -> BTreeMap<u64, String> {
    values
        .into_iter()
        .filter_map(|(key, value)| {
            let index = key.trim().parse::<u64>().ok()?;
            let line = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            Some((index, line))
        })
        .collect()
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
    use crate::error::ChartError;

    fn narrow(data: &str) -> Graph {
        Graph::from_json(data, PlotSize::default()).unwrap()
    }

    #[test]
    fn test_histogram_fields() {
        let graph = narrow(
            r#"{"Layout": "histogram", "Wide": true, "Bucket": 5, "Width": 300, "Values": {"0": 1}}"#,
        );
        let Graph::Histogram(hist) = graph else {
            panic!("expected a histogram");
        };
        assert_eq!(hist.orientation, Orientation::Wide);
        assert_eq!(hist.bucket, 5.0);
        assert_eq!(hist.size, PlotSize::new(300.0, 500.0));
        assert_eq!(hist.values.get("0"), Some(&1.0));
    }

    #[test]
    fn test_histogram_bucket_defaults_to_one() {
        let Graph::Histogram(hist) = narrow(r#"{"Layout": "histogram", "Bucket": 0}"#) else {
            panic!("expected a histogram");
        };
        assert_eq!(hist.bucket, 1.0);
        assert_eq!(hist.orientation, Orientation::Tall);
    }

    #[test]
    fn test_non_numeric_values_are_dropped() {
        let Graph::Scatter(scatter) =
            narrow(r#"{"Layout": "scatterplot", "Values": {"1|1": 2, "2|2": "x", "3|3": null}}"#)
        else {
            panic!("expected a scatter plot");
        };
        assert_eq!(scatter.values.len(), 1);
    }

    #[test]
    fn test_log_lines_by_index() {
        let Graph::Log(log) = narrow(
            r#"{"Layout": "logfile", "Count": 3, "Values": {"2": "c", "0": "a", "x": "skip", "1": 7}}"#,
        ) else {
            panic!("expected a logfile");
        };
        assert_eq!(log.count, 3);
        let lines: Vec<(u64, &str)> = log.lines.iter().map(|(i, l)| (*i, l.as_str())).collect();
        assert_eq!(lines, [(0, "a"), (1, "7"), (2, "c")]);
    }

    #[test]
    fn test_kind_and_presentation() {
        let graph = narrow(
            r##"{"Layout": "time-series", "Label": "load", "Colors": "#000,#fff", "FontSize": "2em"}"##,
        );
        assert_eq!(graph.kind(), LayoutKind::TimeSeries);
        let presentation = graph.presentation();
        assert_eq!(presentation.label, "load");
        assert_eq!(presentation.colors.as_deref(), Some("#000,#fff"));
        assert_eq!(presentation.font_size.as_deref(), Some("2em"));
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let result = Graph::from_json(r#"{"Layout": "pie"}"#, PlotSize::default());
        assert!(matches!(result, Err(ChartError::UnknownLayout(_))));
    }
}
