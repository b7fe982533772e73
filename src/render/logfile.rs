//! Log tail renderer.
//!
//! Each payload carries the total line count and a window of recent lines.
//! [`LogCursor`] remembers how far the view has been filled, so replays and
//! overlapping windows never duplicate a line.

use chrono::{DateTime, SecondsFormat, Utc};

use super::backend::RenderBackend;
use super::style::apply_style;
use super::RenderOutcome;
use crate::error::Result;
use crate::types::LogGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogState {
    /// Nothing shown for the current label yet
    Fresh,
    Streaming,
}

/// Progress through one log stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCursor {
    last_line: u64,
    last_label: Option<String>,
}

/// Lines to show for one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAdvance<'a> {
    /// Previously shown lines belong to another stream and must go
    pub reset: bool,
    pub lines: Vec<&'a str>,
}

impl LogCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LogState {
        if self.last_line == 0 {
            LogState::Fresh
        } else {
            LogState::Streaming
        }
    }

    /// Index of the next line to show.
    pub fn last_line(&self) -> u64 {
        self.last_line
    }

    pub fn last_label(&self) -> Option<&str> {
        self.last_label.as_deref()
    }

    /// Move the cursor to the end of `graph`, returning the lines not shown
    /// yet. Indices missing from the payload are skipped for good.
    pub fn advance<'a>(&mut self, graph: &'a LogGraph) -> LogAdvance<'a> {
        let label = &graph.presentation.label;
        let reset = self.last_label.as_deref() != Some(label.as_str());
        if reset {
            self.last_line = 0;
        }

        let lines = if graph.count > self.last_line {
            graph
                .lines
                .range(self.last_line..graph.count)
                .map(|(_, line)| line.as_str())
                .collect()
        } else {
            Vec::new()
        };

        self.last_line = graph.count;
        if reset {
            self.last_label = Some(label.clone());
        }
        LogAdvance { reset, lines }
    }
}

/// ISO 8601 receipt stamp prefixed to appended lines.
pub fn timestamp(received_at: DateTime<Utc>) -> String {
    received_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn render<B: RenderBackend + ?Sized>(
    graph: &LogGraph,
    cursor: &mut LogCursor,
    backend: &mut B,
    received_at: DateTime<Utc>,
) -> Result<RenderOutcome> {
    apply_style(&graph.presentation, backend)?;

    let advance = cursor.advance(graph);
    if advance.reset {
        backend.clear_log()?;
    }
    let stamp = timestamp(received_at);
    for line in &advance.lines {
        backend.append_log_line(&stamp, line)?;
    }
    backend.scroll_log_to_end()?;

    Ok(RenderOutcome::LogAppended(advance.lines.len()))
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
    use crate::types::Presentation;
    use chrono::TimeZone;

    fn log(label: &str, count: u64, lines: &[(u64, &str)]) -> LogGraph {
        LogGraph {
            presentation: Presentation {
                label: label.to_string(),
                ..Presentation::default()
            },
            count,
            lines: lines.iter().map(|(i, l)| (*i, (*l).to_string())).collect(),
        }
    }

    #[test]
    fn test_first_payload_shows_everything() {
        let mut cursor = LogCursor::new();
        assert_eq!(cursor.state(), LogState::Fresh);
        let graph = log("app", 2, &[(0, "a"), (1, "b")]);
        let advance = cursor.advance(&graph);
        assert!(advance.reset);
        assert_eq!(advance.lines, ["a", "b"]);
        assert_eq!(cursor.state(), LogState::Streaming);
        assert_eq!(cursor.last_line(), 2);
        assert_eq!(cursor.last_label(), Some("app"));
    }

    #[test]
    fn test_replay_is_idempotent() {
        let mut cursor = LogCursor::new();
        let graph = log("app", 2, &[(0, "a"), (1, "b")]);
        cursor.advance(&graph);
        let again = cursor.advance(&graph);
        assert!(!again.reset);
        assert!(again.lines.is_empty());
    }

    #[test]
    fn test_overlapping_window_appends_only_new_lines() {
        let mut cursor = LogCursor::new();
        let first = log("app", 2, &[(0, "a"), (1, "b")]);
        cursor.advance(&first);
        let second = log("app", 4, &[(1, "b"), (2, "c"), (3, "d")]);
        let next = cursor.advance(&second);
        assert_eq!(next.lines, ["c", "d"]);
    }

    #[test]
    fn test_missing_indices_are_skipped_for_good() {
        let mut cursor = LogCursor::new();
        let gappy = log("app", 3, &[(0, "a"), (2, "c")]);
        let first = cursor.advance(&gappy);
        assert_eq!(first.lines, ["a", "c"]);
        let filled = log("app", 3, &[(1, "b")]);
        let late = cursor.advance(&filled);
        assert!(late.lines.is_empty());
    }

    #[test]
    fn test_label_change_resets() {
        let mut cursor = LogCursor::new();
        let one = log("one", 5, &[(4, "e")]);
        cursor.advance(&one);
        let two = log("two", 1, &[(0, "x")]);
        let other = cursor.advance(&two);
        assert!(other.reset);
        assert_eq!(other.lines, ["x"]);
        assert_eq!(cursor.last_label(), Some("two"));
    }

    #[test]
    fn test_lower_count_appends_nothing() {
        let mut cursor = LogCursor::new();
        let long = log("app", 5, &[(4, "e")]);
        cursor.advance(&long);
        let short = log("app", 2, &[(0, "a"), (1, "b")]);
        let shrunk = cursor.advance(&short);
        assert!(shrunk.lines.is_empty());
        assert_eq!(cursor.last_line(), 2);
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(timestamp(at), "2024-03-04T05:06:07.000Z");
    }
}
