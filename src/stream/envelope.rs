//! Messages on the feed's default (unnamed) channel and its control events.

use serde::Deserialize;
use serde_json::Value;

/// A default-channel message.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{"type": "error", ...}` or `{"error": ...}`; carries the raw body
    Error(Value),
    /// `{"changed": id}`: a chart with this id has an update
    Changed(String),
    /// Anything else, including non-JSON text
    Unrecognized(String),
}

impl Envelope {
    pub fn parse(data: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(data) else {
            return Self::Unrecognized(data.to_string());
        };
        if value.get("type").and_then(Value::as_str) == Some("error")
            || value.get("error").is_some_and(|e| !e.is_null())
        {
            return Self::Error(value);
        }
        match value.get("changed").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Self::Changed(id.to_string()),
            _ => Self::Unrecognized(data.to_string()),
        }
    }
}

/// Body of `__created` and `__completed` control events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControlNotice {
    pub name: String,
    /// Why updates stopped; `__completed` only
    pub reason: Option<String>,
}

impl ControlNotice {
    pub fn from_json(data: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(data)?)
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
    use test_case::test_case;

    #[test_case(r#"{"changed": "cpu"}"# => Envelope::Changed("cpu".into()); "discovery")]
    #[test_case(r#"{"changed": ""}"# => Envelope::Unrecognized(r#"{"changed": ""}"#.into()); "empty id")]
    #[test_case(r#"{"changed": 3}"# => Envelope::Unrecognized(r#"{"changed": 3}"#.into()); "numeric id")]
    #[test_case("hello" => Envelope::Unrecognized("hello".into()); "not json")]
    #[test_case("[1]" => Envelope::Unrecognized("[1]".into()); "array")]
    fn test_parse(data: &str) -> Envelope {
        Envelope::parse(data)
    }

    #[test]
    fn test_error_forms() {
        assert!(matches!(
            Envelope::parse(r#"{"type": "error", "message": "boom"}"#),
            Envelope::Error(_)
        ));
        assert!(matches!(
            Envelope::parse(r#"{"error": "read failed"}"#),
            Envelope::Error(_)
        ));
        assert!(matches!(
            Envelope::parse(r#"{"type": "error", "changed": "cpu"}"#),
            Envelope::Error(_)
        ));
    }

    #[test]
    fn test_control_notice() {
        let notice = ControlNotice::from_json(r#"{"name": "cpu", "reason": "EOF"}"#).unwrap();
        assert_eq!(notice.name, "cpu");
        assert_eq!(notice.reason.as_deref(), Some("EOF"));
        let created = ControlNotice::from_json(r#"{"name": "mem"}"#).unwrap();
        assert_eq!(created.reason, None);
    }
}
