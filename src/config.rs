//! Stream options.
//!
//! Every field has a default, so an absent or partial options object is
//! fine. Field names are camelCase on the JS side.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::types::PlotSize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamConfig {
    /// Server-sent event feed URL
    pub endpoint: String,
    /// Plot width used when a payload has none
    pub default_width: f64,
    /// Plot height used when a payload has none
    pub default_height: f64,
    /// Approximate number of ticks per axis
    pub axis_ticks: usize,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            endpoint: "/data".to_string(),
            default_width: 500.0,
            default_height: 500.0,
            axis_ticks: 10,
            log_level: "info".to_string(),
        }
    }
}

impl StreamConfig {
    pub fn default_size(&self) -> PlotSize {
        PlotSize::new(self.default_width, self.default_height)
    }

    /// Level filter named by `log_level`.
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| ChartError::Config(format!("unknown log level {:?}", self.log_level)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ChartError::Config("endpoint must not be empty".into()));
        }
        for (name, value) in [
            ("defaultWidth", self.default_width),
            ("defaultHeight", self.default_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ChartError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.axis_ticks == 0 {
            return Err(ChartError::Config("axisTicks must be at least 1".into()));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ChartError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read options from a JS object; `undefined` and `null` give the
    /// defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(options: wasm_bindgen::JsValue) -> Result<Self> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(options)
            .map_err(|e| ChartError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
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
    fn test_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.endpoint, "/data");
        assert_eq!(config.default_size(), PlotSize::new(500.0, 500.0));
        assert_eq!(config.axis_ticks, 10);
        assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = StreamConfig::from_json(r#"{"endpoint": "/feed", "defaultWidth": 800}"#)
            .unwrap();
        assert_eq!(config.endpoint, "/feed");
        assert_eq!(config.default_size(), PlotSize::new(800.0, 500.0));
    }

    #[test]
    fn test_invalid_values() {
        for json in [
            r#"{"endpoint": ""}"#,
            r#"{"defaultHeight": -1}"#,
            r#"{"axisTicks": 0}"#,
            r#"{"logLevel": "loud"}"#,
            r#"{"axisTicks": "ten"}"#,
        ] {
            assert!(
                matches!(StreamConfig::from_json(json), Err(ChartError::Config(_))),
                "{json} should be rejected"
            );
        }
    }
}
