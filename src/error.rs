//! Structured error types for streamplot.
//!
//! None of these ever reach the page: the stream dispatcher is the single
//! place where an error is turned into a log record and the update dropped.

/// All errors that can occur while decoding, laying out, or drawing a chart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A feed message was not valid JSON or did not match the payload shape.
    #[error("JSON decoding: {0}")]
    Json(#[from] serde_json::Error),

    /// A payload declared a layout kind with no renderer.
    #[error("Unknown layout kind: {0}")]
    UnknownLayout(String),

    /// A payload was well-formed JSON but unusable, such as one naming no layout.
    #[error("Invalid payload: {0}")]
    Payload(String),

    /// The rendering backend failed to create or update an element.
    #[error("Render error: {0}")]
    Render(String),

    /// The push connection could not be opened or wired.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Stream options could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

impl From<String> for ChartError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ChartError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ChartError> for wasm_bindgen::JsValue {
    fn from(e: ChartError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ChartError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Render(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
