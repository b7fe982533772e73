//! streamplot - live charts from a server-sent event feed
//!
//! Subscribes to a push feed and redraws charts in the browser via
//! WebAssembly and SVG as updates arrive:
//! - Histograms (wide or tall) with in-bar or out-of-bar value labels
//! - Time series and scatter plots with axes
//! - Log tails that append only lines not shown yet
//! - Per-chart title, color palette and font size
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ChartStream } from 'streamplot';
//! await init();
//! const stream = new ChartStream(document.getElementById('charts'), { endpoint: '/data' });
//! stream.connect();
//! ```
//!
//! Everything except the browser connection and the SVG backend also builds
//! for native targets, with [`render::RecordingBackend`] standing in for the
//! page.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;

// Layout and drawing
pub mod layout;
pub mod render;
pub mod stream;

use wasm_bindgen::prelude::*;

pub use config::StreamConfig;
pub use error::{ChartError, Result};
pub use session::{DispatchRegistry, Session};
pub use stream::{ConnectionState, StreamDispatcher};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use stream::ChartStream;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
