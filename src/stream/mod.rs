//! The push feed: message envelopes, dispatch, and the browser connection.

pub mod dispatcher;
pub mod envelope;

#[cfg(target_arch = "wasm32")]
pub mod event_source;

pub use dispatcher::{ConnectionState, DefaultOutcome, StreamDispatcher, Subscriptions};
pub use envelope::{ControlNotice, Envelope};

#[cfg(target_arch = "wasm32")]
pub use event_source::ChartStream;
