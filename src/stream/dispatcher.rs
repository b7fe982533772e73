//! Routes feed messages to renderers.
//!
//! The dispatcher owns the session and the backend. Nothing it handles ever
//! fails outward: every error ends here as a log record and the message is
//! dropped, leaving the page as it was.

use chrono::{DateTime, Utc};

use super::envelope::{ControlNotice, Envelope};
use crate::config::StreamConfig;
use crate::error::{ChartError, Result};
use crate::render::{render_graph, RenderBackend, RenderOutcome};
use crate::session::Session;
use crate::types::Graph;

/// Something that can start delivering named events for a chart id.
pub trait Subscriptions {
    fn subscribe(&mut self, chart_id: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connected,
    Closed,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connected => "connected",
            Self::Closed => "closed",
        }
    }
}

/// What a default-channel message led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultOutcome {
    /// A listener was added for this chart id
    Subscribed(String),
    AlreadyRegistered,
    /// Adding the listener failed; the id stays unregistered
    SubscribeFailed,
    ErrorEnvelope,
    Ignored,
}

pub struct StreamDispatcher<B> {
    session: Session,
    backend: B,
    config: StreamConfig,
    state: ConnectionState,
}

impl<B: RenderBackend> StreamDispatcher<B> {
    pub fn new(backend: B, config: StreamConfig) -> Self {
        Self {
            session: Session::new(),
            backend,
            config,
            state: ConnectionState::Idle,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Forget registered charts and log progress before a new connection.
    pub fn reset(&mut self) {
        self.session = Session::new();
        self.state = ConnectionState::Idle;
    }

    pub fn on_open(&mut self) {
        if self.state != ConnectionState::Connected {
            log::info!("connected to {}", self.config.endpoint);
        }
        self.state = ConnectionState::Connected;
    }

    /// Transport error. The connection retries on its own unless it reports
    /// itself closed.
    pub fn on_error(&mut self, closed: bool) {
        if closed {
            self.on_closed();
        } else {
            log::warn!("connection to {} interrupted, retrying", self.config.endpoint);
        }
    }

    pub fn on_closed(&mut self) {
        if self.state != ConnectionState::Closed {
            log::info!("connection to {} closed", self.config.endpoint);
        }
        self.state = ConnectionState::Closed;
    }

    /// Handle a default-channel message.
    ///
    /// The id is registered only once its listener is in place, so a failed
    /// subscription is retried on the next discovery.
    pub fn on_message<S: Subscriptions + ?Sized>(
        &mut self,
        data: &str,
        subscriptions: &mut S,
    ) -> DefaultOutcome {
        match Envelope::parse(data) {
            Envelope::Error(body) => {
                log::error!("feed reported an error: {body}");
                DefaultOutcome::ErrorEnvelope
            }
            Envelope::Changed(id) => {
                if self.session.registry.contains(&id) {
                    return DefaultOutcome::AlreadyRegistered;
                }
                if let Err(e) = subscriptions.subscribe(&id) {
                    log::error!("could not subscribe to chart {id:?}: {e}");
                    return DefaultOutcome::SubscribeFailed;
                }
                self.session.registry.register(&id);
                log::info!("new chart: {id}");
                DefaultOutcome::Subscribed(id)
            }
            Envelope::Unrecognized(raw) => {
                log::warn!("ignoring unrecognized message: {raw}");
                DefaultOutcome::Ignored
            }
        }
    }

    /// Handle a named event for `chart_id`, stamped with the current time.
    pub fn on_chart_event(&mut self, chart_id: &str, data: &str) -> Option<RenderOutcome> {
        self.on_chart_event_at(chart_id, data, Utc::now())
    }

    /// Handle a named event for `chart_id` received at `received_at`.
    ///
    /// Returns `None` when the event was dropped.
    pub fn on_chart_event_at(
        &mut self,
        chart_id: &str,
        data: &str,
        received_at: DateTime<Utc>,
    ) -> Option<RenderOutcome> {
        if !self.session.registry.contains(chart_id) {
            log::debug!("event for unregistered chart {chart_id:?} ignored");
            return None;
        }

        let graph = match Graph::from_json(data, self.config.default_size()) {
            Ok(graph) => graph,
            Err(ChartError::UnknownLayout(kind)) => {
                log::warn!("chart {chart_id:?}: no renderer for layout {kind:?}");
                return None;
            }
            Err(e) => {
                log::error!("chart {chart_id:?}: malformed update: {e}");
                return None;
            }
        };
        log::debug!("chart {chart_id:?}: {} update", graph.kind());

        match render_graph(
            &graph,
            &mut self.session,
            &mut self.backend,
            &self.config,
            received_at,
        ) {
            Ok(outcome) => {
                if let RenderOutcome::TooFewPoints(n) = outcome {
                    log::debug!("chart {chart_id:?}: {n} usable points, keeping previous chart");
                }
                Some(outcome)
            }
            Err(e) => {
                log::error!("chart {chart_id:?}: render failed: {e}");
                None
            }
        }
    }

    /// `__created` control event.
    pub fn on_created(&mut self, data: &str) {
        match ControlNotice::from_json(data) {
            Ok(notice) => log::debug!("chart {:?} created", notice.name),
            Err(e) => log::warn!("malformed __created event: {e}"),
        }
    }

    /// `__completed` control event: the named chart gets no more updates.
    pub fn on_completed(&mut self, data: &str) {
        match ControlNotice::from_json(data) {
            Ok(ControlNotice { name, reason }) => log::info!(
                "chart {name:?} completed: {}",
                reason.as_deref().unwrap_or("no reason given")
            ),
            Err(e) => log::warn!("malformed __completed event: {e}"),
        }
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
    use crate::render::RecordingBackend;

    #[derive(Default)]
    struct Subs {
        ids: Vec<String>,
        fail: bool,
    }

    impl Subscriptions for Subs {
        fn subscribe(&mut self, chart_id: &str) -> Result<()> {
            if self.fail {
                return Err(ChartError::Transport("listener rejected".into()));
            }
            self.ids.push(chart_id.to_string());
            Ok(())
        }
    }

    fn dispatcher() -> StreamDispatcher<RecordingBackend> {
        StreamDispatcher::new(RecordingBackend::new(), StreamConfig::default())
    }

    #[test]
    fn test_state_transitions() {
        let mut d = dispatcher();
        assert_eq!(d.state(), ConnectionState::Idle);
        d.on_open();
        assert_eq!(d.state(), ConnectionState::Connected);
        d.on_error(false);
        assert_eq!(d.state(), ConnectionState::Connected);
        d.on_error(true);
        assert_eq!(d.state(), ConnectionState::Closed);
        assert_eq!(d.state().as_str(), "closed");
    }

    #[test]
    fn test_failed_subscription_is_retried() {
        let mut d = dispatcher();
        let mut subs = Subs {
            fail: true,
            ..Subs::default()
        };
        let msg = r#"{"changed": "cpu"}"#;
        assert_eq!(d.on_message(msg, &mut subs), DefaultOutcome::SubscribeFailed);
        assert!(!d.session().registry.contains("cpu"));
        subs.fail = false;
        assert_eq!(
            d.on_message(msg, &mut subs),
            DefaultOutcome::Subscribed("cpu".into())
        );
        assert_eq!(subs.ids, ["cpu"]);
    }

    #[test]
    fn test_unregistered_events_are_dropped() {
        let mut d = dispatcher();
        let data = r#"{"Layout": "histogram", "Values": {"0": 1, "1": 2}}"#;
        assert_eq!(d.on_chart_event("cpu", data), None);
        assert!(!d.backend().has_chart());
    }

    #[test]
    fn test_control_events_do_not_touch_state() {
        let mut d = dispatcher();
        d.on_created(r#"{"name": "cpu"}"#);
        d.on_completed(r#"{"name": "cpu", "reason": "EOF"}"#);
        d.on_completed("garbage");
        assert!(d.session().registry.is_empty());
        assert_eq!(d.state(), ConnectionState::Idle);
    }
}
