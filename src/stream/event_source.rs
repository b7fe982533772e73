//! Browser entry point: an `EventSource` wired to a [`StreamDispatcher`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventSource, MessageEvent};

use super::dispatcher::{StreamDispatcher, Subscriptions};
use crate::config::StreamConfig;
use crate::error::{ChartError, Result};
use crate::render::SvgBackend;

type Dispatcher = StreamDispatcher<SvgBackend>;
type Listeners = Rc<RefCell<Vec<Closure<dyn FnMut(Event)>>>>;

const CREATED_EVENT: &str = "__created";
const COMPLETED_EVENT: &str = "__completed";

fn message_data(event: Event) -> Option<String> {
    event.dyn_into::<MessageEvent>().ok()?.data().as_string()
}

/// Adds named-event listeners to a live `EventSource`.
struct EventSourceSubscriptions {
    source: EventSource,
    dispatcher: Weak<RefCell<Dispatcher>>,
    listeners: Listeners,
}

impl Subscriptions for EventSourceSubscriptions {
    fn subscribe(&mut self, chart_id: &str) -> Result<()> {
        let dispatcher = Weak::clone(&self.dispatcher);
        let id = chart_id.to_string();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let (Some(dispatcher), Some(data)) = (dispatcher.upgrade(), message_data(event)) else {
                return;
            };
            dispatcher.borrow_mut().on_chart_event(&id, &data);
        }) as Box<dyn FnMut(Event)>);
        self.source
            .add_event_listener_with_callback(chart_id, closure.as_ref().unchecked_ref())
            .map_err(|e| ChartError::Transport(format!("{e:?}")))?;
        self.listeners.borrow_mut().push(closure);
        Ok(())
    }
}

/// A live chart feed rendered into a container element.
///
/// ```javascript
/// import init, { ChartStream } from 'streamplot';
/// await init();
/// const stream = new ChartStream(document.body, { endpoint: '/data' });
/// stream.connect();
/// ```
#[wasm_bindgen]
pub struct ChartStream {
    dispatcher: Rc<RefCell<Dispatcher>>,
    source: Option<EventSource>,
    listeners: Listeners,
}

#[wasm_bindgen]
impl ChartStream {
    /// Create a stream drawing into `container`. `options` is an optional
    /// object with `endpoint`, `defaultWidth`, `defaultHeight`, `axisTicks`
    /// and `logLevel`.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, options: JsValue) -> std::result::Result<ChartStream, JsValue> {
        console_error_panic_hook::set_once();

        let config = StreamConfig::from_js(options)?;
        crate::logging::init_from_config(&config)?;
        let backend = SvgBackend::new(container)?;

        Ok(ChartStream {
            dispatcher: Rc::new(RefCell::new(StreamDispatcher::new(backend, config))),
            source: None,
            listeners: Rc::new(RefCell::new(Vec::new())),
        })
    }

    /// Open the feed. Reconnecting after [`close`](Self::close) starts a
    /// fresh session.
    pub fn connect(&mut self) -> std::result::Result<(), JsValue> {
        if let Some(source) = &self.source {
            if source.ready_state() != EventSource::CLOSED {
                return Ok(());
            }
        }
        self.detach();
        self.dispatcher.borrow_mut().reset();

        let endpoint = self.dispatcher.borrow().config().endpoint.clone();
        let source = EventSource::new(&endpoint)
            .map_err(|e| ChartError::Transport(format!("cannot open {endpoint}: {e:?}")))?;
        let weak = Rc::downgrade(&self.dispatcher);

        // Connection lifecycle
        {
            let dispatcher = Weak::clone(&weak);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(dispatcher) = dispatcher.upgrade() {
                    dispatcher.borrow_mut().on_open();
                }
            }) as Box<dyn FnMut(Event)>);
            source.set_onopen(Some(closure.as_ref().unchecked_ref()));
            self.listeners.borrow_mut().push(closure);
        }
        {
            let dispatcher = Weak::clone(&weak);
            let source_ref = source.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(dispatcher) = dispatcher.upgrade() {
                    let closed = source_ref.ready_state() == EventSource::CLOSED;
                    dispatcher.borrow_mut().on_error(closed);
                }
            }) as Box<dyn FnMut(Event)>);
            source.set_onerror(Some(closure.as_ref().unchecked_ref()));
            self.listeners.borrow_mut().push(closure);
        }

        // Default channel: errors and chart discovery
        {
            let mut subscriptions = EventSourceSubscriptions {
                source: source.clone(),
                dispatcher: Weak::clone(&weak),
                listeners: Rc::clone(&self.listeners),
            };
            let dispatcher = Weak::clone(&weak);
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let (Some(dispatcher), Some(data)) = (dispatcher.upgrade(), message_data(event))
                else {
                    return;
                };
                dispatcher.borrow_mut().on_message(&data, &mut subscriptions);
            }) as Box<dyn FnMut(Event)>);
            source.set_onmessage(Some(closure.as_ref().unchecked_ref()));
            self.listeners.borrow_mut().push(closure);
        }

        // Control events
        for name in [CREATED_EVENT, COMPLETED_EVENT] {
            let dispatcher = Weak::clone(&weak);
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let (Some(dispatcher), Some(data)) = (dispatcher.upgrade(), message_data(event))
                else {
                    return;
                };
                let mut dispatcher = dispatcher.borrow_mut();
                if name == COMPLETED_EVENT {
                    dispatcher.on_completed(&data);
                } else {
                    dispatcher.on_created(&data);
                }
            }) as Box<dyn FnMut(Event)>);
            source
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(|e| ChartError::Transport(format!("{e:?}")))?;
            self.listeners.borrow_mut().push(closure);
        }

        self.source = Some(source);
        Ok(())
    }

    /// Close the feed. Charts on screen stay.
    pub fn close(&mut self) {
        self.detach();
        self.dispatcher.borrow_mut().on_closed();
    }

    /// `"idle"`, `"connected"` or `"closed"`.
    pub fn state(&self) -> String {
        self.dispatcher.borrow().state().as_str().to_string()
    }

    /// Chart ids discovered on the current connection, in discovery order.
    pub fn charts(&self) -> js_sys::Array {
        self.dispatcher
            .borrow()
            .session()
            .registry
            .iter()
            .map(JsValue::from_str)
            .collect()
    }
}

impl ChartStream {
    fn detach(&mut self) {
        if let Some(source) = self.source.take() {
            source.set_onopen(None);
            source.set_onerror(None);
            source.set_onmessage(None);
            source.close();
        }
        self.listeners.borrow_mut().clear();
    }
}

impl Drop for ChartStream {
    fn drop(&mut self) {
        self.detach();
    }
}
