//! DOM events and listeners.

use std::cell::Cell;
use std::rc::Rc;

/// An event dispatched on an element. `value` carries the payload relevant to
/// the binding engine (for `input`/`change` events, the live `value`
/// property at dispatch time).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_type: String,
    pub value: String,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            value: String::new(),
        }
    }

    pub fn with_value(event_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            value: value.into(),
        }
    }
}

pub(crate) struct ListenerInner {
    pub(crate) event_type: String,
    pub(crate) callback: Box<dyn Fn(&Event)>,
    pub(crate) active: Cell<bool>,
}

/// Handle to an installed event listener. Call [`EventListener::remove`] to
/// detach it; dropping the handle leaves the listener installed.
pub struct EventListener {
    pub(crate) inner: Rc<ListenerInner>,
}

impl EventListener {
    pub fn remove(&self) {
        self.inner.active.set(false);
    }

    pub fn event_type(&self) -> &str {
        &self.inner.event_type
    }
}

impl std::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListener")
            .field("event_type", &self.inner.event_type)
            .field("active", &self.inner.active.get())
            .finish()
    }
}
