//! Attribute mutation observation.
//!
//! Observers are scoped to a single attribute name on a single element.
//! Records are delivered in batches: mutations performed while a callback is
//! running are queued and picked up by the active delivery loop instead of
//! recursing, so callbacks always observe records in arrival order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A single observed attribute change. `new_value` is `None` when the
/// attribute was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub attribute: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

pub(crate) struct ObserverInner {
    pub(crate) attribute: String,
    callback: Box<dyn Fn(&[MutationRecord])>,
    pending: RefCell<Vec<MutationRecord>>,
    delivering: Cell<bool>,
    pub(crate) active: Cell<bool>,
}

impl ObserverInner {
    pub(crate) fn new(attribute: String, callback: Box<dyn Fn(&[MutationRecord])>) -> Self {
        Self {
            attribute,
            callback,
            pending: RefCell::new(Vec::new()),
            delivering: Cell::new(false),
            active: Cell::new(true),
        }
    }

    /// Queue a record and run the delivery loop unless one is already
    /// running further up the stack.
    pub(crate) fn enqueue(&self, record: MutationRecord) {
        self.pending.borrow_mut().push(record);
        if self.delivering.get() {
            return;
        }
        self.delivering.set(true);
        loop {
            let batch: Vec<MutationRecord> = self.pending.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            if self.active.get() {
                (self.callback)(&batch);
            }
        }
        self.delivering.set(false);
    }
}

/// Handle to an installed attribute observer. Dropping the handle does not
/// detach the observer; call [`MutationObserver::disconnect`].
pub struct MutationObserver {
    pub(crate) inner: Rc<ObserverInner>,
}

impl MutationObserver {
    /// Stop observing. Pending records are discarded.
    pub fn disconnect(&self) {
        self.inner.active.set(false);
        self.inner.pending.borrow_mut().clear();
    }

    /// The attribute name this observer is scoped to.
    pub fn attribute(&self) -> &str {
        &self.inner.attribute
    }
}

impl std::fmt::Debug for MutationObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationObserver")
            .field("attribute", &self.inner.attribute)
            .field("active", &self.inner.active.get())
            .finish()
    }
}
