//! The node tree.
//!
//! Nodes are handed out as `Rc<Node>` and mutated through interior
//! mutability. No borrow is held while observer or listener callbacks run, so
//! callbacks are free to mutate the tree they were notified about.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::event::{Event, EventListener, ListenerInner};
use crate::mutation::{MutationObserver, MutationRecord, ObserverInner};

/// Shared handle to a node.
pub type NodeRef = Rc<Node>;

/// An element or text node.
pub struct Node {
    kind: NodeKind,
}

enum NodeKind {
    Element(ElementData),
    Text(RefCell<String>),
}

struct ElementData {
    tag: String,
    /// Attributes in insertion order. Lookup is linear; elements carry a
    /// handful of attributes.
    attributes: RefCell<Vec<(String, String)>>,
    /// Live properties, distinct from attributes (`input.value` semantics).
    properties: RefCell<HashMap<String, String>>,
    children: RefCell<Vec<NodeRef>>,
    observers: RefCell<Vec<Rc<ObserverInner>>>,
    listeners: RefCell<Vec<Rc<ListenerInner>>>,
}

impl Node {
    /// Create a new element node.
    pub fn element(tag: impl Into<String>) -> NodeRef {
        Rc::new(Node {
            kind: NodeKind::Element(ElementData {
                tag: tag.into(),
                attributes: RefCell::new(Vec::new()),
                properties: RefCell::new(HashMap::new()),
                children: RefCell::new(Vec::new()),
                observers: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Create a new text node.
    pub fn text(data: impl Into<String>) -> NodeRef {
        Rc::new(Node {
            kind: NodeKind::Text(RefCell::new(data.into())),
        })
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Tag name, or `None` for text nodes.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(el) => Some(&el.tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Custom elements are recognized by a dash in the tag name.
    pub fn is_custom(&self) -> bool {
        self.tag_name().is_some_and(|t| t.contains('-'))
    }

    /// Text content of a text node.
    pub fn text_data(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Text(data) => Some(data.borrow().clone()),
            NodeKind::Element(_) => None,
        }
    }

    /// Replace the content of a text node. No-op on elements.
    pub fn set_text_data(&self, data: impl Into<String>) {
        if let NodeKind::Text(cell) = &self.kind {
            *cell.borrow_mut() = data.into();
        }
    }

    pub fn append_child(&self, child: NodeRef) {
        if let NodeKind::Element(el) = &self.kind {
            el.children.borrow_mut().push(child);
        }
    }

    /// All child nodes, including text nodes.
    pub fn child_nodes(&self) -> Vec<NodeRef> {
        match &self.kind {
            NodeKind::Element(el) => el.children.borrow().clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Child element nodes only.
    pub fn element_children(&self) -> Vec<NodeRef> {
        self.child_nodes()
            .into_iter()
            .filter(|n| n.is_element())
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.kind {
            NodeKind::Element(el) => el
                .attributes
                .borrow()
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Attribute names in insertion order.
    pub fn attribute_names(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Element(el) => el
                .attributes
                .borrow()
                .iter()
                .map(|(n, _)| n.clone())
                .collect(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Set an attribute, notifying observers scoped to it. Setting the
    /// current value again is a no-op and produces no mutation record.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let NodeKind::Element(el) = &self.kind else {
            return;
        };
        let old_value;
        {
            let mut attrs = el.attributes.borrow_mut();
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => {
                    if v == value {
                        return;
                    }
                    old_value = Some(v.clone());
                    *v = value.to_string();
                }
                None => {
                    old_value = None;
                    attrs.push((name.to_string(), value.to_string()));
                }
            }
        }
        self.notify(MutationRecord {
            attribute: name.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
    }

    /// Remove an attribute. Observers see a record with `new_value: None`.
    pub fn remove_attribute(&self, name: &str) {
        let NodeKind::Element(el) = &self.kind else {
            return;
        };
        let old_value;
        {
            let mut attrs = el.attributes.borrow_mut();
            let Some(idx) = attrs.iter().position(|(n, _)| n == name) else {
                return;
            };
            old_value = Some(attrs.remove(idx).1);
        }
        self.notify(MutationRecord {
            attribute: name.to_string(),
            old_value,
            new_value: None,
        });
    }

    fn notify(&self, record: MutationRecord) {
        let NodeKind::Element(el) = &self.kind else {
            return;
        };
        tracing::trace!(
            tag = %el.tag,
            attribute = %record.attribute,
            new_value = ?record.new_value,
            "attribute mutated"
        );
        // Clone the observer list so no borrow is held while callbacks run.
        let observers: Vec<Rc<ObserverInner>> = el.observers.borrow().clone();
        for obs in observers {
            if obs.active.get() && obs.attribute == record.attribute {
                obs.enqueue(record.clone());
            }
        }
    }

    /// Install an attribute mutation observer scoped to `attribute`.
    pub fn observe_attribute(
        &self,
        attribute: impl Into<String>,
        callback: impl Fn(&[MutationRecord]) + 'static,
    ) -> MutationObserver {
        let inner = Rc::new(ObserverInner::new(attribute.into(), Box::new(callback)));
        if let NodeKind::Element(el) = &self.kind {
            el.observers.borrow_mut().push(inner.clone());
        }
        MutationObserver { inner }
    }

    /// Live property value (`<input>` `value` between events lives here).
    pub fn property(&self, name: &str) -> Option<String> {
        match &self.kind {
            NodeKind::Element(el) => el.properties.borrow().get(name).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_property(&self, name: &str, value: &str) {
        if let NodeKind::Element(el) = &self.kind {
            el.properties
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
    }

    /// Install an event listener for `event_type`.
    pub fn add_event_listener(
        &self,
        event_type: impl Into<String>,
        callback: impl Fn(&Event) + 'static,
    ) -> EventListener {
        let inner = Rc::new(ListenerInner {
            event_type: event_type.into(),
            callback: Box::new(callback),
            active: std::cell::Cell::new(true),
        });
        if let NodeKind::Element(el) = &self.kind {
            el.listeners.borrow_mut().push(inner.clone());
        }
        EventListener { inner }
    }

    /// Dispatch an event to listeners on this element.
    pub fn dispatch(&self, event: &Event) {
        let NodeKind::Element(el) = &self.kind else {
            return;
        };
        let listeners: Vec<Rc<ListenerInner>> = el.listeners.borrow().clone();
        for l in listeners {
            if l.active.get() && l.event_type == event.event_type {
                (l.callback)(event);
            }
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            NodeKind::Element(el) => f
                .debug_struct("Element")
                .field("tag", &el.tag)
                .field("attributes", &*el.attributes.borrow())
                .field("children", &el.children.borrow().len())
                .finish(),
            NodeKind::Text(data) => f.debug_tuple("Text").field(&*data.borrow()).finish(),
        }
    }
}
