//! Binding records and their render paths.
//!
//! A binding is created once at scan time with a fixed DOM target and never
//! mutated afterwards; re-scans replace it wholesale.

use std::rc::Weak;

use lodestone_dom::{EventListener, MutationObserver, NodeRef};

use crate::bindable::ModelRef;
use crate::component::Component;
use crate::path::AttrPath;

/// Where a one-way binding writes its rendered string. Decided at scan time
/// and fixed for the binding's lifetime.
pub enum BindingTarget {
    Attribute { element: NodeRef, name: String },
    Text { node: NodeRef },
}

/// A one-way binding: a template fragment with one or more `[[path]]`
/// placeholders, rendered into a single DOM target.
pub struct OneWayBinding {
    /// The entire original attribute value or text content; placeholders
    /// are substituted in place on every render.
    pub template: String,
    /// Referenced paths, in discovery order.
    pub paths: Vec<AttrPath>,
    pub target: BindingTarget,
}

impl OneWayBinding {
    /// Substitute every placeholder with the current model value and write
    /// the result to the target. Replacement is sequential in discovery
    /// order; a path that resolves to NotFound renders as the empty string.
    pub fn render(&self, model: &ModelRef) {
        let mut value = self.template.clone();
        for path in &self.paths {
            let rendered = {
                let m = model.borrow();
                path.get(&*m).map(|v| v.to_string()).unwrap_or_default()
            };
            value = value.replace(&format!("[[{path}]]"), &rendered);
        }
        match &self.target {
            BindingTarget::Attribute { element, name } => {
                element.set_attribute(name, &value);
                mirror_input_property(element, name, &value);
            }
            BindingTarget::Text { node } => node.set_text_data(value),
        }
    }
}

/// A two-way binding: exactly one path, bound either to a DOM attribute
/// (scalar fields) or linked to a peer component's field (composite fields
/// on custom children).
pub struct TwoWayBinding {
    pub path: AttrPath,
    pub kind: TwoWayKind,
}

pub enum TwoWayKind {
    /// Scalar field mirrored into a DOM attribute; the observer and input
    /// listeners feed external mutations back into the model.
    Attribute {
        element: NodeRef,
        name: String,
        observer: MutationObserver,
        listeners: Vec<EventListener>,
    },
    /// Composite field pushed directly into a custom child component's
    /// exported field, with no string serialization across the boundary.
    Peer {
        child: Weak<Component>,
        field: String,
    },
}

impl TwoWayBinding {
    /// Component→DOM direction. Attribute writes are equality-guarded to
    /// break the observer↔model feedback loop; peer pushes go through the
    /// child's own write path, which carries its own guard.
    pub fn render(&self, model: &ModelRef) {
        match &self.kind {
            TwoWayKind::Attribute { element, name, .. } => {
                let rendered = {
                    let m = model.borrow();
                    self.path
                        .get(&*m)
                        .map(|v| v.to_string())
                        .unwrap_or_default()
                };
                if element.attribute(name).as_deref() == Some(rendered.as_str()) {
                    return;
                }
                element.set_attribute(name, &rendered);
                mirror_input_property(element, name, &rendered);
            }
            TwoWayKind::Peer { child, field } => {
                let value = {
                    let m = model.borrow();
                    self.path.get(&*m)
                };
                if let (Some(child), Some(value)) = (child.upgrade(), value) {
                    child.set_field(field, value);
                }
            }
        }
    }

    /// Detach DOM observation. Called when the owning registry is cleared.
    pub fn teardown(&self) {
        if let TwoWayKind::Attribute {
            observer,
            listeners,
            ..
        } = &self.kind
        {
            observer.disconnect();
            for l in listeners {
                l.remove();
            }
        }
    }
}

/// Rendered form controls must reflect state immediately: when the target is
/// an `<input>` attribute, assign the live DOM property as well.
fn mirror_input_property(element: &NodeRef, name: &str, value: &str) {
    if element.tag_name() == Some("input") {
        element.set_property(name, value);
    }
}
