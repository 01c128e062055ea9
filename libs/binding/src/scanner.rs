//! Shadow-tree scan: walks the instantiated template and turns binding
//! expressions into live binding records.
//!
//! Scanning is strict where rendering is lenient: malformed paths, duplicate
//! two-way registrations, composite bindings on plain elements and two-way
//! paths that do not resolve on the model all abort the connect with a
//! [`BindingError`].

use std::rc::Rc;

use lodestone_dom::NodeRef;
use lodestone_parser::{one_way_paths, two_way_path};

use crate::bindable::field_info;
use crate::bindings::{BindingTarget, OneWayBinding, TwoWayBinding, TwoWayKind};
use crate::component::ComponentRef;
use crate::error::BindingError;
use crate::path::AttrPath;
use crate::text::to_exported_field_name;
use crate::value::{FieldKind, Value};

/// Attributes carrying this prefix name an event handler, not a binding.
pub const EVENT_ATTR_PREFIX: &str = "on-";

/// Tags whose bound attributes also need the live DOM property pushed back
/// into the model on user input.
const INPUT_EVENTS: [&str; 2] = ["input", "change"];

/// Walk the shadow tree in document order and register every binding found.
/// Each binding is rendered once as part of registration, so the tree leaves
/// the scan already reflecting the model.
pub fn scan(component: &ComponentRef, root: &NodeRef) -> Result<(), BindingError> {
    if root.is_element() {
        scan_attributes(component, root)?;
    }
    for child in root.child_nodes() {
        if child.is_element() {
            scan(component, &child)?;
        } else if child.is_text() {
            let template = child.text_data().unwrap_or_default();
            add_one_way(component, &template, BindingTarget::Text { node: child })?;
        }
    }
    Ok(())
}

fn scan_attributes(component: &ComponentRef, element: &NodeRef) -> Result<(), BindingError> {
    for name in element.attribute_names() {
        let value = element.attribute(&name).unwrap_or_default();
        if name == "id" {
            component
                .registry()
                .borrow_mut()
                .children_by_id
                .insert(value, element.clone());
            continue;
        }
        if name.starts_with(EVENT_ATTR_PREFIX) {
            continue;
        }
        if let Some(path_text) = two_way_path(&value) {
            add_two_way(component, element, &name, &path_text)?;
        } else {
            add_one_way(
                component,
                &value,
                BindingTarget::Attribute {
                    element: element.clone(),
                    name,
                },
            )?;
        }
    }
    Ok(())
}

fn add_one_way(
    component: &ComponentRef,
    template: &str,
    target: BindingTarget,
) -> Result<(), BindingError> {
    let found = one_way_paths(template);
    if found.is_empty() {
        return Ok(());
    }
    let mut paths: Vec<AttrPath> = Vec::new();
    for (text, _span) in found {
        let path = AttrPath::parse(&text)?;
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    let binding = Rc::new(OneWayBinding {
        template: template.to_string(),
        paths,
        target,
    });
    {
        let mut reg = component.registry().borrow_mut();
        for path in &binding.paths {
            reg.add_one_way(path, binding.clone());
            reg.ensure_observed(path);
        }
    }
    binding.render(component.model());
    Ok(())
}

fn add_two_way(
    component: &ComponentRef,
    element: &NodeRef,
    attr_name: &str,
    path_text: &str,
) -> Result<(), BindingError> {
    let path = AttrPath::parse(path_text)?;
    if component.registry().borrow().has_two_way(&path) {
        return Err(BindingError::DuplicateTwoWay {
            path: path.to_string(),
        });
    }
    let info = {
        let m = component.model().borrow();
        field_info(&*m, &path)
    };
    let Some(info) = info else {
        return Err(BindingError::UnknownField {
            path: path.to_string(),
        });
    };

    let kind = if info.kind == FieldKind::Object {
        peer_kind(component, element, attr_name, &path)?
    } else {
        attribute_kind(component, element, attr_name, &path)
    };

    let binding = Rc::new(TwoWayBinding {
        path: path.clone(),
        kind,
    });
    {
        let mut reg = component.registry().borrow_mut();
        reg.add_two_way(&path, binding.clone());
        reg.ensure_observed(&path);
    }
    binding.render(component.model());
    Ok(())
}

/// Composite fields cross the boundary as values, not strings: the binding
/// links straight to the custom child's exported field.
fn peer_kind(
    component: &ComponentRef,
    element: &NodeRef,
    attr_name: &str,
    path: &AttrPath,
) -> Result<TwoWayKind, BindingError> {
    let tag = element.tag_name().unwrap_or_default().to_string();
    if !element.is_custom() {
        return Err(BindingError::CompositeBinding {
            path: path.to_string(),
            tag,
        });
    }
    let Some(child) = component.child_component(element) else {
        return Err(BindingError::NotDefined { tag });
    };
    Ok(TwoWayKind::Peer {
        child: Rc::downgrade(&child),
        field: to_exported_field_name(attr_name),
    })
}

/// Scalar fields mirror into the attribute; external mutations and (for
/// form inputs) user edits feed back through the component's write path.
fn attribute_kind(
    component: &ComponentRef,
    element: &NodeRef,
    attr_name: &str,
    path: &AttrPath,
) -> TwoWayKind {
    let observer = {
        let weak = Rc::downgrade(component);
        let path = path.clone();
        element.observe_attribute(attr_name, move |records| {
            let Some(component) = weak.upgrade() else {
                return;
            };
            for record in records {
                // Attribute removal reads back as the "null" spelling, which
                // the boolean conversion maps to false.
                let raw = record
                    .new_value
                    .clone()
                    .unwrap_or_else(|| "null".to_string());
                component.set(&path, Value::Str(raw));
            }
        })
    };

    let mut listeners = Vec::new();
    if element.tag_name() == Some("input") {
        for event in INPUT_EVENTS {
            let weak_component = Rc::downgrade(component);
            let weak_element = Rc::downgrade(element);
            let path = path.clone();
            let name = attr_name.to_string();
            listeners.push(element.add_event_listener(event, move |_event| {
                let (Some(component), Some(element)) =
                    (weak_component.upgrade(), weak_element.upgrade())
                else {
                    return;
                };
                let live = element.property(&name).unwrap_or_default();
                component.set(&path, Value::Str(live));
            }));
        }
    }

    TwoWayKind::Attribute {
        element: element.clone(),
        name: attr_name.to_string(),
        observer,
        listeners,
    }
}
