//! Component instances and the write dispatcher.
//!
//! There is no proxy object intercepting field access. Every model write is
//! routed through [`Component::set`], an explicit dispatcher: existence
//! check, DOM-string coercion, equality guard, store, host-attribute
//! reflection, field observers, and prefix-matched re-render of dependent
//! bindings.
//!
//! No borrow is held while any callback runs, so observer and field-observer
//! callbacks may freely write back into the component (re-entrant writes
//! recurse into this same path).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use lodestone_dom::{Event, EventListener, MutationObserver, NodeRef};
use tracing::{debug, error, warn};

use crate::bindable::{field_info, FieldInfo, ModelRef};
use crate::bindings::{OneWayBinding, TwoWayBinding};
use crate::error::BindingError;
use crate::path::AttrPath;
use crate::registry::BindingRegistry;
use crate::scanner::{self, EVENT_ATTR_PREFIX};
use crate::text::camel_to_kebab;
use crate::value::{coerce, FieldKind, Value};

pub type ComponentRef = Rc<Component>;

type FieldObserverFn = dyn Fn(&Component, &Value, &Value);
type EventHandlerFn = dyn Fn(&Component, &Event);

/// A live custom-element instance: the host element, its shadow tree, the
/// bound model, and all binding state.
pub struct Component {
    tag: String,
    host: NodeRef,
    shadow_root: NodeRef,
    model: ModelRef,
    registry: RefCell<BindingRegistry>,
    field_observers: RefCell<HashMap<String, Rc<FieldObserverFn>>>,
    handlers: RefCell<HashMap<String, Rc<EventHandlerFn>>>,
    children: RefCell<HashMap<usize, ComponentRef>>,
    host_observers: RefCell<Vec<MutationObserver>>,
    event_wiring: RefCell<Vec<EventListener>>,
    connected: Cell<bool>,
}

impl Component {
    pub fn new(
        tag: impl Into<String>,
        host: NodeRef,
        shadow_root: NodeRef,
        model: ModelRef,
    ) -> ComponentRef {
        Rc::new(Component {
            tag: tag.into(),
            host,
            shadow_root,
            model,
            registry: RefCell::new(BindingRegistry::new()),
            field_observers: RefCell::new(HashMap::new()),
            handlers: RefCell::new(HashMap::new()),
            children: RefCell::new(HashMap::new()),
            host_observers: RefCell::new(Vec::new()),
            event_wiring: RefCell::new(Vec::new()),
            connected: Cell::new(false),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn host(&self) -> &NodeRef {
        &self.host
    }

    pub fn shadow_root(&self) -> &NodeRef {
        &self.shadow_root
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    /// Template child collected by `id` attribute during the last scan.
    pub fn child_by_id(&self, id: &str) -> Option<NodeRef> {
        self.registry.borrow().children_by_id.get(id).cloned()
    }

    pub(crate) fn registry(&self) -> &RefCell<BindingRegistry> {
        &self.registry
    }

    pub(crate) fn add_child_component(&self, node: &NodeRef, child: ComponentRef) {
        self.children
            .borrow_mut()
            .insert(Rc::as_ptr(node) as usize, child);
    }

    /// The component owning a custom element node in this shadow tree.
    pub fn child_component(&self, node: &NodeRef) -> Option<ComponentRef> {
        self.children
            .borrow()
            .get(&(Rc::as_ptr(node) as usize))
            .cloned()
    }

    /// Scan the shadow tree, build binding registries, wire `on-*` event
    /// attributes and host-attribute observation. Called once the shadow
    /// content is attached; a reconnect rebuilds everything from scratch.
    pub fn connect(self: &Rc<Self>) -> Result<(), BindingError> {
        self.teardown_bindings();
        scanner::scan(self, &self.shadow_root)?;
        self.wire_event_attributes(&self.shadow_root);
        self.absorb_host_attributes();
        self.install_host_observers();
        self.connected.set(true);
        Ok(())
    }

    /// Tear down all observation. Safe to call repeatedly.
    pub fn disconnect(&self) {
        self.teardown_bindings();
        for child in self.children.borrow().values() {
            child.disconnect();
        }
        self.connected.set(false);
    }

    fn teardown_bindings(&self) {
        self.registry.borrow_mut().clear();
        for obs in self.host_observers.borrow_mut().drain(..) {
            obs.disconnect();
        }
        for l in self.event_wiring.borrow_mut().drain(..) {
            l.remove();
        }
    }

    /// Register the change observer for a root field, the
    /// `Observer<FieldName>` convention. Called with old and new value after
    /// the write is stored; the callback may write other fields.
    pub fn observe_field(
        &self,
        field: impl Into<String>,
        callback: impl Fn(&Component, &Value, &Value) + 'static,
    ) {
        self.field_observers
            .borrow_mut()
            .insert(field.into(), Rc::new(callback));
    }

    /// Register a named event handler for `on-*` template attributes.
    pub fn register_handler(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&Component, &Event) + 'static,
    ) {
        self.handlers
            .borrow_mut()
            .insert(name.into(), Rc::new(callback));
    }

    /// Read through the binding layer.
    pub fn get(&self, path: &AttrPath) -> Option<Value> {
        let m = self.model.borrow();
        path.get(&*m)
    }

    pub fn get_field(&self, field: &str) -> Option<Value> {
        self.get(&AttrPath::single(field))
    }

    pub fn set_field(&self, field: &str, value: Value) {
        self.set(&AttrPath::single(field), value);
    }

    /// The write path: every model mutation goes through here.
    ///
    /// Lenient by contract: unknown fields and equal values are silent
    /// no-ops, conversion failures are logged diagnostics; none of them
    /// disturb the model.
    pub fn set(&self, path: &AttrPath, incoming: Value) {
        // A template wiring artifact: a parent template may set this host's
        // attribute to a literal binding expression before its own binding
        // takes over. Never store those.
        if let Value::Str(s) = &incoming {
            if lodestone_parser::two_way_path(s).is_some() {
                return;
            }
        }

        let info = {
            let m = self.model.borrow();
            field_info(&*m, path)
        };
        let Some(info) = info else {
            debug!(component = %self.tag, %path, "write to unknown field ignored");
            return;
        };

        let value = match coerce(info.kind, incoming) {
            Ok(v) => v,
            Err(err) => {
                error!(component = %self.tag, %path, %err, "conversion failed, write abandoned");
                return;
            }
        };

        let old = {
            let m = self.model.borrow();
            path.get(&*m)
        };
        // Writing the current value back is a deliberate no-op; this is what
        // keeps observer↔proxy loops from re-rendering forever.
        if old.as_ref() == Some(&value) {
            return;
        }

        {
            let mut m = self.model.borrow_mut();
            if !path.set(&mut *m, value.clone()) {
                debug!(component = %self.tag, %path, "model refused write");
                return;
            }
        }

        if path.len() == 1 {
            self.reflect_and_observe(&info, old.as_ref().unwrap_or(&Value::Null), &value);
        }

        self.rerender(path);
    }

    /// Root-level writes to exported fields reflect onto the host attribute
    /// and fire the registered field observer.
    fn reflect_and_observe(&self, info: &FieldInfo, old: &Value, new: &Value) {
        if info.exported && info.kind != FieldKind::Object {
            self.host
                .set_attribute(&camel_to_kebab(info.name), &new.to_string());
        }
        let observer = self.field_observers.borrow().get(info.name).cloned();
        if let Some(cb) = observer {
            cb(self, old, new);
        }
    }

    /// Re-render every binding whose path starts with the written path, and
    /// re-ensure observation points for bindings reaching deeper than the
    /// write (a wholesale-replaced subobject must stay observable).
    fn rerender(&self, written: &AttrPath) {
        let mut one_way: Vec<Rc<OneWayBinding>> = Vec::new();
        let mut two_way: Vec<Rc<TwoWayBinding>> = Vec::new();
        let mut deeper: Vec<AttrPath> = Vec::new();
        {
            let reg = self.registry.borrow();
            for list in reg.one_way.values() {
                for binding in list {
                    if binding.paths.iter().any(|p| p.starts_with(written))
                        && !one_way.iter().any(|b| Rc::ptr_eq(b, binding))
                    {
                        for p in &binding.paths {
                            if p.starts_with(written) && p.len() > written.len() {
                                deeper.push(p.clone());
                            }
                        }
                        one_way.push(binding.clone());
                    }
                }
            }
            for binding in reg.two_way.values() {
                if binding.path.starts_with(written) {
                    if binding.path.len() > written.len() {
                        deeper.push(binding.path.clone());
                    }
                    two_way.push(binding.clone());
                }
            }
        }
        {
            let mut reg = self.registry.borrow_mut();
            for p in &deeper {
                reg.ensure_observed(p);
            }
        }
        for binding in one_way {
            binding.render(&self.model);
        }
        for binding in two_way {
            binding.render(&self.model);
        }
    }

    /// Wire `on-<event>="MethodName"` attributes to named handlers. Handler
    /// lookup happens at dispatch time, so handlers registered after
    /// connect still receive events.
    fn wire_event_attributes(self: &Rc<Self>, element: &NodeRef) {
        for name in element.attribute_names() {
            let Some(event_type) = name.strip_prefix(EVENT_ATTR_PREFIX) else {
                continue;
            };
            let method = element.attribute(&name).unwrap_or_default();
            let weak = Rc::downgrade(self);
            let listener = element.add_event_listener(event_type, move |event| {
                let Some(component) = weak.upgrade() else {
                    return;
                };
                let handler = component.handlers.borrow().get(&method).cloned();
                match handler {
                    Some(h) => h(&component, event),
                    None => warn!(
                        component = %component.tag,
                        %method, "no handler registered for event attribute"
                    ),
                }
            });
            self.event_wiring.borrow_mut().push(listener);
        }
        for child in element.element_children() {
            self.wire_event_attributes(&child);
        }
    }

    /// Attributes already present on the host when the component connects
    /// seed the model, with the usual conversion rules.
    fn absorb_host_attributes(&self) {
        let exported: Vec<FieldInfo> = {
            let m = self.model.borrow();
            m.fields().iter().copied().filter(|f| f.exported).collect()
        };
        for info in exported {
            if info.kind == FieldKind::Object {
                continue;
            }
            if let Some(raw) = self.host.attribute(&camel_to_kebab(info.name)) {
                self.set_field(info.name, Value::Str(raw));
            }
        }
    }

    /// Observe the host element's attributes for every exported field, the
    /// attribute-changed side of attribute reflection. External attribute
    /// writes route back into the model with the usual coercion and guards.
    fn install_host_observers(self: &Rc<Self>) {
        let exported: Vec<FieldInfo> = {
            let m = self.model.borrow();
            m.fields().iter().copied().filter(|f| f.exported).collect()
        };
        for info in exported {
            let weak = Rc::downgrade(self);
            let observer = self
                .host
                .observe_attribute(camel_to_kebab(info.name), move |records| {
                    let Some(component) = weak.upgrade() else {
                        return;
                    };
                    for record in records {
                        let raw = record
                            .new_value
                            .clone()
                            .unwrap_or_else(|| "null".to_string());
                        component.set_field(info.name, Value::Str(raw));
                    }
                });
            self.host_observers.borrow_mut().push(observer);
        }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("tag", &self.tag)
            .field("connected", &self.connected.get())
            .finish()
    }
}
