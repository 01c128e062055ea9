//! Per-component binding registries.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use lodestone_dom::NodeRef;

use crate::bindings::{OneWayBinding, TwoWayBinding};
use crate::path::AttrPath;

/// All bindings owned by one component instance, keyed by dotted path
/// string. Rebuilt from scratch on every connect.
#[derive(Default)]
pub struct BindingRegistry {
    pub one_way: HashMap<String, Vec<Rc<OneWayBinding>>>,
    pub two_way: HashMap<String, Rc<TwoWayBinding>>,
    /// Path prefixes with an installed observation point. A set membership
    /// check instead of scanning binding prefixes.
    pub observed_prefixes: HashSet<String>,
    /// Template children collected by `id` attribute.
    pub children_by_id: HashMap<String, NodeRef>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_one_way(&mut self, path: &AttrPath, binding: Rc<OneWayBinding>) {
        self.one_way
            .entry(path.to_string())
            .or_default()
            .push(binding);
    }

    pub fn has_two_way(&self, path: &AttrPath) -> bool {
        self.two_way.contains_key(&path.to_string())
    }

    pub fn add_two_way(&mut self, path: &AttrPath, binding: Rc<TwoWayBinding>) {
        self.two_way.insert(path.to_string(), binding);
    }

    /// Make sure every strict prefix of `path` has an observation point.
    /// Idempotent; re-ensuring after a subobject was wholesale replaced is
    /// the normal way deep bindings stay observable.
    pub fn ensure_observed(&mut self, path: &AttrPath) {
        for prefix in path.strict_prefixes() {
            self.observed_prefixes.insert(prefix.to_string());
        }
    }

    pub fn is_observed(&self, prefix: &AttrPath) -> bool {
        self.observed_prefixes.contains(&prefix.to_string())
    }

    /// Tear down DOM observation and forget all bindings.
    pub fn clear(&mut self) {
        for binding in self.two_way.values() {
            binding.teardown();
        }
        self.one_way.clear();
        self.two_way.clear();
        self.observed_prefixes.clear();
        self.children_by_id.clear();
    }
}
