//! Custom element definitions and upgrades.
//!
//! A definition pairs a tag name with a parsed template and a model factory.
//! Upgrading a host element instantiates the template into a fresh shadow
//! tree, recursively upgrades custom children, then connects the component.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lodestone_dom::{Node, NodeRef};
use lodestone_parser::{MarkupNode, Template};
use tracing::debug;

use crate::bindable::ModelRef;
use crate::component::{Component, ComponentRef};
use crate::error::{BindingError, DefineError};

type ModelFactory = dyn Fn() -> ModelRef;

pub struct ElementDefinition {
    tag: String,
    template: Template,
    factory: Box<ModelFactory>,
}

impl ElementDefinition {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// All defined custom elements. Templates are parsed once, at definition
/// time, so a bad template is rejected before any instance exists.
#[derive(Default)]
pub struct CustomElementRegistry {
    definitions: RefCell<HashMap<String, Rc<ElementDefinition>>>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `tag` with a template source and a factory producing a fresh
    /// model per instance. The tag must contain a dash, per the custom
    /// element naming rule.
    pub fn define(
        &self,
        tag: impl Into<String>,
        template_source: &str,
        factory: impl Fn() -> ModelRef + 'static,
    ) -> Result<(), DefineError> {
        let tag = tag.into();
        if !tag.contains('-') {
            return Err(DefineError::InvalidTagName { tag });
        }
        if self.definitions.borrow().contains_key(&tag) {
            return Err(DefineError::AlreadyDefined { tag });
        }
        let template = lodestone_parser::parse(template_source)
            .map_err(|source| DefineError::Template {
                tag: tag.clone(),
                source,
            })?;
        debug!(%tag, "custom element defined");
        self.definitions.borrow_mut().insert(
            tag.clone(),
            Rc::new(ElementDefinition {
                tag,
                template,
                factory: Box::new(factory),
            }),
        );
        Ok(())
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.borrow().contains_key(tag)
    }

    /// Create a fresh host element for `tag` and upgrade it.
    pub fn instantiate(&self, tag: &str) -> Result<ComponentRef, BindingError> {
        let host = Node::element(tag);
        self.upgrade(&host)
    }

    /// Upgrade an existing host element: build its shadow tree from the
    /// definition's template, upgrade custom children depth-first, connect.
    pub fn upgrade(&self, host: &NodeRef) -> Result<ComponentRef, BindingError> {
        let mut stack = Vec::new();
        self.upgrade_within(host, &mut stack)
    }

    fn upgrade_within(
        &self,
        host: &NodeRef,
        stack: &mut Vec<String>,
    ) -> Result<ComponentRef, BindingError> {
        let tag = host.tag_name().unwrap_or_default().to_string();
        let definition = self
            .definitions
            .borrow()
            .get(&tag)
            .cloned()
            .ok_or_else(|| BindingError::NotDefined { tag: tag.clone() })?;
        // A template that instantiates its own tag would recurse without
        // bound; refuse it at the first repeat.
        if stack.iter().any(|t| t == &tag) {
            return Err(BindingError::RecursiveTemplate { tag });
        }
        stack.push(tag.clone());

        let shadow_root = Node::element("shadow-root");
        let mut custom_children = Vec::new();
        for node in &definition.template.roots {
            shadow_root.append_child(build_node(node, &mut custom_children));
        }

        let component = Component::new(tag, host.clone(), shadow_root, (definition.factory)());
        for child_host in custom_children {
            let child = self.upgrade_within(&child_host, stack)?;
            component.add_child_component(&child_host, child);
        }
        component.connect()?;

        stack.pop();
        Ok(component)
    }
}

/// Instantiate one AST node into a live DOM node. Custom elements found along
/// the way are collected for upgrading; their template children stay in this
/// tree as light DOM.
fn build_node(node: &MarkupNode, custom: &mut Vec<NodeRef>) -> NodeRef {
    match node {
        MarkupNode::Text { data, .. } => Node::text(data.clone()),
        MarkupNode::Element {
            tag,
            attributes,
            children,
            ..
        } => {
            let element = Node::element(tag.clone());
            for attr in attributes {
                element.set_attribute(&attr.name, &attr.value);
            }
            for child in children {
                element.append_child(build_node(child, custom));
            }
            if element.is_custom() {
                custom.push(element.clone());
            }
            element
        }
    }
}
