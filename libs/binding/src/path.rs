//! Dotted attribute paths and resolution through nested models.

use std::fmt;

use thiserror::Error;

use crate::bindable::Bindable;
use crate::value::Value;

/// An ordered, non-empty sequence of field names addressing a (possibly
/// nested) location in a component's model, e.g. `inputObject.Age`.
/// Equality is structural; the dotted string form is used as a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    segments: Vec<String>,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid attribute path {text:?}: empty segment")]
pub struct PathError {
    pub text: String,
}

impl AttrPath {
    /// Split a dotted path string. Every segment must be non-empty.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        let segments: Vec<String> = text.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError {
                text: text.to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// A single-segment path.
    pub fn single(field: impl Into<String>) -> Self {
        Self {
            segments: vec![field.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// True iff `prefix` is a non-strict segment-wise prefix of `self`.
    /// Decides which bindings re-render after a write at `prefix`.
    pub fn starts_with(&self, prefix: &AttrPath) -> bool {
        prefix.segments.len() <= self.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// All strict prefixes, shortest first: the subobject locations that
    /// must be observed for a binding on this path.
    pub fn strict_prefixes(&self) -> Vec<AttrPath> {
        (1..self.segments.len())
            .map(|n| AttrPath {
                segments: self.segments[..n].to_vec(),
            })
            .collect()
    }

    /// Read the value at this path, walking one field at a time. A nil
    /// intermediate or an unknown field yields `None`; templates may
    /// reference not-yet-populated data.
    pub fn get(&self, root: &dyn Bindable) -> Option<Value> {
        let mut current = root.get(self.first())?;
        for segment in &self.segments[1..] {
            current = match current {
                Value::Object(obj) => {
                    let next = obj.borrow().get(segment);
                    next?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write `value` to the field at this path. Intermediate traversal is
    /// identical to [`AttrPath::get`]; a missing location makes the write a
    /// silent no-op (`false`).
    pub fn set(&self, root: &mut dyn Bindable, value: Value) -> bool {
        if self.segments.len() == 1 {
            return root.set(self.first(), value);
        }
        let mut current = match root.get(self.first()) {
            Some(v) => v,
            None => return false,
        };
        for segment in &self.segments[1..self.segments.len() - 1] {
            current = match current {
                Value::Object(obj) => {
                    let next = obj.borrow().get(segment);
                    match next {
                        Some(v) => v,
                        None => return false,
                    }
                }
                _ => return false,
            };
        }
        match current {
            Value::Object(obj) => obj.borrow_mut().set(self.last(), value),
            _ => false,
        }
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
