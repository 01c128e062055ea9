//! Bound values and DOM-string coercion.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::bindable::ModelRef;

/// A value flowing through the binding engine: either a scalar, a nested
/// bindable object, or null (an unset optional).
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Object(ModelRef),
}

/// Static type tag of a model field, used to drive coercion and to decide
/// whether a two-way binding is scalar (attribute) or composite (peer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Bool,
    Int,
    Uint,
    Float,
    Object,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot convert {value:?} to {kind:?}")]
pub struct CoerceError {
    pub kind: FieldKind,
    pub value: String,
}

/// Convert a value for storage into a field of the given kind.
///
/// Only string input is converted; strings arrive from DOM attribute text
/// and must be parsed into the field's static type. Everything else passes
/// through unchanged and is validated (or rejected) by the model's own
/// setter.
pub fn coerce(kind: FieldKind, value: Value) -> Result<Value, CoerceError> {
    let Value::Str(s) = value else {
        return Ok(value);
    };
    match kind {
        FieldKind::Str => Ok(Value::Str(s)),
        FieldKind::Bool => parse_attr_bool(&s)
            .map(Value::Bool)
            .ok_or(CoerceError { kind, value: s }),
        FieldKind::Int => s
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| CoerceError { kind, value: s }),
        FieldKind::Uint => s
            .parse::<u64>()
            .map(Value::Uint)
            .map_err(|_| CoerceError { kind, value: s }),
        FieldKind::Float => s
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoerceError { kind, value: s }),
        FieldKind::Object => Err(CoerceError { kind, value: s }),
    }
}

/// Boolean attribute semantics: a present-but-empty attribute is `true`, a
/// removed attribute (observed as the literal `null`) is `false`. Everything
/// else follows the usual bool spellings.
fn parse_attr_bool(s: &str) -> Option<bool> {
    match s {
        "" => Some(true),
        "null" => Some(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Object equality is identity: a wholesale-replaced subobject
            // must register as a change even if structurally equal.
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// The DOM string representation used when rendering into attributes and
    /// text nodes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Object(_) => write!(f, "[object]"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Object(_) => write!(f, "Object(..)"),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<ModelRef> for Value {
    fn from(m: ModelRef) -> Self {
        Value::Object(m)
    }
}
