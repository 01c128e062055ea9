//! The model capability.
//!
//! Every bindable model type declares its field registry (name,
//! exported-ness, static kind) and routes reads/writes through `get`/`set`.
//! Implementations are written by hand or generated; there is no runtime
//! reflection and no proxy wrapper.

use std::cell::RefCell;
use std::rc::Rc;

use crate::path::AttrPath;
use crate::value::{FieldKind, Value};

/// A field declared by a bindable type. Exported fields reflect onto the
/// host element's attributes (kebab-cased) and are observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub exported: bool,
    pub kind: FieldKind,
}

impl FieldInfo {
    pub const fn exported(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            exported: true,
            kind,
        }
    }

    pub const fn private(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            exported: false,
            kind,
        }
    }
}

/// Shared handle to a bindable model object. Nested composite fields hold
/// further `ModelRef`s, so replacing a subobject swaps the handle.
pub type ModelRef = Rc<RefCell<dyn Bindable>>;

/// Wrap a concrete model into a shared handle.
pub fn model<T: Bindable + 'static>(value: T) -> ModelRef {
    Rc::new(RefCell::new(value))
}

/// Capability implemented by every bindable model type.
pub trait Bindable {
    /// The field registry for this type.
    fn fields(&self) -> &'static [FieldInfo];

    /// Read a field. `None` means the field does not exist on this type; a
    /// present-but-unset optional reads as `Some(Value::Null)`.
    fn get(&self, field: &str) -> Option<Value>;

    /// Write a field. Returns `false` (and stores nothing) when the field
    /// does not exist or the value's type does not fit.
    fn set(&mut self, field: &str, value: Value) -> bool;
}

impl dyn Bindable + '_ {
    pub fn field(&self, name: &str) -> Option<FieldInfo> {
        self.fields().iter().copied().find(|f| f.name == name)
    }
}

/// Resolve the `FieldInfo` a path refers to, traversing live intermediate
/// objects. `None` when any segment is unknown or an intermediate is unset;
/// the static type of a field behind a nil optional cannot be recovered.
pub fn field_info(root: &dyn Bindable, path: &AttrPath) -> Option<FieldInfo> {
    let mut info = root.field(path.first())?;
    let mut current = root.get(path.first());
    for segment in path.segments().iter().skip(1) {
        let Some(Value::Object(obj)) = current else {
            return None;
        };
        let next = {
            let b = obj.borrow();
            let i = (*b).field(segment)?;
            (i, b.get(segment))
        };
        info = next.0;
        current = next.1;
    }
    Some(info)
}
