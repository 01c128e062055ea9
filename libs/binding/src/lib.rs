//! # Lodestone binding engine
//!
//! Connects parsed component templates to live models:
//!
//! - [`bindable`]: the model capability. Types declare a field registry and
//!   route reads/writes through `get`/`set`; no runtime reflection.
//! - [`path`]: dotted attribute paths with lenient resolution.
//! - [`scanner`] and [`bindings`]: template scan producing one-way
//!   (`[[path]]`) and two-way (`{{path}}`) binding records.
//! - [`component`]: live instances. Every model write goes through
//!   [`Component::set`], the central dispatcher: coercion, equality guard,
//!   host-attribute reflection, field observers, prefix-matched re-render.
//! - [`element`]: custom element definitions and the upgrade path.
//!
//! Setup errors are fatal ([`BindingError`], [`DefineError`]); runtime data
//! problems are lenient no-ops or `tracing` diagnostics.

pub mod bindable;
pub mod bindings;
pub mod component;
pub mod element;
pub mod error;
pub mod path;
pub mod registry;
pub mod scanner;
pub mod text;
pub mod value;

#[cfg(test)]
mod tests_scenarios;

pub use bindable::{field_info, model, Bindable, FieldInfo, ModelRef};
pub use component::{Component, ComponentRef};
pub use element::{CustomElementRegistry, ElementDefinition};
pub use error::{BindingError, DefineError};
pub use path::AttrPath;
pub use value::{coerce, CoerceError, FieldKind, Value};
