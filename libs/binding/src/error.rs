use thiserror::Error;

use crate::path::PathError;

/// Fatal configuration errors raised while registering elements or setting
/// up bindings. Runtime data problems (nil intermediates, unknown write
/// targets, failed conversions) are deliberately *not* here; those are
/// lenient no-ops or logged diagnostics.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("two-way binding {path} registered more than once")]
    DuplicateTwoWay { path: String },

    #[error("two-way binding {path}: field does not exist on the model")]
    UnknownField { path: String },

    #[error("two-way binding {path}: composite field bound to non-custom element <{tag}>")]
    CompositeBinding { path: String, tag: String },

    #[error("element <{tag}> is not a registered custom element")]
    NotDefined { tag: String },

    #[error("recursive template: <{tag}> instantiates itself")]
    RecursiveTemplate { tag: String },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Errors registering a custom element definition.
#[derive(Debug, Error)]
pub enum DefineError {
    #[error("custom element tag {tag:?} must contain a dash")]
    InvalidTagName { tag: String },

    #[error("custom element {tag:?} is already defined")]
    AlreadyDefined { tag: String },

    #[error("template for {tag:?} failed to parse: {source}")]
    Template {
        tag: String,
        source: lodestone_parser::ParseError,
    },
}
