//! # Lodestone parser
//!
//! Parses component templates (an HTML subset) into a plain markup AST,
//! and recognizes the two binding-expression mini-languages embedded in
//! attribute values and text content:
//!
//! - one-way: `[[ident(.ident)*]]`, any number of occurrences mixed with
//!   literal text
//! - two-way: a value that is *exactly* `{{ident(.ident)*}}`
//!
//! The AST is deliberately dumb data (serde-derived, span-carrying); template
//! instantiation into a live `lodestone-dom` tree happens in the binding
//! engine.

pub mod ast;
pub mod error;
pub mod expr;
pub mod parser;

#[cfg(test)]
mod tests;

pub use ast::{MarkupAttr, MarkupNode, Span, Template};
pub use error::{format_errors, ParseError, ParseResult};
pub use expr::{one_way_paths, two_way_path};
pub use parser::parse;
