use serde::{Deserialize, Serialize};

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A parsed template: the markup between a component's shadow-root tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub roots: Vec<MarkupNode>,
}

/// Element or text node in a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarkupNode {
    Element {
        tag: String,
        attributes: Vec<MarkupAttr>,
        children: Vec<MarkupNode>,
        span: Span,
    },
    Text {
        data: String,
        span: Span,
    },
}

/// An attribute as written in the template. Valueless attributes parse with
/// an empty value (`<input disabled>`, browser boolean-attribute style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupAttr {
    pub name: String,
    pub value: String,
    pub span: Span,
}
