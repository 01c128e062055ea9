//! Cursor-based parser for the template HTML subset.
//!
//! Supports nested elements, text content, double/single quoted and bare
//! attribute values, valueless boolean attributes, `/>` self-closing, the
//! HTML void-element set, and `<!-- -->` comments (skipped). Mismatched or
//! unclosed tags are hard errors; templates are developer-authored and a
//! silent partial parse would hide broken bindings.

use crate::ast::{MarkupAttr, MarkupNode, Span, Template};
use crate::error::{ParseError, ParseResult};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parse a template source string into a markup AST.
pub fn parse(source: &str) -> ParseResult<Template> {
    let mut parser = Parser::new(source);
    let roots = parser.parse_nodes(None)?;
    Ok(Template { roots })
}

struct Parser<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Parse sibling nodes until the matching closing tag (or end of input
    /// when `closing` is `None`).
    fn parse_nodes(&mut self, closing: Option<&str>) -> ParseResult<Vec<MarkupNode>> {
        let mut nodes = Vec::new();
        loop {
            if self.is_at_end() {
                return match closing {
                    Some(tag) => Err(ParseError::unexpected_eof(self.pos, format!("</{tag}>"))),
                    None => Ok(nodes),
                };
            }
            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else if self.rest().starts_with("</") {
                let pos = self.pos;
                let found = self.parse_closing_tag()?;
                return match closing {
                    Some(tag) if tag == found => Ok(nodes),
                    Some(tag) => Err(ParseError::unexpected_token(
                        pos,
                        format!("</{tag}>"),
                        format!("</{found}>"),
                    )),
                    None => Err(ParseError::invalid_syntax(
                        pos,
                        format!("closing tag </{found}> without opening tag"),
                    )),
                };
            } else if self.rest().starts_with('<') {
                nodes.push(self.parse_element()?);
            } else {
                nodes.push(self.parse_text());
            }
        }
    }

    fn skip_comment(&mut self) -> ParseResult<()> {
        let start = self.pos;
        self.pos += "<!--".len();
        match self.rest().find("-->") {
            Some(offset) => {
                self.pos += offset + "-->".len();
                Ok(())
            }
            None => Err(ParseError::unexpected_eof(start, "-->".to_string())),
        }
    }

    fn parse_text(&mut self) -> MarkupNode {
        let start = self.pos;
        let end = match self.rest().find('<') {
            Some(offset) => self.pos + offset,
            None => self.source.len(),
        };
        let data = self.source[start..end].to_string();
        self.pos = end;
        MarkupNode::Text {
            data,
            span: Span::new(start, end),
        }
    }

    fn parse_closing_tag(&mut self) -> ParseResult<&'src str> {
        self.pos += "</".len();
        let tag = self.parse_name("tag name")?;
        self.skip_whitespace();
        if !self.eat(">") {
            return Err(ParseError::unexpected_token(
                self.pos,
                "'>'".to_string(),
                self.found_here(),
            ));
        }
        Ok(tag)
    }

    fn parse_element(&mut self) -> ParseResult<MarkupNode> {
        let start = self.pos;
        self.pos += 1; // '<'
        let tag = self.parse_name("tag name")?;

        let mut attributes = Vec::new();
        let self_closing;
        loop {
            self.skip_whitespace();
            if self.eat("/>") {
                self_closing = true;
                break;
            }
            if self.eat(">") {
                self_closing = false;
                break;
            }
            if self.is_at_end() {
                return Err(ParseError::unexpected_eof(self.pos, "'>'".to_string()));
            }
            attributes.push(self.parse_attribute()?);
        }

        let children = if self_closing || VOID_ELEMENTS.contains(&tag) {
            Vec::new()
        } else {
            self.parse_nodes(Some(tag))?
        };

        Ok(MarkupNode::Element {
            tag: tag.to_string(),
            attributes,
            children,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_attribute(&mut self) -> ParseResult<MarkupAttr> {
        let start = self.pos;
        let name = self.parse_name("attribute name")?;
        let value = if self.eat("=") {
            self.parse_attribute_value()?
        } else {
            // Valueless boolean attribute.
            String::new()
        };
        Ok(MarkupAttr {
            name: name.to_string(),
            value,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_attribute_value(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let start = self.pos;
                match self.rest().find(quote) {
                    Some(offset) => {
                        let value = self.source[start..start + offset].to_string();
                        self.pos = start + offset + 1;
                        Ok(value)
                    }
                    None => Err(ParseError::unexpected_eof(start, format!("closing {quote}"))),
                }
            }
            Some(_) => {
                // Bare value: up to whitespace or tag end.
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| !c.is_ascii_whitespace() && c != '>' && c != '/')
                {
                    self.advance();
                }
                if self.pos == start {
                    return Err(ParseError::unexpected_token(
                        start,
                        "attribute value".to_string(),
                        self.found_here(),
                    ));
                }
                Ok(self.source[start..self.pos].to_string())
            }
            None => Err(ParseError::unexpected_eof(
                self.pos,
                "attribute value".to_string(),
            )),
        }
    }

    fn parse_name(&mut self, expected: &str) -> ParseResult<&'src str> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            self.advance();
        }
        if self.pos == start {
            return Err(ParseError::unexpected_token(
                start,
                expected.to_string(),
                self.found_here(),
            ));
        }
        Ok(&self.source[start..self.pos])
    }

    fn found_here(&self) -> String {
        match self.peek() {
            Some(c) => format!("'{c}'"),
            None => "end of template".to_string(),
        }
    }
}
