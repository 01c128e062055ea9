//! Parser tests

use crate::ast::MarkupNode;
use crate::error::ParseError;
use crate::parse;

fn only_element(template: &str) -> MarkupNode {
    let parsed = parse(template).expect("template should parse");
    assert_eq!(parsed.roots.len(), 1);
    parsed.roots.into_iter().next().unwrap()
}

#[test]
fn test_parse_element_with_text() {
    let node = only_element("<span>[[Name]]</span>");
    let MarkupNode::Element { tag, children, .. } = node else {
        panic!("expected element");
    };
    assert_eq!(tag, "span");
    assert_eq!(children.len(), 1);
    let MarkupNode::Text { data, .. } = &children[0] else {
        panic!("expected text child");
    };
    assert_eq!(data, "[[Name]]");
}

#[test]
fn test_parse_attributes() {
    let node = only_element(r#"<input id="age" value="{{Age}}" type='number' disabled>"#);
    let MarkupNode::Element { tag, attributes, .. } = node else {
        panic!("expected element");
    };
    assert_eq!(tag, "input");
    let pairs: Vec<(&str, &str)> = attributes
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("id", "age"),
            ("value", "{{Age}}"),
            ("type", "number"),
            ("disabled", ""),
        ]
    );
}

#[test]
fn test_parse_nested_structure() {
    let source = r#"
        <div class="card">
            <h1>[[Title]]</h1>
            <my-item id="item" data="{{inputObject}}"></my-item>
        </div>
    "#;
    let parsed = parse(source).expect("template should parse");
    let elements: Vec<&MarkupNode> = parsed
        .roots
        .iter()
        .filter(|n| matches!(n, MarkupNode::Element { .. }))
        .collect();
    assert_eq!(elements.len(), 1);

    let MarkupNode::Element { children, .. } = elements[0] else {
        unreachable!();
    };
    let tags: Vec<&str> = children
        .iter()
        .filter_map(|n| match n {
            MarkupNode::Element { tag, .. } => Some(tag.as_str()),
            MarkupNode::Text { .. } => None,
        })
        .collect();
    assert_eq!(tags, vec!["h1", "my-item"]);
}

#[test]
fn test_parse_self_closing_and_void() {
    let parsed = parse("<div><br><img src=x.png/><input value=42></div>").unwrap();
    let MarkupNode::Element { children, .. } = &parsed.roots[0] else {
        panic!("expected element");
    };
    assert_eq!(children.len(), 3);
}

#[test]
fn test_comments_are_skipped() {
    let parsed = parse("<div><!-- note --><span>x</span></div>").unwrap();
    let MarkupNode::Element { children, .. } = &parsed.roots[0] else {
        panic!("expected element");
    };
    assert_eq!(children.len(), 1);
}

#[test]
fn test_mismatched_closing_tag_errors() {
    let err = parse("<div><span>x</div>").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_unclosed_tag_errors() {
    let err = parse("<div><span>x</span>").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));
}

#[test]
fn test_stray_closing_tag_errors() {
    let err = parse("</div>").unwrap_err();
    assert!(matches!(err, ParseError::InvalidSyntax { .. }));
}

#[test]
fn test_ast_serializes() {
    let parsed = parse(r#"<span title="[[Name]]">hi</span>"#).unwrap();
    let json = serde_json::to_string(&parsed).unwrap();
    assert!(json.contains(r#""tag":"span""#));
    let back: crate::ast::Template = serde_json::from_str(&json).unwrap();
    assert_eq!(back, parsed);
}

#[test]
fn test_error_report_formatting() {
    let source = "<div><span>x</div>";
    let err = parse(source).unwrap_err();
    let report = crate::error::format_errors(source, "template.html", &err);
    assert!(report.contains("template.html"));
}
