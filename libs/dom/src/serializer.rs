//! Serialize a node tree back to markup.
//!
//! Output preserves attribute insertion order and writes text data verbatim.
//! Used by tests and diagnostics; this is not an escaping-correct HTML
//! serializer.

use crate::node::Node;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Node {
    /// Markup for this node including its own tag.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }

    /// Markup for this node's children.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.child_nodes() {
            write_node(&child, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    let Some(tag) = node.tag_name() else {
        out.push_str(&node.text_data().unwrap_or_default());
        return;
    };

    out.push('<');
    out.push_str(tag);
    for name in node.attribute_names() {
        let value = node.attribute(&name).unwrap_or_default();
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&value);
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }

    for child in node.child_nodes() {
        write_node(&child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
