//! HTML serialisation of document subtrees.
//!
//! Attribute order is fixed: `class` first, then other attributes in
//! insertion order, then `style`.

use crate::document::Document;
use crate::node::NodeId;

pub(crate) fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(el) = doc.get(id) else {
        return;
    };

    out.push('<');
    out.push_str(el.tag());
    if !el.classes().is_empty() {
        push_attribute(out, "class", &el.class_name());
    }
    for (name, value) in el.attributes() {
        push_attribute(out, name, value);
    }
    let style = el.style_text();
    if !style.is_empty() {
        push_attribute(out, "style", &style);
    }
    out.push('>');

    out.push_str(&escape_text(el.text()));
    for child in el.children() {
        write_node(doc, *child, out);
    }

    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

/// Escape text content (`&`, `<`, `>`)
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a double-quoted attribute value (`&`, `"`)
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
