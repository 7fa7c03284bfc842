//! HTML serialization of an element tree.

use std::fmt::Write;

use crate::element::{Content, Element};

/// Serialize `root` and its descendants to an HTML string.
pub fn to_html(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, &mut out);
    log::trace!("serialized <{}> to {} bytes", root.tag, out.len());
    out
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);

    if let Some(id) = &element.id {
        write_attr(out, "id", id);
    }

    if !element.classes.is_empty() {
        write_attr(out, "class", &element.classes.join(" "));
    }

    for (key, value) in &element.attrs {
        write_attr(out, key, value);
    }

    if let Some(style) = &element.style {
        write_attr(out, "style", style);
    }

    for (key, value) in &element.data {
        write_attr(out, &format!("data-{key}"), value);
    }

    out.push('>');

    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Html(markup) => out.push_str(markup),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }

    // Closing tags are always written; the widget never emits void elements.
    let _ = write!(out, "</{}>", element.tag);
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, " {}=\"{}\"", key, escape_attr(value));
}

/// Escape text for use between tags.
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

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
