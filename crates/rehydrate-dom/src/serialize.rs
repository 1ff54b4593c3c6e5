//! Canonical markup serialization.
//!
//! The escaping and element classification here are shared with the server
//! renderer, which is what lets [`Document::outer_html`] reproduce server
//! markup exactly after a parse.
//!
//! [`Document::outer_html`]: crate::Document::outer_html

use crate::document::Document;
use crate::node::{Namespace, NodeData, NodeId};
use std::borrow::Cow;

/// HTML void elements: written as `<tag .../>` and never given children.
pub const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
	"source", "track", "wbr",
];

/// Elements whose content is raw text (no markup, no character references).
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose parser drops one leading newline of their content.
pub const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Whether `tag` is an HTML void element.
pub fn is_void_element(tag: &str) -> bool {
	VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Whether `tag` holds raw text content.
pub fn is_raw_text_element(tag: &str) -> bool {
	RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Whether content of `tag` starting with a newline must be written with an
/// extra newline in front so that a parse preserves it.
pub fn needs_leading_newline(tag: &str) -> bool {
	LEADING_NEWLINE_ELEMENTS
		.iter()
		.any(|v| v.eq_ignore_ascii_case(tag))
}

/// Escapes text content: `&`, `<` and `>`.
pub fn escape_text(s: &str) -> Cow<'_, str> {
	escape(s, false)
}

/// Escapes an attribute value: `&`, `<`, `>` and `"`.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
	escape(s, true)
}

fn escape(s: &str, quotes: bool) -> Cow<'_, str> {
	let needs = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
	if !s.contains(needs) {
		return Cow::Borrowed(s);
	}
	let mut out = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' if quotes => out.push_str("&quot;"),
			c => out.push(c),
		}
	}
	Cow::Owned(out)
}

pub(crate) fn write_node(doc: &Document, node: NodeId, out: &mut String) {
	match doc.data(node) {
		NodeData::Element(el) => {
			out.push('<');
			out.push_str(&el.tag);
			for (name, value) in &el.attributes {
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				out.push_str(&escape_attr(value));
				out.push('"');
			}
			if el.namespace == Namespace::Html && is_void_element(&el.tag) {
				out.push_str("/>");
				return;
			}
			out.push('>');
			write_children(doc, node, out);
			out.push_str("</");
			out.push_str(&el.tag);
			out.push('>');
		}
		NodeData::Text(text) => {
			let raw = doc
				.parent(node)
				.and_then(|p| doc.data(p).as_element())
				.is_some_and(|el| el.namespace == Namespace::Html && is_raw_text_element(&el.tag));
			if raw {
				out.push_str(text);
			} else {
				out.push_str(&escape_text(text));
			}
		}
		NodeData::Comment(data) => {
			out.push_str("<!--");
			out.push_str(data);
			out.push_str("-->");
		}
	}
}

pub(crate) fn write_children(doc: &Document, node: NodeId, out: &mut String) {
	let children = doc.children(node);
	let newline_quirk = doc
		.data(node)
		.as_element()
		.is_some_and(|el| el.namespace == Namespace::Html && needs_leading_newline(&el.tag));
	if newline_quirk
		&& let Some(first) = children.first()
		&& doc.data(*first).as_text().is_some_and(|t| t.starts_with('\n'))
	{
		out.push('\n');
	}
	for child in children {
		write_node(doc, *child, out);
	}
}
