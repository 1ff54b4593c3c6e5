//! Markup serializer.
//!
//! Writes an expanded tree as HTML. In [`RenderMode::Markup`] every
//! element carries its identity, the root is flagged, text runs sharing a
//! parent are framed by comments and empty slots leave a comment behind.
//! [`RenderMode::StaticMarkup`] writes none of that.

use super::markers::{HYDRATION_ATTR_ID, HYDRATION_ATTR_ROOT, TEXT_CLOSE, empty_marker, text_open};
use crate::config::RenderMode;
use crate::tree::{MarkupContent, MarkupElement, MarkupNode};
use rehydrate_dom::{Namespace, escape_attr, escape_text, needs_leading_newline};

/// Serializes `root` in `mode`. The checksum is added separately.
pub fn serialize(root: &MarkupNode, mode: RenderMode) -> String {
	let mut out = String::new();
	Serializer {
		markers: mode.writes_markers(),
		out: &mut out,
	}
	.node(root, true);
	out
}

struct Serializer<'a> {
	markers: bool,
	out: &'a mut String,
}

impl Serializer<'_> {
	fn node(&mut self, node: &MarkupNode, is_root: bool) {
		match node {
			MarkupNode::Element(el) => self.element(el, is_root),
			MarkupNode::Text(text) => {
				if self.markers {
					self.comment(&text_open(&text.identity));
					self.out.push_str(&escape_text(&text.text));
					self.comment(TEXT_CLOSE);
				} else {
					self.out.push_str(&escape_text(&text.text));
				}
			}
			MarkupNode::Empty(identity) => {
				if self.markers {
					self.comment(&empty_marker(identity));
				}
			}
		}
	}

	fn comment(&mut self, data: &str) {
		self.out.push_str("<!--");
		self.out.push_str(data);
		self.out.push_str("-->");
	}

	fn attribute(&mut self, name: &str, value: &str) {
		self.out.push(' ');
		self.out.push_str(name);
		self.out.push_str("=\"");
		self.out.push_str(&escape_attr(value));
		self.out.push('"');
	}

	fn element(&mut self, el: &MarkupElement, is_root: bool) {
		self.out.push('<');
		self.out.push_str(&el.tag);
		for (name, value) in &el.attributes {
			self.attribute(name, value);
		}
		if self.markers {
			if is_root {
				self.attribute(HYDRATION_ATTR_ROOT, "");
			}
			self.attribute(HYDRATION_ATTR_ID, el.identity.as_str());
		}
		if el.is_void() {
			self.out.push_str("/>");
			return;
		}
		self.out.push('>');

		match &el.content {
			MarkupContent::Inline(text) => {
				self.leading_newline(el, text);
				self.out.push_str(&escape_text(text));
			}
			MarkupContent::Raw(html) => {
				self.leading_newline(el, html);
				self.out.push_str(html);
			}
			MarkupContent::Children(children) => {
				for child in children {
					self.node(child, false);
				}
			}
		}

		self.out.push_str("</");
		self.out.push_str(&el.tag);
		self.out.push('>');
	}

	// Parsers drop one newline right after `<pre>`, `<textarea>` and `<listing>`.
	fn leading_newline(&mut self, el: &MarkupElement, content: &str) {
		if el.namespace == Namespace::Html && needs_leading_newline(&el.tag) && content.starts_with('\n') {
			self.out.push('\n');
		}
	}
}
