//! Client-side creation of subtrees without server counterparts.

use crate::ssr::markers::{TEXT_CLOSE, empty_marker, text_open};
use crate::tree::{MarkupContent, MarkupNode, NodeIdentity};
use rehydrate_dom::{Document, NodeId};

/// Builds detached DOM nodes for `node`.
///
/// Returns the top-level nodes in order (a framed text run yields its two
/// comments around the text). Every created node is pushed to `created`
/// with its identity. Element identities are not written as attributes,
/// but text frames and empty markers are kept so the slots stay countable.
pub(crate) fn create_node(
	doc: &mut Document,
	node: &MarkupNode,
	created: &mut Vec<(NodeIdentity, NodeId)>,
) -> Vec<NodeId> {
	match node {
		MarkupNode::Element(el) => {
			let dom = doc.create_element_ns(&el.tag, el.namespace);
			created.push((el.identity.clone(), dom));
			for (name, value) in &el.attributes {
				doc.set_attribute(dom, name, value);
			}
			match &el.content {
				MarkupContent::Inline(text) => {
					if !text.is_empty() {
						let text = doc.create_text(text);
						doc.append_child(dom, text);
					}
				}
				MarkupContent::Raw(html) => doc.set_inner_html(dom, html),
				MarkupContent::Children(children) => {
					for child in children {
						for child in create_node(doc, child, created) {
							doc.append_child(dom, child);
						}
					}
				}
			}
			vec![dom]
		}
		MarkupNode::Text(text) => {
			let open = doc.create_comment(&text_open(&text.identity));
			let close = doc.create_comment(TEXT_CLOSE);
			if text.text.is_empty() {
				created.push((text.identity.clone(), open));
				return vec![open, close];
			}
			let node = doc.create_text(&text.text);
			created.push((text.identity.clone(), node));
			vec![open, node, close]
		}
		MarkupNode::Empty(identity) => {
			let marker = doc.create_comment(&empty_marker(identity));
			created.push((identity.clone(), marker));
			vec![marker]
		}
	}
}
