//! The expanded tree.
//!
//! Expansion turns a description tree into a tree of host nodes only:
//! components are gone, fragments are flattened, holes are skipped and
//! every node carries its identity. Both the serializer and the hydrator
//! work from this tree, which is what keeps server markup and client
//! expectations in lockstep.

use super::NodeIdentity;
use crate::form::ControlProps;
use rehydrate_core::{Callback, NodeRef};
use rehydrate_dom::Namespace;
use std::borrow::Cow;

/// A host node of the expanded tree.
#[derive(Debug, Clone)]
pub enum MarkupNode {
	/// An element.
	Element(MarkupElement),
	/// A text run.
	Text(MarkupText),
	/// The slot of a component that rendered nothing.
	Empty(NodeIdentity),
}

impl MarkupNode {
	/// Identity of the node.
	pub fn identity(&self) -> &NodeIdentity {
		match self {
			MarkupNode::Element(el) => &el.identity,
			MarkupNode::Text(text) => &text.identity,
			MarkupNode::Empty(identity) => identity,
		}
	}

	/// Short description used in mismatch diagnostics.
	pub fn describe(&self) -> String {
		match self {
			MarkupNode::Element(el) => format!("<{}>", el.tag),
			MarkupNode::Text(text) => format!("text {:?}", text.text),
			MarkupNode::Empty(_) => "empty slot".to_string(),
		}
	}

	/// Calls `f` on this node and every descendant, parents first.
	pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a MarkupNode)) {
		f(self);
		if let MarkupNode::Element(el) = self
			&& let MarkupContent::Children(children) = &el.content
		{
			for child in children {
				child.walk(f);
			}
		}
	}
}

/// An expanded element.
#[derive(Debug, Clone)]
pub struct MarkupElement {
	/// Identity.
	pub identity: NodeIdentity,
	/// Tag name as declared.
	pub tag: String,
	/// Namespace resolved from the ancestors.
	pub namespace: Namespace,
	/// Serialized attributes in output order, without hydration markers.
	pub attributes: Vec<(String, String)>,
	/// Element content.
	pub content: MarkupContent,
	/// Form-control classification, for `input`, `textarea` and `select`.
	pub control: Option<ControlProps>,
	/// Event handlers to attach.
	pub handlers: Vec<(Cow<'static, str>, Callback)>,
	/// Ref to bind.
	pub node_ref: Option<NodeRef>,
}

impl MarkupElement {
	/// Looks up a serialized attribute.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(n, _)| n.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}

	/// Whether the element is an HTML void element.
	pub fn is_void(&self) -> bool {
		self.namespace == Namespace::Html && rehydrate_dom::is_void_element(&self.tag)
	}
}

/// Content of an expanded element.
#[derive(Debug, Clone)]
pub enum MarkupContent {
	/// A single text run written without markers.
	Inline(String),
	/// Raw HTML inserted without escaping.
	Raw(String),
	/// Child nodes.
	Children(Vec<MarkupNode>),
}

impl MarkupContent {
	/// Empty child list.
	pub fn empty() -> Self {
		MarkupContent::Children(Vec::new())
	}
}

/// An expanded text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupText {
	/// Identity.
	pub identity: NodeIdentity,
	/// Unescaped text.
	pub text: String,
}
