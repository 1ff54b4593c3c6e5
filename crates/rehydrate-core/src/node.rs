//! The description tree.
//!
//! A [`Node`] is an immutable description of what should be on screen. It
//! is produced by application code (directly or by component `render`
//! methods) and consumed by the server renderer and the hydrator.

use crate::component::{Children, ComponentRef, ComponentType};
use crate::element::Element;
use std::borrow::Cow;

/// A node of the description tree.
#[derive(Debug, Clone)]
pub enum Node {
	/// A host element.
	Element(Element),
	/// A component reference, expanded during rendering.
	Component(ComponentRef),
	/// A text run.
	Text(Cow<'static, str>),
	/// A number rendered as text.
	Number(f64),
	/// A boolean; renders nothing.
	Bool(bool),
	/// Renders nothing.
	Null,
	/// A list of nodes without a wrapper element.
	Fragment(Vec<Node>),
}

impl Node {
	/// Creates a text node.
	pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
		Node::Text(text.into())
	}

	/// Creates a fragment.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		Node::Fragment(children.into_iter().map(IntoNode::into_node).collect())
	}

	/// Kind name used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Node::Element(_) => "element",
			Node::Component(_) => "component",
			Node::Text(_) => "text",
			Node::Number(_) => "number",
			Node::Bool(_) => "boolean",
			Node::Null => "null",
			Node::Fragment(_) => "fragment",
		}
	}

	/// Whether this node occupies no position among its siblings.
	pub fn is_hole(&self) -> bool {
		matches!(self, Node::Null | Node::Bool(_))
	}

	/// Whether this node renders as a text run.
	pub fn is_text_like(&self) -> bool {
		matches!(self, Node::Text(_) | Node::Number(_))
	}
}

/// Conversion into a [`Node`].
///
/// Implemented for elements, component references, strings, numbers,
/// booleans, `()`, `Option<T>` and `Vec<T>`.
pub trait IntoNode {
	/// Converts `self` into a node.
	fn into_node(self) -> Node;
}

impl IntoNode for Node {
	fn into_node(self) -> Node {
		self
	}
}

impl IntoNode for Element {
	fn into_node(self) -> Node {
		Node::Element(self)
	}
}

impl IntoNode for ComponentRef {
	fn into_node(self) -> Node {
		Node::Component(self)
	}
}

impl IntoNode for ComponentType {
	fn into_node(self) -> Node {
		Node::Component(ComponentRef::new(self))
	}
}

impl IntoNode for &'static str {
	fn into_node(self) -> Node {
		Node::Text(Cow::Borrowed(self))
	}
}

impl IntoNode for String {
	fn into_node(self) -> Node {
		Node::Text(Cow::Owned(self))
	}
}

impl IntoNode for Cow<'static, str> {
	fn into_node(self) -> Node {
		Node::Text(self)
	}
}

impl IntoNode for bool {
	fn into_node(self) -> Node {
		Node::Bool(self)
	}
}

impl IntoNode for () {
	fn into_node(self) -> Node {
		Node::Null
	}
}

macro_rules! impl_number_into_node {
	($($ty:ty),*) => {
		$(
			impl IntoNode for $ty {
				fn into_node(self) -> Node {
					Node::Number(self as f64)
				}
			}
		)*
	};
}

impl_number_into_node!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: IntoNode> IntoNode for Option<T> {
	fn into_node(self) -> Node {
		match self {
			Some(node) => node.into_node(),
			None => Node::Null,
		}
	}
}

impl<T: IntoNode> IntoNode for Vec<T> {
	fn into_node(self) -> Node {
		Node::Fragment(self.into_iter().map(IntoNode::into_node).collect())
	}
}

impl IntoNode for Children {
	fn into_node(self) -> Node {
		match self.as_slice() {
			[single] => single.clone(),
			nodes => Node::Fragment(nodes.to_vec()),
		}
	}
}

impl IntoNode for &Children {
	fn into_node(self) -> Node {
		self.clone().into_node()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("hi".into_node(), "text")]
	#[case(3_i32.into_node(), "number")]
	#[case(true.into_node(), "boolean")]
	#[case(().into_node(), "null")]
	#[case(None::<String>.into_node(), "null")]
	#[case(vec!["a", "b"].into_node(), "fragment")]
	#[case(Element::new("div").into_node(), "element")]
	fn test_into_node_kinds(#[case] node: Node, #[case] kind: &str) {
		assert_eq!(node.kind(), kind);
	}

	#[test]
	fn test_holes() {
		assert!(Node::Null.is_hole());
		assert!(Node::Bool(false).is_hole());
		assert!(!Node::text("").is_hole());
		assert!(Node::Number(1.0).is_text_like());
	}
}
