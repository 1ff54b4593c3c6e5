//! Walking live sibling lists.
//!
//! Server markup frames text runs with comments, so one logical slot can
//! span up to three DOM nodes. The cursor groups a parent's children into
//! [`Slot`]s and hands them out in order.

use crate::ssr::markers::CommentMarker;
use crate::tree::NodeIdentity;
use rehydrate_dom::{Document, NodeData, NodeId};

/// One logical position among a parent's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
	/// An element.
	Element(NodeId),
	/// A text run, framed or bare.
	Text {
		open: Option<NodeId>,
		text: Option<NodeId>,
		close: Option<NodeId>,
		identity: Option<NodeIdentity>,
	},
	/// An empty-slot comment.
	Empty {
		marker: NodeId,
		identity: Option<NodeIdentity>,
	},
	/// Anything else: stray comments and unmatched frame ends.
	Other(NodeId),
}

impl Slot {
	/// DOM nodes making up the slot, in document order.
	pub(crate) fn nodes(&self) -> Vec<NodeId> {
		match self {
			Slot::Element(node) | Slot::Other(node) => vec![*node],
			Slot::Text {
				open, text, close, ..
			} => [*open, *text, *close].into_iter().flatten().collect(),
			Slot::Empty { marker, .. } => vec![*marker],
		}
	}

	/// Short description used in mismatch diagnostics.
	pub(crate) fn describe(&self, doc: &Document) -> String {
		match self {
			Slot::Element(node) => format!("<{}>", doc.tag_name(*node).unwrap_or_default()),
			Slot::Text { text, .. } => {
				let text = text.and_then(|t| doc.text(t)).unwrap_or_default();
				format!("text {:?}", text)
			}
			Slot::Empty { .. } => "empty slot".to_string(),
			Slot::Other(node) => doc.data(*node).describe(),
		}
	}
}

/// Cursor over the slots of one parent.
#[derive(Debug)]
pub(crate) struct HydrationCursor {
	slots: Vec<Slot>,
	position: usize,
}

impl HydrationCursor {
	/// Groups the current children of `parent` into slots.
	pub(crate) fn new(doc: &Document, parent: NodeId) -> Self {
		let children = doc.children(parent);
		let mut slots = Vec::with_capacity(children.len());
		let mut i = 0;
		while i < children.len() {
			let node = children[i];
			i += 1;
			let slot = match doc.data(node) {
				NodeData::Element(_) => Slot::Element(node),
				NodeData::Text(_) => Slot::Text {
					open: None,
					text: Some(node),
					close: None,
					identity: None,
				},
				NodeData::Comment(data) => match CommentMarker::parse(data) {
					Some(CommentMarker::TextOpen(identity)) => {
						let text = children
							.get(i)
							.copied()
							.filter(|n| doc.text(*n).is_some());
						if text.is_some() {
							i += 1;
						}
						let close = children.get(i).copied().filter(|n| {
							doc.data(*n)
								.as_comment()
								.is_some_and(|c| CommentMarker::parse(c) == Some(CommentMarker::TextClose))
						});
						if close.is_some() {
							i += 1;
						}
						Slot::Text {
							open: Some(node),
							text,
							close,
							identity,
						}
					}
					Some(CommentMarker::Empty(identity)) => Slot::Empty {
						marker: node,
						identity,
					},
					Some(CommentMarker::TextClose) | None => Slot::Other(node),
				},
			};
			slots.push(slot);
		}
		tracing::trace!(parent = %parent, slots = slots.len(), "collected hydration slots");
		Self { slots, position: 0 }
	}

	/// Total number of slots.
	pub(crate) fn len(&self) -> usize {
		self.slots.len()
	}

	/// Whether the parent has no slots.
	pub(crate) fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Slot at `index`, without moving the cursor.
	pub(crate) fn peek(&self, index: usize) -> Option<&Slot> {
		self.slots.get(index)
	}
}

impl Iterator for HydrationCursor {
	type Item = Slot;

	fn next(&mut self) -> Option<Slot> {
		let slot = self.slots.get(self.position).cloned()?;
		self.position += 1;
		tracing::trace!(position = self.position, "advanced hydration cursor");
		Some(slot)
	}
}
