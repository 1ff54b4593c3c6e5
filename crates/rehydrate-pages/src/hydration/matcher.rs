//! Node-by-node matching of the client tree against live markup.
//!
//! Both sides are walked in lockstep, strictly in order. A DOM node is a
//! candidate for an element when tag (case-insensitive), namespace, any
//! identity it carries and the form-control structure agree. Text runs are
//! always candidates; their content is corrected in place. A failed
//! candidate or a different child count discards the DOM subtree and
//! builds the client subtree in its place.

use super::create::create_node;
use super::cursor::{HydrationCursor, Slot};
use super::report::{HydrationReport, Outcome};
use crate::form::{reconcile, structurally_compatible};
use crate::ssr::markers::{HYDRATION_ATTR_ID, is_marker_attribute};
use crate::tree::{MarkupContent, MarkupElement, MarkupNode, MarkupText, NodeIdentity};
use rehydrate_dom::{Document, Namespace, NodeId, escape_text, is_raw_text_element};
use std::borrow::Cow;

/// The first difference found in a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
	pub(crate) identity: NodeIdentity,
	pub(crate) expected: String,
	pub(crate) found: String,
}

pub(crate) struct Matcher<'d> {
	doc: &'d mut Document,
	report: HydrationReport,
	first: Option<Mismatch>,
}

fn identity_agrees(found: Option<&NodeIdentity>, expected: &NodeIdentity) -> bool {
	found.is_none_or(|id| id == expected)
}

impl<'d> Matcher<'d> {
	pub(crate) fn new(doc: &'d mut Document) -> Self {
		Self {
			doc,
			report: HydrationReport::new(),
			first: None,
		}
	}

	/// Ends the pass, returning the report and the first mismatch.
	pub(crate) fn finish(self) -> (HydrationReport, Option<Mismatch>) {
		(self.report, self.first)
	}

	/// Matches `expected` against `slot`, a child slot of `parent`.
	pub(crate) fn hydrate_slot(&mut self, parent: NodeId, slot: &Slot, expected: &MarkupNode) {
		match (expected, slot) {
			(MarkupNode::Element(el), Slot::Element(dom)) if self.is_candidate(el, *dom) => {
				if let Err(mismatch) = self.adopt_element(el, *dom) {
					self.mismatch(mismatch);
					self.replace(parent, slot, expected);
				}
			}
			(
				MarkupNode::Text(text),
				Slot::Text {
					open,
					text: dom_text,
					close,
					identity,
				},
			) if identity_agrees(identity.as_ref(), &text.identity) => {
				self.adopt_text(parent, text, *open, *dom_text, *close);
			}
			(MarkupNode::Empty(expected_id), Slot::Empty { marker, identity })
				if identity_agrees(identity.as_ref(), expected_id) =>
			{
				self.report.record(expected_id, Outcome::Adopted, Some(*marker));
			}
			_ => {
				let found = slot.describe(self.doc);
				self.mismatch(Mismatch {
					identity: expected.identity().clone(),
					expected: expected.describe(),
					found,
				});
				self.replace(parent, slot, expected);
			}
		}
	}

	/// Empties `container` and builds `root` into it.
	pub(crate) fn rebuild(&mut self, container: NodeId, root: &MarkupNode, outcome: Outcome) {
		self.doc.clear_children(container);
		let mut created = Vec::new();
		for node in create_node(self.doc, root, &mut created) {
			self.doc.append_child(container, node);
		}
		self.record_created(created, outcome);
	}

	fn is_candidate(&self, el: &MarkupElement, dom: NodeId) -> bool {
		let Some(data) = self.doc.element(dom) else {
			return false;
		};
		data.tag().eq_ignore_ascii_case(&el.tag)
			&& data.namespace() == el.namespace
			&& data
				.attribute(HYDRATION_ATTR_ID)
				.is_none_or(|id| id == el.identity.as_str())
			&& el
				.control
				.as_ref()
				.is_none_or(|control| structurally_compatible(self.doc, dom, control))
	}

	fn adopt_element(&mut self, el: &MarkupElement, dom: NodeId) -> Result<(), Mismatch> {
		let cursor = HydrationCursor::new(self.doc, dom);
		let shape_error = |expected: String| Mismatch {
			identity: el.identity.clone(),
			expected,
			found: format!("{} child nodes", cursor.len()),
		};
		match &el.content {
			MarkupContent::Children(children) if cursor.len() != children.len() => {
				return Err(shape_error(format!(
					"{} child nodes in <{}>",
					children.len(),
					el.tag
				)));
			}
			MarkupContent::Inline(_) => {
				let bare_text = matches!(cursor.peek(0), Some(Slot::Text { open: None, .. }));
				if cursor.len() > 1 || (cursor.len() == 1 && !bare_text) {
					return Err(shape_error(format!("text content in <{}>", el.tag)));
				}
			}
			_ => {}
		}

		self.report.record(&el.identity, Outcome::Adopted, Some(dom));
		self.apply_attributes(el, dom);

		match &el.content {
			MarkupContent::Children(children) => {
				for (slot, child) in cursor.zip(children) {
					self.hydrate_slot(dom, &slot, child);
				}
			}
			MarkupContent::Inline(text) => {
				let text_node = match cursor.peek(0) {
					Some(Slot::Text { text, .. }) => *text,
					_ => None,
				};
				self.adopt_inline(el, dom, text, text_node);
			}
			MarkupContent::Raw(html) => {
				let live = self.doc.inner_html(dom);
				if live != *html {
					self.mismatch(Mismatch {
						identity: el.identity.clone(),
						expected: format!("inner HTML {:?}", html),
						found: format!("inner HTML {:?}", live),
					});
					self.doc.set_inner_html(dom, html);
				}
			}
		}

		if let Some(control) = &el.control
			&& let Some(preserved) = reconcile(self.doc, dom, &el.identity, control)
		{
			self.report.preserved.push(preserved);
		}
		Ok(())
	}

	/// Writes declared attributes and removes undeclared ones, leaving
	/// hydration markers alone. Differences here are not mismatches.
	fn apply_attributes(&mut self, el: &MarkupElement, dom: NodeId) {
		for (name, value) in &el.attributes {
			if self.doc.attribute(dom, name) != Some(value.as_str()) {
				self.doc.set_attribute(dom, name, value);
			}
		}
		let stale: Vec<String> = self
			.doc
			.attributes(dom)
			.iter()
			.filter(|(name, _)| !is_marker_attribute(name) && el.attribute(name).is_none())
			.map(|(name, _)| name.clone())
			.collect();
		for name in stale {
			self.doc.remove_attribute(dom, &name);
		}
	}

	fn adopt_inline(&mut self, el: &MarkupElement, dom: NodeId, text: &str, text_node: Option<NodeId>) {
		// Script and style text is parsed raw, so it still holds the server's escapes.
		let expected = if el.namespace == Namespace::Html && is_raw_text_element(&el.tag) {
			escape_text(text)
		} else {
			Cow::Borrowed(text)
		};
		let live = text_node
			.and_then(|t| self.doc.text(t))
			.unwrap_or_default()
			.to_string();
		if live == expected {
			return;
		}
		self.mismatch(Mismatch {
			identity: el.identity.clone(),
			expected: format!("text {:?}", text),
			found: format!("text {:?}", live),
		});
		match text_node {
			Some(node) => self.doc.set_text(node, &expected),
			None => {
				let node = self.doc.create_text(&expected);
				self.doc.append_child(dom, node);
			}
		}
	}

	fn adopt_text(
		&mut self,
		parent: NodeId,
		text: &MarkupText,
		open: Option<NodeId>,
		dom_text: Option<NodeId>,
		close: Option<NodeId>,
	) {
		let live = dom_text
			.and_then(|t| self.doc.text(t))
			.unwrap_or_default()
			.to_string();
		let mut node = dom_text;
		if live != text.text {
			self.mismatch(Mismatch {
				identity: text.identity.clone(),
				expected: format!("text {:?}", text.text),
				found: format!("text {:?}", live),
			});
			match dom_text {
				Some(t) => self.doc.set_text(t, &text.text),
				None if text.text.is_empty() => {}
				None => {
					let created = self.doc.create_text(&text.text);
					let reference = close.or_else(|| open.and_then(|o| self.doc.next_sibling(o)));
					self.doc.insert_before(parent, created, reference);
					node = Some(created);
				}
			}
		}
		self.report.record(&text.identity, Outcome::Adopted, node.or(open));
	}

	fn replace(&mut self, parent: NodeId, slot: &Slot, expected: &MarkupNode) {
		tracing::debug!(identity = %expected.identity(), "replacing server subtree");
		let mut created = Vec::new();
		let nodes = create_node(self.doc, expected, &mut created);
		let old = slot.nodes();
		let reference = old.first().copied();
		for node in nodes {
			self.doc.insert_before(parent, node, reference);
		}
		for node in old {
			self.doc.remove_child(parent, node);
		}
		self.record_created(created, Outcome::Replaced);
	}

	fn record_created(&mut self, created: Vec<(NodeIdentity, NodeId)>, first: Outcome) {
		for (index, (identity, node)) in created.into_iter().enumerate() {
			let outcome = if index == 0 { first } else { Outcome::Created };
			self.report.record(&identity, outcome, Some(node));
		}
	}

	fn mismatch(&mut self, mismatch: Mismatch) {
		tracing::debug!(
			identity = %mismatch.identity,
			expected = %mismatch.expected,
			found = %mismatch.found,
			"hydration mismatch"
		);
		self.report.mismatches += 1;
		if self.first.is_none() {
			self.first = Some(mismatch);
		}
	}
}
