//! The document arena.

use crate::event::{Event, Listener};
use crate::node::{ElementData, Namespace, NodeData, NodeId};
use crate::parser;
use crate::serialize;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct NodeEntry {
	data: NodeData,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

/// A mutable document tree.
///
/// Every document owns a `<body>` element that acts as the top of the tree;
/// containers for rendered content are usually created beneath it.
///
/// Tree operations take node handles and are no-ops (logged at debug level)
/// when a handle does not name a node of the required kind, mirroring how
/// the browser document tolerates most misuse.
#[derive(Debug)]
pub struct Document {
	nodes: Vec<NodeEntry>,
	listeners: HashMap<NodeId, Vec<(String, Listener)>>,
	sources: HashMap<NodeId, (Rc<str>, Range<usize>)>,
	body: NodeId,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty document with a `<body>`.
	pub fn new() -> Self {
		let mut doc = Self {
			nodes: Vec::new(),
			listeners: HashMap::new(),
			sources: HashMap::new(),
			body: NodeId::from_raw(0),
		};
		doc.body = doc.create_element("body");
		doc
	}

	/// The `<body>` element.
	pub fn body(&self) -> NodeId {
		self.body
	}

	/// Number of nodes ever allocated, attached or not.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the arena is empty. Never true for a constructed document.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	fn push(&mut self, data: NodeData) -> NodeId {
		let id = NodeId::from_raw(self.nodes.len());
		self.nodes.push(NodeEntry {
			data,
			parent: None,
			children: Vec::new(),
		});
		id
	}

	/// Creates a detached HTML element.
	pub fn create_element(&mut self, tag: &str) -> NodeId {
		self.create_element_ns(tag, Namespace::Html)
	}

	/// Creates a detached element in `namespace`.
	pub fn create_element_ns(&mut self, tag: &str, namespace: Namespace) -> NodeId {
		self.push(NodeData::Element(ElementData::new(tag, namespace)))
	}

	/// Creates a detached text node.
	pub fn create_text(&mut self, text: &str) -> NodeId {
		self.push(NodeData::Text(text.to_string()))
	}

	/// Creates a detached comment node.
	pub fn create_comment(&mut self, data: &str) -> NodeId {
		self.push(NodeData::Comment(data.to_string()))
	}

	fn entry(&self, node: NodeId) -> &NodeEntry {
		&self.nodes[node.as_raw()]
	}

	fn entry_mut(&mut self, node: NodeId) -> &mut NodeEntry {
		&mut self.nodes[node.as_raw()]
	}

	/// Whether `node` names a node of this document.
	pub fn contains(&self, node: NodeId) -> bool {
		node.as_raw() < self.nodes.len()
	}

	/// Node payload.
	///
	/// # Panics
	///
	/// Panics if `node` was not allocated by this document.
	pub fn data(&self, node: NodeId) -> &NodeData {
		&self.entry(node).data
	}

	/// Element payload, if `node` is an element.
	pub fn element(&self, node: NodeId) -> Option<&ElementData> {
		self.data(node).as_element()
	}

	fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
		match &mut self.entry_mut(node).data {
			NodeData::Element(el) => Some(el),
			_ => None,
		}
	}

	/// Whether `node` is an element.
	pub fn is_element(&self, node: NodeId) -> bool {
		self.element(node).is_some()
	}

	/// Tag name of an element as written.
	pub fn tag_name(&self, node: NodeId) -> Option<&str> {
		self.element(node).map(|el| el.tag())
	}

	/// Namespace of an element.
	pub fn namespace(&self, node: NodeId) -> Option<Namespace> {
		self.element(node).map(|el| el.namespace())
	}

	/// Data of a text or comment node.
	pub fn text(&self, node: NodeId) -> Option<&str> {
		match self.data(node) {
			NodeData::Text(text) | NodeData::Comment(text) => Some(text),
			NodeData::Element(_) => None,
		}
	}

	/// Replaces the data of a text or comment node.
	pub fn set_text(&mut self, node: NodeId, value: &str) {
		match &mut self.entry_mut(node).data {
			NodeData::Text(text) | NodeData::Comment(text) => {
				text.clear();
				text.push_str(value);
			}
			NodeData::Element(_) => {
				tracing::debug!(%node, "set_text on an element ignored");
			}
		}
	}

	// --- tree structure ---------------------------------------------------

	/// Parent of `node`.
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.entry(node).parent
	}

	/// Children of `node` in order.
	pub fn children(&self, node: NodeId) -> &[NodeId] {
		&self.entry(node).children
	}

	/// First child of `node`.
	pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
		self.children(node).first().copied()
	}

	/// Sibling following `node`.
	pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
		let parent = self.parent(node)?;
		let siblings = self.children(parent);
		let index = siblings.iter().position(|c| *c == node)?;
		siblings.get(index + 1).copied()
	}

	/// Detaches `node` from its parent, if attached.
	pub fn detach(&mut self, node: NodeId) {
		if let Some(parent) = self.entry(node).parent {
			self.entry_mut(parent).children.retain(|c| *c != node);
			self.entry_mut(node).parent = None;
		}
	}

	fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);
		while let Some(n) = current {
			if n == candidate {
				return true;
			}
			current = self.parent(n);
		}
		false
	}

	/// Appends `child` as the last child of `parent`, moving it if attached.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		self.insert_before(parent, child, None);
	}

	/// Inserts `child` into `parent` before `reference`, or at the end when
	/// `reference` is `None` or not a child of `parent`.
	pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
		if self.is_ancestor_or_self(child, parent) {
			tracing::debug!(%parent, %child, "refusing to insert a node into its own subtree");
			return;
		}
		if !self.is_element(parent) {
			tracing::debug!(%parent, "insert into a non-element ignored");
			return;
		}
		self.detach(child);
		let siblings = &mut self.entry_mut(parent).children;
		let index = reference
			.and_then(|r| siblings.iter().position(|c| *c == r))
			.unwrap_or(siblings.len());
		siblings.insert(index, child);
		self.entry_mut(child).parent = Some(parent);
	}

	/// Removes `child` from `parent`. Does nothing if it is not a child.
	pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
		if self.parent(child) == Some(parent) {
			self.detach(child);
		}
	}

	/// Puts `new_child` where `old_child` is and detaches `old_child`.
	pub fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) {
		if self.parent(old_child) != Some(parent) {
			return;
		}
		self.insert_before(parent, new_child, Some(old_child));
		self.detach(old_child);
	}

	/// Detaches every child of `node`.
	pub fn clear_children(&mut self, node: NodeId) {
		let children = std::mem::take(&mut self.entry_mut(node).children);
		for child in children {
			self.entry_mut(child).parent = None;
		}
	}

	/// Descendants of `node` in document order, excluding `node`.
	pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
		while let Some(n) = stack.pop() {
			out.push(n);
			stack.extend(self.children(n).iter().rev().copied());
		}
		out
	}

	/// Finds the first element under `<body>` whose `id` attribute equals `id`.
	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.descendants(self.body)
			.into_iter()
			.find(|n| self.attribute(*n, "id") == Some(id))
	}

	// --- attributes -------------------------------------------------------

	/// Attribute value of an element.
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		self.element(node)?.attribute(name)
	}

	/// Whether an element carries `name`.
	pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
		self.attribute(node, name).is_some()
	}

	/// Attributes of an element in document order; empty for other nodes.
	pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
		self.element(node).map(|el| el.attributes()).unwrap_or(&[])
	}

	/// Sets an attribute, keeping its position if it already exists.
	pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
		let Some(el) = self.element_mut(node) else {
			return;
		};
		match el.attribute_index(name) {
			Some(i) => {
				el.attributes[i].1.clear();
				el.attributes[i].1.push_str(value);
			}
			None => el.attributes.push((name.to_string(), value.to_string())),
		}
	}

	/// Removes an attribute.
	pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
		if let Some(el) = self.element_mut(node)
			&& let Some(i) = el.attribute_index(name)
		{
			el.attributes.remove(i);
		}
	}

	// --- markup -----------------------------------------------------------

	/// Replaces the children of `node` with the parse of `markup`.
	pub fn set_inner_html(&mut self, node: NodeId, markup: &str) {
		if !self.is_element(node) {
			return;
		}
		self.clear_children(node);
		parser::parse_fragment(self, node, markup);
	}

	/// The exact markup `node` was parsed from, if it came from
	/// [`set_inner_html`](Self::set_inner_html).
	///
	/// This is the received text, unaffected by later edits to the tree.
	pub fn source_markup(&self, node: NodeId) -> Option<&str> {
		self.sources
			.get(&node)
			.and_then(|(source, range)| source.get(range.clone()))
	}

	pub(crate) fn record_source(&mut self, node: NodeId, source: Rc<str>, range: Range<usize>) {
		self.sources.insert(node, (source, range));
	}

	/// Canonical serialization of the children of `node`.
	pub fn inner_html(&self, node: NodeId) -> String {
		let mut out = String::new();
		serialize::write_children(self, node, &mut out);
		out
	}

	/// Canonical serialization of `node` itself.
	pub fn outer_html(&self, node: NodeId) -> String {
		let mut out = String::new();
		serialize::write_node(self, node, &mut out);
		out
	}

	/// Concatenated text of all descendant text nodes.
	pub fn text_content(&self, node: NodeId) -> String {
		if let NodeData::Text(text) | NodeData::Comment(text) = self.data(node) {
			return text.clone();
		}
		self.descendants(node)
			.into_iter()
			.filter_map(|n| self.data(n).as_text())
			.collect()
	}

	// --- form controls ----------------------------------------------------

	fn is_checkable(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|el| {
			el.is("input")
				&& el
					.attribute("type")
					.is_some_and(|t| t.eq_ignore_ascii_case("checkbox") || t.eq_ignore_ascii_case("radio"))
		})
	}

	/// Whether the live state of a control has diverged from its defaults.
	pub fn is_dirty(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|el| el.form.is_dirty())
	}

	/// Live value of a form control.
	///
	/// - `<input>`: the dirty value, else the `value` attribute (checkboxes
	///   and radios default to `"on"`)
	/// - `<textarea>`: the dirty value, else the text content
	/// - `<select>`: the value of the first selected option
	/// - `<option>`: the `value` attribute, else the text content
	pub fn value(&self, node: NodeId) -> String {
		let Some(el) = self.element(node) else {
			return String::new();
		};
		if el.is("input") {
			if let Some(v) = &el.form.value {
				return v.clone();
			}
			return match el.attribute("value") {
				Some(v) => v.to_string(),
				None if self.is_checkable(node) => "on".to_string(),
				None => String::new(),
			};
		}
		if el.is("textarea") {
			return match &el.form.value {
				Some(v) => v.clone(),
				None => self.text_content(node),
			};
		}
		if el.is("select") {
			return self
				.selected_options(node)
				.first()
				.map(|o| self.value(*o))
				.unwrap_or_default();
		}
		if el.is("option") {
			return match el.attribute("value") {
				Some(v) => v.to_string(),
				None => self.text_content(node),
			};
		}
		el.attribute("value").unwrap_or_default().to_string()
	}

	/// Sets the live value of a form control, marking it dirty.
	///
	/// For `<select>`, selects the options whose value equals `value` and
	/// deselects the rest.
	pub fn set_value(&mut self, node: NodeId, value: &str) {
		let is_select = self.element(node).is_some_and(|el| el.is("select"));
		if is_select {
			for option in self.options(node) {
				let selected = self.value(option) == value;
				if let Some(el) = self.element_mut(option) {
					el.form.selected = Some(selected);
				}
			}
			return;
		}
		if let Some(el) = self.element_mut(node) {
			el.form.value = Some(value.to_string());
		}
	}

	/// Live checkedness of a checkbox or radio.
	pub fn checked(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|el| {
			el.form
				.checked
				.unwrap_or_else(|| el.attribute("checked").is_some())
		})
	}

	/// Sets live checkedness, marking the control dirty.
	pub fn set_checked(&mut self, node: NodeId, checked: bool) {
		if let Some(el) = self.element_mut(node) {
			el.form.checked = Some(checked);
		}
	}

	/// `<option>` descendants of a `<select>` in document order.
	pub fn options(&self, select: NodeId) -> Vec<NodeId> {
		self.descendants(select)
			.into_iter()
			.filter(|n| self.element(*n).is_some_and(|el| el.is("option")))
			.collect()
	}

	/// Whether an `<option>` is selected, live state first.
	pub fn option_selected(&self, option: NodeId) -> bool {
		self.element(option).is_some_and(|el| {
			el.form
				.selected
				.unwrap_or_else(|| el.attribute("selected").is_some())
		})
	}

	/// Selected options of a `<select>`.
	///
	/// A single-valued select with nothing selected reports its first option.
	pub fn selected_options(&self, select: NodeId) -> Vec<NodeId> {
		let options = self.options(select);
		let selected: Vec<NodeId> = options
			.iter()
			.copied()
			.filter(|o| self.option_selected(*o))
			.collect();
		let multiple = self.has_attribute(select, "multiple");
		if multiple {
			return selected;
		}
		match selected.last() {
			Some(last) => vec![*last],
			None => options.first().copied().into_iter().collect(),
		}
	}

	// --- events -----------------------------------------------------------

	/// Registers `listener` for events named `event` on `node`.
	pub fn add_listener(&mut self, node: NodeId, event: &str, listener: Listener) {
		self.listeners
			.entry(node)
			.or_default()
			.push((event.to_string(), listener));
	}

	/// Number of listeners registered on `node`.
	pub fn listener_count(&self, node: NodeId) -> usize {
		self.listeners.get(&node).map_or(0, Vec::len)
	}

	/// Whether `node` has a listener for `event`.
	pub fn has_listener(&self, node: NodeId, event: &str) -> bool {
		self.listeners
			.get(&node)
			.is_some_and(|ls| ls.iter().any(|(name, _)| name == event))
	}

	/// Dispatches `event` on `node`, calling its listeners in registration
	/// order. Returns the number of listeners invoked.
	pub fn dispatch(&self, node: NodeId, event: &str) -> usize {
		let Some(listeners) = self.listeners.get(&node) else {
			return 0;
		};
		let ev = Event::new(event, node, self.value(node), self.checked(node));
		let mut called = 0;
		for (name, listener) in listeners {
			if name == event {
				listener.call(&ev);
				called += 1;
			}
		}
		called
	}
}
