//! Host element descriptions.

use crate::callback::{Callback, NodeRef};
use crate::node::{IntoNode, Node};
use serde_json::Value;
use std::borrow::Cow;

/// Description of a host element.
///
/// Properties are kept in declaration order; setting a property twice
/// replaces the earlier value in place. Property names may be given in
/// either their camel-case property form (`className`, `htmlFor`,
/// `readOnly`) or their attribute form.
///
/// ## Example
///
/// ```ignore
/// let link = Element::new("a")
///     .attr("href", "/docs")
///     .attr("className", "nav")
///     .child("Docs");
/// ```
#[derive(Debug, Clone)]
pub struct Element {
	tag: Cow<'static, str>,
	props: Vec<(Cow<'static, str>, Value)>,
	children: Vec<Node>,
	handlers: Vec<(Cow<'static, str>, Callback)>,
	node_ref: Option<NodeRef>,
	key: Option<String>,
	inner_html: Option<String>,
}

impl Element {
	/// Creates an element description.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			props: Vec::new(),
			children: Vec::new(),
			handlers: Vec::new(),
			node_ref: None,
			key: None,
			inner_html: None,
		}
	}

	/// Sets a property.
	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
		let name = name.into();
		let value = value.into();
		match self.props.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.props.push((name, value)),
		}
		self
	}

	/// Sets a property to `true`.
	pub fn flag(self, name: impl Into<Cow<'static, str>>) -> Self {
		self.attr(name, true)
	}

	/// Adds a child.
	pub fn child(mut self, child: impl IntoNode) -> Self {
		self.children.push(child.into_node());
		self
	}

	/// Adds several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoNode::into_node));
		self
	}

	/// Adds an event handler for DOM event `event` (e.g. `"change"`).
	pub fn on(mut self, event: impl Into<Cow<'static, str>>, handler: Callback) -> Self {
		self.handlers.push((event.into(), handler));
		self
	}

	/// Attaches a ref that receives the live node after hydration.
	pub fn node_ref(mut self, node_ref: NodeRef) -> Self {
		self.node_ref = Some(node_ref);
		self
	}

	/// Sets the reconciliation key. Keys are never serialized.
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Sets raw inner HTML, inserted without escaping.
	pub fn inner_html(mut self, html: impl Into<String>) -> Self {
		self.inner_html = Some(html.into());
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the properties in declaration order.
	pub fn props(&self) -> &[(Cow<'static, str>, Value)] {
		&self.props
	}

	/// Looks up a property by its exact declared name.
	pub fn prop(&self, name: &str) -> Option<&Value> {
		self.props
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v)
	}

	/// Whether a property is declared and not `null`.
	pub fn has_prop(&self, name: &str) -> bool {
		self.prop(name).is_some_and(|v| !v.is_null())
	}

	/// Returns the children.
	pub fn child_nodes(&self) -> &[Node] {
		&self.children
	}

	/// Returns the event handlers.
	pub fn handlers(&self) -> &[(Cow<'static, str>, Callback)] {
		&self.handlers
	}

	/// Whether a handler is registered for `event`.
	pub fn has_handler(&self, event: &str) -> bool {
		self.handlers.iter().any(|(name, _)| name == event)
	}

	/// Returns the attached ref.
	pub fn get_node_ref(&self) -> Option<&NodeRef> {
		self.node_ref.as_ref()
	}

	/// Returns the key.
	pub fn get_key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// Returns raw inner HTML set with [`Element::inner_html`].
	pub fn get_inner_html(&self) -> Option<&str> {
		self.inner_html.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_attr_replaces_in_place() {
		let el = Element::new("a")
			.attr("href", "/a")
			.attr("title", "t")
			.attr("href", "/b");

		let names: Vec<&str> = el.props().iter().map(|(n, _)| n.as_ref()).collect();
		assert_eq!(names, vec!["href", "title"]);
		assert_eq!(el.prop("href"), Some(&json!("/b")));
	}

	#[test]
	fn test_children_and_handlers() {
		let el = Element::new("ul")
			.child(Element::new("li"))
			.children(vec!["a", "b"])
			.on("click", Callback::new(|_| {}));

		assert_eq!(el.child_nodes().len(), 3);
		assert!(el.has_handler("click"));
		assert!(!el.has_handler("change"));
	}

	#[test]
	fn test_has_prop_ignores_null() {
		let el = Element::new("input")
			.attr("value", Value::Null)
			.flag("disabled");
		assert!(!el.has_prop("value"));
		assert!(el.has_prop("disabled"));
		assert_eq!(el.prop("disabled"), Some(&json!(true)));
	}
}
