//! Props, state and children.

use crate::node::Node;
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// Component properties.
///
/// Props are a loosely typed map of JSON values, passed by the parent and
/// read through [`RenderContext::props`](super::RenderContext::props).
///
/// # Example
///
/// ```ignore
/// let props = Props::new().with("label", "Save").with("disabled", true);
/// assert_eq!(props.get_str("label"), Some("Save"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(Map<String, Value>);

impl Props {
	/// Creates empty props.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a property, builder style.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Inserts a property.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(key.into(), value.into());
	}

	/// Looks up a property.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Looks up a string property.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	/// Looks up an integer property.
	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key).and_then(Value::as_i64)
	}

	/// Whether a property is truthy.
	pub fn is_truthy(&self, key: &str) -> bool {
		self.get(key).is_some_and(crate::value::is_truthy)
	}

	/// Whether a property is present.
	pub fn contains(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Iterates over properties.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no properties.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Map<String, Value>> for Props {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

/// Component state.
///
/// State is replaced by shallow merges: [`State::merge`] overwrites the
/// top-level keys present in the partial state and keeps the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State(Map<String, Value>);

impl State {
	/// Creates empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a key, builder style.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	/// Looks up a key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Looks up a string value.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	/// Looks up an integer value.
	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key).and_then(Value::as_i64)
	}

	/// Shallow-merges `partial` into `self`.
	pub fn merge(&mut self, partial: State) {
		self.0.extend(partial.0);
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no keys.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Children passed to a component.
///
/// The list is shared and cannot be modified once built; a component that
/// wants a different list builds a new one.
#[derive(Clone, Default)]
pub struct Children(Rc<[Node]>);

impl Children {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Children as a slice.
	pub fn as_slice(&self) -> &[Node] {
		&self.0
	}

	/// Iterates over the children.
	pub fn iter(&self) -> std::slice::Iter<'_, Node> {
		self.0.iter()
	}

	/// Number of children.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether there are no children.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<Node>> for Children {
	fn from(nodes: Vec<Node>) -> Self {
		Self(nodes.into())
	}
}

impl<'a> IntoIterator for &'a Children {
	type Item = &'a Node;
	type IntoIter = std::slice::Iter<'a, Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Debug for Children {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.0.iter()).finish()
	}
}
