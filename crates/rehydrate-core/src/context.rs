//! Legacy context.
//!
//! Context flows down the component tree. A component publishes values
//! with [`Component::get_child_context`] for keys it lists in
//! [`Component::child_context_types`]; descendants merge it over what they
//! inherited, and each component only sees the keys listed in its own
//! [`Component::context_types`].
//!
//! [`Component::get_child_context`]: crate::Component::get_child_context
//! [`Component::child_context_types`]: crate::Component::child_context_types
//! [`Component::context_types`]: crate::Component::context_types

use serde_json::Value;
use std::collections::BTreeMap;

/// Immutable key/value context map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMap(BTreeMap<String, Value>);

impl ContextMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an entry, builder style.
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

	/// Keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the map is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns `self` with `child` laid over it; `child` wins on shared keys.
	pub fn merged(&self, child: &ContextMap) -> ContextMap {
		let mut out = self.0.clone();
		out.extend(child.0.iter().map(|(k, v)| (k.clone(), v.clone())));
		ContextMap(out)
	}

	/// Restricts the map to `keys`. Missing keys are simply absent.
	pub fn masked(&self, keys: &[&str]) -> ContextMap {
		ContextMap(
			self.0
				.iter()
				.filter(|(k, _)| keys.contains(&k.as_str()))
				.map(|(k, v)| (k.clone(), v.clone()))
				.collect(),
		)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContextMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}
