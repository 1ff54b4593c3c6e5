//! Positional node identities.
//!
//! Every element, text run and empty slot of a rendered tree gets an
//! identity derived from its position: the root is `1` and the `k`-th
//! rendered child (0-based, after fragments are flattened and holes are
//! skipped) of node `p` is `p.k`. Components are transparent: the node a
//! component renders takes the component's own position.
//!
//! Because identities are paths, two renders of the same tree assign the
//! same identities and no identity repeats within a render.

use std::fmt;

/// Identity of one rendered node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdentity(String);

impl NodeIdentity {
	/// Identity of the root node.
	pub fn root() -> Self {
		Self("1".to_string())
	}

	/// Identity of the `index`-th child of `self`.
	pub fn child(&self, index: usize) -> Self {
		Self(format!("{}.{}", self.0, index))
	}

	/// Parses an identity written in markup.
	///
	/// Returns `None` unless `s` is `1` followed by zero or more `.N` segments.
	pub fn parse(s: &str) -> Option<Self> {
		let mut segments = s.split('.');
		if segments.next() != Some("1") {
			return None;
		}
		let valid = segments.all(|seg| {
			!seg.is_empty()
				&& seg.bytes().all(|b| b.is_ascii_digit())
				&& (seg == "0" || !seg.starts_with('0'))
		});
		valid.then(|| Self(s.to_string()))
	}

	/// The identity as written in markup.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Number of ancestors.
	pub fn depth(&self) -> usize {
		self.0.matches('.').count()
	}

	/// Identity of the parent, or `None` for the root.
	pub fn parent(&self) -> Option<Self> {
		self.0.rfind('.').map(|i| Self(self.0[..i].to_string()))
	}

	/// Whether `self` is `other` or one of its descendants.
	pub fn is_within(&self, other: &NodeIdentity) -> bool {
		self.0 == other.0
			|| (self.0.starts_with(&other.0) && self.0.as_bytes().get(other.0.len()) == Some(&b'.'))
	}
}

impl fmt::Display for NodeIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for NodeIdentity {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
