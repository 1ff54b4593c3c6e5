//! Hydration markers for SSR.
//!
//! These markers are embedded in server markup so the hydrator can line
//! rendered nodes up with live ones:
//!
//! - `data-rh-root=""` on the root element
//! - `data-rh-id="<identity>"` on every element
//! - `data-rh-checksum="<adler32>"` as the last attribute of the root element
//! - `<!--rh-text:<identity>-->TEXT<!--/rh-text-->` around text runs that
//!   share a parent with other nodes
//! - `<!--rh-empty:<identity>-->` where a component rendered nothing

use crate::tree::NodeIdentity;

/// The attribute name for hydration IDs.
pub const HYDRATION_ATTR_ID: &str = "data-rh-id";

/// The attribute marking the root element of server markup.
pub const HYDRATION_ATTR_ROOT: &str = "data-rh-root";

/// The attribute carrying the markup checksum.
pub const HYDRATION_ATTR_CHECKSUM: &str = "data-rh-checksum";

/// Prefix shared by every marker attribute.
pub const HYDRATION_ATTR_PREFIX: &str = "data-rh-";

/// Comment data opening a framed text run, followed by the identity.
pub const TEXT_OPEN_PREFIX: &str = "rh-text:";

/// Comment data closing a framed text run.
pub const TEXT_CLOSE: &str = "/rh-text";

/// Comment data of an empty slot, followed by the identity.
pub const EMPTY_PREFIX: &str = "rh-empty:";

/// Whether an attribute name is one of the hydration markers.
pub fn is_marker_attribute(name: &str) -> bool {
	name.get(..HYDRATION_ATTR_PREFIX.len())
		.is_some_and(|prefix| prefix.eq_ignore_ascii_case(HYDRATION_ATTR_PREFIX))
}

/// Comment data opening a text run with `identity`.
pub fn text_open(identity: &NodeIdentity) -> String {
	format!("{}{}", TEXT_OPEN_PREFIX, identity)
}

/// Comment data of an empty slot with `identity`.
pub fn empty_marker(identity: &NodeIdentity) -> String {
	format!("{}{}", EMPTY_PREFIX, identity)
}

/// A hydration marker read back from a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentMarker {
	/// Opens a text run.
	TextOpen(Option<NodeIdentity>),
	/// Closes a text run.
	TextClose,
	/// An empty slot.
	Empty(Option<NodeIdentity>),
}

impl CommentMarker {
	/// Classifies comment data; `None` for comments that are not markers.
	pub fn parse(data: &str) -> Option<Self> {
		if data == TEXT_CLOSE {
			return Some(CommentMarker::TextClose);
		}
		if let Some(id) = data.strip_prefix(TEXT_OPEN_PREFIX) {
			return Some(CommentMarker::TextOpen(NodeIdentity::parse(id)));
		}
		data.strip_prefix(EMPTY_PREFIX)
			.map(|id| CommentMarker::Empty(NodeIdentity::parse(id)))
	}
}
