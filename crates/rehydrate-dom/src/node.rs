//! Node storage types.

use std::fmt;

/// Handle to a node stored in a [`Document`](crate::Document).
///
/// Handles stay valid for the lifetime of the document; detached nodes keep
/// their storage and can be re-inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// Creates a handle from a raw arena index.
	pub fn from_raw(index: usize) -> Self {
		Self(index)
	}

	/// Returns the raw arena index.
	pub fn as_raw(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Element namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
	/// Plain HTML elements.
	#[default]
	Html,
	/// `<svg>` and its descendants.
	Svg,
	/// `<math>` and its descendants.
	MathMl,
}

impl Namespace {
	/// Returns the namespace URI.
	pub fn uri(self) -> &'static str {
		match self {
			Namespace::Html => "http://www.w3.org/1999/xhtml",
			Namespace::Svg => "http://www.w3.org/2000/svg",
			Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
		}
	}

	/// Resolves the namespace of a `tag` element placed inside a parent in
	/// namespace `self` with tag name `parent_tag`.
	///
	/// `<svg>` and `<math>` open their namespaces anywhere; children of
	/// `<foreignObject>` fall back to HTML.
	pub fn for_child(self, parent_tag: &str, tag: &str) -> Namespace {
		if tag.eq_ignore_ascii_case("svg") {
			return Namespace::Svg;
		}
		if tag.eq_ignore_ascii_case("math") {
			return Namespace::MathMl;
		}
		match self {
			Namespace::Svg if parent_tag.eq_ignore_ascii_case("foreignObject") => Namespace::Html,
			Namespace::MathMl if parent_tag.eq_ignore_ascii_case("annotation-xml") => {
				Namespace::Html
			}
			ns => ns,
		}
	}
}

impl fmt::Display for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Namespace::Html => write!(f, "html"),
			Namespace::Svg => write!(f, "svg"),
			Namespace::MathMl => write!(f, "math"),
		}
	}
}

/// Live form-control state that is not reflected in attributes.
///
/// `None` means the control is not dirty and its live value follows the
/// default carried by markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormState {
	pub(crate) value: Option<String>,
	pub(crate) checked: Option<bool>,
	pub(crate) selected: Option<bool>,
}

impl FormState {
	pub(crate) fn is_dirty(&self) -> bool {
		self.value.is_some() || self.checked.is_some() || self.selected.is_some()
	}
}

/// Element payload.
#[derive(Debug, Clone)]
pub struct ElementData {
	pub(crate) tag: String,
	pub(crate) namespace: Namespace,
	pub(crate) attributes: Vec<(String, String)>,
	pub(crate) form: FormState,
}

impl ElementData {
	pub(crate) fn new(tag: impl Into<String>, namespace: Namespace) -> Self {
		Self {
			tag: tag.into(),
			namespace,
			attributes: Vec::new(),
			form: FormState::default(),
		}
	}

	/// Tag name as written.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Element namespace.
	pub fn namespace(&self) -> Namespace {
		self.namespace
	}

	/// Attributes in document order.
	pub fn attributes(&self) -> &[(String, String)] {
		&self.attributes
	}

	/// Whether the tag name matches `name`.
	///
	/// HTML tag names compare case-insensitively; foreign tags are exact.
	pub fn is(&self, name: &str) -> bool {
		match self.namespace {
			Namespace::Html => self.tag.eq_ignore_ascii_case(name),
			_ => self.tag == name,
		}
	}

	pub(crate) fn attribute_index(&self, name: &str) -> Option<usize> {
		match self.namespace {
			Namespace::Html => self
				.attributes
				.iter()
				.position(|(n, _)| n.eq_ignore_ascii_case(name)),
			_ => self.attributes.iter().position(|(n, _)| n == name),
		}
	}

	/// Looks up an attribute value.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attribute_index(name)
			.map(|i| self.attributes[i].1.as_str())
	}
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
	/// An element.
	Element(ElementData),
	/// A text node.
	Text(String),
	/// A comment node.
	Comment(String),
}

impl NodeData {
	/// Returns the element payload, if any.
	pub fn as_element(&self) -> Option<&ElementData> {
		match self {
			NodeData::Element(el) => Some(el),
			_ => None,
		}
	}

	/// Returns the text payload of a text node.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			NodeData::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the data of a comment node.
	pub fn as_comment(&self) -> Option<&str> {
		match self {
			NodeData::Comment(data) => Some(data),
			_ => None,
		}
	}

	/// Short human-readable description used in diagnostics.
	pub fn describe(&self) -> String {
		match self {
			NodeData::Element(el) => format!("<{}>", el.tag),
			NodeData::Text(text) => format!("text {:?}", text),
			NodeData::Comment(data) => format!("comment {:?}", data),
		}
	}
}
