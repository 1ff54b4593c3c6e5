//! Non-fatal diagnostics.
//!
//! Diagnostics describe recoverable problems: an unknown property that was
//! dropped, a controlled field without a change handler, server markup that
//! did not match. Each one is logged through `tracing` when emitted and
//! collected in a shared [`Diagnostics`] sink that callers can inspect.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A recoverable problem found while rendering or hydrating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// A property unknown for a standard element was dropped.
	UnknownProperty {
		/// Tag name.
		tag: String,
		/// Property name as declared.
		name: String,
	},
	/// A form field has a current value but no change handler and is not read-only.
	ControlledWithoutHandler {
		/// Tag name.
		tag: String,
		/// `value` or `checked`.
		prop: String,
	},
	/// A form field declares both a current value and a default value.
	ValueAndDefaultValue {
		/// Tag name.
		tag: String,
		/// `value` or `checked`.
		prop: String,
		/// `defaultValue` or `defaultChecked`.
		default_prop: String,
	},
	/// A `<textarea>` was given children instead of a value.
	TextareaChildren,
	/// `set_state` was called on a component after its server render finished.
	SetStateAfterRender {
		/// Component name.
		component: String,
	},
	/// The server markup failed its integrity checksum and was discarded.
	ChecksumMismatch {
		/// Checksum carried by the markup.
		expected: u32,
		/// Checksum recomputed from the live document.
		computed: u32,
	},
	/// Hydration found server markup that did not match the client tree.
	///
	/// Emitted once per hydration pass, describing the first difference.
	HydrationMismatch {
		/// Identity of the first mismatching node.
		identity: String,
		/// What the client tree expected there.
		expected: String,
		/// What the document contained.
		found: String,
		/// Number of mismatches found in the pass.
		total: usize,
	},
	/// The container held content that was not produced by the server renderer.
	UnhydratableContainer,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::UnknownProperty { tag, name } => {
				write!(f, "unknown property `{}` on <{}> was dropped", name, tag)
			}
			Diagnostic::ControlledWithoutHandler { tag, prop } => write!(
				f,
				"<{}> has `{}` without a change handler; the field will be read-only",
				tag, prop
			),
			Diagnostic::ValueAndDefaultValue {
				tag,
				prop,
				default_prop,
			} => write!(
				f,
				"<{}> declares both `{}` and `{}`; `{}` wins",
				tag, prop, default_prop, prop
			),
			Diagnostic::TextareaChildren => {
				write!(f, "<textarea> children are used as its default value; pass `defaultValue` instead")
			}
			Diagnostic::SetStateAfterRender { component } => write!(
				f,
				"set_state on `{}` after its server render was ignored",
				component
			),
			Diagnostic::ChecksumMismatch { expected, computed } => write!(
				f,
				"server markup checksum {} does not match {}; markup was discarded",
				expected, computed
			),
			Diagnostic::HydrationMismatch {
				identity,
				expected,
				found,
				total,
			} => write!(
				f,
				"hydration mismatch at {}: expected {}, found {} ({} total)",
				identity, expected, found, total
			),
			Diagnostic::UnhydratableContainer => {
				write!(f, "container content was not rendered by the server; it was replaced")
			}
		}
	}
}

/// Shared sink for [`Diagnostic`]s.
///
/// Clones share the same buffer, so a sink can be handed to a renderer and
/// inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
	entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl Diagnostics {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records and logs a diagnostic.
	pub fn emit(&self, diagnostic: Diagnostic) {
		tracing::warn!(%diagnostic, "render diagnostic");
		self.entries.borrow_mut().push(diagnostic);
	}

	/// Snapshot of recorded diagnostics in emission order.
	pub fn entries(&self) -> Vec<Diagnostic> {
		self.entries.borrow().clone()
	}

	/// Number of recorded diagnostics.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Whether nothing has been recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Number of recorded diagnostics matching `pred`.
	pub fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
		self.entries.borrow().iter().filter(|d| pred(d)).count()
	}

	/// Removes and returns everything recorded so far.
	pub fn drain(&self) -> Vec<Diagnostic> {
		std::mem::take(&mut *self.entries.borrow_mut())
	}
}
