//! Event listeners.
//!
//! Listeners are stored per node and per event name. [`Document::dispatch`]
//! snapshots the target's live form state into the [`Event`] before calling
//! them, so a listener never needs a borrow of the document.
//!
//! [`Document::dispatch`]: crate::Document::dispatch

use crate::node::NodeId;
use std::fmt;
use std::rc::Rc;

/// A dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
	name: String,
	target: NodeId,
	value: String,
	checked: bool,
}

impl Event {
	pub(crate) fn new(name: impl Into<String>, target: NodeId, value: String, checked: bool) -> Self {
		Self {
			name: name.into(),
			target,
			value,
			checked,
		}
	}

	/// Event name, e.g. `"change"`.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Node the event was dispatched on.
	pub fn target(&self) -> NodeId {
		self.target
	}

	/// Live value of the target at dispatch time.
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Live checkedness of the target at dispatch time.
	pub fn checked(&self) -> bool {
		self.checked
	}
}

/// A registered listener.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
	/// Wraps a closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		Self(Rc::new(f))
	}

	/// Invokes the listener.
	pub fn call(&self, event: &Event) {
		(self.0)(event)
	}
}

impl fmt::Debug for Listener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listener").finish_non_exhaustive()
	}
}
