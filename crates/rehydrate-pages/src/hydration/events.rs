//! Event and ref binding for hydration.
//!
//! Server markup cannot carry handlers, so they are attached once the
//! document has reached its final shape, together with node refs.

use super::report::HydrationReport;
use crate::tree::{MarkupNode, NodeIdentity};
use rehydrate_core::Callback;
use rehydrate_dom::{Document, Event, Listener};
use std::collections::HashMap;

/// A binding between an event and the node it was attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
	/// The event type.
	pub event_type: String,
	/// The identity of the element.
	pub element_id: NodeIdentity,
}

impl EventBinding {
	/// Creates a new event binding.
	pub fn new(event_type: impl Into<String>, element_id: NodeIdentity) -> Self {
		Self {
			event_type: event_type.into(),
			element_id,
		}
	}
}

/// Record of the listeners attached during one hydration pass.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
	bindings: HashMap<NodeIdentity, Vec<EventBinding>>,
}

impl EventRegistry {
	/// Creates a new event registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a binding.
	pub fn register(&mut self, binding: EventBinding) {
		self.bindings
			.entry(binding.element_id.clone())
			.or_default()
			.push(binding);
	}

	/// Event types bound on the element with `identity`.
	pub fn events_for(&self, identity: &str) -> Vec<&str> {
		NodeIdentity::parse(identity)
			.and_then(|id| self.bindings.get(&id))
			.map(|bindings| bindings.iter().map(|b| b.event_type.as_str()).collect())
			.unwrap_or_default()
	}

	/// Returns the number of elements with bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Returns true if nothing was bound.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

fn listener(handler: &Callback) -> Listener {
	let handler = handler.clone();
	Listener::new(move |event: &Event| handler.call(event.clone()))
}

/// Attaches the handlers and refs of `root` to the nodes recorded in `report`.
pub(crate) fn attach_bindings(doc: &mut Document, root: &MarkupNode, report: &mut HydrationReport) {
	let mut registry = EventRegistry::new();
	root.walk(&mut |node| {
		let MarkupNode::Element(el) = node else {
			return;
		};
		let Some(dom) = report.node_for(&el.identity) else {
			return;
		};
		if let Some(node_ref) = &el.node_ref {
			node_ref.set(Some(dom));
		}
		for (event, handler) in &el.handlers {
			doc.add_listener(dom, event, listener(handler));
			registry.register(EventBinding::new(event.as_ref(), el.identity.clone()));
		}
	});
	tracing::debug!(elements = registry.len(), "attached event listeners");
	report.events = registry;
}
