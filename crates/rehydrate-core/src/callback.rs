//! Callback and ref types.
//!
//! ## Example
//!
//! ```ignore
//! use rehydrate_core::{Callback, NodeRef};
//! use rehydrate_core::builder::html::input;
//!
//! let input_ref = NodeRef::new();
//! let on_change = Callback::new(|event: Event| {
//!     tracing::info!(value = event.value(), "changed");
//! });
//!
//! let field = input()
//!     .attr("value", "hello")
//!     .on("change", on_change)
//!     .node_ref(input_ref.clone());
//! ```

use rehydrate_dom::{Event, NodeId};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A cloneable callback wrapper for event handlers.
///
/// `Callback` wraps a function in an `Rc`; clones share the function.
///
/// ## Type Parameters
///
/// - `Args`: The argument type the callback receives (defaults to [`Event`])
/// - `Ret`: The return type of the callback (defaults to `()`)
pub struct Callback<Args = Event, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new callback from a closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the callback.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Callback").finish_non_exhaustive()
	}
}

/// A handle that receives the live node an element was bound to.
///
/// Refs are filled in after hydration or client construction finishes, so
/// reading one from inside `render` always yields `None`.
#[derive(Clone, Default)]
pub struct NodeRef(Rc<Cell<Option<NodeId>>>);

impl NodeRef {
	/// Creates an unbound ref.
	pub fn new() -> Self {
		Self::default()
	}

	/// The bound node, if any.
	pub fn get(&self) -> Option<NodeId> {
		self.0.get()
	}

	/// Binds the ref. Called by the hydrator.
	pub fn set(&self, node: Option<NodeId>) {
		self.0.set(node)
	}
}

impl fmt::Debug for NodeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("NodeRef").field(&self.get()).finish()
	}
}
