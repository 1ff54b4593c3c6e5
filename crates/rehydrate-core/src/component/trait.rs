//! Component trait definition.

use super::props::{Children, Props, State};
use super::updater::Updater;
use crate::context::ContextMap;
use crate::node::Node;

/// Everything a component can read while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
	props: &'a Props,
	state: &'a State,
	context: &'a ContextMap,
	children: &'a Children,
}

impl<'a> RenderContext<'a> {
	/// Bundles the inputs of one render call.
	pub fn new(
		props: &'a Props,
		state: &'a State,
		context: &'a ContextMap,
		children: &'a Children,
	) -> Self {
		Self {
			props,
			state,
			context,
			children,
		}
	}

	/// Props passed by the parent.
	pub fn props(&self) -> &'a Props {
		self.props
	}

	/// Current state.
	pub fn state(&self) -> &'a State {
		self.state
	}

	/// Context restricted to the keys the component declared.
	pub fn context(&self) -> &'a ContextMap {
		self.context
	}

	/// Children passed by the parent.
	pub fn children(&self) -> &'a Children {
		self.children
	}
}

/// Trait for reusable UI components.
///
/// Only [`render`](Component::render) is required. During a server render
/// and a client mount the lifecycle runs in this order:
///
/// 1. construction, then [`get_initial_state`](Component::get_initial_state)
/// 2. [`component_will_mount`](Component::component_will_mount); `set_state`
///    calls made here are merged before rendering
/// 3. [`render`](Component::render) and
///    [`get_child_context`](Component::get_child_context)
/// 4. on the client only, once the document is in its final shape:
///    [`component_did_mount`](Component::component_did_mount), children
///    before parents
///
/// The update and unmount hooks are part of the contract for runtimes that
/// re-render; the server renderer and the hydrator never call them.
///
/// # Example
///
/// ```ignore
/// use rehydrate_core::{Component, Node, RenderContext, IntoNode};
/// use rehydrate_core::builder::html::div;
///
/// #[derive(Default)]
/// struct Counter;
///
/// impl Component for Counter {
///     fn get_initial_state(&self, props: &Props) -> State {
///         State::new().with("count", props.get_i64("start").unwrap_or(0))
///     }
///
///     fn render(&self, cx: &RenderContext<'_>) -> Node {
///         div().child(cx.state().get_i64("count").unwrap_or(0)).into_node()
///     }
/// }
/// ```
pub trait Component {
	/// Renders the component.
	///
	/// Must return an element, a component reference, `Null` or a boolean.
	fn render(&self, cx: &RenderContext<'_>) -> Node;

	/// Name used in diagnostics and errors.
	fn name(&self) -> &str {
		let full = std::any::type_name::<Self>();
		full.rsplit("::").next().unwrap_or(full)
	}

	/// Context keys this component reads.
	fn context_types(&self) -> &[&'static str] {
		&[]
	}

	/// Context keys this component may publish, or `None` if it publishes none.
	fn child_context_types(&self) -> Option<&[&'static str]> {
		None
	}

	/// Context published to descendants.
	fn get_child_context(&self, _cx: &RenderContext<'_>) -> Option<ContextMap> {
		None
	}

	/// Initial state, computed from props.
	fn get_initial_state(&self, _props: &Props) -> State {
		State::new()
	}

	/// Called once before the first render.
	fn component_will_mount(&mut self, _updater: &Updater) {}

	/// Called once on the client after the document reached its final shape.
	fn component_did_mount(&mut self, _updater: &Updater) {}

	/// Called before new props are applied to a mounted component.
	fn component_will_receive_props(&mut self, _next_props: &Props) {}

	/// Whether a mounted component should re-render.
	fn should_component_update(&self, _next_props: &Props, _next_state: &State) -> bool {
		true
	}

	/// Called before a re-render.
	fn component_will_update(&mut self, _next_props: &Props, _next_state: &State) {}

	/// Called after a re-render.
	fn component_did_update(&mut self, _prev_props: &Props, _prev_state: &State) {}

	/// Called before the component is removed.
	fn component_will_unmount(&mut self) {}
}
