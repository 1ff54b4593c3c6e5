//! Component implementation styles and component references.

use super::props::{Children, Props};
use super::r#trait::{Component, RenderContext};
use crate::node::{IntoNode, Node};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

type Construct = dyn Fn(&Props) -> Box<dyn Component>;
type StatelessRender = dyn Fn(&RenderContext<'_>) -> Node;

/// The closed set of ways a component can be implemented.
///
/// Each variant is resolved once per reference into a boxed [`Component`]
/// instance by [`ComponentType::instantiate`].
#[derive(Clone)]
pub enum ComponentType {
	/// A type implementing [`Component`], constructed with `Default`.
	Class {
		/// Component name.
		name: Cow<'static, str>,
		/// Constructor.
		construct: Rc<Construct>,
	},
	/// A function of props returning an instance.
	Factory {
		/// Component name.
		name: Cow<'static, str>,
		/// Factory function.
		construct: Rc<Construct>,
	},
	/// A pure function of props, context and children.
	Stateless(Rc<StatelessComponent>),
}

impl ComponentType {
	/// A class-style component of type `C`.
	pub fn class<C>() -> Self
	where
		C: Component + Default + 'static,
	{
		let full = std::any::type_name::<C>();
		let name = full.rsplit("::").next().unwrap_or(full);
		ComponentType::Class {
			name: Cow::Borrowed(name),
			construct: Rc::new(|_props: &Props| Box::new(C::default()) as Box<dyn Component>),
		}
	}

	/// A factory-style component: `factory` is called with the props of each
	/// reference and returns the instance to render.
	pub fn factory<F>(name: impl Into<Cow<'static, str>>, factory: F) -> Self
	where
		F: Fn(&Props) -> Box<dyn Component> + 'static,
	{
		ComponentType::Factory {
			name: name.into(),
			construct: Rc::new(factory),
		}
	}

	/// A stateless function component.
	pub fn stateless<F>(name: impl Into<Cow<'static, str>>, render: F) -> Self
	where
		F: Fn(&RenderContext<'_>) -> Node + 'static,
	{
		ComponentType::Stateless(Rc::new(StatelessComponent {
			name: name.into(),
			context_types: Vec::new(),
			render: Rc::new(render),
		}))
	}

	/// A stateless function component that reads `context_types` from context.
	pub fn stateless_with_context<F>(
		name: impl Into<Cow<'static, str>>,
		context_types: &[&'static str],
		render: F,
	) -> Self
	where
		F: Fn(&RenderContext<'_>) -> Node + 'static,
	{
		ComponentType::Stateless(Rc::new(StatelessComponent {
			name: name.into(),
			context_types: context_types.to_vec(),
			render: Rc::new(render),
		}))
	}

	/// Component name.
	pub fn name(&self) -> &str {
		match self {
			ComponentType::Class { name, .. } | ComponentType::Factory { name, .. } => name,
			ComponentType::Stateless(s) => &s.name,
		}
	}

	/// Resolves the component into an instance for one reference.
	pub fn instantiate(&self, props: &Props) -> Box<dyn Component> {
		match self {
			ComponentType::Class { construct, .. } | ComponentType::Factory { construct, .. } => {
				construct(props)
			}
			ComponentType::Stateless(s) => Box::new(StatelessInstance(Rc::clone(s))),
		}
	}

	/// Starts a reference to this component with one prop set.
	pub fn with_prop(self, key: impl Into<String>, value: impl Into<Value>) -> ComponentRef {
		ComponentRef::new(self).prop(key, value)
	}
}

impl fmt::Debug for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let style = match self {
			ComponentType::Class { .. } => "Class",
			ComponentType::Factory { .. } => "Factory",
			ComponentType::Stateless(_) => "Stateless",
		};
		f.debug_tuple(style).field(&self.name()).finish()
	}
}

/// A stateless function component.
pub struct StatelessComponent {
	name: Cow<'static, str>,
	context_types: Vec<&'static str>,
	render: Rc<StatelessRender>,
}

struct StatelessInstance(Rc<StatelessComponent>);

impl Component for StatelessInstance {
	fn render(&self, cx: &RenderContext<'_>) -> Node {
		(self.0.render)(cx)
	}

	fn name(&self) -> &str {
		&self.0.name
	}

	fn context_types(&self) -> &[&'static str] {
		&self.0.context_types
	}
}

/// A use of a component with concrete props and children.
///
/// # Example
///
/// ```ignore
/// let item = ComponentRef::new(ComponentType::class::<ListItem>())
///     .prop("label", "First")
///     .child(span().child("detail"));
/// ```
#[derive(Clone)]
pub struct ComponentRef {
	component: ComponentType,
	props: Props,
	children: Children,
	key: Option<String>,
}

impl ComponentRef {
	/// Creates a reference with no props.
	pub fn new(component: ComponentType) -> Self {
		Self {
			component,
			props: Props::new(),
			children: Children::new(),
			key: None,
		}
	}

	/// Sets a prop.
	pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.insert(key, value);
		self
	}

	/// Replaces all props.
	pub fn with_props(mut self, props: Props) -> Self {
		self.props = props;
		self
	}

	/// Appends a child.
	pub fn child(mut self, child: impl IntoNode) -> Self {
		let mut nodes = self.children.as_slice().to_vec();
		nodes.push(child.into_node());
		self.children = Children::from(nodes);
		self
	}

	/// Appends several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoNode>) -> Self {
		let mut nodes = self.children.as_slice().to_vec();
		nodes.extend(children.into_iter().map(IntoNode::into_node));
		self.children = Children::from(nodes);
		self
	}

	/// Sets the reconciliation key.
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// The referenced component.
	pub fn component_type(&self) -> &ComponentType {
		&self.component
	}

	/// Props of this reference.
	pub fn props(&self) -> &Props {
		&self.props
	}

	/// Children of this reference.
	pub fn child_nodes(&self) -> &Children {
		&self.children
	}

	/// Key of this reference.
	pub fn get_key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// Name of the referenced component.
	pub fn name(&self) -> &str {
		self.component.name()
	}
}

impl fmt::Debug for ComponentRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentRef")
			.field("component", &self.component)
			.field("props", &self.props)
			.field("children", &self.children)
			.field("key", &self.key)
			.finish()
	}
}
