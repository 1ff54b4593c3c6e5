//! Expansion of description trees into host markup trees.
//!
//! The expander runs each component up to `render`, threads context from
//! publishers to readers and assigns every host node its identity. The
//! result is the [`MarkupNode`] tree shared by the serializer and the
//! hydration matcher, plus the mounted component instances in did-mount
//! order. Element and component nesting count towards
//! [`RenderOptions::max_depth`].

use super::{MarkupContent, MarkupElement, MarkupNode, MarkupText, NodeIdentity};
use crate::config::{RenderMode, RenderOptions};
use crate::form::{ControlKind, ControlProps, flatten_text};
use crate::ssr::attributes::{element_attributes, push_attribute};
use rehydrate_core::value::{format_number, to_display_string};
use rehydrate_core::{
	Component, ComponentRef, ContextMap, Diagnostic, Diagnostics, Element, Node, RenderContext,
	RenderError, Updater,
};
use rehydrate_dom::entities::decode_entities;
use rehydrate_dom::parser::parse_fragment;
use rehydrate_dom::{Document, Namespace};
use std::collections::HashSet;
use std::fmt;

/// A component instance created during expansion.
pub struct MountedComponent {
	/// Component name.
	pub name: String,
	/// The instance.
	pub instance: Box<dyn Component>,
	/// The instance's `set_state` handle.
	pub updater: Updater,
}

impl fmt::Debug for MountedComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MountedComponent")
			.field("name", &self.name)
			.field("phase", &self.updater.phase())
			.finish()
	}
}

/// Result of expanding a description tree.
#[derive(Debug)]
pub struct ExpandedTree {
	/// The host-node tree.
	pub root: MarkupNode,
	/// Component instances, children before parents.
	pub mounted: Vec<MountedComponent>,
}

/// Expands description trees into [`MarkupNode`] trees.
///
/// One expander handles one render pass. Components run
/// `get_initial_state`, `component_will_mount` and `render` in that order;
/// nothing else is called here.
///
/// # Example
///
/// ```ignore
/// let options = RenderOptions::default();
/// let tree = Expander::new(RenderMode::Markup, &options, Diagnostics::new())
///     .expand(div().child("hi").into_node())?;
/// assert_eq!(tree.root.identity().as_str(), "1");
/// ```
pub struct Expander<'a> {
	mode: RenderMode,
	options: &'a RenderOptions,
	diagnostics: Diagnostics,
	reported: HashSet<(String, String)>,
	mounted: Vec<MountedComponent>,
	depth: usize,
	select_values: Vec<Option<Vec<String>>>,
}

impl<'a> Expander<'a> {
	/// Creates an expander for one pass in `mode`.
	pub fn new(mode: RenderMode, options: &'a RenderOptions, diagnostics: Diagnostics) -> Self {
		Self {
			mode,
			options,
			diagnostics,
			reported: HashSet::new(),
			mounted: Vec::new(),
			depth: 0,
			select_values: Vec::new(),
		}
	}

	/// Expands `root`, which must be an element or a component reference.
	///
	/// On the server every updater is moved to its post-render phase once
	/// the whole tree has been expanded.
	pub fn expand(mut self, root: Node) -> Result<ExpandedTree, RenderError> {
		if !matches!(root, Node::Element(_) | Node::Component(_)) {
			return Err(RenderError::InvalidRoot { kind: root.kind() });
		}
		let context = ContextMap::new();
		let root = self.expand_node(&root, NodeIdentity::root(), Namespace::Html, "", &context)?;

		if self.mode.is_server() {
			for mounted in &self.mounted {
				mounted.updater.finish_server_render();
			}
		}
		tracing::debug!(
			mode = ?self.mode,
			components = self.mounted.len(),
			"expanded description tree"
		);
		Ok(ExpandedTree {
			root,
			mounted: self.mounted,
		})
	}

	fn enter(&mut self) -> Result<(), RenderError> {
		self.depth += 1;
		if self.depth > self.options.max_depth {
			return Err(RenderError::DepthLimitExceeded {
				limit: self.options.max_depth,
			});
		}
		Ok(())
	}

	fn expand_node(
		&mut self,
		node: &Node,
		identity: NodeIdentity,
		namespace: Namespace,
		parent_tag: &str,
		context: &ContextMap,
	) -> Result<MarkupNode, RenderError> {
		let expanded = match node {
			Node::Element(el) => {
				self.enter()?;
				let el = self.expand_element(el, identity, namespace, parent_tag, context)?;
				self.depth -= 1;
				MarkupNode::Element(el)
			}
			Node::Component(component) => {
				self.enter()?;
				let node = self.expand_component(component, identity, namespace, parent_tag, context)?;
				self.depth -= 1;
				node
			}
			Node::Text(text) => MarkupNode::Text(MarkupText {
				identity,
				text: text.to_string(),
			}),
			Node::Number(n) => MarkupNode::Text(MarkupText {
				identity,
				text: format_number(*n),
			}),
			Node::Null | Node::Bool(_) | Node::Fragment(_) => MarkupNode::Empty(identity),
		};
		Ok(expanded)
	}

	fn expand_component(
		&mut self,
		component: &ComponentRef,
		identity: NodeIdentity,
		namespace: Namespace,
		parent_tag: &str,
		context: &ContextMap,
	) -> Result<MarkupNode, RenderError> {
		let props = component.props();
		let mut instance = component.component_type().instantiate(props);
		let name = instance.name().to_string();
		let updater = Updater::new(name.clone(), self.diagnostics.clone());

		let mut state = instance.get_initial_state(props);
		instance.component_will_mount(&updater);
		if let Some(pending) = updater.take_pending() {
			state.merge(pending);
		}

		let visible = context.masked(instance.context_types());
		let cx = RenderContext::new(props, &state, &visible, component.child_nodes());
		let rendered = instance.render(&cx);
		let child_context = match instance.get_child_context(&cx) {
			None => context.clone(),
			Some(published) => {
				let Some(declared) = instance.child_context_types() else {
					return Err(RenderError::MissingChildContextTypes { component: name });
				};
				if let Some(key) = published.keys().find(|k| !declared.iter().any(|d| d == k)) {
					return Err(RenderError::UndeclaredChildContext {
						component: name,
						key: key.to_string(),
					});
				}
				context.merged(&published)
			}
		};

		let node = match &rendered {
			Node::Null | Node::Bool(_) => MarkupNode::Empty(identity),
			Node::Element(_) | Node::Component(_) => {
				self.expand_node(&rendered, identity, namespace, parent_tag, &child_context)?
			}
			other => {
				return Err(RenderError::InvalidRenderOutput {
					component: name,
					kind: other.kind(),
				});
			}
		};
		self.mounted.push(MountedComponent {
			name,
			instance,
			updater,
		});
		Ok(node)
	}

	fn expand_element(
		&mut self,
		el: &Element,
		identity: NodeIdentity,
		parent_namespace: Namespace,
		parent_tag: &str,
		context: &ContextMap,
	) -> Result<MarkupElement, RenderError> {
		let tag = el.tag_name();
		let namespace = parent_namespace.for_child(parent_tag, tag);
		let control = match namespace {
			Namespace::Html => ControlProps::inspect(el, &self.diagnostics),
			_ => None,
		};

		let skip = control.as_ref().map_or(&[][..], |c| c.consumed_props());
		let mut unknown = Vec::new();
		let mut attributes =
			element_attributes(el, namespace, skip, &mut |name| unknown.push(name.to_string()));
		for name in unknown {
			self.report_unknown(tag, name);
		}
		if let Some(control) = &control {
			for (name, value) in control.attributes() {
				push_attribute(&mut attributes, name, value);
			}
		}
		if tag.eq_ignore_ascii_case("option")
			&& let Some(Some(selected)) = self.select_values.last()
		{
			let value = el
				.prop("value")
				.filter(|v| !v.is_null())
				.map(to_display_string)
				.unwrap_or_else(|| flatten_text(el.child_nodes()));
			attributes.retain(|(name, _)| name != "selected");
			if selected.contains(&value) {
				attributes.push(("selected".to_string(), String::new()));
			}
		}

		let children = el.child_nodes();
		let raw = raw_html(el)?;
		let is_void = namespace == Namespace::Html && rehydrate_dom::is_void_element(tag);
		if raw.is_some() && !children.is_empty() {
			return Err(RenderError::ConflictingContent {
				tag: tag.to_string(),
			});
		}
		if is_void && (raw.is_some() || !children.is_empty()) {
			return Err(RenderError::VoidElementContent {
				tag: tag.to_string(),
			});
		}

		let content = match (&raw, &control) {
			(Some(raw), _) if self.mode == RenderMode::StaticMarkup => MarkupContent::Raw(raw.clone()),
			(Some(raw), _) => MarkupContent::Raw(canonical_html(tag, raw)),
			(None, Some(c)) if c.kind == ControlKind::TextArea => {
				MarkupContent::Inline(c.textarea_content(children, &self.diagnostics))
			}
			(None, _) => match children {
				[single] if single.is_text_like() => MarkupContent::Inline(flatten_text(children)),
				_ => {
					let is_select = control.as_ref().is_some_and(|c| c.kind == ControlKind::Select);
					if is_select {
						self.select_values
							.push(control.as_ref().and_then(ControlProps::selected_values));
					}
					let expanded = self.expand_children(children, &identity, namespace, tag, context);
					if is_select {
						self.select_values.pop();
					}
					MarkupContent::Children(expanded?)
				}
			},
		};

		Ok(MarkupElement {
			identity,
			tag: tag.to_string(),
			namespace,
			attributes,
			content,
			control,
			handlers: el.handlers().to_vec(),
			node_ref: el.get_node_ref().cloned(),
		})
	}

	fn expand_children(
		&mut self,
		children: &[Node],
		parent: &NodeIdentity,
		namespace: Namespace,
		parent_tag: &str,
		context: &ContextMap,
	) -> Result<Vec<MarkupNode>, RenderError> {
		let mut flat = Vec::with_capacity(children.len());
		flatten(children, &mut flat);
		flat.into_iter()
			.enumerate()
			.map(|(index, child)| {
				self.expand_node(child, parent.child(index), namespace, parent_tag, context)
			})
			.collect()
	}

	fn report_unknown(&mut self, tag: &str, name: String) {
		if !self.options.report_unknown_properties {
			return;
		}
		if self.reported.insert((tag.to_string(), name.clone())) {
			self.diagnostics.emit(Diagnostic::UnknownProperty {
				tag: tag.to_string(),
				name,
			});
		}
	}
}

/// Splices nested fragments in order and drops holes.
///
/// Fragments do not count towards the depth limit, so nesting is walked
/// with an explicit stack instead of recursion.
fn flatten<'n>(children: &'n [Node], out: &mut Vec<&'n Node>) {
	let mut pending = vec![children.iter()];
	while let Some(siblings) = pending.last_mut() {
		match siblings.next() {
			Some(Node::Fragment(nested)) => pending.push(nested.iter()),
			Some(node) if node.is_hole() => {}
			Some(node) => out.push(node),
			None => {
				pending.pop();
			}
		}
	}
}

/// Raw inner HTML of `el`, from the builder or the `dangerouslySetInnerHTML` prop.
fn raw_html(el: &Element) -> Result<Option<String>, RenderError> {
	if let Some(html) = el.get_inner_html() {
		return Ok(Some(html.to_string()));
	}
	match el.prop("dangerouslySetInnerHTML") {
		None | Some(serde_json::Value::Null) => Ok(None),
		Some(value) => match value.get("__html") {
			Some(serde_json::Value::String(html)) => Ok(Some(html.clone())),
			_ => Err(RenderError::InvalidInnerHtml {
				tag: el.tag_name().to_string(),
			}),
		},
	}
}

/// Rewrites raw HTML the way the document parser reads it back, so that
/// hydratable markup survives a parse and re-serialization byte for byte.
fn canonical_html(tag: &str, html: &str) -> String {
	if rehydrate_dom::is_raw_text_element(tag) {
		return html.to_string();
	}
	if tag.eq_ignore_ascii_case("textarea") || tag.eq_ignore_ascii_case("title") {
		return rehydrate_dom::escape_text(&decode_entities(html)).into_owned();
	}
	let mut scratch = Document::new();
	let body = scratch.body();
	parse_fragment(&mut scratch, body, html);
	scratch.inner_html(body)
}
