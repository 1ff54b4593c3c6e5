//! Render errors.
//!
//! Every variant is a usage error in the description tree or the call
//! site. A render that fails with one of these produces no output at all;
//! recoverable problems are reported through [`Diagnostics`](crate::Diagnostics)
//! instead.

use thiserror::Error;

/// Fatal errors raised by rendering and hydration entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// The root of a render was not an element or component.
	#[error("a {kind} cannot be rendered as a root; pass an element or a component")]
	InvalidRoot {
		/// Kind of the rejected node.
		kind: &'static str,
	},

	/// A component's render returned text, a number or a fragment.
	#[error(
		"component `{component}` rendered a {kind}; render must return an element, a component, null or a boolean"
	)]
	InvalidRenderOutput {
		/// Component name.
		component: String,
		/// Kind of the returned node.
		kind: &'static str,
	},

	/// A component published a context key it did not declare.
	#[error("component `{component}` published context key `{key}` that is not declared in its child context types")]
	UndeclaredChildContext {
		/// Component name.
		component: String,
		/// Offending key.
		key: String,
	},

	/// A component published child context without declaring any types.
	#[error("component `{component}` returned child context but declares no child context types")]
	MissingChildContextTypes {
		/// Component name.
		component: String,
	},

	/// An element has both raw inner HTML and children.
	#[error("<{tag}> cannot have both raw inner HTML and children")]
	ConflictingContent {
		/// Tag name.
		tag: String,
	},

	/// The raw inner HTML property is not an `{ "__html": string }` object.
	#[error("<{tag}> raw inner HTML must be an object with an `__html` string")]
	InvalidInnerHtml {
		/// Tag name.
		tag: String,
	},

	/// A void element was given children or raw inner HTML.
	#[error("<{tag}> is a void element and cannot have children or inner HTML")]
	VoidElementContent {
		/// Tag name.
		tag: String,
	},

	/// The description tree is nested deeper than the configured limit.
	#[error("render depth exceeded the limit of {limit}")]
	DepthLimitExceeded {
		/// Configured limit.
		limit: usize,
	},

	/// The hydration target is not an element of the document.
	#[error("hydration container {container} is not an element")]
	InvalidContainer {
		/// Debug rendering of the container handle.
		container: String,
	},
}

impl RenderError {
	/// Short machine-friendly name of the variant.
	pub fn code(&self) -> &'static str {
		match self {
			RenderError::InvalidRoot { .. } => "invalid_root",
			RenderError::InvalidRenderOutput { .. } => "invalid_render_output",
			RenderError::UndeclaredChildContext { .. } => "undeclared_child_context",
			RenderError::MissingChildContextTypes { .. } => "missing_child_context_types",
			RenderError::ConflictingContent { .. } => "conflicting_content",
			RenderError::InvalidInnerHtml { .. } => "invalid_inner_html",
			RenderError::VoidElementContent { .. } => "void_element_content",
			RenderError::DepthLimitExceeded { .. } => "depth_limit_exceeded",
			RenderError::InvalidContainer { .. } => "invalid_container",
		}
	}
}
