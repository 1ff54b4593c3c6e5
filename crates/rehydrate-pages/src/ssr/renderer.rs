//! Server renderer.

use super::checksum::add_checksum;
use super::serializer::serialize;
use crate::config::{RenderMode, RenderOptions};
use crate::tree::Expander;
use rehydrate_core::{Diagnostics, IntoNode, RenderError};
use rehydrate_dom::{escape_attr, escape_text};

/// The main SSR renderer.
///
/// # Example
///
/// ```ignore
/// use rehydrate_pages::{RenderOptions, SsrRenderer};
/// use rehydrate_core::builder::html::div;
///
/// let renderer = SsrRenderer::with_options(RenderOptions::new().lang("ja"));
/// let html = renderer.render_to_string(div().child("hello"))?;
/// assert!(html.starts_with("<div data-rh-root=\"\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SsrRenderer {
	options: RenderOptions,
	diagnostics: Diagnostics,
}

impl SsrRenderer {
	/// Creates a new renderer with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a renderer with custom options.
	pub fn with_options(options: RenderOptions) -> Self {
		Self {
			options,
			diagnostics: Diagnostics::new(),
		}
	}

	/// Reports diagnostics to `diagnostics` instead of a private sink.
	pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
		self.diagnostics = diagnostics;
		self
	}

	/// Rendering options.
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Diagnostics reported by this renderer.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Renders markup that can later be hydrated.
	pub fn render_to_string(&self, node: impl IntoNode) -> Result<String, RenderError> {
		self.render(node, RenderMode::Markup)
	}

	/// Renders markup without hydration markers or checksum.
	pub fn render_to_static_markup(&self, node: impl IntoNode) -> Result<String, RenderError> {
		self.render(node, RenderMode::StaticMarkup)
	}

	fn render(&self, node: impl IntoNode, mode: RenderMode) -> Result<String, RenderError> {
		let tree = Expander::new(mode, &self.options, self.diagnostics.clone())
			.expand(node.into_node())?;
		let markup = serialize(&tree.root, mode);
		let markup = if mode.writes_markers() {
			add_checksum(&markup)
		} else {
			markup
		};
		tracing::debug!(mode = ?mode, bytes = markup.len(), "rendered markup");
		Ok(markup)
	}

	/// Renders hydratable markup inside a full HTML document.
	pub fn render_page(&self, node: impl IntoNode) -> Result<String, RenderError> {
		let content = self.render_to_string(node)?;
		Ok(self.wrap_in_html(&content))
	}

	fn wrap_in_html(&self, content: &str) -> String {
		let mut html = String::with_capacity(content.len() + 256);

		html.push_str("<!DOCTYPE html>\n");
		html.push_str(&format!("<html lang=\"{}\">\n", escape_attr(&self.options.lang)));

		html.push_str("<head>\n");
		html.push_str("<meta charset=\"UTF-8\">\n");
		html.push_str(
			"<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
		);
		if let Some(title) = &self.options.title {
			html.push_str(&format!("<title>{}</title>\n", escape_text(title)));
		}
		html.push_str("</head>\n");

		html.push_str("<body>\n");
		html.push_str("<div id=\"app\">");
		html.push_str(content);
		html.push_str("</div>\n");
		html.push_str("</body>\n");
		html.push_str("</html>");

		html
	}
}

/// Renders hydratable markup with default options.
pub fn render_to_string(node: impl IntoNode) -> Result<String, RenderError> {
	SsrRenderer::new().render_to_string(node)
}

/// Renders static markup with default options.
pub fn render_to_static_markup(node: impl IntoNode) -> Result<String, RenderError> {
	SsrRenderer::new().render_to_static_markup(node)
}
