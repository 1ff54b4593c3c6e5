//! Render configuration.

use serde::{Deserialize, Serialize};

/// Default nesting limit for description trees.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// How a description tree is turned into markup or nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
	/// Server markup with identity attributes, text frames, empty markers
	/// and a checksum.
	Markup,
	/// Server markup without any hydration markers or checksum.
	StaticMarkup,
	/// Client-side expansion used by the hydrator.
	Client,
}

impl RenderMode {
	/// Whether this mode writes hydration markers.
	pub fn writes_markers(self) -> bool {
		!matches!(self, RenderMode::StaticMarkup)
	}

	/// Whether components in this mode run on the server.
	pub fn is_server(self) -> bool {
		!matches!(self, RenderMode::Client)
	}
}

/// Options shared by rendering and hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	/// Maximum nesting of elements and components.
	pub max_depth: usize,
	/// Whether dropped unknown properties produce diagnostics.
	pub report_unknown_properties: bool,
	/// `lang` attribute of documents built by `render_page`.
	pub lang: String,
	/// `<title>` of documents built by `render_page`.
	pub title: Option<String>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			report_unknown_properties: true,
			lang: "en".to_string(),
			title: None,
		}
	}
}

impl RenderOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the nesting limit.
	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Silences unknown-property diagnostics.
	pub fn quiet_unknown_properties(mut self) -> Self {
		self.report_unknown_properties = false;
		self
	}

	/// Sets the language.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = lang.into();
		self
	}

	/// Sets the document title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// Options for hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrateOptions {
	/// Options for the client-side expansion.
	pub render: RenderOptions,
	/// Whether to validate the markup checksum before matching.
	pub verify_checksum: bool,
}

impl Default for HydrateOptions {
	fn default() -> Self {
		Self {
			render: RenderOptions::default(),
			verify_checksum: true,
		}
	}
}

impl HydrateOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the render options.
	pub fn render(mut self, render: RenderOptions) -> Self {
		self.render = render;
		self
	}

	/// Skips checksum validation.
	pub fn skip_checksum(mut self) -> Self {
		self.verify_checksum = false;
		self
	}
}
