//! Hydration runtime.
//!
//! Entry points for adopting server markup on the client. A pass runs the
//! component lifecycle up to `render`, decides whether the container holds
//! usable server markup, matches node by node, then wires refs and event
//! listeners, runs `component_did_mount` and finally calls `on_complete`.

use super::cursor::{HydrationCursor, Slot};
use super::events::attach_bindings;
use super::matcher::Matcher;
use super::report::{ChecksumStatus, HydrationReport, Outcome};
use crate::config::{HydrateOptions, RenderMode};
use crate::ssr::checksum::{adler32, extract_checksum, validate};
use crate::ssr::markers::{HYDRATION_ATTR_CHECKSUM, HYDRATION_ATTR_ROOT};
use crate::tree::{Expander, NodeIdentity};
use rehydrate_core::{Diagnostic, Diagnostics, IntoNode, RenderError};
use rehydrate_dom::{Document, NodeId};

/// Hydrates server markup.
///
/// # Example
///
/// ```ignore
/// let mut doc = Document::new();
/// let app = doc.create_element("div");
/// doc.set_inner_html(app, &render_to_string(view())?);
///
/// let report = Hydrator::new().hydrate(view(), &mut doc, app, |report| {
///     tracing::info!(adopted = report.adopted_count(), "hydrated");
/// })?;
/// assert!(report.is_clean());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Hydrator {
	options: HydrateOptions,
	diagnostics: Diagnostics,
}

impl Hydrator {
	/// Creates a hydrator with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a hydrator with custom options.
	pub fn with_options(options: HydrateOptions) -> Self {
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

	/// Hydration options.
	pub fn options(&self) -> &HydrateOptions {
		&self.options
	}

	/// Diagnostics reported by this hydrator.
	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Hydrates `node` into `container`.
	///
	/// Mismatches never fail the call: the affected subtrees are rebuilt and
	/// one [`Diagnostic::HydrationMismatch`] summarizes them. Errors are
	/// reserved for an invalid container and for usage errors in the tree.
	pub fn hydrate<F>(
		&self,
		node: impl IntoNode,
		doc: &mut Document,
		container: NodeId,
		on_complete: F,
	) -> Result<HydrationReport, RenderError>
	where
		F: FnOnce(&HydrationReport),
	{
		if !doc.contains(container) || !doc.is_element(container) {
			return Err(RenderError::InvalidContainer {
				container: container.to_string(),
			});
		}
		tracing::debug!(container = %container, "starting hydration");

		let mut tree = Expander::new(RenderMode::Client, &self.options.render, self.diagnostics.clone())
			.expand(node.into_node())?;

		let slots: Vec<Slot> = HydrationCursor::new(doc, container).collect();
		let root_slot = match slots.as_slice() {
			[slot] if is_server_root(doc, slot) => Some(slot.clone()),
			_ => None,
		};
		let checksum = match &root_slot {
			Some(Slot::Element(root)) if doc.has_attribute(*root, HYDRATION_ATTR_CHECKSUM) => {
				self.check_checksum(doc, *root)
			}
			_ => ChecksumStatus::Absent,
		};

		let mut matcher = Matcher::new(doc);
		match root_slot {
			None if slots.is_empty() => matcher.rebuild(container, &tree.root, Outcome::Created),
			None => {
				self.diagnostics.emit(Diagnostic::UnhydratableContainer);
				matcher.rebuild(container, &tree.root, Outcome::Replaced);
			}
			Some(_) if checksum == ChecksumStatus::Invalid => {
				matcher.rebuild(container, &tree.root, Outcome::Replaced);
			}
			Some(slot) => matcher.hydrate_slot(container, &slot, &tree.root),
		}
		let (mut report, first) = matcher.finish();
		report.checksum = checksum;

		if let Some(first) = first {
			self.diagnostics.emit(Diagnostic::HydrationMismatch {
				identity: first.identity.to_string(),
				expected: first.expected,
				found: first.found,
				total: report.mismatches,
			});
		}

		attach_bindings(doc, &tree.root, &mut report);
		for mounted in &mut tree.mounted {
			mounted.updater.mark_mounted();
			mounted.instance.component_did_mount(&mounted.updater);
		}

		tracing::debug!(
			adopted = report.adopted_count(),
			replaced = report.replaced_count(),
			created = report.created_count(),
			mismatches = report.mismatch_count(),
			"hydration finished"
		);
		on_complete(&report);
		Ok(report)
	}

	/// Hydrates `node` into the element with id `container_id`.
	pub fn hydrate_root(
		&self,
		doc: &mut Document,
		node: impl IntoNode,
		container_id: &str,
	) -> Result<HydrationReport, RenderError> {
		let container = doc
			.get_element_by_id(container_id)
			.ok_or_else(|| RenderError::InvalidContainer {
				container: format!("#{}", container_id),
			})?;
		self.hydrate(node, doc, container, |_| {})
	}

	fn check_checksum(&self, doc: &Document, root: NodeId) -> ChecksumStatus {
		if !self.options.verify_checksum {
			return ChecksumStatus::Skipped;
		}
		// Parsed markup is checked byte for byte as received. A root built
		// through the document API has no source and is serialized instead.
		let markup = match doc.source_markup(root) {
			Some(source) => source.to_string(),
			None => doc.outer_html(root),
		};
		if validate(&markup) {
			return ChecksumStatus::Valid;
		}
		let (expected, computed) = match extract_checksum(&markup) {
			Some((expected, stripped)) => (expected, adler32(stripped.as_bytes())),
			None => (0, adler32(markup.as_bytes())),
		};
		self.diagnostics
			.emit(Diagnostic::ChecksumMismatch { expected, computed });
		ChecksumStatus::Invalid
	}
}

/// Whether `slot` is the root of server markup.
fn is_server_root(doc: &Document, slot: &Slot) -> bool {
	match slot {
		Slot::Element(node) => doc.has_attribute(*node, HYDRATION_ATTR_ROOT),
		Slot::Empty {
			identity: Some(identity),
			..
		} => *identity == NodeIdentity::root(),
		_ => false,
	}
}

/// Hydrates `node` into `container` with default options.
pub fn hydrate<F>(
	node: impl IntoNode,
	doc: &mut Document,
	container: NodeId,
	on_complete: F,
) -> Result<HydrationReport, RenderError>
where
	F: FnOnce(&HydrationReport),
{
	Hydrator::new().hydrate(node, doc, container, on_complete)
}

/// Hydrates `node` into the element with id `container_id`, typically the
/// `app` container written by `SsrRenderer::render_page`.
pub fn hydrate_root(
	doc: &mut Document,
	node: impl IntoNode,
	container_id: &str,
) -> Result<HydrationReport, RenderError> {
	Hydrator::new().hydrate_root(doc, node, container_id)
}
