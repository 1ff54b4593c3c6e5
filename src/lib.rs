//! # Rehydrate
//!
//! Server-side rendering of component trees to HTML, and client-side
//! hydration that adopts that HTML instead of rebuilding it.
//!
//! The server writes markup where every element carries its position in the
//! tree and the root carries an Adler-32 checksum of the whole. On the
//! client the same tree is expanded again and walked against the live
//! document: matching nodes are kept, stale text is corrected in place, and
//! only subtrees that cannot match are rebuilt. Values the user typed into
//! form fields before the client caught up are never overwritten.
//!
//! ## Crates
//!
//! - [`core`]: description tree, components, context, diagnostics
//! - [`dom`]: in-memory document, markup parser and serializer
//! - [`pages`]: server renderer, checksum and hydration runtime
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use rehydrate::prelude::*;
//!
//! fn view(name: &'static str) -> Node {
//!     div()
//!         .child(h1().child("Hello"))
//!         .child(p().child("Welcome, ").child(name))
//!         .into_node()
//! }
//!
//! // Server
//! let html = render_to_string(view("Ada"))?;
//!
//! // Client
//! let mut doc = Document::new();
//! let app = doc.create_element("div");
//! doc.set_inner_html(app, &html);
//! let report = hydrate(view("Ada"), &mut doc, app, |_| {})?;
//! assert!(report.is_clean());
//! ```

pub mod core;
pub mod dom;
pub mod pages;

pub use rehydrate_core::{
	Callback, Component, ComponentRef, ComponentType, ContextMap, Diagnostic, Diagnostics,
	Element, IntoNode, Node, NodeRef, Props, RenderContext, RenderError, State, Updater,
};
pub use rehydrate_dom::{Document, NodeId};
pub use rehydrate_pages::{
	ChecksumStatus, HydrateOptions, HydrationReport, Hydrator, Outcome, RenderOptions,
	SsrRenderer, hydrate, hydrate_root, render_to_static_markup, render_to_string,
};

pub mod prelude {
	// Description tree
	pub use crate::{
		Callback, Component, ComponentRef, ComponentType, ContextMap, Element, IntoNode, Node,
		NodeRef, Props, RenderContext, State, Updater,
	};
	pub use rehydrate_core::builder::html::*;

	// Errors and diagnostics
	pub use crate::{Diagnostic, Diagnostics, RenderError};

	// Document
	pub use crate::{Document, NodeId};

	// Rendering and hydration
	pub use crate::{
		ChecksumStatus, HydrateOptions, HydrationReport, Hydrator, Outcome, RenderOptions,
		SsrRenderer, hydrate, hydrate_root, render_to_static_markup, render_to_string,
	};
}
