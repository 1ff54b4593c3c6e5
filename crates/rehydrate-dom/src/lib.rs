//! In-memory document model for rehydrate.
//!
//! This crate provides the live document the hydration runtime works
//! against: an arena of element, text and comment nodes with parent and
//! sibling links, a lenient markup parser, and a canonical serializer whose
//! escaping rules match the server renderer byte for byte.
//!
//! ## Features
//!
//! - **Arena storage**: nodes are addressed by [`NodeId`] and never move
//! - **Lenient parsing**: [`Document::set_inner_html`] accepts server markup and
//!   preserves tag and attribute case, attribute order and comments
//! - **Canonical output**: [`Document::outer_html`] reproduces server markup exactly
//! - **Source text**: [`Document::source_markup`] returns the exact bytes an
//!   element was parsed from
//! - **Form state**: live values with a dirty flag, separate from the default
//!   value carried by attributes
//! - **Listeners**: named event listeners dispatched synchronously
//!
//! ## Example
//!
//! ```ignore
//! use rehydrate_dom::Document;
//!
//! let mut doc = Document::new();
//! let app = doc.create_element("div");
//! doc.append_child(doc.body(), app);
//! doc.set_inner_html(app, "<p class=\"a\">Hello</p>");
//! assert_eq!(doc.inner_html(app), "<p class=\"a\">Hello</p>");
//! ```

pub mod document;
pub mod entities;
pub mod event;
pub mod node;
pub mod parser;
pub mod serialize;

pub use document::Document;
pub use event::{Event, Listener};
pub use node::{ElementData, Namespace, NodeData, NodeId};
pub use serialize::{
	escape_attr, escape_text, is_raw_text_element, is_void_element, needs_leading_newline,
};
