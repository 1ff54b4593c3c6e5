//! Rehydrate Pages - server rendering and hydration
//!
//! Turns description trees from `rehydrate-core` into HTML on the server
//! and adopts that HTML on the client.
//!
//! ## Architecture
//!
//! - [`tree`]: expansion of description trees and positional node identities
//! - [`ssr`]: markup serializer, attribute table, checksum and [`SsrRenderer`]
//! - [`hydration`]: the hydration matcher and [`Hydrator`]
//! - [`form`](mod@form): controlled and uncontrolled form values
//! - [`config`]: [`RenderOptions`], [`HydrateOptions`] and [`RenderMode`]
//!
//! ## Example
//!
//! ```ignore
//! use rehydrate_core::builder::html::{button, div};
//! use rehydrate_core::Callback;
//! use rehydrate_dom::Document;
//! use rehydrate_pages::{hydrate, render_to_string};
//!
//! let view = || div().child(button().on("click", Callback::new(|_| {})).child("Go"));
//!
//! let html = render_to_string(view())?;
//!
//! let mut doc = Document::new();
//! let app = doc.create_element("div");
//! doc.set_inner_html(app, &html);
//! let report = hydrate(view(), &mut doc, app, |_| {})?;
//! assert_eq!(report.replaced_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod form;
pub mod hydration;
pub mod ssr;
pub mod tree;

pub use config::{DEFAULT_MAX_DEPTH, HydrateOptions, RenderMode, RenderOptions};
pub use hydration::{
	ChecksumStatus, HydrationReport, Hydrator, Outcome, hydrate, hydrate_root,
};
pub use ssr::{SsrRenderer, render_to_static_markup, render_to_string};
pub use tree::NodeIdentity;
