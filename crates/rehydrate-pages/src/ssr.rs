//! Server-side rendering.
//!
//! ## Example
//!
//! ```ignore
//! use rehydrate_pages::ssr::{render_to_string, render_to_static_markup};
//! use rehydrate_core::builder::html::{li, ul};
//!
//! let list = ul().child(li().child("one")).child(li().child("two"));
//! let hydratable = render_to_string(list.clone())?;
//! let plain = render_to_static_markup(list)?;
//! assert_eq!(plain, "<ul><li>one</li><li>two</li></ul>");
//! ```

pub mod attributes;
pub mod checksum;
pub mod markers;
mod renderer;
mod serializer;

pub use checksum::{adler32, add_checksum, extract_checksum, validate};
pub use markers::{HYDRATION_ATTR_CHECKSUM, HYDRATION_ATTR_ID, HYDRATION_ATTR_ROOT};
pub use renderer::{SsrRenderer, render_to_static_markup, render_to_string};
pub use serializer::serialize;
