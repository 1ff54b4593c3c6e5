//! Element builder helpers.
//!
//! This module provides one constructor function per common HTML tag, so
//! description trees read like the markup they produce.
//!
//! ## Example
//!
//! ```ignore
//! use rehydrate_core::builder::html::{div, li, ul};
//!
//! let list = ul()
//!     .attr("className", "items")
//!     .child(li().child("one"))
//!     .child(li().child("two"));
//! ```

pub mod html;

pub use html::*;
