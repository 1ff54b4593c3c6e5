//! Description trees, components, context and diagnostics
//!
//! This module provides access to rehydrate-core: the [`Node`] tree handed
//! to the renderer, the [`Component`] trait with its class, factory and
//! stateless styles, and the [`Diagnostics`] sink shared by rendering and
//! hydration.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rehydrate::core::builder::html::{div, span};
//! use rehydrate::core::{ComponentType, IntoNode};
//!
//! let badge = ComponentType::stateless("Badge", |cx| {
//!     span()
//!         .attr("className", "badge")
//!         .child(cx.props().get_str("label").unwrap_or("").to_string())
//!         .into_node()
//! });
//! let view = div().child(badge.with_prop("label", "new"));
//! ```

// Re-export all rehydrate-core functionality
pub use rehydrate_core::*;
