//! Core types for rehydrate.
//!
//! This crate defines the input side of rendering: the description tree
//! ([`Node`], [`Element`], [`ComponentRef`]), the [`Component`] trait and its
//! implementation styles, props, state and context, plus the error and
//! diagnostic types shared by the server renderer and the hydrator.
//!
//! ## Example
//!
//! ```ignore
//! use rehydrate_core::builder::html::{div, span};
//! use rehydrate_core::{IntoNode, Node};
//!
//! let node: Node = div()
//!     .attr("className", "greeting")
//!     .child(span().child("Hello"))
//!     .into_node();
//! ```

pub mod builder;
pub mod callback;
pub mod component;
pub mod context;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod node;
pub mod value;

pub use callback::{Callback, NodeRef};
pub use component::{
	Children, Component, ComponentRef, ComponentType, Props, RenderContext, State, UpdatePhase,
	Updater,
};
pub use context::ContextMap;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use element::Element;
pub use error::RenderError;
pub use node::{IntoNode, Node};

/// Re-export of the document crate used by event and ref types.
pub use rehydrate_dom as dom;
