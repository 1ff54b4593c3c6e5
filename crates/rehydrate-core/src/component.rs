//! Component System for rehydrate
//!
//! Components are reusable units that turn props, state and context into a
//! description [`Node`](crate::Node). They are expanded by the renderer
//! once per reference; only the host elements they eventually produce
//! appear in markup.
//!
//! ## Features
//!
//! - **Component trait**: render plus the mount lifecycle hooks
//! - **ComponentType**: the closed set of implementation styles (class,
//!   factory, stateless function)
//! - **Props and State**: loosely typed maps of JSON values
//! - **Updater**: the `set_state` handle, whose behavior depends on the phase
//!
//! ## Usage
//!
//! ```ignore
//! use rehydrate_core::{Component, ComponentType, Node, RenderContext, IntoNode};
//! use rehydrate_core::builder::html::p;
//!
//! #[derive(Default)]
//! struct Greeting;
//!
//! impl Component for Greeting {
//!     fn render(&self, cx: &RenderContext<'_>) -> Node {
//!         let name = cx.props().get_str("name").unwrap_or("World");
//!         p().child(format!("Hello, {}!", name)).into_node()
//!     }
//! }
//!
//! let node = ComponentType::class::<Greeting>().with_prop("name", "Ann");
//! ```

mod kind;
mod props;
mod r#trait;
mod updater;

pub use kind::{ComponentRef, ComponentType, StatelessComponent};
pub use props::{Children, Props, State};
pub use r#trait::{Component, RenderContext};
pub use updater::{UpdatePhase, Updater};
