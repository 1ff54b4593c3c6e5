//! Expansion of description trees.
//!
//! [`expand`](expand::Expander) resolves components, context and form
//! controls and produces a [`MarkupNode`] tree. The same expansion runs on
//! the server (before serialization) and on the client (before matching).

mod expand;
mod identity;
mod markup;

pub use expand::{ExpandedTree, Expander, MountedComponent};
pub use identity::NodeIdentity;
pub use markup::{MarkupContent, MarkupElement, MarkupNode, MarkupText};
