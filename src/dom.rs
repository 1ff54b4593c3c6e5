//! In-memory document
//!
//! This module provides access to rehydrate-dom, the document that server
//! markup is parsed into and that hydration adopts, patches and wires
//! listeners onto.

// Re-export all rehydrate-dom functionality
pub use rehydrate_dom::*;
