//! Server rendering and hydration
//!
//! This module provides access to rehydrate-pages.
//!
//! ## Architecture
//!
//! - **Server Rendering**: hydratable markup with identities and an Adler-32 checksum, or static markup
//! - **Hydration**: node-by-node adoption of server markup with local repair of mismatches
//! - **Form Controls**: values typed before hydration are kept
//!
//! ## Example
//!
//! ```rust,ignore
//! use rehydrate::pages::{SsrRenderer, RenderOptions};
//!
//! let renderer = SsrRenderer::with_options(RenderOptions::new().title("Home"));
//! let page = renderer.render_page(view())?;
//! ```

// Re-export all rehydrate-pages functionality
pub use rehydrate_pages::*;
