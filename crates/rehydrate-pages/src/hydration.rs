//! Client-side hydration.
//!
//! Hydration re-expands the description tree on the client and adopts the
//! server-rendered DOM node by node instead of rebuilding it:
//!
//! 1. An empty container is simply built from scratch.
//! 2. A container whose content does not start with a server root is
//!    discarded and rebuilt, with one diagnostic.
//! 3. A root carrying a checksum is re-serialized and verified; corrupted
//!    markup is discarded whole.
//! 4. Otherwise nodes are matched in order. Mismatching subtrees are
//!    rebuilt and all mismatches are reported through one diagnostic.
//! 5. Refs and listeners are wired, `component_did_mount` runs children
//!    first, and the completion callback fires.

mod create;
mod cursor;
pub mod events;
mod matcher;
mod report;
mod runtime;

pub use events::{EventBinding, EventRegistry};
pub use report::{ChecksumStatus, HydrationReport, Outcome};
pub use runtime::{Hydrator, hydrate, hydrate_root};
