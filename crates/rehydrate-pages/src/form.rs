//! Form controls.
//!
//! Server and client agree on how `input`, `textarea` and `select` values
//! are written to markup; during hydration the live value the user may
//! already have changed is kept.

mod control;

pub use control::{
	ControlKind, ControlProps, Ownership, PreservedValue, flatten_text, reconcile,
	structurally_compatible,
};
