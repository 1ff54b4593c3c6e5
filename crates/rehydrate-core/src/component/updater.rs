//! The `set_state` handle.

use super::props::State;
use crate::diagnostics::{Diagnostic, Diagnostics};
use std::cell::RefCell;
use std::rc::Rc;

/// Lifecycle phase of the component an [`Updater`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
	/// Before the first render; updates merge into the state used by it.
	Mounting,
	/// The server render finished; updates are ignored with a diagnostic.
	ServerRendered,
	/// Mounted on the client; updates are queued for a later render.
	Mounted,
}

#[derive(Debug)]
struct UpdaterState {
	component: String,
	phase: UpdatePhase,
	pending: Option<State>,
	diagnostics: Diagnostics,
	late_update_reported: bool,
}

/// Handle through which a component requests state changes.
///
/// What `set_state` does depends on the phase:
///
/// - [`UpdatePhase::Mounting`]: merged into the state the first render sees
/// - [`UpdatePhase::ServerRendered`]: dropped, the first one with a
///   [`Diagnostic::SetStateAfterRender`]
/// - [`UpdatePhase::Mounted`]: merged into a pending update that a
///   re-rendering runtime collects with [`Updater::take_pending`]
#[derive(Debug, Clone)]
pub struct Updater {
	inner: Rc<RefCell<UpdaterState>>,
}

impl Updater {
	/// Creates an updater for `component` in the mounting phase.
	pub fn new(component: impl Into<String>, diagnostics: Diagnostics) -> Self {
		Self {
			inner: Rc::new(RefCell::new(UpdaterState {
				component: component.into(),
				phase: UpdatePhase::Mounting,
				pending: None,
				diagnostics,
				late_update_reported: false,
			})),
		}
	}

	/// Requests a shallow merge of `partial` into the component's state.
	pub fn set_state(&self, partial: State) {
		let mut inner = self.inner.borrow_mut();
		match inner.phase {
			UpdatePhase::Mounting | UpdatePhase::Mounted => {
				inner.pending.get_or_insert_with(State::new).merge(partial);
			}
			UpdatePhase::ServerRendered if inner.late_update_reported => {}
			UpdatePhase::ServerRendered => {
				inner.late_update_reported = true;
				let component = inner.component.clone();
				let diagnostics = inner.diagnostics.clone();
				drop(inner);
				diagnostics.emit(Diagnostic::SetStateAfterRender { component });
			}
		}
	}

	/// Current phase.
	pub fn phase(&self) -> UpdatePhase {
		self.inner.borrow().phase
	}

	/// Name of the owning component.
	pub fn component(&self) -> String {
		self.inner.borrow().component.clone()
	}

	/// Takes the pending update, if any.
	pub fn take_pending(&self) -> Option<State> {
		self.inner.borrow_mut().pending.take()
	}

	/// Whether an update is waiting.
	pub fn has_pending(&self) -> bool {
		self.inner.borrow().pending.is_some()
	}

	/// Moves to [`UpdatePhase::ServerRendered`]. Called by the server renderer.
	pub fn finish_server_render(&self) {
		let mut inner = self.inner.borrow_mut();
		inner.phase = UpdatePhase::ServerRendered;
		inner.pending = None;
	}

	/// Moves to [`UpdatePhase::Mounted`]. Called by the hydrator.
	pub fn mark_mounted(&self) {
		self.inner.borrow_mut().phase = UpdatePhase::Mounted;
	}
}
