//! Hydration results.

use super::events::EventRegistry;
use crate::form::PreservedValue;
use crate::tree::NodeIdentity;
use rehydrate_dom::NodeId;
use std::collections::HashMap;

/// How one node of the client tree ended up in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The existing DOM node was reused.
	Adopted,
	/// The existing DOM subtree was discarded and rebuilt.
	Replaced,
	/// No server counterpart existed; the node was created.
	Created,
}

/// Result of the checksum pre-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
	/// The markup matched its checksum.
	Valid,
	/// The markup did not match its checksum and was discarded.
	Invalid,
	/// The root carried no checksum, or there was no server markup.
	Absent,
	/// Verification was disabled.
	Skipped,
}

/// Summary of one hydration pass.
#[derive(Debug, Clone)]
pub struct HydrationReport {
	pub(crate) outcomes: Vec<(NodeIdentity, Outcome)>,
	pub(crate) nodes: HashMap<NodeIdentity, NodeId>,
	pub(crate) checksum: ChecksumStatus,
	pub(crate) mismatches: usize,
	pub(crate) preserved: Vec<PreservedValue>,
	pub(crate) events: EventRegistry,
}

impl HydrationReport {
	pub(crate) fn new() -> Self {
		Self {
			outcomes: Vec::new(),
			nodes: HashMap::new(),
			checksum: ChecksumStatus::Absent,
			mismatches: 0,
			preserved: Vec::new(),
			events: EventRegistry::new(),
		}
	}

	/// Outcome of every node, parents before children.
	pub fn outcomes(&self) -> &[(NodeIdentity, Outcome)] {
		&self.outcomes
	}

	/// Outcome of the node with `identity`.
	pub fn outcome(&self, identity: &str) -> Option<Outcome> {
		self.outcomes
			.iter()
			.find(|(id, _)| id.as_str() == identity)
			.map(|(_, outcome)| *outcome)
	}

	/// Live node of the client node with `identity`.
	///
	/// Text runs map to their text node, or to their opening comment when
	/// empty; empty slots map to their marker comment.
	pub fn node(&self, identity: &str) -> Option<NodeId> {
		NodeIdentity::parse(identity).and_then(|id| self.nodes.get(&id).copied())
	}

	/// Number of adopted nodes.
	pub fn adopted_count(&self) -> usize {
		self.count(Outcome::Adopted)
	}

	/// Number of replaced subtree roots.
	pub fn replaced_count(&self) -> usize {
		self.count(Outcome::Replaced)
	}

	/// Number of created nodes.
	pub fn created_count(&self) -> usize {
		self.count(Outcome::Created)
	}

	fn count(&self, outcome: Outcome) -> usize {
		self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
	}

	/// Checksum pre-check result.
	pub fn checksum(&self) -> ChecksumStatus {
		self.checksum
	}

	/// Number of mismatches found while matching.
	///
	/// All of them are reported through a single diagnostic.
	pub fn mismatch_count(&self) -> usize {
		self.mismatches
	}

	/// Controls whose live value was kept over a different declared value.
	pub fn preserved_values(&self) -> &[PreservedValue] {
		&self.preserved
	}

	/// Event listeners attached after the pass.
	pub fn events(&self) -> &EventRegistry {
		&self.events
	}

	/// Whether every node was adopted without any mismatch.
	pub fn is_clean(&self) -> bool {
		self.mismatches == 0 && self.outcomes.iter().all(|(_, o)| *o == Outcome::Adopted)
	}

	pub(crate) fn record(&mut self, identity: &NodeIdentity, outcome: Outcome, node: Option<NodeId>) {
		tracing::trace!(identity = %identity, outcome = ?outcome, "hydration outcome");
		self.outcomes.push((identity.clone(), outcome));
		if let Some(node) = node {
			self.nodes.insert(identity.clone(), node);
		}
	}

	pub(crate) fn node_for(&self, identity: &NodeIdentity) -> Option<NodeId> {
		self.nodes.get(identity).copied()
	}
}
