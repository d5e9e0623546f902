use std::collections::{BTreeSet, HashMap};

use crate::bone::{Hierarchy, NodeId};

/// Name-to-node lookup over one hierarchy subtree, with collision tracking.
///
/// Built fresh per operation from a live snapshot; never persisted. Duplicate
/// names are not an error here; import treats a non-empty duplicate set as a
/// precondition failure before touching anything.
#[derive(Debug, Clone)]
pub struct NameIndex {
	by_name: HashMap<String, NodeId>,
	duplicates: BTreeSet<String>,
}

impl NameIndex {
	/// Index every node in the subtree rooted at `root`, root included.
	///
	/// A name seen more than once joins the duplicate set and the mapping
	/// keeps the later-visited node (last write wins).
	pub fn build(hierarchy: &Hierarchy, root: NodeId) -> Self {
		let mut by_name = HashMap::new();
		let mut duplicates = BTreeSet::new();

		for id in hierarchy.subtree(root) {
			let name = hierarchy.node(id).name.clone();
			if by_name.contains_key(&name) {
				duplicates.insert(name.clone());
			}
			by_name.insert(name, id);
		}

		Self { by_name, duplicates }
	}

	/// Look up a node by exact name; empty names resolve to `None`.
	pub fn get(&self, name: &str) -> Option<NodeId> {
		if name.is_empty() {
			return None;
		}
		self.by_name.get(name).copied()
	}

	/// Names that appeared more than once, sorted.
	pub fn duplicates(&self) -> &BTreeSet<String> {
		&self.duplicates
	}
}
