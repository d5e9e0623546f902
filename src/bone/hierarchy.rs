use crate::bone::{BoneChain, Collider};

/// Handle to a node in a [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Handle to an attached bone-chain component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub(crate) usize);

/// Handle to an attached collider component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId(pub(crate) usize);

/// A named point in the hierarchy hosting zero or more components.
#[derive(Debug, Clone)]
pub struct Node {
	/// Display name; assumed unique within one export, validated on import.
	pub name: String,
	/// Parent node, `None` for a root.
	pub parent: Option<NodeId>,
	/// Child nodes in document order.
	pub children: Vec<NodeId>,
	/// Attached bone chains in attachment order.
	pub chains: Vec<ChainId>,
	/// Attached colliders in attachment order.
	pub colliders: Vec<ColliderId>,
}

#[derive(Debug, Clone)]
struct ChainSlot {
	owner: NodeId,
	chain: BoneChain,
}

#[derive(Debug, Clone)]
struct ColliderSlot {
	owner: NodeId,
	collider: Collider,
}

/// Arena-backed node tree owning all attached components.
///
/// Component slots are tombstoned on removal so outstanding handles stay
/// stable; a removed component's handle simply stops resolving.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
	nodes: Vec<Node>,
	chains: Vec<Option<ChainSlot>>,
	colliders: Vec<Option<ColliderSlot>>,
}

impl Hierarchy {
	/// Create an empty hierarchy.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a parentless node.
	pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			name: name.into(),
			parent: None,
			children: Vec::new(),
			chains: Vec::new(),
			colliders: Vec::new(),
		});
		id
	}

	/// Add a child node under `parent`.
	pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node {
			name: name.into(),
			parent: Some(parent),
			children: Vec::new(),
			chains: Vec::new(),
			colliders: Vec::new(),
		});
		self.nodes[parent.0].children.push(id);
		id
	}

	/// Borrow a node.
	pub fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}

	/// Attach a bone chain to `node`.
	pub fn attach_chain(&mut self, node: NodeId, chain: BoneChain) -> ChainId {
		let id = ChainId(self.chains.len());
		self.chains.push(Some(ChainSlot { owner: node, chain }));
		self.nodes[node.0].chains.push(id);
		id
	}

	/// Attach a collider to `node`.
	pub fn attach_collider(&mut self, node: NodeId, collider: Collider) -> ColliderId {
		let id = ColliderId(self.colliders.len());
		self.colliders.push(Some(ColliderSlot { owner: node, collider }));
		self.nodes[node.0].colliders.push(id);
		id
	}

	/// Borrow an attached chain, `None` once removed.
	pub fn chain(&self, id: ChainId) -> Option<&BoneChain> {
		self.chains.get(id.0)?.as_ref().map(|slot| &slot.chain)
	}

	/// Node a chain is attached to, `None` once removed.
	pub fn chain_owner(&self, id: ChainId) -> Option<NodeId> {
		self.chains.get(id.0)?.as_ref().map(|slot| slot.owner)
	}

	/// Borrow an attached collider, `None` once removed.
	pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
		self.colliders.get(id.0)?.as_ref().map(|slot| &slot.collider)
	}

	/// Node a collider is attached to, `None` once removed.
	pub fn collider_owner(&self, id: ColliderId) -> Option<NodeId> {
		self.colliders.get(id.0)?.as_ref().map(|slot| slot.owner)
	}

	/// Detach and drop a chain component.
	pub fn remove_chain(&mut self, id: ChainId) {
		if let Some(slot) = self.chains.get_mut(id.0).and_then(Option::take) {
			self.nodes[slot.owner.0].chains.retain(|item| *item != id);
		}
	}

	/// Detach and drop a collider component.
	pub fn remove_collider(&mut self, id: ColliderId) {
		if let Some(slot) = self.colliders.get_mut(id.0).and_then(Option::take) {
			self.nodes[slot.owner.0].colliders.retain(|item| *item != id);
		}
	}

	/// Preorder walk of the subtree rooted at `root`, root included.
	pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![root];
		while let Some(id) = stack.pop() {
			out.push(id);
			for child in self.nodes[id.0].children.iter().rev() {
				stack.push(*child);
			}
		}
		out
	}

	/// Every attached chain under `root` in preorder, attachment order per node.
	pub fn chains_under(&self, root: NodeId) -> Vec<ChainId> {
		self.subtree(root).into_iter().flat_map(|id| self.nodes[id.0].chains.clone()).collect()
	}

	/// Every attached collider under `root` in preorder, attachment order per node.
	pub fn colliders_under(&self, root: NodeId) -> Vec<ColliderId> {
		self.subtree(root).into_iter().flat_map(|id| self.nodes[id.0].colliders.clone()).collect()
	}
}

#[cfg(test)]
mod tests {
	use crate::bone::{BoneChain, Collider, Hierarchy};

	#[test]
	fn subtree_is_preorder_with_root_first() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Root");
		let left = hierarchy.add_child(root, "Left");
		let right = hierarchy.add_child(root, "Right");
		let leaf = hierarchy.add_child(left, "Leaf");

		assert_eq!(hierarchy.subtree(root), vec![root, left, leaf, right]);
	}

	#[test]
	fn removed_components_stop_resolving_and_leave_other_handles_stable() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Root");
		let first = hierarchy.attach_chain(root, BoneChain::default());
		let second = hierarchy.attach_chain(root, BoneChain::default());
		let collider = hierarchy.attach_collider(root, Collider::default());

		hierarchy.remove_chain(first);
		hierarchy.remove_collider(collider);

		assert!(hierarchy.chain(first).is_none());
		assert!(hierarchy.chain(second).is_some());
		assert!(hierarchy.collider(collider).is_none());
		assert_eq!(hierarchy.chains_under(root), vec![second]);
		assert!(hierarchy.colliders_under(root).is_empty());
	}
}
