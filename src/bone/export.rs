use std::fs;
use std::path::Path;

use crate::bone::fields::{CHAIN_FIELDS, EncodeCtx, encode_vec3};
use crate::bone::{BoneChain, Collider, ColliderKind, DocObject, DocValue, Hierarchy, NodeId, Result, render_document};

/// Serialize every chain and collider under `root` into a document tree.
///
/// Chain groups are keyed by owning-node name in preorder; chains hosted by
/// same-named nodes append to one array. Collider entries are keyed by node
/// name, last visit wins.
pub fn serialize_hierarchy(hierarchy: &Hierarchy, root: NodeId) -> DocValue {
	let mut doc = DocObject::new();
	doc.insert("ObjectName", DocValue::String(hierarchy.node(root).name.clone()));
	doc.insert("DynamicBone", chains_section(hierarchy, root));
	doc.insert("Collider", colliders_section(hierarchy, root));
	DocValue::Object(doc)
}

/// Render the export document text for `root`.
pub fn export_string(hierarchy: &Hierarchy, root: NodeId) -> String {
	render_document(&serialize_hierarchy(hierarchy, root))
}

/// Write `root`'s setup to `path` in the compact-indent style.
pub fn export_file(hierarchy: &Hierarchy, root: NodeId, path: impl AsRef<Path>) -> Result<()> {
	fs::write(path, export_string(hierarchy, root))?;
	Ok(())
}

fn chains_section(hierarchy: &Hierarchy, root: NodeId) -> DocValue {
	let mut groups = DocObject::new();
	for id in hierarchy.chains_under(root) {
		let Some(owner) = hierarchy.chain_owner(id) else {
			continue;
		};
		let Some(chain) = hierarchy.chain(id) else {
			continue;
		};

		let name = hierarchy.node(owner).name.clone();
		let serialized = serialize_chain(hierarchy, chain);
		match groups.get_mut(&name) {
			Some(DocValue::Array(items)) => items.push(serialized),
			_ => groups.insert(name, DocValue::Array(vec![serialized])),
		}
	}
	DocValue::Object(groups)
}

fn colliders_section(hierarchy: &Hierarchy, root: NodeId) -> DocValue {
	let mut entries = DocObject::new();
	for id in hierarchy.colliders_under(root) {
		let Some(owner) = hierarchy.collider_owner(id) else {
			continue;
		};
		let Some(collider) = hierarchy.collider(id) else {
			continue;
		};
		entries.insert(hierarchy.node(owner).name.clone(), serialize_collider(collider));
	}
	DocValue::Object(entries)
}

fn serialize_chain(hierarchy: &Hierarchy, chain: &BoneChain) -> DocValue {
	let ctx = EncodeCtx { hierarchy };
	let mut object = DocObject::new();
	for codec in CHAIN_FIELDS {
		if let Some(value) = (codec.encode)(chain, &ctx) {
			object.insert(codec.key, value);
		}
	}
	DocValue::Object(object)
}

fn serialize_collider(collider: &Collider) -> DocValue {
	let mut object = DocObject::new();
	object.insert("Type", DocValue::String(collider.kind.type_tag().to_owned()));
	object.insert("Direction", DocValue::String(collider.direction.as_str().to_owned()));
	object.insert("Center", encode_vec3(collider.center));
	object.insert("Bound", DocValue::String(collider.bound.as_str().to_owned()));
	if let ColliderKind::Capsule { radius, height } = collider.kind {
		object.insert("Radius", DocValue::F32(radius));
		object.insert("Height", DocValue::F32(height));
	}
	DocValue::Object(object)
}

#[cfg(test)]
mod tests {
	use crate::bone::{BoneChain, Collider, ColliderKind, DocValue, Hierarchy, serialize_hierarchy};

	#[test]
	fn chains_group_by_owning_node_name_with_multiplicity() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Rig");
		let tail = hierarchy.add_child(root, "Tail");
		hierarchy.attach_chain(tail, BoneChain::default());
		hierarchy.attach_chain(tail, BoneChain::default());

		let doc = serialize_hierarchy(&hierarchy, root);
		let object = doc.as_object().expect("document object");
		assert_eq!(object.get("ObjectName"), Some(&DocValue::String("Rig".to_owned())));

		let bones = object.get("DynamicBone").and_then(DocValue::as_object).expect("bones section");
		let group = bones.get("Tail").and_then(DocValue::as_array).expect("tail group");
		assert_eq!(group.len(), 2);
	}

	#[test]
	fn collider_references_serialize_as_owner_names_with_null_placeholders() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Rig");
		let head = hierarchy.add_child(root, "Head");
		let collider = hierarchy.attach_collider(head, Collider::default());

		let mut chain = BoneChain::default();
		chain.root = Some(head);
		chain.colliders = vec![Some(collider), None];
		hierarchy.attach_chain(root, chain);

		let doc = serialize_hierarchy(&hierarchy, root);
		let bones = doc.as_object().and_then(|object| object.get("DynamicBone")).and_then(DocValue::as_object).expect("bones section");
		let serialized = bones.get("Rig").and_then(DocValue::as_array).and_then(|items| items.first()).and_then(DocValue::as_object).expect("chain object");

		assert_eq!(serialized.get("Root"), Some(&DocValue::String("Head".to_owned())));
		let refs = serialized.get("Colliders").and_then(DocValue::as_array).expect("collider refs");
		assert_eq!(refs.to_vec(), vec![DocValue::String("Head".to_owned()), DocValue::Null]);
	}

	#[test]
	fn later_collider_on_a_shared_name_wins() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Rig");
		let first = hierarchy.add_child(root, "Head");
		let second = hierarchy.add_child(root, "Head");
		hierarchy.attach_collider(first, Collider::default());
		let mut plane = Collider::default();
		plane.kind = ColliderKind::Plane;
		hierarchy.attach_collider(second, plane);

		let doc = serialize_hierarchy(&hierarchy, root);
		let colliders = doc.as_object().and_then(|object| object.get("Collider")).and_then(DocValue::as_object).expect("collider section");
		assert_eq!(colliders.len(), 1);

		let entry = colliders.get("Head").and_then(DocValue::as_object).expect("collider entry");
		assert_eq!(entry.get("Type"), Some(&DocValue::String("DynamicBonePlaneCollider".to_owned())));
		assert!(entry.get("Radius").is_none());
	}
}
