use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::bone::fields::{CHAIN_FIELDS, DecodeCtx, StagedChain, decode_f32, decode_str, decode_vec3};
use crate::bone::{
	BoneError, Bound, CAPSULE_TYPE_TAG, ChainId, Collider, ColliderId, ColliderKind, Direction, DocObject, DocValue, Hierarchy, NameIndex, NodeId,
	PLANE_TYPE_TAG, Result,
};

/// Pre-existing component counts surfaced to the confirmation callback.
#[derive(Debug, Clone, Copy)]
pub struct ExistingComponents {
	/// Bone chains already attached under the target root.
	pub chains: usize,
	/// Colliders already attached under the target root.
	pub colliders: usize,
}

/// Components created by a committed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
	/// Bone chains attached.
	pub chains: usize,
	/// Colliders attached.
	pub colliders: usize,
}

/// How an import flow finished without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
	/// Document parsed and committed onto the hierarchy.
	Applied(ImportStats),
	/// The caller declined deleting pre-existing components; nothing changed.
	Declined,
}

/// Import a document file onto the hierarchy under `root`.
pub fn import_file(hierarchy: &mut Hierarchy, root: NodeId, path: impl AsRef<Path>, confirm: impl FnOnce(&ExistingComponents) -> bool) -> Result<ImportOutcome> {
	let text = fs::read_to_string(path)?;
	import_str(hierarchy, root, &text, confirm)
}

/// Import document text onto the hierarchy under `root`.
///
/// Node names under `root` must be unique; any collision aborts before
/// mutation with every duplicate listed. When chains or colliders already
/// exist under `root`, `confirm` decides whether they are replaced; declining
/// is a successful no-op. Colliders stage before chains so chain collider
/// references resolve; unresolved names degrade to null references or skipped
/// groups. The hierarchy is only mutated after the whole document has staged,
/// so a fatal parse error leaves it untouched.
pub fn import_str(hierarchy: &mut Hierarchy, root: NodeId, text: &str, confirm: impl FnOnce(&ExistingComponents) -> bool) -> Result<ImportOutcome> {
	let names = NameIndex::build(hierarchy, root);
	if !names.duplicates().is_empty() {
		return Err(BoneError::DuplicateNames {
			names: names.duplicates().iter().cloned().collect(),
		});
	}

	let existing_chains = hierarchy.chains_under(root);
	let existing_colliders = hierarchy.colliders_under(root);
	if !(existing_chains.is_empty() && existing_colliders.is_empty()) {
		let existing = ExistingComponents {
			chains: existing_chains.len(),
			colliders: existing_colliders.len(),
		};
		if !confirm(&existing) {
			return Ok(ImportOutcome::Declined);
		}
	}

	let doc = DocValue::from_json_str(text)?;
	let staged = stage_document(&doc, &names)?;

	Ok(ImportOutcome::Applied(commit(hierarchy, existing_chains, existing_colliders, staged)))
}

struct StagedImport {
	colliders: Vec<(NodeId, Collider)>,
	chains: Vec<(NodeId, StagedChain)>,
}

fn stage_document(doc: &DocValue, names: &NameIndex) -> Result<StagedImport> {
	let document = doc.as_object().ok_or_else(|| BoneError::NotAnObject { key: "document".to_owned() })?;

	let collider_section = required_object(document, "Collider")?;
	let mut colliders = Vec::new();
	let mut staged_by_node = HashMap::new();
	for (name, entry) in collider_section.iter() {
		// Node no longer exists in the target hierarchy: skip silently.
		let Some(node) = names.get(name) else {
			continue;
		};
		let collider = stage_collider(name, entry)?;
		staged_by_node.insert(node, colliders.len());
		colliders.push((node, collider));
	}

	let ctx = DecodeCtx {
		names,
		staged_colliders: &staged_by_node,
	};
	let bone_section = required_object(document, "DynamicBone")?;
	let mut chains = Vec::new();
	for (owner_name, group) in bone_section.iter() {
		let Some(node) = names.get(owner_name) else {
			continue;
		};
		let items = group.as_array().ok_or_else(|| BoneError::InvalidFieldType {
			field: owner_name.to_owned(),
			expected: "array of chain objects",
		})?;
		for item in items {
			let entry = item.as_object().ok_or_else(|| BoneError::NotAnObject { key: owner_name.to_owned() })?;
			let mut staged = StagedChain::default();
			for (key, value) in entry.iter() {
				// Unknown keys are ignored for forward compatibility.
				if let Some(codec) = CHAIN_FIELDS.iter().find(|codec| codec.key == key) {
					(codec.apply)(&mut staged, value, &ctx)?;
				}
			}
			chains.push((node, staged));
		}
	}

	Ok(StagedImport { colliders, chains })
}

fn commit(hierarchy: &mut Hierarchy, existing_chains: Vec<ChainId>, existing_colliders: Vec<ColliderId>, staged: StagedImport) -> ImportStats {
	for id in existing_chains {
		hierarchy.remove_chain(id);
	}
	for id in existing_colliders {
		hierarchy.remove_collider(id);
	}

	let mut collider_ids = Vec::with_capacity(staged.colliders.len());
	for (node, collider) in staged.colliders {
		collider_ids.push(hierarchy.attach_collider(node, collider));
	}

	let stats = ImportStats {
		chains: staged.chains.len(),
		colliders: collider_ids.len(),
	};
	for (node, staged_chain) in staged.chains {
		let mut chain = staged_chain.chain;
		chain.colliders = staged_chain.collider_refs.iter().map(|entry| entry.map(|index| collider_ids[index])).collect();
		hierarchy.attach_chain(node, chain);
	}
	stats
}

fn stage_collider(name: &str, value: &DocValue) -> Result<Collider> {
	let entry = value.as_object().ok_or_else(|| BoneError::NotAnObject { key: name.to_owned() })?;

	let tag = decode_str("Type", required(entry, "Type")?)?;
	let kind = match tag {
		CAPSULE_TYPE_TAG => ColliderKind::Capsule {
			radius: decode_f32("Radius", required(entry, "Radius")?)?,
			height: decode_f32("Height", required(entry, "Height")?)?,
		},
		PLANE_TYPE_TAG => ColliderKind::Plane,
		other => {
			return Err(BoneError::UnknownEnumMember {
				kind: "collider type",
				value: other.to_owned(),
			});
		}
	};

	Ok(Collider {
		kind,
		direction: Direction::parse(decode_str("Direction", required(entry, "Direction")?)?)?,
		center: decode_vec3("Center", required(entry, "Center")?)?,
		bound: Bound::parse(decode_str("Bound", required(entry, "Bound")?)?)?,
	})
}

fn required_object<'doc>(document: &'doc DocObject, key: &str) -> Result<&'doc DocObject> {
	let value = document.get(key).ok_or_else(|| BoneError::MissingField { field: key.to_owned() })?;
	value.as_object().ok_or_else(|| BoneError::NotAnObject { key: key.to_owned() })
}

fn required<'doc>(entry: &'doc DocObject, field: &str) -> Result<&'doc DocValue> {
	entry.get(field).ok_or_else(|| BoneError::MissingField { field: field.to_owned() })
}

#[cfg(test)]
mod tests {
	use crate::bone::{BoneError, Hierarchy, ImportOutcome, import_str};

	#[test]
	fn fatal_staging_error_leaves_the_hierarchy_untouched() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Rig");
		hierarchy.add_child(root, "Tail");

		let text = r#"{"ObjectName": "Rig", "DynamicBone": {"Tail": [{"UpdateMode": "Sideways"}]}, "Collider": {}}"#;
		let result = import_str(&mut hierarchy, root, text, |_| true);

		assert!(matches!(result, Err(BoneError::UnknownEnumMember { kind: "UpdateMode", .. })));
		assert!(hierarchy.chains_under(root).is_empty());
	}

	#[test]
	fn missing_top_level_sections_are_fatal() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Rig");

		let result = import_str(&mut hierarchy, root, r#"{"ObjectName": "Rig"}"#, |_| true);

		assert!(matches!(result, Err(BoneError::MissingField { .. })));
	}

	#[test]
	fn unknown_chain_keys_are_ignored() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Rig");

		let text = r#"{"ObjectName": "Rig", "DynamicBone": {"Rig": [{"Radius": 0.1, "FutureField": 7}]}, "Collider": {}}"#;
		let outcome = import_str(&mut hierarchy, root, text, |_| true).expect("imports");

		assert!(matches!(outcome, ImportOutcome::Applied(stats) if stats.chains == 1));
		let chain = hierarchy.chains_under(root).first().and_then(|id| hierarchy.chain(*id)).cloned().expect("chain attached");
		assert_eq!(chain.radius, 0.1);
	}
}
