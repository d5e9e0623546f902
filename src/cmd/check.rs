use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use bonedoc::bone::{BoneError, DocValue, Hierarchy, ImportOutcome, Result, import_str};

/// Validate a document by running the full typed import against a scratch hierarchy.
pub fn run(path: PathBuf) -> Result<()> {
	let text = fs::read_to_string(&path)?;
	let doc = DocValue::from_json_str(&text)?;
	let document = doc.as_object().ok_or_else(|| BoneError::NotAnObject { key: "document".to_owned() })?;

	// Every owner and collider key becomes a scratch node so each entry
	// actually decodes instead of being skipped as unresolved.
	let root_name = document.get("ObjectName").and_then(DocValue::as_str).unwrap_or("ScratchRoot");
	let mut referenced = BTreeSet::new();
	if let Some(bones) = document.get("DynamicBone").and_then(DocValue::as_object) {
		referenced.extend(bones.iter().map(|(name, _)| name.to_owned()));
	}
	if let Some(colliders) = document.get("Collider").and_then(DocValue::as_object) {
		referenced.extend(colliders.iter().map(|(name, _)| name.to_owned()));
	}

	let mut scratch = Hierarchy::new();
	let root = scratch.add_root(root_name);
	for name in referenced {
		if name != root_name {
			scratch.add_child(root, name);
		}
	}

	if let ImportOutcome::Applied(stats) = import_str(&mut scratch, root, &text, |_| true)? {
		println!("ok: {} chains, {} colliders", stats.chains, stats.colliders);
	}
	Ok(())
}
