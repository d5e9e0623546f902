use std::fs;
use std::path::PathBuf;

use bonedoc::bone::{BoneError, DocValue, Result};

/// Print high-level document statistics.
pub fn run(path: PathBuf) -> Result<()> {
	let text = fs::read_to_string(&path)?;
	let doc = DocValue::from_json_str(&text)?;
	let document = doc.as_object().ok_or_else(|| BoneError::NotAnObject { key: "document".to_owned() })?;

	let object_name = document.get("ObjectName").and_then(DocValue::as_str).unwrap_or("<missing>");

	let mut chain_total = 0;
	let mut groups: Vec<(String, usize)> = Vec::new();
	if let Some(bones) = document.get("DynamicBone").and_then(DocValue::as_object) {
		for (name, group) in bones.iter() {
			let count = group.as_array().map_or(0, <[DocValue]>::len);
			chain_total += count;
			groups.push((name.to_owned(), count));
		}
	}

	let mut collider_total = 0;
	let mut types: Vec<(&str, usize)> = Vec::new();
	if let Some(colliders) = document.get("Collider").and_then(DocValue::as_object) {
		for (_, entry) in colliders.iter() {
			collider_total += 1;
			let tag = entry.as_object().and_then(|item| item.get("Type")).and_then(DocValue::as_str).unwrap_or("<unknown>");
			match types.iter_mut().find(|(existing, _)| *existing == tag) {
				Some(row) => row.1 += 1,
				None => types.push((tag, 1)),
			}
		}
	}

	println!("path: {}", path.display());
	println!("object_name: {object_name}");
	println!("chain_groups: {}", groups.len());
	println!("chains: {chain_total}");
	println!("colliders: {collider_total}");

	groups.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
	println!("top_groups:");
	for (name, count) in groups.into_iter().take(12) {
		println!("  {name}: {count}");
	}

	println!("collider_types:");
	for (tag, count) in types {
		println!("  {tag}: {count}");
	}

	Ok(())
}
