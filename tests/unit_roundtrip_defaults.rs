#![allow(missing_docs)]

use bonedoc::bone::{BoneChain, Hierarchy, ImportOutcome, export_string, import_str};

#[test]
fn default_chain_round_trips_to_defaults() {
	let mut source = Hierarchy::new();
	let source_root = source.add_root("Rig");
	let tail = source.add_child(source_root, "Tail");
	source.attach_chain(tail, BoneChain::default());

	let text = export_string(&source, source_root);

	let mut target = Hierarchy::new();
	let target_root = target.add_root("Rig");
	target.add_child(target_root, "Tail");

	let outcome = import_str(&mut target, target_root, &text, |_| true).expect("import succeeds");
	assert!(matches!(outcome, ImportOutcome::Applied(stats) if stats.chains == 1 && stats.colliders == 0));

	let chains = target.chains_under(target_root);
	assert_eq!(chains.len(), 1);
	let chain = target.chain(chains[0]).expect("chain attached");
	assert_eq!(chain, &BoneChain::default());

	let owner = target.chain_owner(chains[0]).expect("owner resolves");
	assert_eq!(target.node(owner).name, "Tail");
}

#[test]
fn default_chain_document_omits_every_optional_field() {
	let mut source = Hierarchy::new();
	let root = source.add_root("Rig");
	source.attach_chain(root, BoneChain::default());

	let text = export_string(&source, root);

	let parsed: serde_json::Value = serde_json::from_str(&text).expect("export parses");
	let chain = &parsed["DynamicBone"]["Rig"][0];
	let keys: Vec<&str> = chain.as_object().expect("chain object").keys().map(String::as_str).collect();
	assert_eq!(keys, vec!["Root", "Radius", "Colliders"]);
	assert!(chain["Root"].is_null());
}
