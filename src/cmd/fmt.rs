use std::fs;
use std::path::PathBuf;

use bonedoc::bone::{DocValue, Result, render_document};

/// Re-render any JSON document in the compact-indent export style.
pub fn run(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
	let text = fs::read_to_string(&path)?;
	let doc = DocValue::from_json_str(&text)?;
	let rendered = render_document(&doc);

	match output {
		Some(target) => fs::write(target, rendered)?,
		None => println!("{rendered}"),
	}
	Ok(())
}
