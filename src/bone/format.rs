use crate::bone::{DocObject, DocValue};

const INDENT: &str = "  ";
const EOL: &str = "\r\n";

/// Render a document in the compact-indent export style.
///
/// Objects and arrays whose immediate children are all scalars (and empty
/// ones) collapse onto the owning line; everything else renders one child per
/// line with two-space indentation. Line terminator is CRLF throughout, with
/// no trailing terminator. The styling is cosmetic: parsing the output yields
/// the same value tree, and re-import accepts any valid JSON.
pub fn render_document(value: &DocValue) -> String {
	let mut out = String::new();
	render_value(value, 0, &mut out);
	out
}

fn render_value(value: &DocValue, indent: usize, out: &mut String) {
	match value {
		DocValue::Null => out.push_str("null"),
		DocValue::Bool(item) => out.push_str(if *item { "true" } else { "false" }),
		DocValue::I64(item) => out.push_str(&item.to_string()),
		DocValue::U64(item) => out.push_str(&item.to_string()),
		DocValue::F32(item) => push_float(f64::from(*item), &item.to_string(), out),
		DocValue::F64(item) => push_float(*item, &item.to_string(), out),
		DocValue::String(item) => push_quoted(item, out),
		DocValue::Array(items) => render_array(items, indent, out),
		DocValue::Object(object) => render_object(object, indent, out),
	}
}

fn render_array(items: &[DocValue], indent: usize, out: &mut String) {
	if items.iter().all(DocValue::is_scalar) {
		out.push_str("[ ");
		for (index, item) in items.iter().enumerate() {
			if index > 0 {
				out.push_str(", ");
			}
			render_value(item, indent, out);
		}
		if !items.is_empty() {
			out.push(' ');
		}
		out.push(']');
		return;
	}

	out.push('[');
	out.push_str(EOL);
	for (index, item) in items.iter().enumerate() {
		push_pad(indent + 1, out);
		render_value(item, indent + 1, out);
		if index + 1 < items.len() {
			out.push(',');
		}
		out.push_str(EOL);
	}
	push_pad(indent, out);
	out.push(']');
}

fn render_object(object: &DocObject, indent: usize, out: &mut String) {
	if object.iter().all(|(_, item)| item.is_scalar()) {
		out.push_str("{ ");
		for (index, (key, item)) in object.iter().enumerate() {
			if index > 0 {
				out.push_str(", ");
			}
			push_quoted(key, out);
			out.push_str(": ");
			render_value(item, indent, out);
		}
		if !object.is_empty() {
			out.push(' ');
		}
		out.push('}');
		return;
	}

	out.push('{');
	out.push_str(EOL);
	for (index, (key, item)) in object.iter().enumerate() {
		push_pad(indent + 1, out);
		push_quoted(key, out);
		out.push_str(": ");
		render_value(item, indent + 1, out);
		if index + 1 < object.len() {
			out.push(',');
		}
		out.push_str(EOL);
	}
	push_pad(indent, out);
	out.push('}');
}

fn push_pad(indent: usize, out: &mut String) {
	for _ in 0..indent {
		out.push_str(INDENT);
	}
}

// Whole floats keep a trailing `.0` so scalar fields stay visibly floating-point.
fn push_float(value: f64, shortest: &str, out: &mut String) {
	if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
		out.push_str(&format!("{value:.1}"));
	} else {
		out.push_str(shortest);
	}
}

fn push_quoted(text: &str, out: &mut String) {
	out.push('"');
	for ch in text.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('"');
}

#[cfg(test)]
mod tests {
	use crate::bone::{DocObject, DocValue, render_document};

	#[test]
	fn scalar_only_containers_collapse_onto_one_line() {
		let doc = DocValue::from_json_str(r#"{"Bound": "Outside", "Radius": 0.5}"#).expect("parses");
		assert_eq!(render_document(&doc), "{ \"Bound\": \"Outside\", \"Radius\": 0.5 }");

		let mixed = DocValue::from_json_str(r#"{"Center": [0.5, 0, -1], "Bound": "Outside"}"#).expect("parses");
		assert_eq!(render_document(&mixed), "{\r\n  \"Center\": [ 0.5, 0, -1 ],\r\n  \"Bound\": \"Outside\"\r\n}");
	}

	#[test]
	fn nested_containers_stay_indented_with_collapsed_leaves() {
		let doc = DocValue::from_json_str(r#"{"Collider": {"Head": {"Center": [0, 1, 0], "Bound": "Inside"}}}"#).expect("parses");

		let rendered = render_document(&doc);
		let expected = "{\r\n  \"Collider\": {\r\n    \"Head\": { \"Center\": [ 0, 1, 0 ], \"Bound\": \"Inside\" }\r\n  }\r\n}";
		assert_eq!(rendered, expected);
	}

	#[test]
	fn empty_containers_render_as_spaced_blocks() {
		let mut object = DocObject::new();
		object.insert("DynamicBone", DocValue::Object(DocObject::new()));
		object.insert("Exclusions", DocValue::Array(Vec::new()));
		let doc = DocValue::Object(object);

		assert_eq!(render_document(&doc), "{\r\n  \"DynamicBone\": { },\r\n  \"Exclusions\": [ ]\r\n}");
	}

	#[test]
	fn whole_floats_keep_a_decimal_point() {
		let mut object = DocObject::new();
		object.insert("UpdateRate", DocValue::F32(30.0));
		object.insert("Damping", DocValue::F32(0.25));
		object.insert("Count", DocValue::I64(3));
		let doc = DocValue::Object(object);

		assert_eq!(render_document(&doc), "{ \"UpdateRate\": 30.0, \"Damping\": 0.25, \"Count\": 3 }");
	}

	#[test]
	fn rendered_text_parses_back_to_the_same_tree() {
		let source = r#"{"ObjectName": "Rig", "DynamicBone": {"Tail": [{"Root": null, "Radius": 0.05, "Colliders": []}]}, "Collider": {}}"#;
		let original: serde_json::Value = serde_json::from_str(source).expect("parses");
		let doc = DocValue::from_json_str(source).expect("parses");

		let reparsed: serde_json::Value = serde_json::from_str(&render_document(&doc)).expect("rendered output parses");
		assert_eq!(reparsed, original);
	}
}
