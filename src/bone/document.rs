use serde_json::Number;

use crate::bone::Result;

/// Ordered, type-tagged document tree used as the serialization pivot.
///
/// The numeric variants are split so exported engine scalars (`F32`) keep
/// their shortest float text while values parsed back from JSON stay `I64`/
/// `U64`/`F64` exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
	/// JSON null.
	Null,
	/// JSON boolean.
	Bool(bool),
	/// Signed integer number.
	I64(i64),
	/// Unsigned integer number beyond `i64` range.
	U64(u64),
	/// Engine scalar.
	F32(f32),
	/// Parsed floating-point number.
	F64(f64),
	/// JSON string.
	String(String),
	/// Ordered sequence.
	Array(Vec<DocValue>),
	/// Ordered key-value mapping with unique keys.
	Object(DocObject),
}

/// Insertion-ordered key-to-value mapping with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocObject {
	entries: Vec<(String, DocValue)>,
}

impl DocObject {
	/// Create an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a key; an existing key is replaced in place, keeping its position.
	pub fn insert(&mut self, key: impl Into<String>, value: DocValue) {
		let key = key.into();
		if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			entry.1 = value;
			return;
		}
		self.entries.push((key, value));
	}

	/// Look up a value by key.
	pub fn get(&self, key: &str) -> Option<&DocValue> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Look up a value by key, mutably.
	pub fn get_mut(&mut self, key: &str) -> Option<&mut DocValue> {
		self.entries.iter_mut().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &DocValue)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the object has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl DocValue {
	/// Whether this is a scalar (neither array nor object).
	pub fn is_scalar(&self) -> bool {
		!matches!(self, DocValue::Array(_) | DocValue::Object(_))
	}

	/// Borrow as string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			DocValue::String(value) => Some(value),
			_ => None,
		}
	}

	/// Read any numeric variant widened to `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			DocValue::I64(value) => Some(*value as f64),
			DocValue::U64(value) => Some(*value as f64),
			DocValue::F32(value) => Some(f64::from(*value)),
			DocValue::F64(value) => Some(*value),
			_ => None,
		}
	}

	/// Read as boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			DocValue::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow as array items.
	pub fn as_array(&self) -> Option<&[DocValue]> {
		match self {
			DocValue::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow as object.
	pub fn as_object(&self) -> Option<&DocObject> {
		match self {
			DocValue::Object(object) => Some(object),
			_ => None,
		}
	}

	/// Parse JSON text into a document tree.
	pub fn from_json_str(text: &str) -> Result<Self> {
		let value: serde_json::Value = serde_json::from_str(text)?;
		Ok(Self::from_json(&value))
	}

	/// Convert a parsed `serde_json` value, preserving object order and
	/// integer-ness of numbers.
	pub fn from_json(value: &serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => DocValue::Null,
			serde_json::Value::Bool(item) => DocValue::Bool(*item),
			serde_json::Value::Number(number) => {
				if let Some(item) = number.as_i64() {
					DocValue::I64(item)
				} else if let Some(item) = number.as_u64() {
					DocValue::U64(item)
				} else {
					DocValue::F64(number.as_f64().unwrap_or(0.0))
				}
			}
			serde_json::Value::String(item) => DocValue::String(item.clone()),
			serde_json::Value::Array(items) => DocValue::Array(items.iter().map(Self::from_json).collect()),
			serde_json::Value::Object(entries) => {
				let mut object = DocObject::new();
				for (key, item) in entries {
					object.insert(key.clone(), Self::from_json(item));
				}
				DocValue::Object(object)
			}
		}
	}

	/// Convert into a `serde_json` value for generic-JSON interop.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			DocValue::Null => serde_json::Value::Null,
			DocValue::Bool(item) => serde_json::Value::Bool(*item),
			DocValue::I64(item) => serde_json::Value::Number(Number::from(*item)),
			DocValue::U64(item) => serde_json::Value::Number(Number::from(*item)),
			DocValue::F32(item) => Number::from_f64(f64::from(*item)).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null),
			DocValue::F64(item) => Number::from_f64(*item).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null),
			DocValue::String(item) => serde_json::Value::String(item.clone()),
			DocValue::Array(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
			DocValue::Object(object) => {
				let mut entries = serde_json::Map::new();
				for (key, item) in object.iter() {
					entries.insert(key.to_owned(), item.to_json());
				}
				serde_json::Value::Object(entries)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::bone::{DocObject, DocValue};

	#[test]
	fn json_conversion_preserves_order_and_integerness() {
		let doc = DocValue::from_json_str(r#"{"b": 1, "a": 2.5, "nested": {"z": null, "y": [true, "x"]}}"#).expect("parses");

		let Some(object) = doc.as_object() else {
			panic!("expected object");
		};
		let keys: Vec<&str> = object.iter().map(|(key, _)| key).collect();
		assert_eq!(keys, vec!["b", "a", "nested"]);
		assert_eq!(object.get("b"), Some(&DocValue::I64(1)));
		assert_eq!(object.get("a"), Some(&DocValue::F64(2.5)));

		let roundtrip = serde_json::from_str::<serde_json::Value>(r#"{"b": 1, "a": 2.5, "nested": {"z": null, "y": [true, "x"]}}"#).expect("parses");
		assert_eq!(doc.to_json(), roundtrip);
	}

	#[test]
	fn insert_replaces_existing_keys_in_place() {
		let mut object = DocObject::new();
		object.insert("first", DocValue::I64(1));
		object.insert("second", DocValue::I64(2));
		object.insert("first", DocValue::I64(3));

		let entries: Vec<(&str, &DocValue)> = object.iter().collect();
		assert_eq!(entries, vec![("first", &DocValue::I64(3)), ("second", &DocValue::I64(2))]);
	}
}
