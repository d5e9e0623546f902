use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BoneError>;

/// Errors produced while serializing, parsing, and importing setup documents.
#[derive(Debug, Error)]
pub enum BoneError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Document text is not valid JSON, or a keyframe array has the wrong shape.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// The target hierarchy contains nodes sharing a name; references cannot resolve safely.
	#[error("duplicate node names: {}", names.join(", "))]
	DuplicateNames {
		/// Every colliding name, sorted.
		names: Vec<String>,
	},
	/// A serialized enum value does not match any declared member name.
	#[error("unknown {kind} member: {value}")]
	UnknownEnumMember {
		/// Enum type label.
		kind: &'static str,
		/// Offending serialized value.
		value: String,
	},
	/// A mandatory field is absent from a document object.
	#[error("missing field: {field}")]
	MissingField {
		/// Missing field key.
		field: String,
	},
	/// A field value has the wrong JSON shape.
	#[error("invalid value for {field}: expected {expected}")]
	InvalidFieldType {
		/// Field key being decoded.
		field: String,
		/// Expected shape label.
		expected: &'static str,
	},
	/// A document section or entry that must be an object is not one.
	#[error("not an object: {key}")]
	NotAnObject {
		/// Section or entry key.
		key: String,
	},
}
