use serde::{Deserialize, Serialize};

/// One keyframe of a response curve, in the engine's serialized field layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
	/// Normalized position along the chain.
	pub time: f32,
	/// Parameter multiplier at `time`.
	pub value: f32,
	/// Incoming tangent slope.
	pub in_tangent: f32,
	/// Outgoing tangent slope.
	pub out_tangent: f32,
	/// Incoming tangent weight.
	pub in_weight: f32,
	/// Outgoing tangent weight.
	pub out_weight: f32,
	/// Engine weighted-tangent mode selector.
	pub weighted_mode: i32,
}

impl Keyframe {
	/// Keyframe at `(time, value)` with flat, unweighted tangents.
	pub fn at(time: f32, value: f32) -> Self {
		Self {
			time,
			value,
			in_tangent: 0.0,
			out_tangent: 0.0,
			in_weight: 0.0,
			out_weight: 0.0,
			weighted_mode: 0,
		}
	}
}

/// Keyframed scalar function used to vary a chain parameter along its length.
///
/// An empty curve is the "no override" sentinel: it is omitted on export and
/// left untouched on import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseCurve {
	/// Ordered keyframes.
	pub keys: Vec<Keyframe>,
}

impl ResponseCurve {
	/// Whether this curve carries no override.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}
