use crate::bone::{BoneError, Result, Vec3};

/// Serialized type tag for the capsule-like collider variant.
pub const CAPSULE_TYPE_TAG: &str = "DynamicBoneCollider";
/// Serialized type tag for the plane collider variant.
pub const PLANE_TYPE_TAG: &str = "DynamicBonePlaneCollider";

/// Collision volume axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
	/// Align along X.
	X,
	/// Align along Y.
	#[default]
	Y,
	/// Align along Z.
	Z,
}

impl Direction {
	/// Serialized member name.
	pub fn as_str(self) -> &'static str {
		match self {
			Direction::X => "X",
			Direction::Y => "Y",
			Direction::Z => "Z",
		}
	}

	/// Parse a serialized member name.
	pub fn parse(value: &str) -> Result<Self> {
		match value {
			"X" => Ok(Direction::X),
			"Y" => Ok(Direction::Y),
			"Z" => Ok(Direction::Z),
			other => Err(BoneError::UnknownEnumMember {
				kind: "Direction",
				value: other.to_owned(),
			}),
		}
	}
}

/// Which side of the volume chains are kept on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
	/// Chains are pushed outside the volume.
	#[default]
	Outside,
	/// Chains are kept inside the volume.
	Inside,
}

impl Bound {
	/// Serialized member name.
	pub fn as_str(self) -> &'static str {
		match self {
			Bound::Outside => "Outside",
			Bound::Inside => "Inside",
		}
	}

	/// Parse a serialized member name.
	pub fn parse(value: &str) -> Result<Self> {
		match value {
			"Outside" => Ok(Bound::Outside),
			"Inside" => Ok(Bound::Inside),
			other => Err(BoneError::UnknownEnumMember {
				kind: "Bound",
				value: other.to_owned(),
			}),
		}
	}
}

/// Concrete collider shape; the capsule-like variant carries its own scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderKind {
	/// Sphere/capsule volume with a radius and a height along the direction axis.
	Capsule {
		/// Volume radius.
		radius: f32,
		/// Capsule height; zero degenerates to a sphere.
		height: f32,
	},
	/// Infinite plane through the center, facing the direction axis.
	Plane,
}

impl ColliderKind {
	/// Serialized type tag for this variant.
	pub fn type_tag(&self) -> &'static str {
		match self {
			ColliderKind::Capsule { .. } => CAPSULE_TYPE_TAG,
			ColliderKind::Plane => PLANE_TYPE_TAG,
		}
	}
}

/// A collision volume component chains react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
	/// Concrete shape variant.
	pub kind: ColliderKind,
	/// Volume axis.
	pub direction: Direction,
	/// Center offset from the owning node.
	pub center: Vec3,
	/// Side of the volume chains are kept on.
	pub bound: Bound,
}

impl Default for Collider {
	fn default() -> Self {
		Self {
			kind: ColliderKind::Capsule { radius: 0.5, height: 0.0 },
			direction: Direction::Y,
			center: Vec3::ZERO,
			bound: Bound::Outside,
		}
	}
}
