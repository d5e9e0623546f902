use crate::bone::{BoneError, ColliderId, NodeId, ResponseCurve, Result, Vec3};

/// Simulation update scheduling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
	/// Update every rendered frame.
	#[default]
	Normal,
	/// Update on the physics tick.
	AnimatePhysics,
	/// Update on unscaled time.
	UnscaledTime,
}

impl UpdateMode {
	/// Serialized member name.
	pub fn as_str(self) -> &'static str {
		match self {
			UpdateMode::Normal => "Normal",
			UpdateMode::AnimatePhysics => "AnimatePhysics",
			UpdateMode::UnscaledTime => "UnscaledTime",
		}
	}

	/// Parse a serialized member name.
	pub fn parse(value: &str) -> Result<Self> {
		match value {
			"Normal" => Ok(UpdateMode::Normal),
			"AnimatePhysics" => Ok(UpdateMode::AnimatePhysics),
			"UnscaledTime" => Ok(UpdateMode::UnscaledTime),
			other => Err(BoneError::UnknownEnumMember {
				kind: "UpdateMode",
				value: other.to_owned(),
			}),
		}
	}
}

/// Axis a chain's motion is frozen on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreezeAxis {
	/// No frozen axis.
	#[default]
	None,
	/// Freeze motion on X.
	X,
	/// Freeze motion on Y.
	Y,
	/// Freeze motion on Z.
	Z,
}

impl FreezeAxis {
	/// Serialized member name.
	pub fn as_str(self) -> &'static str {
		match self {
			FreezeAxis::None => "None",
			FreezeAxis::X => "X",
			FreezeAxis::Y => "Y",
			FreezeAxis::Z => "Z",
		}
	}

	/// Parse a serialized member name.
	pub fn parse(value: &str) -> Result<Self> {
		match value {
			"None" => Ok(FreezeAxis::None),
			"X" => Ok(FreezeAxis::X),
			"Y" => Ok(FreezeAxis::Y),
			"Z" => Ok(FreezeAxis::Z),
			other => Err(BoneError::UnknownEnumMember {
				kind: "FreezeAxis",
				value: other.to_owned(),
			}),
		}
	}
}

/// The physics component driving a chain of linked nodes.
///
/// Field defaults match the engine component; export omits most fields at
/// their default and import refills absent fields from [`BoneChain::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoneChain {
	/// Chain root node reference.
	pub root: Option<NodeId>,
	/// Updates per second.
	pub update_rate: f32,
	/// Update scheduling mode.
	pub update_mode: UpdateMode,
	/// Velocity damping factor.
	pub damping: f32,
	/// Damping override along the chain.
	pub damping_distrib: ResponseCurve,
	/// Shape-restoring elasticity factor.
	pub elasticity: f32,
	/// Elasticity override along the chain.
	pub elasticity_distrib: ResponseCurve,
	/// Pose stiffness factor.
	pub stiffness: f32,
	/// Stiffness override along the chain.
	pub stiffness_distrib: ResponseCurve,
	/// Inertia retention factor.
	pub inert: f32,
	/// Inertia override along the chain.
	pub inert_distrib: ResponseCurve,
	/// Particle collision radius.
	pub radius: f32,
	/// Radius override along the chain.
	pub radius_distrib: ResponseCurve,
	/// Extra bone length appended past the last node.
	pub end_length: f32,
	/// Extra bone offset appended past the last node.
	pub end_offset: Vec3,
	/// Gravity applied to the chain.
	pub gravity: Vec3,
	/// Constant external force applied to the chain.
	pub force: Vec3,
	/// Colliders the chain reacts to; `None` entries are unresolved placeholders.
	pub colliders: Vec<Option<ColliderId>>,
	/// Nodes excluded from simulation; `None` entries are unresolved placeholders.
	pub exclusions: Vec<Option<NodeId>>,
	/// Frozen motion axis.
	pub freeze_axis: FreezeAxis,
	/// Disable simulation beyond a distance from the reference object.
	pub distant_disable: bool,
	/// Reference object for distance-based disabling.
	pub reference_object: Option<NodeId>,
	/// Distance threshold for distance-based disabling.
	pub distance_to_object: f32,
}

impl Default for BoneChain {
	fn default() -> Self {
		Self {
			root: None,
			update_rate: 60.0,
			update_mode: UpdateMode::Normal,
			damping: 0.1,
			damping_distrib: ResponseCurve::default(),
			elasticity: 0.1,
			elasticity_distrib: ResponseCurve::default(),
			stiffness: 0.1,
			stiffness_distrib: ResponseCurve::default(),
			inert: 0.0,
			inert_distrib: ResponseCurve::default(),
			radius: 0.0,
			radius_distrib: ResponseCurve::default(),
			end_length: 0.0,
			end_offset: Vec3::ZERO,
			gravity: Vec3::ZERO,
			force: Vec3::ZERO,
			colliders: Vec::new(),
			exclusions: Vec::new(),
			freeze_axis: FreezeAxis::None,
			distant_disable: false,
			reference_object: None,
			distance_to_object: 20.0,
		}
	}
}
