mod chain;
mod collider;
mod curve;
mod document;
mod error;
mod export;
mod fields;
mod format;
mod hierarchy;
mod import;
mod math;
mod names;

/// Bone-chain component and its enums.
pub use chain::{BoneChain, FreezeAxis, UpdateMode};
/// Collider component, shape variants, enums, and serialized type tags.
pub use collider::{Bound, CAPSULE_TYPE_TAG, Collider, ColliderKind, Direction, PLANE_TYPE_TAG};
/// Response-curve keyframe types.
pub use curve::{Keyframe, ResponseCurve};
/// Ordered document pivot tree.
pub use document::{DocObject, DocValue};
/// Error and result aliases.
pub use error::{BoneError, Result};
/// Graph-to-document serialization and file export.
pub use export::{export_file, export_string, serialize_hierarchy};
/// Compact-indent document rendering.
pub use format::render_document;
/// Node tree, component storage, and handles.
pub use hierarchy::{ChainId, ColliderId, Hierarchy, Node, NodeId};
/// Document-to-graph import flow.
pub use import::{ExistingComponents, ImportOutcome, ImportStats, import_file, import_str};
/// Vector value type.
pub use math::Vec3;
/// Name-to-node lookup with duplicate tracking.
pub use names::NameIndex;
