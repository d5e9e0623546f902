use std::collections::HashMap;

use crate::bone::{BoneChain, BoneError, DocObject, DocValue, FreezeAxis, Hierarchy, Keyframe, NameIndex, NodeId, ResponseCurve, Result, UpdateMode, Vec3};

/// Lookup context for encoding reference fields as node names.
pub(crate) struct EncodeCtx<'a> {
	pub hierarchy: &'a Hierarchy,
}

/// Resolution context for applying fields onto a staged chain.
pub(crate) struct DecodeCtx<'a> {
	pub names: &'a NameIndex,
	/// Node -> index into the import's staged collider list.
	pub staged_colliders: &'a HashMap<NodeId, usize>,
}

/// One parsed chain awaiting commit; collider references are staged indices
/// until the colliders are actually attached.
#[derive(Debug, Default)]
pub(crate) struct StagedChain {
	pub chain: BoneChain,
	pub collider_refs: Vec<Option<usize>>,
}

/// Symmetric encode/apply row for one serialized chain field.
///
/// `encode` returns `None` to omit a field at its default; `apply` runs only
/// when the key is present, so absent fields keep [`BoneChain::default`].
pub(crate) struct FieldCodec {
	pub key: &'static str,
	pub encode: fn(&BoneChain, &EncodeCtx<'_>) -> Option<DocValue>,
	pub apply: fn(&mut StagedChain, &DocValue, &DecodeCtx<'_>) -> Result<()>,
}

/// Chain fields in document order.
pub(crate) const CHAIN_FIELDS: &[FieldCodec] = &[
	FieldCodec { key: "Root", encode: encode_root, apply: apply_root },
	FieldCodec { key: "UpdateRate", encode: encode_update_rate, apply: apply_update_rate },
	FieldCodec { key: "UpdateMode", encode: encode_update_mode, apply: apply_update_mode },
	FieldCodec { key: "Damping", encode: encode_damping, apply: apply_damping },
	FieldCodec { key: "DampingDistrib", encode: encode_damping_distrib, apply: apply_damping_distrib },
	FieldCodec { key: "Elasticity", encode: encode_elasticity, apply: apply_elasticity },
	FieldCodec { key: "ElasticityDistrib", encode: encode_elasticity_distrib, apply: apply_elasticity_distrib },
	FieldCodec { key: "Stiffness", encode: encode_stiffness, apply: apply_stiffness },
	FieldCodec { key: "StiffnessDistrib", encode: encode_stiffness_distrib, apply: apply_stiffness_distrib },
	FieldCodec { key: "Inert", encode: encode_inert, apply: apply_inert },
	FieldCodec { key: "InertDistrib", encode: encode_inert_distrib, apply: apply_inert_distrib },
	FieldCodec { key: "Radius", encode: encode_radius, apply: apply_radius },
	FieldCodec { key: "RadiusDistrib", encode: encode_radius_distrib, apply: apply_radius_distrib },
	FieldCodec { key: "EndLength", encode: encode_end_length, apply: apply_end_length },
	FieldCodec { key: "EndOffset", encode: encode_end_offset, apply: apply_end_offset },
	FieldCodec { key: "Gravity", encode: encode_gravity, apply: apply_gravity },
	FieldCodec { key: "Force", encode: encode_force, apply: apply_force },
	FieldCodec { key: "Colliders", encode: encode_colliders, apply: apply_colliders },
	FieldCodec { key: "Exclusions", encode: encode_exclusions, apply: apply_exclusions },
	FieldCodec { key: "FreezeAxis", encode: encode_freeze_axis, apply: apply_freeze_axis },
	FieldCodec { key: "DistantDisable", encode: encode_distant_disable, apply: apply_distant_disable },
	FieldCodec { key: "ReferenceObject", encode: encode_reference_object, apply: apply_reference_object },
	FieldCodec { key: "DistanceToObject", encode: encode_distance_to_object, apply: apply_distance_to_object },
];

fn encode_root(chain: &BoneChain, ctx: &EncodeCtx<'_>) -> Option<DocValue> {
	// Always written, even when null.
	Some(node_name_or_null(ctx.hierarchy, chain.root))
}

fn encode_update_rate(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.update_rate != 60.0).then(|| DocValue::F32(chain.update_rate))
}

fn encode_update_mode(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.update_mode != UpdateMode::Normal).then(|| DocValue::String(chain.update_mode.as_str().to_owned()))
}

fn encode_damping(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.damping != 0.1).then(|| DocValue::F32(chain.damping))
}

fn encode_damping_distrib(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	encode_curve_opt(&chain.damping_distrib)
}

fn encode_elasticity(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.elasticity != 0.1).then(|| DocValue::F32(chain.elasticity))
}

fn encode_elasticity_distrib(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	encode_curve_opt(&chain.elasticity_distrib)
}

fn encode_stiffness(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.stiffness != 0.1).then(|| DocValue::F32(chain.stiffness))
}

fn encode_stiffness_distrib(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	encode_curve_opt(&chain.stiffness_distrib)
}

fn encode_inert(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.inert != 0.0).then(|| DocValue::F32(chain.inert))
}

fn encode_inert_distrib(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	encode_curve_opt(&chain.inert_distrib)
}

fn encode_radius(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	// Always written, even at default.
	Some(DocValue::F32(chain.radius))
}

fn encode_radius_distrib(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	encode_curve_opt(&chain.radius_distrib)
}

fn encode_end_length(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.end_length != 0.0).then(|| DocValue::F32(chain.end_length))
}

fn encode_end_offset(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.end_offset != Vec3::ZERO).then(|| encode_vec3(chain.end_offset))
}

fn encode_gravity(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.gravity != Vec3::ZERO).then(|| encode_vec3(chain.gravity))
}

fn encode_force(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.force != Vec3::ZERO).then(|| encode_vec3(chain.force))
}

fn encode_colliders(chain: &BoneChain, ctx: &EncodeCtx<'_>) -> Option<DocValue> {
	// Always written, empty list included.
	let items = chain
		.colliders
		.iter()
		.map(|entry| match entry.and_then(|id| ctx.hierarchy.collider_owner(id)) {
			Some(node) => DocValue::String(ctx.hierarchy.node(node).name.clone()),
			None => DocValue::Null,
		})
		.collect();
	Some(DocValue::Array(items))
}

fn encode_exclusions(chain: &BoneChain, ctx: &EncodeCtx<'_>) -> Option<DocValue> {
	if chain.exclusions.is_empty() {
		return None;
	}
	Some(DocValue::Array(chain.exclusions.iter().map(|entry| node_name_or_null(ctx.hierarchy, *entry)).collect()))
}

fn encode_freeze_axis(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.freeze_axis != FreezeAxis::None).then(|| DocValue::String(chain.freeze_axis.as_str().to_owned()))
}

fn encode_distant_disable(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	chain.distant_disable.then_some(DocValue::Bool(true))
}

fn encode_reference_object(chain: &BoneChain, ctx: &EncodeCtx<'_>) -> Option<DocValue> {
	chain.reference_object.map(|node| DocValue::String(ctx.hierarchy.node(node).name.clone()))
}

fn encode_distance_to_object(chain: &BoneChain, _: &EncodeCtx<'_>) -> Option<DocValue> {
	(chain.distance_to_object != 20.0).then(|| DocValue::F32(chain.distance_to_object))
}

fn apply_root(staged: &mut StagedChain, value: &DocValue, ctx: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.root = resolve_node("Root", ctx.names, value)?;
	Ok(())
}

fn apply_update_rate(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.update_rate = decode_f32("UpdateRate", value)?;
	Ok(())
}

fn apply_update_mode(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.update_mode = UpdateMode::parse(decode_str("UpdateMode", value)?)?;
	Ok(())
}

fn apply_damping(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.damping = decode_f32("Damping", value)?;
	Ok(())
}

fn apply_damping_distrib(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.damping_distrib = decode_curve(value)?;
	Ok(())
}

fn apply_elasticity(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.elasticity = decode_f32("Elasticity", value)?;
	Ok(())
}

fn apply_elasticity_distrib(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.elasticity_distrib = decode_curve(value)?;
	Ok(())
}

fn apply_stiffness(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.stiffness = decode_f32("Stiffness", value)?;
	Ok(())
}

fn apply_stiffness_distrib(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.stiffness_distrib = decode_curve(value)?;
	Ok(())
}

fn apply_inert(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.inert = decode_f32("Inert", value)?;
	Ok(())
}

fn apply_inert_distrib(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.inert_distrib = decode_curve(value)?;
	Ok(())
}

fn apply_radius(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.radius = decode_f32("Radius", value)?;
	Ok(())
}

fn apply_radius_distrib(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.radius_distrib = decode_curve(value)?;
	Ok(())
}

fn apply_end_length(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.end_length = decode_f32("EndLength", value)?;
	Ok(())
}

fn apply_end_offset(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.end_offset = decode_vec3("EndOffset", value)?;
	Ok(())
}

fn apply_gravity(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.gravity = decode_vec3("Gravity", value)?;
	Ok(())
}

fn apply_force(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.force = decode_vec3("Force", value)?;
	Ok(())
}

fn apply_colliders(staged: &mut StagedChain, value: &DocValue, ctx: &DecodeCtx<'_>) -> Result<()> {
	let items = value.as_array().ok_or_else(|| BoneError::InvalidFieldType {
		field: "Colliders".to_owned(),
		expected: "array of names",
	})?;
	staged.collider_refs = items
		.iter()
		.map(|item| Ok(resolve_node("Colliders", ctx.names, item)?.and_then(|node| ctx.staged_colliders.get(&node).copied())))
		.collect::<Result<Vec<_>>>()?;
	Ok(())
}

fn apply_exclusions(staged: &mut StagedChain, value: &DocValue, ctx: &DecodeCtx<'_>) -> Result<()> {
	let items = value.as_array().ok_or_else(|| BoneError::InvalidFieldType {
		field: "Exclusions".to_owned(),
		expected: "array of names",
	})?;
	staged.chain.exclusions = items.iter().map(|item| resolve_node("Exclusions", ctx.names, item)).collect::<Result<Vec<_>>>()?;
	Ok(())
}

fn apply_freeze_axis(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.freeze_axis = FreezeAxis::parse(decode_str("FreezeAxis", value)?)?;
	Ok(())
}

fn apply_distant_disable(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.distant_disable = decode_bool("DistantDisable", value)?;
	Ok(())
}

fn apply_reference_object(staged: &mut StagedChain, value: &DocValue, ctx: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.reference_object = resolve_node("ReferenceObject", ctx.names, value)?;
	Ok(())
}

fn apply_distance_to_object(staged: &mut StagedChain, value: &DocValue, _: &DecodeCtx<'_>) -> Result<()> {
	staged.chain.distance_to_object = decode_f32("DistanceToObject", value)?;
	Ok(())
}

fn node_name_or_null(hierarchy: &Hierarchy, node: Option<NodeId>) -> DocValue {
	match node {
		Some(id) => DocValue::String(hierarchy.node(id).name.clone()),
		None => DocValue::Null,
	}
}

fn encode_curve_opt(curve: &ResponseCurve) -> Option<DocValue> {
	(!curve.is_empty()).then(|| encode_curve(curve))
}

/// Encode keyframes in the engine's serialized field layout.
pub(crate) fn encode_curve(curve: &ResponseCurve) -> DocValue {
	let items = curve
		.keys
		.iter()
		.map(|key| {
			let mut object = DocObject::new();
			object.insert("time", DocValue::F32(key.time));
			object.insert("value", DocValue::F32(key.value));
			object.insert("inTangent", DocValue::F32(key.in_tangent));
			object.insert("outTangent", DocValue::F32(key.out_tangent));
			object.insert("inWeight", DocValue::F32(key.in_weight));
			object.insert("outWeight", DocValue::F32(key.out_weight));
			object.insert("weightedMode", DocValue::I64(i64::from(key.weighted_mode)));
			DocValue::Object(object)
		})
		.collect();
	DocValue::Array(items)
}

/// Decode a keyframe array through the typed keyframe layout.
pub(crate) fn decode_curve(value: &DocValue) -> Result<ResponseCurve> {
	let keys: Vec<Keyframe> = serde_json::from_value(value.to_json())?;
	Ok(ResponseCurve { keys })
}

/// Resolve a name-or-null reference value; unresolved names become `None`.
pub(crate) fn resolve_node(field: &str, names: &NameIndex, value: &DocValue) -> Result<Option<NodeId>> {
	match value {
		DocValue::Null => Ok(None),
		DocValue::String(name) => Ok(names.get(name)),
		_ => Err(BoneError::InvalidFieldType {
			field: field.to_owned(),
			expected: "string or null",
		}),
	}
}

pub(crate) fn encode_vec3(value: Vec3) -> DocValue {
	DocValue::Array(vec![DocValue::F32(value.x), DocValue::F32(value.y), DocValue::F32(value.z)])
}

pub(crate) fn decode_vec3(field: &str, value: &DocValue) -> Result<Vec3> {
	let shape_error = || BoneError::InvalidFieldType {
		field: field.to_owned(),
		expected: "3-element number array",
	};
	let items = value.as_array().ok_or_else(shape_error)?;
	let [x, y, z] = items else {
		return Err(shape_error());
	};
	Ok(Vec3::new(
		x.as_f64().ok_or_else(shape_error)? as f32,
		y.as_f64().ok_or_else(shape_error)? as f32,
		z.as_f64().ok_or_else(shape_error)? as f32,
	))
}

pub(crate) fn decode_f32(field: &str, value: &DocValue) -> Result<f32> {
	value.as_f64().map(|item| item as f32).ok_or_else(|| BoneError::InvalidFieldType {
		field: field.to_owned(),
		expected: "number",
	})
}

pub(crate) fn decode_bool(field: &str, value: &DocValue) -> Result<bool> {
	value.as_bool().ok_or_else(|| BoneError::InvalidFieldType {
		field: field.to_owned(),
		expected: "boolean",
	})
}

pub(crate) fn decode_str<'v>(field: &str, value: &'v DocValue) -> Result<&'v str> {
	value.as_str().ok_or_else(|| BoneError::InvalidFieldType {
		field: field.to_owned(),
		expected: "string",
	})
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::{CHAIN_FIELDS, DecodeCtx, EncodeCtx, StagedChain, decode_curve, encode_curve};
	use crate::bone::{BoneChain, DocValue, Hierarchy, Keyframe, NameIndex, ResponseCurve};

	fn encoded_keys(chain: &BoneChain, hierarchy: &Hierarchy) -> Vec<&'static str> {
		let ctx = EncodeCtx { hierarchy };
		CHAIN_FIELDS.iter().filter(|codec| (codec.encode)(chain, &ctx).is_some()).map(|codec| codec.key).collect()
	}

	#[test]
	fn default_chain_emits_only_the_always_written_fields() {
		let hierarchy = Hierarchy::new();
		let chain = BoneChain::default();

		assert_eq!(encoded_keys(&chain, &hierarchy), vec!["Root", "Radius", "Colliders"]);
	}

	#[test]
	fn non_default_scalars_and_curves_are_emitted() {
		let hierarchy = Hierarchy::new();
		let mut chain = BoneChain::default();
		chain.damping = 0.25;
		chain.distant_disable = true;
		chain.damping_distrib = ResponseCurve {
			keys: vec![Keyframe::at(0.0, 1.0)],
		};

		let keys = encoded_keys(&chain, &hierarchy);
		assert!(keys.contains(&"Damping"));
		assert!(keys.contains(&"DampingDistrib"));
		assert!(keys.contains(&"DistantDisable"));
		assert!(!keys.contains(&"Elasticity"));
	}

	#[test]
	fn curve_encoding_round_trips_through_the_typed_layout() {
		let curve = ResponseCurve {
			keys: vec![Keyframe::at(0.0, 1.0), Keyframe::at(1.0, 0.5)],
		};

		let decoded = decode_curve(&encode_curve(&curve)).expect("decodes");
		assert_eq!(decoded, curve);
	}

	#[test]
	fn unknown_enum_member_fails_loudly() {
		let mut hierarchy = Hierarchy::new();
		let root = hierarchy.add_root("Root");
		let names = NameIndex::build(&hierarchy, root);
		let staged_colliders = HashMap::new();
		let ctx = DecodeCtx {
			names: &names,
			staged_colliders: &staged_colliders,
		};

		let codec = CHAIN_FIELDS.iter().find(|codec| codec.key == "UpdateMode").expect("codec exists");
		let mut staged = StagedChain::default();
		let result = (codec.apply)(&mut staged, &DocValue::String("Sideways".to_owned()), &ctx);

		assert!(result.is_err());
	}
}
