use super::{CompositeGeometryTrait, Coordinates, GeometryTrait};
use protofeature_core::json::JsonValue;
use std::fmt::Debug;

/// A sequence of connected coordinates forming an open line.
#[derive(Clone, PartialEq)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(self.0.iter().map(|c| c.to_json(precision)).collect::<Vec<_>>())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		coordinate_bounds(&self.0)
	}
}

impl CompositeGeometryTrait<Coordinates> for LineStringGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<Coordinates> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<Coordinates> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<Coordinates> {
		self.0
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(LineStringGeometry, Coordinates);

/// Bounding box of a flat coordinate sequence.
pub(crate) fn coordinate_bounds(coords: &[Coordinates]) -> Option<[f64; 4]> {
	let first = coords.first()?;
	let mut bounds = [first.x(), first.y(), first.x(), first.y()];
	for c in coords {
		bounds[0] = bounds[0].min(c.x());
		bounds[1] = bounds[1].min(c.y());
		bounds[2] = bounds[2].max(c.x());
		bounds[3] = bounds[3].max(c.y());
	}
	Some(bounds)
}
