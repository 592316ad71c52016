use super::{CompositeGeometryTrait, GeometryTrait, RingGeometry, merge_bounds};
use protofeature_core::json::JsonValue;
use std::fmt::Debug;

/// A polygon: the first ring is the outer shell, any further rings are holes.
#[derive(Clone, PartialEq)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl GeometryTrait for PolygonGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(self.0.iter().map(|ring| ring.to_coord_json(precision)).collect::<Vec<_>>())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(RingGeometry::compute_bounds))
	}
}

impl CompositeGeometryTrait<RingGeometry> for PolygonGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<RingGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<RingGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<RingGeometry> {
		self.0
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(PolygonGeometry, RingGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn to_coord_json() {
		let polygon = PolygonGeometry::from(vec![
			vec![[0.0, 0.0], [4.0, 0.0], [0.0, 4.0], [0.0, 0.0]],
			vec![[1.0, 1.0], [2.0, 1.0], [1.0, 2.0], [1.0, 1.0]],
		]);
		assert_eq!(
			polygon.to_coord_json(None).stringify(),
			"[[[0,0],[4,0],[0,4],[0,0]],[[1,1],[2,1],[1,2],[1,1]]]"
		);
		assert_eq!(polygon.len(), 2);
		assert_eq!(polygon.compute_bounds(), Some([0.0, 0.0, 4.0, 4.0]));
	}
}
