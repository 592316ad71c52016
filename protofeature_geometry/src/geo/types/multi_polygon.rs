use super::{CompositeGeometryTrait, GeometryTrait, PolygonGeometry, merge_bounds};
use protofeature_core::json::JsonValue;
use std::fmt::Debug;

/// A collection of polygons, each with a shell and optional holes.
#[derive(Clone, PartialEq)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(
			self
				.0
				.iter()
				.map(|poly| poly.to_coord_json(precision))
				.collect::<Vec<_>>(),
		)
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(PolygonGeometry::compute_bounds))
	}
}

impl CompositeGeometryTrait<PolygonGeometry> for MultiPolygonGeometry {
	fn new() -> Self {
		Self(Vec::new())
	}
	fn as_vec(&self) -> &Vec<PolygonGeometry> {
		&self.0
	}
	fn as_mut_vec(&mut self) -> &mut Vec<PolygonGeometry> {
		&mut self.0
	}
	fn into_inner(self) -> Vec<PolygonGeometry> {
		self.0
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(MultiPolygonGeometry, PolygonGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	fn example() -> MultiPolygonGeometry {
		MultiPolygonGeometry::from(vec![
			vec![vec![[0.0, 0.0], [5.0, 0.0], [2.5, 4.0], [0.0, 0.0]]],
			vec![
				vec![[6.0, 0.0], [9.0, 0.0], [9.0, 4.0], [6.0, 4.0], [6.0, 0.0]],
				vec![[7.0, 1.0], [7.0, 3.0], [8.0, 3.0], [8.0, 1.0], [7.0, 1.0]],
			],
		])
	}

	#[test]
	fn composite_access() {
		let multi = example();
		assert_eq!(multi.len(), 2);
		assert_eq!(multi.first().map(|p| p.len()), Some(1));
		assert_eq!(multi.clone().into_inner()[1].len(), 2);
	}

	#[test]
	fn bounds_cover_all_polygons() {
		assert_eq!(example().compute_bounds(), Some([0.0, 0.0, 9.0, 4.0]));
	}

	#[test]
	fn to_coord_json_nesting() {
		let json = example().to_coord_json(None);
		let polygons = json.as_array().unwrap();
		assert_eq!(polygons.len(), 2);
		assert_eq!(polygons.as_vec()[1].as_array().unwrap().len(), 2);
	}
}
