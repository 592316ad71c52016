use super::{CompositeGeometryTrait, Coordinates, GeometryTrait, linestring::coordinate_bounds};
use protofeature_core::json::JsonValue;
use std::fmt::Debug;

/// A closed loop of coordinates; the first and last positions are equal once [`RingGeometry::close`]
/// has been applied. Rings make up polygons.
#[derive(Clone, PartialEq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl RingGeometry {
	/// Appends a copy of the first coordinate. An empty ring stays empty.
	pub fn close(&mut self) {
		if let Some(first) = self.0.first().copied() {
			self.0.push(first);
		}
	}
}

impl GeometryTrait for RingGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue {
		JsonValue::from(self.0.iter().map(|coord| coord.to_json(precision)).collect::<Vec<_>>())
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		coordinate_bounds(&self.0)
	}
}

impl CompositeGeometryTrait<Coordinates> for RingGeometry {
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

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_array!(RingGeometry, Coordinates);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn close_appends_first_coordinate() {
		let mut ring = RingGeometry::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
		ring.close();
		assert_eq!(ring, RingGeometry::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]));
	}

	#[test]
	fn close_keeps_empty_ring_empty() {
		let mut ring = RingGeometry::new();
		ring.close();
		assert!(ring.is_empty());
	}

	#[test]
	fn close_single_coordinate() {
		let mut ring = RingGeometry::from(vec![[2.0, 3.0]]);
		ring.close();
		assert_eq!(ring.len(), 2);
	}

	#[test]
	fn to_coord_json_with_precision() {
		let ring = RingGeometry::from(vec![[0.123, 0.456], [1.0, 0.0]]);
		assert_eq!(ring.to_coord_json(Some(1)).stringify(), "[[0.1,0.5],[1,0]]");
	}
}
