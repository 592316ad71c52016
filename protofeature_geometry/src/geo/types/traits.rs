use protofeature_core::json::JsonValue;
use std::fmt::Debug;

/// Common interface of all coordinate-bearing geometries.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Converts the geometry into the nested JSON array of its coordinates.
	/// Optionally rounds coordinate values to the given precision.
	fn to_coord_json(&self, precision: Option<u8>) -> JsonValue;

	/// Returns `Some([x_min, y_min, x_max, y_max])`, or `None` if the geometry holds no coordinates.
	fn compute_bounds(&self) -> Option<[f64; 4]>;
}

/// Geometries that are collections of simpler elements, e.g. a polygon made of rings.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	/// Creates a new, empty composite geometry.
	fn new() -> Self;

	fn as_vec(&self) -> &Vec<Item>;

	fn as_mut_vec(&mut self) -> &mut Vec<Item>;

	/// Consumes the composite geometry and returns the inner collection of elements.
	fn into_inner(self) -> Vec<Item>;

	fn is_empty(&self) -> bool {
		self.as_vec().is_empty()
	}

	fn len(&self) -> usize {
		self.as_vec().len()
	}

	fn push(&mut self, item: Item) {
		self.as_mut_vec().push(item);
	}

	fn first(&self) -> Option<&Item> {
		self.as_vec().first()
	}
}

/// Merges a sequence of optional bounding boxes into one.
pub fn merge_bounds(bounds: impl Iterator<Item = Option<[f64; 4]>>) -> Option<[f64; 4]> {
	bounds.flatten().reduce(|a, b| [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])])
}
