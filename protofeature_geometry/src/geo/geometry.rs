use super::*;
use protofeature_core::json::{JsonObject, JsonValue};
use std::fmt::Debug;

/// One of the seven GeoJSON geometry variants.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
	GeometryCollection(Vec<Geometry>),
}

impl Geometry {
	pub fn new_point<T>(value: T) -> Self
	where
		Coordinates: From<T>,
	{
		Self::Point(PointGeometry::from(value))
	}
	pub fn new_line_string<T>(value: Vec<T>) -> Self
	where
		Coordinates: From<T>,
	{
		Self::LineString(LineStringGeometry::from(value))
	}
	pub fn new_polygon<T>(value: Vec<Vec<T>>) -> Self
	where
		Coordinates: From<T>,
	{
		Self::Polygon(PolygonGeometry::from(value))
	}
	pub fn new_multi_point<T>(value: Vec<T>) -> Self
	where
		Coordinates: From<T>,
	{
		Self::MultiPoint(MultiPointGeometry::from(value))
	}
	pub fn new_multi_line_string<T>(value: Vec<Vec<T>>) -> Self
	where
		Coordinates: From<T>,
	{
		Self::MultiLineString(MultiLineStringGeometry::from(value))
	}
	pub fn new_multi_polygon<T>(value: Vec<Vec<Vec<T>>>) -> Self
	where
		Coordinates: From<T>,
	{
		Self::MultiPolygon(MultiPolygonGeometry::from(value))
	}

	/// The GeoJSON `type` name of this geometry.
	#[must_use]
	pub fn get_type(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::MultiPolygon(_) => "MultiPolygon",
			Geometry::GeometryCollection(_) => "GeometryCollection",
		}
	}

	/// Bounding box over all coordinates, including those of nested collection members.
	#[must_use]
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Geometry::Point(g) => g.compute_bounds(),
			Geometry::LineString(g) => g.compute_bounds(),
			Geometry::Polygon(g) => g.compute_bounds(),
			Geometry::MultiPoint(g) => g.compute_bounds(),
			Geometry::MultiLineString(g) => g.compute_bounds(),
			Geometry::MultiPolygon(g) => g.compute_bounds(),
			Geometry::GeometryCollection(geometries) => merge_bounds(geometries.iter().map(Geometry::compute_bounds)),
		}
	}

	/// Renders `{type, coordinates}`, or `{type, geometries}` for a collection.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonObject {
		let mut obj = JsonObject::new();
		obj.set("type", self.get_type());
		match self {
			Geometry::Point(g) => obj.set("coordinates", g.to_coord_json(precision)),
			Geometry::LineString(g) => obj.set("coordinates", g.to_coord_json(precision)),
			Geometry::Polygon(g) => obj.set("coordinates", g.to_coord_json(precision)),
			Geometry::MultiPoint(g) => obj.set("coordinates", g.to_coord_json(precision)),
			Geometry::MultiLineString(g) => obj.set("coordinates", g.to_coord_json(precision)),
			Geometry::MultiPolygon(g) => obj.set("coordinates", g.to_coord_json(precision)),
			Geometry::GeometryCollection(geometries) => obj.set(
				"geometries",
				JsonValue::from(geometries.iter().map(|g| g.to_json(precision)).collect::<Vec<_>>()),
			),
		}
		obj
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::Polygon(g) => ("Polygon", g),
			Geometry::MultiPoint(g) => ("MultiPoint", g),
			Geometry::MultiLineString(g) => ("MultiLineString", g),
			Geometry::MultiPolygon(g) => ("MultiPolygon", g),
			Geometry::GeometryCollection(g) => ("GeometryCollection", g),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[rstest]
	#[case(Geometry::new_point([1.0, 2.0]), "Point")]
	#[case(Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]]), "LineString")]
	#[case(Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]), "Polygon")]
	#[case(Geometry::new_multi_point(vec![[0.0, 0.0]]), "MultiPoint")]
	#[case(Geometry::new_multi_line_string(vec![vec![[0.0, 0.0]]]), "MultiLineString")]
	#[case(Geometry::new_multi_polygon(vec![vec![vec![[0.0, 0.0]]]]), "MultiPolygon")]
	#[case(Geometry::GeometryCollection(vec![]), "GeometryCollection")]
	fn get_type(#[case] geometry: Geometry, #[case] expected: &str) {
		assert_eq!(geometry.get_type(), expected);
		assert_eq!(geometry.to_json(None).get("type"), Some(&JsonValue::from(expected)));
	}

	#[test]
	fn point_to_json() {
		let json = Geometry::new_point([1.5, -2.0]).to_json(None);
		assert_eq!(json.stringify(), r#"{"coordinates":[1.5,-2],"type":"Point"}"#);
	}

	#[test]
	fn collection_to_json_nests_geometries() {
		let collection = Geometry::GeometryCollection(vec![
			Geometry::new_point([1.0, 2.0]),
			Geometry::GeometryCollection(vec![Geometry::new_line_string(vec![[0.0, 0.0], [3.0, 3.0]])]),
		]);
		assert_eq!(
			collection.to_json(None).stringify(),
			concat!(
				r#"{"geometries":[{"coordinates":[1,2],"type":"Point"},"#,
				r#"{"geometries":[{"coordinates":[[0,0],[3,3]],"type":"LineString"}],"type":"GeometryCollection"}],"#,
				r#""type":"GeometryCollection"}"#
			)
		);
		assert_eq!(collection.compute_bounds(), Some([0.0, 0.0, 3.0, 3.0]));
	}

	#[test]
	fn empty_collection_has_no_bounds() {
		assert_eq!(Geometry::GeometryCollection(vec![]).compute_bounds(), None);
	}

	#[test]
	fn debug_format() {
		assert_eq!(format!("{:?}", Geometry::new_point([1.0, 2.0])), "Point([1.0, 2.0])");
	}
}
