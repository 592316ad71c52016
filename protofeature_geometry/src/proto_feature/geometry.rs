//! Rebuilds geometries from flattened coordinate columns and separator indices.
//!
//! A separator `s` ends a part after coordinate `s` (exclusive end `s + 1`); `n` separators
//! yield `n + 1` parts, the last one running to the end of the coordinates.

use super::{
	CoordinateArrays, DecodeError, Depth, GeometryCollectionRecord, GeometryRecord, GeometryVariantRecord, PointRecord,
};
use crate::geo::*;
use log::trace;
use std::ops::Range;

/// Decodes a geometry record; `None` when no variant is set.
pub fn decode_geometry(record: &GeometryRecord, depth: Depth) -> Result<Option<Geometry>, DecodeError> {
	match (&record.variant, record.unknown_field) {
		(Some(variant), _) => decode_variant(variant, depth).map(Some),
		(None, Some(field)) => Err(DecodeError::UnrecognizedGeometryVariant { field }),
		(None, None) => Ok(None),
	}
}

fn decode_variant(variant: &GeometryVariantRecord, depth: Depth) -> Result<Geometry, DecodeError> {
	Ok(match variant {
		GeometryVariantRecord::Point(p) => Geometry::Point(decode_point(p)),
		GeometryVariantRecord::LineString(c) => Geometry::LineString(decode_line_string(c)?),
		GeometryVariantRecord::Polygon(c) => Geometry::Polygon(decode_polygon(c)?),
		GeometryVariantRecord::MultiPoint(c) => Geometry::MultiPoint(decode_multi_point(c)?),
		GeometryVariantRecord::MultiLineString(c) => Geometry::MultiLineString(decode_multi_line_string(c)?),
		GeometryVariantRecord::MultiPolygon(c) => Geometry::MultiPolygon(decode_multi_polygon(c)?),
		GeometryVariantRecord::GeometryCollection(g) => Geometry::GeometryCollection(decode_collection(g, depth)?),
	})
}

/// The third component is kept only when it is set and non-zero.
fn decode_point(record: &PointRecord) -> PointGeometry {
	if record.z != 0.0 && !record.z.is_nan() {
		PointGeometry::new(Coordinates::new_3d(record.x, record.y, record.z))
	} else {
		PointGeometry::new(Coordinates::new(record.x, record.y))
	}
}

/// Zips the coordinate columns; an empty `zs` means two-dimensional coordinates.
fn decode_coordinates(record: &CoordinateArrays) -> Result<Vec<Coordinates>, DecodeError> {
	let CoordinateArrays { xs, ys, zs, .. } = record;
	if xs.len() != ys.len() {
		return Err(DecodeError::mismatch(format!(
			"{} x values but {} y values",
			xs.len(),
			ys.len()
		)));
	}
	if zs.is_empty() {
		return Ok(xs.iter().zip(ys).map(|(&x, &y)| Coordinates::new(x, y)).collect());
	}
	if zs.len() != xs.len() {
		return Err(DecodeError::mismatch(format!(
			"{} z values for {} coordinates",
			zs.len(),
			xs.len()
		)));
	}
	Ok(xs
		.iter()
		.zip(ys)
		.zip(zs)
		.map(|((&x, &y), &z)| Coordinates::new_3d(x, y, z))
		.collect())
}

/// Splits `0..len` at the given separators.
fn partition(len: usize, separators: &[u32], what: &str) -> Result<Vec<Range<usize>>, DecodeError> {
	let mut ranges = Vec::with_capacity(separators.len() + 1);
	let mut start = 0;
	for &separator in separators {
		let end = separator as usize + 1;
		if end < start {
			return Err(DecodeError::mismatch(format!("{what} separators decrease at {separator}")));
		}
		if end > len {
			return Err(DecodeError::mismatch(format!(
				"{what} separator {separator} points past the end of {len} entries"
			)));
		}
		ranges.push(start..end);
		start = end;
	}
	ranges.push(start..len);
	Ok(ranges)
}

/// Groups `count` rings by cumulative exclusive ring-count boundaries. The last group is implicit.
fn group_rings(count: usize, boundaries: &[u32]) -> Result<Vec<Range<usize>>, DecodeError> {
	let mut ranges = Vec::with_capacity(boundaries.len() + 1);
	let mut start = 0;
	for &boundary in boundaries {
		let end = boundary as usize;
		if end < start {
			return Err(DecodeError::mismatch(format!("polygon separators decrease at {boundary}")));
		}
		if end > count {
			return Err(DecodeError::mismatch(format!(
				"polygon separator {boundary} points past the end of {count} rings"
			)));
		}
		ranges.push(start..end);
		start = end;
	}
	ranges.push(start..count);
	Ok(ranges)
}

fn closed_ring(coordinates: &[Coordinates]) -> RingGeometry {
	let mut ring = RingGeometry(coordinates.to_vec());
	if ring.is_empty() {
		trace!("empty ring");
	}
	ring.close();
	ring
}

fn decode_line_string(record: &CoordinateArrays) -> Result<LineStringGeometry, DecodeError> {
	Ok(LineStringGeometry(decode_coordinates(record)?))
}

fn decode_polygon(record: &CoordinateArrays) -> Result<PolygonGeometry, DecodeError> {
	let coordinates = decode_coordinates(record)?;
	let rings = partition(coordinates.len(), &record.separators, "ring")?;
	Ok(PolygonGeometry(
		rings.into_iter().map(|r| closed_ring(&coordinates[r])).collect(),
	))
}

fn decode_multi_point(record: &CoordinateArrays) -> Result<MultiPointGeometry, DecodeError> {
	Ok(MultiPointGeometry(
		decode_coordinates(record)?.into_iter().map(PointGeometry::new).collect(),
	))
}

fn decode_multi_line_string(record: &CoordinateArrays) -> Result<MultiLineStringGeometry, DecodeError> {
	let coordinates = decode_coordinates(record)?;
	let lines = partition(coordinates.len(), &record.separators, "line")?;
	Ok(MultiLineStringGeometry(
		lines
			.into_iter()
			.map(|r| LineStringGeometry(coordinates[r].to_vec()))
			.collect(),
	))
}

fn decode_multi_polygon(record: &CoordinateArrays) -> Result<MultiPolygonGeometry, DecodeError> {
	let coordinates = decode_coordinates(record)?;
	let rings = partition(coordinates.len(), &record.separators, "ring")?
		.into_iter()
		.map(|r| closed_ring(&coordinates[r]))
		.collect::<Vec<_>>();
	let groups = group_rings(rings.len(), &record.polygon_separators)?;
	Ok(MultiPolygonGeometry(
		groups
			.into_iter()
			.map(|g| PolygonGeometry(rings[g].to_vec()))
			.collect(),
	))
}

/// Members come out bucket by bucket in variant order, not in their original interleaving.
fn decode_collection(record: &GeometryCollectionRecord, depth: Depth) -> Result<Vec<Geometry>, DecodeError> {
	let mut geometries = Vec::new();
	geometries.extend(record.points.iter().map(|p| Geometry::Point(decode_point(p))));
	for c in &record.line_strings {
		geometries.push(Geometry::LineString(decode_line_string(c)?));
	}
	for c in &record.polygons {
		geometries.push(Geometry::Polygon(decode_polygon(c)?));
	}
	for c in &record.multi_points {
		geometries.push(Geometry::MultiPoint(decode_multi_point(c)?));
	}
	for c in &record.multi_line_strings {
		geometries.push(Geometry::MultiLineString(decode_multi_line_string(c)?));
	}
	for c in &record.multi_polygons {
		geometries.push(Geometry::MultiPolygon(decode_multi_polygon(c)?));
	}
	for g in &record.geometry_collections {
		geometries.push(Geometry::GeometryCollection(decode_collection(g, depth.descend()?)?));
	}
	Ok(geometries)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::proto_feature::DecoderConfig;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn coords(points: &[[f64; 2]]) -> CoordinateArrays {
		CoordinateArrays {
			xs: points.iter().map(|p| p[0]).collect(),
			ys: points.iter().map(|p| p[1]).collect(),
			..Default::default()
		}
	}

	fn decode(variant: GeometryVariantRecord) -> Result<Option<Geometry>, DecodeError> {
		let record = GeometryRecord {
			variant: Some(variant),
			unknown_field: None,
		};
		decode_geometry(&record, DecoderConfig::default().root_depth())
	}

	#[rstest]
	#[case(0.0, "[1,2]")]
	#[case(3.0, "[1,2,3]")]
	#[case(f64::NAN, "[1,2]")]
	fn point_third_component(#[case] z: f64, #[case] expected: &str) {
		let point = decode_point(&PointRecord { x: 1.0, y: 2.0, z });
		assert_eq!(point.to_coord_json(None).stringify(), expected);
	}

	#[test]
	fn line_string_keeps_3d_coordinates() {
		let record = CoordinateArrays {
			xs: vec![0.0, 1.0],
			ys: vec![0.0, 1.0],
			zs: vec![0.0, 5.0],
			..Default::default()
		};
		assert_eq!(
			decode(GeometryVariantRecord::LineString(record)).unwrap(),
			Some(Geometry::new_line_string(vec![[0.0, 0.0, 0.0], [1.0, 1.0, 5.0]]))
		);
	}

	#[test]
	fn polygon_shell_without_separators_is_closed() {
		let record = coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
		assert_eq!(
			decode(GeometryVariantRecord::Polygon(record)).unwrap(),
			Some(Geometry::new_polygon(vec![vec![
				[0.0, 0.0],
				[1.0, 0.0],
				[1.0, 1.0],
				[0.0, 1.0],
				[0.0, 0.0]
			]]))
		);
	}

	#[test]
	fn polygon_with_hole() {
		let mut record = coords(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [1.0, 1.0], [2.0, 1.0]]);
		record.separators = vec![3];
		assert_eq!(
			decode(GeometryVariantRecord::Polygon(record)).unwrap(),
			Some(Geometry::new_polygon(vec![
				vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
				vec![[1.0, 1.0], [2.0, 1.0], [1.0, 1.0]],
			]))
		);
	}

	#[test]
	fn polygon_trailing_separator_gives_empty_ring() {
		let mut record = coords(&[[0.0, 0.0], [1.0, 0.0]]);
		record.separators = vec![1];
		let Some(Geometry::Polygon(polygon)) = decode(GeometryVariantRecord::Polygon(record)).unwrap() else {
			panic!("expected a polygon");
		};
		assert_eq!(polygon.0.len(), 2);
		assert!(polygon.0[1].is_empty());
	}

	#[test]
	fn multi_point() {
		let record = coords(&[[1.0, 2.0], [3.0, 4.0]]);
		assert_eq!(
			decode(GeometryVariantRecord::MultiPoint(record)).unwrap(),
			Some(Geometry::new_multi_point(vec![[1.0, 2.0], [3.0, 4.0]]))
		);
	}

	#[test]
	fn multi_line_string_stays_open() {
		let mut record = coords(&[[0.0, 0.0], [1.0, 1.0], [5.0, 5.0], [6.0, 6.0], [7.0, 7.0]]);
		record.separators = vec![1];
		assert_eq!(
			decode(GeometryVariantRecord::MultiLineString(record)).unwrap(),
			Some(Geometry::new_multi_line_string(vec![
				vec![[0.0, 0.0], [1.0, 1.0]],
				vec![[5.0, 5.0], [6.0, 6.0], [7.0, 7.0]],
			]))
		);
	}

	#[test]
	fn multi_line_string_without_separators() {
		let record = coords(&[[0.0, 0.0], [1.0, 1.0]]);
		assert_eq!(
			decode(GeometryVariantRecord::MultiLineString(record)).unwrap(),
			Some(Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 1.0]]]))
		);
	}

	#[test]
	fn multi_polygon_groups_rings() {
		let mut record = coords(&[
			[0.0, 0.0],
			[1.0, 0.0],
			[1.0, 1.0],
			[5.0, 5.0],
			[9.0, 5.0],
			[9.0, 9.0],
			[6.0, 6.0],
			[7.0, 6.0],
			[7.0, 7.0],
		]);
		record.separators = vec![2, 5];
		record.polygon_separators = vec![1];
		assert_eq!(
			decode(GeometryVariantRecord::MultiPolygon(record)).unwrap(),
			Some(Geometry::new_multi_polygon(vec![
				vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
				vec![
					vec![[5.0, 5.0], [9.0, 5.0], [9.0, 9.0], [5.0, 5.0]],
					vec![[6.0, 6.0], [7.0, 6.0], [7.0, 7.0], [6.0, 6.0]],
				],
			]))
		);
	}

	#[test]
	fn multi_polygon_without_polygon_separators_is_one_polygon() {
		let mut record = coords(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [1.0, 1.0], [2.0, 1.0], [2.0, 2.0]]);
		record.separators = vec![2];
		let Some(Geometry::MultiPolygon(multi)) = decode(GeometryVariantRecord::MultiPolygon(record)).unwrap() else {
			panic!("expected a multipolygon");
		};
		assert_eq!(multi.0.len(), 1);
		assert_eq!(multi.0[0].0.len(), 2);
	}

	#[test]
	fn collection_orders_members_by_variant() {
		let record = GeometryCollectionRecord {
			geometry_collections: vec![GeometryCollectionRecord {
				points: vec![PointRecord { x: 4.0, y: 4.0, z: 0.0 }],
				..Default::default()
			}],
			multi_polygons: vec![coords(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]])],
			multi_line_strings: vec![CoordinateArrays {
				separators: vec![0],
				..coords(&[[5.0, 5.0], [6.0, 6.0], [7.0, 7.0]])
			}],
			multi_points: vec![coords(&[[3.0, 3.0]])],
			polygons: vec![coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]])],
			line_strings: vec![coords(&[[0.0, 0.0], [2.0, 2.0]])],
			points: vec![PointRecord { x: 1.0, y: 1.0, z: 0.0 }],
		};
		assert_eq!(
			decode(GeometryVariantRecord::GeometryCollection(record)).unwrap(),
			Some(Geometry::GeometryCollection(vec![
				Geometry::new_point([1.0, 1.0]),
				Geometry::new_line_string(vec![[0.0, 0.0], [2.0, 2.0]]),
				Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]),
				Geometry::new_multi_point(vec![[3.0, 3.0]]),
				Geometry::new_multi_line_string(vec![vec![[5.0, 5.0]], vec![[6.0, 6.0], [7.0, 7.0]]]),
				Geometry::new_multi_polygon(vec![vec![vec![[0.0, 0.0], [2.0, 0.0], [0.0, 2.0], [0.0, 0.0]]]]),
				Geometry::GeometryCollection(vec![Geometry::new_point([4.0, 4.0])]),
			]))
		);
	}

	#[test]
	fn nested_collection_respects_depth_limit() {
		let record = GeometryRecord {
			variant: Some(GeometryVariantRecord::GeometryCollection(GeometryCollectionRecord {
				geometry_collections: vec![GeometryCollectionRecord::default()],
				..Default::default()
			})),
			unknown_field: None,
		};
		assert_eq!(
			decode_geometry(&record, DecoderConfig { max_depth: 0 }.root_depth()),
			Err(DecodeError::DepthLimitExceeded { limit: 0 })
		);
	}

	#[test]
	fn no_variant_is_none() {
		assert_eq!(
			decode_geometry(&GeometryRecord::default(), DecoderConfig::default().root_depth()),
			Ok(None)
		);
	}

	#[test]
	fn unknown_variant_is_an_error() {
		let record = GeometryRecord {
			variant: None,
			unknown_field: Some(8),
		};
		assert_eq!(
			decode_geometry(&record, DecoderConfig::default().root_depth()),
			Err(DecodeError::UnrecognizedGeometryVariant { field: 8 })
		);
	}

	#[rstest]
	#[case(vec![0.0, 1.0], vec![0.0], vec![])]
	#[case(vec![0.0, 1.0], vec![0.0, 1.0], vec![2.0])]
	fn mismatched_columns(#[case] xs: Vec<f64>, #[case] ys: Vec<f64>, #[case] zs: Vec<f64>) {
		let record = CoordinateArrays {
			xs,
			ys,
			zs,
			..Default::default()
		};
		assert!(matches!(
			decode(GeometryVariantRecord::LineString(record)),
			Err(DecodeError::StructuralMismatch(_))
		));
	}

	#[rstest]
	#[case(vec![5])]
	#[case(vec![2, 1])]
	fn malformed_separators(#[case] separators: Vec<u32>) {
		let mut record = coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
		record.separators = separators;
		assert!(matches!(
			decode(GeometryVariantRecord::Polygon(record)),
			Err(DecodeError::StructuralMismatch(_))
		));
	}

	#[test]
	fn polygon_separators_past_ring_count() {
		let mut record = coords(&[[0.0, 0.0], [1.0, 0.0]]);
		record.polygon_separators = vec![2];
		assert_eq!(
			decode(GeometryVariantRecord::MultiPolygon(record)),
			Err(DecodeError::StructuralMismatch(
				"polygon separator 2 points past the end of 1 rings".to_string()
			))
		);
	}

	#[test]
	fn partition_ranges() {
		assert_eq!(partition(6, &[3], "ring").unwrap(), vec![0..4, 4..6]);
		assert_eq!(partition(3, &[], "ring").unwrap(), vec![0..3]);
		assert_eq!(group_rings(3, &[1]).unwrap(), vec![0..1, 1..3]);
	}
}
