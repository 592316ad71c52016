use super::read_repeated_f64;
use crate::proto_feature::Depth;
use anyhow::{Context, Result, bail};
use byteorder::LE;
use log::trace;
use protofeature_core::io::{PBF_FIXED64, PBF_LEN, ValueReader};
#[cfg(any(test, feature = "test"))]
use protofeature_core::{Blob, io::ValueWriterBlob};

/// `Point { double x = 1; double y = 2; double z = 3; }`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointRecord {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl PointRecord {
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<PointRecord> {
		let mut p = PointRecord::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, PBF_FIXED64) => p.x = reader.read_f64().context("Failed to read x")?,
				(2, PBF_FIXED64) => p.y = reader.read_f64().context("Failed to read y")?,
				(3, PBF_FIXED64) => p.z = reader.read_f64().context("Failed to read z")?,
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}
		Ok(p)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		super::write::f64_singular(&mut writer, 1, self.x)?;
		super::write::f64_singular(&mut writer, 2, self.y)?;
		super::write::f64_singular(&mut writer, 3, self.z)?;
		Ok(writer.into_blob())
	}
}

/// Flattened coordinate columns shared by every coordinate-bearing variant except `Point`.
///
/// `separators` is field 4 (`coordSeparators` for multipolygons) and `polygon_separators` field 5.
/// A variant only accepts the separator fields it declares.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateArrays {
	pub xs: Vec<f64>,
	pub ys: Vec<f64>,
	pub zs: Vec<f64>,
	pub separators: Vec<u32>,
	pub polygon_separators: Vec<u32>,
}

impl CoordinateArrays {
	/// Reads fields 1 to 3, plus `separator_fields` separator arrays starting at field 4.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>, separator_fields: u32) -> Result<CoordinateArrays> {
		let mut c = CoordinateArrays::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, w) => read_repeated_f64(reader, w, &mut c.xs).context("Failed to read xs")?,
				(2, w) => read_repeated_f64(reader, w, &mut c.ys).context("Failed to read ys")?,
				(3, w) => read_repeated_f64(reader, w, &mut c.zs).context("Failed to read zs")?,
				(4, w) if separator_fields >= 1 => {
					super::read_repeated_uint32(reader, w, &mut c.separators).context("Failed to read separators")?;
				}
				(5, w) if separator_fields >= 2 => {
					super::read_repeated_uint32(reader, w, &mut c.polygon_separators)
						.context("Failed to read polygon separators")?;
				}
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}
		Ok(c)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn to_blob(&self) -> Result<Blob> {
		use super::write;

		let mut writer = ValueWriterBlob::new_le();
		write::f64s(&mut writer, 1, &self.xs)?;
		write::f64s(&mut writer, 2, &self.ys)?;
		write::f64s(&mut writer, 3, &self.zs)?;
		write::uint32s(&mut writer, 4, &self.separators)?;
		write::uint32s(&mut writer, 5, &self.polygon_separators)?;
		Ok(writer.into_blob())
	}
}

/// Per-variant buckets of a geometry collection, field numbers 1 to 7 in variant order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryCollectionRecord {
	pub points: Vec<PointRecord>,
	pub line_strings: Vec<CoordinateArrays>,
	pub polygons: Vec<CoordinateArrays>,
	pub multi_points: Vec<CoordinateArrays>,
	pub multi_line_strings: Vec<CoordinateArrays>,
	pub multi_polygons: Vec<CoordinateArrays>,
	pub geometry_collections: Vec<GeometryCollectionRecord>,
}

impl GeometryCollectionRecord {
	pub fn read(reader: &mut dyn ValueReader<'_, LE>, depth: Depth) -> Result<GeometryCollectionRecord> {
		let mut g = GeometryCollectionRecord::default();
		while reader.has_remaining() {
			let (field, wire_type) = reader.read_pbf_key().context("Failed to read PBF key")?;
			if wire_type != PBF_LEN || !(1..=7).contains(&field) {
				bail!("Unexpected combination of field number ({field}) and wire type ({wire_type})");
			}
			let mut sub = reader
				.get_pbf_sub_reader()
				.context("Failed to get PBF sub-reader for collection member")?;
			let sub = sub.as_mut();
			match field {
				1 => g.points.push(PointRecord::read(sub).context("Failed to read Point")?),
				2 => g.line_strings.push(CoordinateArrays::read(sub, 0).context("Failed to read LineString")?),
				3 => g.polygons.push(CoordinateArrays::read(sub, 1).context("Failed to read Polygon")?),
				4 => g.multi_points.push(CoordinateArrays::read(sub, 0).context("Failed to read MultiPoint")?),
				5 => g
					.multi_line_strings
					.push(CoordinateArrays::read(sub, 1).context("Failed to read MultiLineString")?),
				6 => g
					.multi_polygons
					.push(CoordinateArrays::read(sub, 2).context("Failed to read MultiPolygon")?),
				_ => g.geometry_collections.push(
					GeometryCollectionRecord::read(sub, depth.descend()?).context("Failed to read GeometryCollection")?,
				),
			}
		}
		Ok(g)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn to_blob(&self) -> Result<Blob> {
		use super::write::message;

		let mut writer = ValueWriterBlob::new_le();
		for p in &self.points {
			message(&mut writer, 1, &p.to_blob()?)?;
		}
		for (field, bucket) in [
			(2, &self.line_strings),
			(3, &self.polygons),
			(4, &self.multi_points),
			(5, &self.multi_line_strings),
			(6, &self.multi_polygons),
		] {
			for c in bucket {
				message(&mut writer, field, &c.to_blob()?)?;
			}
		}
		for g in &self.geometry_collections {
			message(&mut writer, 7, &g.to_blob()?)?;
		}
		Ok(writer.into_blob())
	}
}

/// The payload of the `Geometry` oneof.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryVariantRecord {
	Point(PointRecord),
	LineString(CoordinateArrays),
	Polygon(CoordinateArrays),
	MultiPoint(CoordinateArrays),
	MultiLineString(CoordinateArrays),
	MultiPolygon(CoordinateArrays),
	GeometryCollection(GeometryCollectionRecord),
}

/// `Geometry { oneof { ... } }`. A oneof member must be length-delimited. Fields outside the oneof
/// are skipped; the first unknown length-delimited one is remembered so a record without any known
/// variant can be reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryRecord {
	pub variant: Option<GeometryVariantRecord>,
	pub unknown_field: Option<u32>,
}

impl GeometryRecord {
	pub fn read(reader: &mut dyn ValueReader<'_, LE>, depth: Depth) -> Result<GeometryRecord> {
		use GeometryVariantRecord::*;

		let mut g = GeometryRecord::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(field @ 1..=7, PBF_LEN) => {
					let mut sub = reader
						.get_pbf_sub_reader()
						.context("Failed to get PBF sub-reader for geometry variant")?;
					let sub = sub.as_mut();
					// a later oneof member replaces an earlier one
					g.variant = Some(match field {
						1 => Point(PointRecord::read(sub).context("Failed to read Point")?),
						2 => LineString(CoordinateArrays::read(sub, 0).context("Failed to read LineString")?),
						3 => Polygon(CoordinateArrays::read(sub, 1).context("Failed to read Polygon")?),
						4 => MultiPoint(CoordinateArrays::read(sub, 0).context("Failed to read MultiPoint")?),
						5 => MultiLineString(CoordinateArrays::read(sub, 1).context("Failed to read MultiLineString")?),
						6 => MultiPolygon(CoordinateArrays::read(sub, 2).context("Failed to read MultiPolygon")?),
						_ => GeometryCollection(
							GeometryCollectionRecord::read(sub, depth).context("Failed to read GeometryCollection")?,
						),
					});
				}
				(f @ 1..=7, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
				(field, wire_type) => {
					trace!("skipping unknown geometry field {field} (wire type {wire_type})");
					if wire_type == PBF_LEN && g.unknown_field.is_none() {
						g.unknown_field = Some(field);
					}
					reader
						.skip_pbf_field(wire_type)
						.with_context(|| format!("Failed to skip geometry field {field}"))?;
				}
			}
		}
		Ok(g)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn to_blob(&self) -> Result<Blob> {
		use super::write::message;

		let mut writer = ValueWriterBlob::new_le();
		match &self.variant {
			Some(GeometryVariantRecord::Point(p)) => message(&mut writer, 1, &p.to_blob()?)?,
			Some(GeometryVariantRecord::LineString(c)) => message(&mut writer, 2, &c.to_blob()?)?,
			Some(GeometryVariantRecord::Polygon(c)) => message(&mut writer, 3, &c.to_blob()?)?,
			Some(GeometryVariantRecord::MultiPoint(c)) => message(&mut writer, 4, &c.to_blob()?)?,
			Some(GeometryVariantRecord::MultiLineString(c)) => message(&mut writer, 5, &c.to_blob()?)?,
			Some(GeometryVariantRecord::MultiPolygon(c)) => message(&mut writer, 6, &c.to_blob()?)?,
			Some(GeometryVariantRecord::GeometryCollection(g)) => message(&mut writer, 7, &g.to_blob()?)?,
			None => {}
		}
		Ok(writer.into_blob())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::proto_feature::DecoderConfig;
	use pretty_assertions::assert_eq;
	use protofeature_core::io::{PBF_VARINT, ValueReaderSlice, ValueWriter};
	use rstest::rstest;

	fn read(blob: &Blob) -> Result<GeometryRecord> {
		GeometryRecord::read(
			&mut ValueReaderSlice::new_le(blob.as_slice()),
			DecoderConfig::default().root_depth(),
		)
	}

	#[test]
	fn round_trip_collection() {
		let record = GeometryRecord {
			variant: Some(GeometryVariantRecord::GeometryCollection(GeometryCollectionRecord {
				points: vec![PointRecord { x: 1.0, y: 2.0, z: 0.0 }],
				multi_polygons: vec![CoordinateArrays {
					xs: vec![0.0, 1.0, 1.0],
					ys: vec![0.0, 0.0, 1.0],
					separators: vec![2],
					polygon_separators: vec![1],
					..Default::default()
				}],
				geometry_collections: vec![GeometryCollectionRecord::default()],
				..Default::default()
			})),
			unknown_field: None,
		};
		assert_eq!(read(&record.to_blob().unwrap()).unwrap(), record);
	}

	#[test]
	fn empty_record_has_no_variant() {
		let record = read(&Blob::new_empty()).unwrap();
		assert_eq!(record, GeometryRecord::default());
	}

	#[test]
	fn last_variant_wins() {
		let mut writer = ValueWriterBlob::new_le();
		let point = PointRecord { x: 1.0, y: 1.0, z: 0.0 }.to_blob().unwrap();
		let line = CoordinateArrays {
			xs: vec![5.0],
			ys: vec![6.0],
			..Default::default()
		};
		super::super::write::message(&mut writer, 1, &point).unwrap();
		super::super::write::message(&mut writer, 2, &line.to_blob().unwrap()).unwrap();
		let record = read(&writer.into_blob()).unwrap();
		assert_eq!(record.variant, Some(GeometryVariantRecord::LineString(line)));
	}

	#[test]
	fn unknown_fields_are_skipped_and_remembered() {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_pbf_key(12, PBF_VARINT).unwrap();
		writer.write_varint(99).unwrap();
		writer.write_pbf_key(8, PBF_LEN).unwrap();
		writer.write_pbf_string("future").unwrap();
		writer.write_pbf_key(9, PBF_LEN).unwrap();
		writer.write_pbf_string("later").unwrap();
		let record = read(&writer.into_blob()).unwrap();
		assert_eq!(record.variant, None);
		assert_eq!(record.unknown_field, Some(8));
	}

	#[rstest]
	#[case(1, PBF_VARINT)]
	#[case(3, PBF_VARINT)]
	#[case(7, PBF_FIXED64)]
	fn variant_field_with_wrong_wire_type_is_rejected(#[case] field: u32, #[case] wire_type: u8) {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_pbf_key(field, wire_type).unwrap();
		if wire_type == PBF_VARINT {
			writer.write_varint(5).unwrap();
		} else {
			writer.write_f64(5.0).unwrap();
		}
		let err = read(&writer.into_blob()).unwrap_err();
		assert_eq!(
			err.to_string(),
			format!("Unexpected combination of field number ({field}) and wire type ({wire_type})")
		);
	}

	#[test]
	fn separator_fields_are_variant_specific() {
		let polygon_like = CoordinateArrays {
			separators: vec![1],
			..Default::default()
		}
		.to_blob()
		.unwrap();
		let mut reader = ValueReaderSlice::new_le(polygon_like.as_slice());
		assert!(CoordinateArrays::read(&mut reader, 0).is_err());
		let mut reader = ValueReaderSlice::new_le(polygon_like.as_slice());
		assert_eq!(CoordinateArrays::read(&mut reader, 1).unwrap().separators, vec![1]);
	}

	#[test]
	fn point_rejects_packed_coordinates() {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_pbf_key(1, PBF_LEN).unwrap();
		writer.write_pbf_packed_f64(&[1.0]).unwrap();
		let blob = writer.into_blob();
		assert!(PointRecord::read(&mut ValueReaderSlice::new_le(blob.as_slice())).is_err());
	}
}
