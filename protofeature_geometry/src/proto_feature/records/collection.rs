use super::{GeometryRecord, MapRecord, read_repeated_f32, read_repeated_f64, read_repeated_sint32, read_repeated_sint64};
use crate::proto_feature::Depth;
use anyhow::{Context, Result, bail};
use byteorder::LE;
use protofeature_core::io::{PBF_LEN, ValueReader, ValueReaderSlice};
#[cfg(any(test, feature = "test"))]
use protofeature_core::{
	Blob,
	io::{ValueWriter, ValueWriterBlob},
};

/// The top-level message: the shared dictionaries followed by parallel property and geometry
/// records, one pair per feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollectionRecord {
	pub keys: Vec<String>,
	pub double_values: Vec<f64>,
	pub float_values: Vec<f32>,
	pub int32_values: Vec<i32>,
	pub int64_values: Vec<i64>,
	pub string_values: Vec<String>,
	pub bytes_values: Vec<Vec<u8>>,
	pub properties: Vec<MapRecord>,
	pub geometries: Vec<GeometryRecord>,
	pub headers: Option<MapRecord>,
}

impl FeatureCollectionRecord {
	pub fn from_slice(data: &[u8], depth: Depth) -> Result<FeatureCollectionRecord> {
		FeatureCollectionRecord::read(&mut ValueReaderSlice::new_le(data), depth)
	}

	pub fn read(reader: &mut dyn ValueReader<'_, LE>, depth: Depth) -> Result<FeatureCollectionRecord> {
		let mut c = FeatureCollectionRecord::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, PBF_LEN) => c.keys.push(reader.read_pbf_string().context("Failed to read key")?),
				(2, w) => read_repeated_f64(reader, w, &mut c.double_values).context("Failed to read double values")?,
				(3, w) => read_repeated_f32(reader, w, &mut c.float_values).context("Failed to read float values")?,
				(4, w) => read_repeated_sint32(reader, w, &mut c.int32_values).context("Failed to read sint32 values")?,
				(5, w) => read_repeated_sint64(reader, w, &mut c.int64_values).context("Failed to read sint64 values")?,
				(6, PBF_LEN) => c
					.string_values
					.push(reader.read_pbf_string().context("Failed to read string value")?),
				(7, PBF_LEN) => c
					.bytes_values
					.push(reader.read_pbf_blob().context("Failed to read bytes value")?.into_vec()),
				(8, PBF_LEN) => c.properties.push(
					MapRecord::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for properties")?
							.as_mut(),
						depth,
					)
					.context("Failed to read Map")?,
				),
				(9, PBF_LEN) => c.geometries.push(
					GeometryRecord::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for geometry")?
							.as_mut(),
						depth,
					)
					.context("Failed to read Geometry")?,
				),
				(10, PBF_LEN) => {
					c.headers = Some(
						MapRecord::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader for headers")?
								.as_mut(),
							depth,
						)
						.context("Failed to read headers")?,
					);
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
		for key in &self.keys {
			writer.write_pbf_key(1, PBF_LEN)?;
			writer.write_pbf_string(key).context("Failed to write key")?;
		}
		write::f64s(&mut writer, 2, &self.double_values)?;
		write::f32s(&mut writer, 3, &self.float_values)?;
		let int32_values = self.int32_values.iter().map(|v| i64::from(*v)).collect::<Vec<_>>();
		write::svarints(&mut writer, 4, &int32_values)?;
		write::svarints(&mut writer, 5, &self.int64_values)?;
		for value in &self.string_values {
			writer.write_pbf_key(6, PBF_LEN)?;
			writer.write_pbf_string(value).context("Failed to write string value")?;
		}
		for value in &self.bytes_values {
			write::message(&mut writer, 7, &Blob::from(value))?;
		}
		for map in &self.properties {
			write::message(&mut writer, 8, &map.to_blob()?)?;
		}
		for geometry in &self.geometries {
			write::message(&mut writer, 9, &geometry.to_blob()?)?;
		}
		if let Some(headers) = &self.headers {
			write::message(&mut writer, 10, &headers.to_blob()?)?;
		}
		Ok(writer.into_blob())
	}
}
