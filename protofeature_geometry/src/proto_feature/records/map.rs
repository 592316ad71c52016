use super::{ListRecord, read_repeated_bool, read_repeated_uint32};
use crate::proto_feature::Depth;
use anyhow::{Context, Result, bail};
use byteorder::LE;
use protofeature_core::io::{PBF_LEN, ValueReader};
#[cfg(any(test, feature = "test"))]
use protofeature_core::{Blob, io::ValueWriterBlob};

/// A property map on the wire: for every value type a pair of parallel arrays, key ids and
/// value ids (or inline values for booleans, nested records for lists and maps).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapRecord {
	pub double_key_ids: Vec<u32>,
	pub double_value_ids: Vec<u32>,
	pub float_key_ids: Vec<u32>,
	pub float_value_ids: Vec<u32>,
	pub int32_key_ids: Vec<u32>,
	pub int32_value_ids: Vec<u32>,
	pub int64_key_ids: Vec<u32>,
	pub int64_value_ids: Vec<u32>,
	pub bool_key_ids: Vec<u32>,
	pub bool_values: Vec<bool>,
	pub string_key_ids: Vec<u32>,
	pub string_value_ids: Vec<u32>,
	pub bytes_key_ids: Vec<u32>,
	pub bytes_value_ids: Vec<u32>,
	pub list_key_ids: Vec<u32>,
	pub list_values: Vec<ListRecord>,
	pub map_key_ids: Vec<u32>,
	pub map_values: Vec<MapRecord>,
}

impl MapRecord {
	/// Reads a map; nested lists and maps are read one level deeper than `depth`.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>, depth: Depth) -> Result<MapRecord> {
		let mut m = MapRecord::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, w) => read_repeated_uint32(reader, w, &mut m.double_key_ids).context("Failed to read double key ids")?,
				(2, w) => {
					read_repeated_uint32(reader, w, &mut m.double_value_ids).context("Failed to read double value ids")?;
				}
				(3, w) => read_repeated_uint32(reader, w, &mut m.float_key_ids).context("Failed to read float key ids")?,
				(4, w) => {
					read_repeated_uint32(reader, w, &mut m.float_value_ids).context("Failed to read float value ids")?;
				}
				(5, w) => read_repeated_uint32(reader, w, &mut m.int32_key_ids).context("Failed to read sint32 key ids")?,
				(6, w) => {
					read_repeated_uint32(reader, w, &mut m.int32_value_ids).context("Failed to read sint32 value ids")?;
				}
				(7, w) => read_repeated_uint32(reader, w, &mut m.int64_key_ids).context("Failed to read sint64 key ids")?,
				(8, w) => {
					read_repeated_uint32(reader, w, &mut m.int64_value_ids).context("Failed to read sint64 value ids")?;
				}
				(9, w) => read_repeated_uint32(reader, w, &mut m.bool_key_ids).context("Failed to read bool key ids")?,
				(10, w) => read_repeated_bool(reader, w, &mut m.bool_values).context("Failed to read bool values")?,
				(11, w) => read_repeated_uint32(reader, w, &mut m.string_key_ids).context("Failed to read string key ids")?,
				(12, w) => {
					read_repeated_uint32(reader, w, &mut m.string_value_ids).context("Failed to read string value ids")?;
				}
				(13, w) => read_repeated_uint32(reader, w, &mut m.bytes_key_ids).context("Failed to read bytes key ids")?,
				(14, w) => {
					read_repeated_uint32(reader, w, &mut m.bytes_value_ids).context("Failed to read bytes value ids")?;
				}
				(15, w) => read_repeated_uint32(reader, w, &mut m.list_key_ids).context("Failed to read list key ids")?,
				(16, PBF_LEN) => m.list_values.push(
					ListRecord::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for list value")?
							.as_mut(),
						depth.descend()?,
					)
					.context("Failed to read List")?,
				),
				(17, w) => read_repeated_uint32(reader, w, &mut m.map_key_ids).context("Failed to read sub-map key ids")?,
				(18, PBF_LEN) => m.map_values.push(
					MapRecord::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for sub-map value")?
							.as_mut(),
						depth.descend()?,
					)
					.context("Failed to read Map")?,
				),
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(m)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn to_blob(&self) -> Result<Blob> {
		use super::write;

		let mut writer = ValueWriterBlob::new_le();
		write::uint32s(&mut writer, 1, &self.double_key_ids)?;
		write::uint32s(&mut writer, 2, &self.double_value_ids)?;
		write::uint32s(&mut writer, 3, &self.float_key_ids)?;
		write::uint32s(&mut writer, 4, &self.float_value_ids)?;
		write::uint32s(&mut writer, 5, &self.int32_key_ids)?;
		write::uint32s(&mut writer, 6, &self.int32_value_ids)?;
		write::uint32s(&mut writer, 7, &self.int64_key_ids)?;
		write::uint32s(&mut writer, 8, &self.int64_value_ids)?;
		write::uint32s(&mut writer, 9, &self.bool_key_ids)?;
		write::bools(&mut writer, 10, &self.bool_values)?;
		write::uint32s(&mut writer, 11, &self.string_key_ids)?;
		write::uint32s(&mut writer, 12, &self.string_value_ids)?;
		write::uint32s(&mut writer, 13, &self.bytes_key_ids)?;
		write::uint32s(&mut writer, 14, &self.bytes_value_ids)?;
		write::uint32s(&mut writer, 15, &self.list_key_ids)?;
		for list in &self.list_values {
			write::message(&mut writer, 16, &list.to_blob()?)?;
		}
		write::uint32s(&mut writer, 17, &self.map_key_ids)?;
		for map in &self.map_values {
			write::message(&mut writer, 18, &map.to_blob()?)?;
		}
		Ok(writer.into_blob())
	}
}
