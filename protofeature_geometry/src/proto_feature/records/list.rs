use super::{MapRecord, read_repeated_bool, read_repeated_uint32};
use crate::proto_feature::Depth;
use anyhow::{Context, Result, bail};
use byteorder::LE;
use protofeature_core::io::{PBF_LEN, ValueReader};
#[cfg(any(test, feature = "test"))]
use protofeature_core::{Blob, io::ValueWriterBlob};

/// A heterogeneous list on the wire: `indexes` holds one tag per element, naming the bucket
/// (by its field number) that supplies the element's value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListRecord {
	pub indexes: Vec<u32>,
	pub double_value_ids: Vec<u32>,
	pub float_value_ids: Vec<u32>,
	pub int32_value_ids: Vec<u32>,
	pub int64_value_ids: Vec<u32>,
	pub bool_values: Vec<bool>,
	pub string_value_ids: Vec<u32>,
	pub bytes_value_ids: Vec<u32>,
	pub map_values: Vec<MapRecord>,
	pub list_values: Vec<ListRecord>,
}

impl ListRecord {
	pub fn read(reader: &mut dyn ValueReader<'_, LE>, depth: Depth) -> Result<ListRecord> {
		let mut l = ListRecord::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, w) => read_repeated_uint32(reader, w, &mut l.indexes).context("Failed to read indexes")?,
				(2, w) => read_repeated_uint32(reader, w, &mut l.double_value_ids).context("Failed to read double ids")?,
				(3, w) => read_repeated_uint32(reader, w, &mut l.float_value_ids).context("Failed to read float ids")?,
				(4, w) => read_repeated_uint32(reader, w, &mut l.int32_value_ids).context("Failed to read sint32 ids")?,
				(5, w) => read_repeated_uint32(reader, w, &mut l.int64_value_ids).context("Failed to read sint64 ids")?,
				(6, w) => read_repeated_bool(reader, w, &mut l.bool_values).context("Failed to read bool values")?,
				(7, w) => read_repeated_uint32(reader, w, &mut l.string_value_ids).context("Failed to read string ids")?,
				(8, w) => read_repeated_uint32(reader, w, &mut l.bytes_value_ids).context("Failed to read bytes ids")?,
				(9, PBF_LEN) => l.map_values.push(
					MapRecord::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for map value")?
							.as_mut(),
						depth.descend()?,
					)
					.context("Failed to read Map")?,
				),
				(10, PBF_LEN) => l.list_values.push(
					ListRecord::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for sub-list value")?
							.as_mut(),
						depth.descend()?,
					)
					.context("Failed to read List")?,
				),
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(l)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn to_blob(&self) -> Result<Blob> {
		use super::write;

		let mut writer = ValueWriterBlob::new_le();
		write::uint32s(&mut writer, 1, &self.indexes)?;
		write::uint32s(&mut writer, 2, &self.double_value_ids)?;
		write::uint32s(&mut writer, 3, &self.float_value_ids)?;
		write::uint32s(&mut writer, 4, &self.int32_value_ids)?;
		write::uint32s(&mut writer, 5, &self.int64_value_ids)?;
		write::bools(&mut writer, 6, &self.bool_values)?;
		write::uint32s(&mut writer, 7, &self.string_value_ids)?;
		write::uint32s(&mut writer, 8, &self.bytes_value_ids)?;
		for map in &self.map_values {
			write::message(&mut writer, 9, &map.to_blob()?)?;
		}
		for list in &self.list_values {
			write::message(&mut writer, 10, &list.to_blob()?)?;
		}
		Ok(writer.into_blob())
	}
}
