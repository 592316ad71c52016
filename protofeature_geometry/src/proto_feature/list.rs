use super::{DecodeError, Depth, Dictionary, ListRecord, decode_map};
use crate::geo::GeoValue;
use log::trace;
use std::fmt::Display;

/// Tag codes of a list's `indexes` sequence; each equals the field number of the bucket it reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListTag {
	Double = 2,
	Float = 3,
	Int32 = 4,
	Int64 = 5,
	Bool = 6,
	String = 7,
	Bytes = 8,
	Map = 9,
	List = 10,
}

impl ListTag {
	const ALL: [ListTag; 9] = [
		ListTag::Double,
		ListTag::Float,
		ListTag::Int32,
		ListTag::Int64,
		ListTag::Bool,
		ListTag::String,
		ListTag::Bytes,
		ListTag::Map,
		ListTag::List,
	];

	/// Position of this tag's cursor.
	fn slot(self) -> usize {
		self as usize - 2
	}

	fn bucket_len(self, record: &ListRecord) -> usize {
		match self {
			ListTag::Double => record.double_value_ids.len(),
			ListTag::Float => record.float_value_ids.len(),
			ListTag::Int32 => record.int32_value_ids.len(),
			ListTag::Int64 => record.int64_value_ids.len(),
			ListTag::Bool => record.bool_values.len(),
			ListTag::String => record.string_value_ids.len(),
			ListTag::Bytes => record.bytes_value_ids.len(),
			ListTag::Map => record.map_values.len(),
			ListTag::List => record.list_values.len(),
		}
	}
}

impl TryFrom<u32> for ListTag {
	type Error = DecodeError;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		ListTag::ALL
			.into_iter()
			.find(|tag| *tag as u32 == value)
			.ok_or_else(|| DecodeError::mismatch(format!("unknown list tag {value}")))
	}
}

impl Display for ListTag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			ListTag::Double => "double",
			ListTag::Float => "float",
			ListTag::Int32 => "int32",
			ListTag::Int64 => "int64",
			ListTag::Bool => "bool",
			ListTag::String => "string",
			ListTag::Bytes => "bytes",
			ListTag::Map => "map",
			ListTag::List => "list",
		})
	}
}

/// Takes the element under `cursor` and advances it.
fn take<'r, T>(bucket: &'r [T], cursor: &mut usize, tag: ListTag) -> Result<&'r T, DecodeError> {
	let item = bucket.get(*cursor).ok_or_else(|| {
		DecodeError::mismatch(format!(
			"list tag sequence asks for {tag} value #{} but the bucket holds {}",
			*cursor + 1,
			bucket.len()
		))
	})?;
	*cursor += 1;
	Ok(item)
}

/// Rebuilds one list by replaying its tag sequence, one cursor per bucket.
pub fn decode_list(record: &ListRecord, dict: &Dictionary, depth: Depth) -> Result<Vec<GeoValue>, DecodeError> {
	let mut cursors = [0usize; 9];
	let mut values = Vec::with_capacity(record.indexes.len());

	for &code in &record.indexes {
		let tag = ListTag::try_from(code)?;
		let cursor = &mut cursors[tag.slot()];
		let value = match tag {
			ListTag::Double => GeoValue::Double(dict.double(*take(&record.double_value_ids, cursor, tag)?)?),
			ListTag::Float => GeoValue::Float(dict.float(*take(&record.float_value_ids, cursor, tag)?)?),
			ListTag::Int32 => GeoValue::Int32(dict.int32(*take(&record.int32_value_ids, cursor, tag)?)?),
			ListTag::Int64 => GeoValue::Int64(dict.int64(*take(&record.int64_value_ids, cursor, tag)?)?),
			ListTag::Bool => GeoValue::Bool(*take(&record.bool_values, cursor, tag)?),
			ListTag::String => {
				GeoValue::String(dict.string(*take(&record.string_value_ids, cursor, tag)?)?.to_string())
			}
			ListTag::Bytes => GeoValue::Bytes(dict.bytes(*take(&record.bytes_value_ids, cursor, tag)?)?.to_vec()),
			ListTag::Map => GeoValue::Map(decode_map(take(&record.map_values, cursor, tag)?, dict, depth.descend()?)?),
			ListTag::List => {
				GeoValue::List(decode_list(take(&record.list_values, cursor, tag)?, dict, depth.descend()?)?)
			}
		};
		values.push(value);
	}

	for tag in ListTag::ALL {
		let unused = tag.bucket_len(record).saturating_sub(cursors[tag.slot()]);
		if unused > 0 {
			trace!("ignoring {unused} unreferenced {tag} value(s) in list");
		}
	}

	Ok(values)
}
