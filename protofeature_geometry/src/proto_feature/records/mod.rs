//! Wire records of the ProtoFeature encoding.
//!
//! Each record mirrors one protobuf message and only knows how to read itself from a
//! [`ValueReader`]. Interpreting the records is left to the decoders one level up.
//! Repeated scalar fields are accepted both packed and unpacked.

mod collection;
mod geometry;
mod list;
mod map;

pub use collection::*;
pub use geometry::*;
pub use list::*;
pub use map::*;

use anyhow::{Context, Result, bail};
use byteorder::LE;
use protofeature_core::io::{PBF_FIXED32, PBF_FIXED64, PBF_LEN, PBF_VARINT, ValueReader};

pub(crate) fn read_repeated_uint32(reader: &mut dyn ValueReader<'_, LE>, wire_type: u8, values: &mut Vec<u32>) -> Result<()> {
	match wire_type {
		PBF_LEN => values.extend(reader.read_pbf_packed_uint32()?),
		PBF_VARINT => values.push(u32::try_from(reader.read_varint()?).context("uint32 value out of range")?),
		w => bail!("Unexpected wire type ({w}) for repeated uint32"),
	}
	Ok(())
}

pub(crate) fn read_repeated_sint32(reader: &mut dyn ValueReader<'_, LE>, wire_type: u8, values: &mut Vec<i32>) -> Result<()> {
	match wire_type {
		PBF_LEN => {
			for value in reader.read_pbf_packed_svarint()? {
				values.push(i32::try_from(value).context("sint32 value out of range")?);
			}
		}
		PBF_VARINT => values.push(i32::try_from(reader.read_svarint()?).context("sint32 value out of range")?),
		w => bail!("Unexpected wire type ({w}) for repeated sint32"),
	}
	Ok(())
}

pub(crate) fn read_repeated_sint64(reader: &mut dyn ValueReader<'_, LE>, wire_type: u8, values: &mut Vec<i64>) -> Result<()> {
	match wire_type {
		PBF_LEN => values.extend(reader.read_pbf_packed_svarint()?),
		PBF_VARINT => values.push(reader.read_svarint()?),
		w => bail!("Unexpected wire type ({w}) for repeated sint64"),
	}
	Ok(())
}

pub(crate) fn read_repeated_bool(reader: &mut dyn ValueReader<'_, LE>, wire_type: u8, values: &mut Vec<bool>) -> Result<()> {
	match wire_type {
		PBF_LEN => values.extend(reader.read_pbf_packed_bool()?),
		PBF_VARINT => values.push(reader.read_varint()? != 0),
		w => bail!("Unexpected wire type ({w}) for repeated bool"),
	}
	Ok(())
}

pub(crate) fn read_repeated_f64(reader: &mut dyn ValueReader<'_, LE>, wire_type: u8, values: &mut Vec<f64>) -> Result<()> {
	match wire_type {
		PBF_LEN => values.extend(reader.read_pbf_packed_f64()?),
		PBF_FIXED64 => values.push(reader.read_f64()?),
		w => bail!("Unexpected wire type ({w}) for repeated double"),
	}
	Ok(())
}

pub(crate) fn read_repeated_f32(reader: &mut dyn ValueReader<'_, LE>, wire_type: u8, values: &mut Vec<f32>) -> Result<()> {
	match wire_type {
		PBF_LEN => values.extend(reader.read_pbf_packed_f32()?),
		PBF_FIXED32 => values.push(reader.read_f32()?),
		w => bail!("Unexpected wire type ({w}) for repeated float"),
	}
	Ok(())
}

#[cfg(any(test, feature = "test"))]
pub(crate) mod write {
	//! Packed writers for building fixtures. Empty fields are omitted.

	use anyhow::{Context, Result};
	use protofeature_core::{
		Blob,
		io::{PBF_FIXED64, PBF_LEN, ValueWriter, ValueWriterBlob},
	};

	pub fn uint32s(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, values: &[u32]) -> Result<()> {
		if !values.is_empty() {
			writer.write_pbf_key(field, PBF_LEN)?;
			writer
				.write_pbf_packed_uint32(values)
				.with_context(|| format!("Failed to write field {field}"))?;
		}
		Ok(())
	}

	pub fn svarints(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, values: &[i64]) -> Result<()> {
		if !values.is_empty() {
			writer.write_pbf_key(field, PBF_LEN)?;
			writer
				.write_pbf_packed_svarint(values)
				.with_context(|| format!("Failed to write field {field}"))?;
		}
		Ok(())
	}

	pub fn bools(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, values: &[bool]) -> Result<()> {
		if !values.is_empty() {
			writer.write_pbf_key(field, PBF_LEN)?;
			writer
				.write_pbf_packed_bool(values)
				.with_context(|| format!("Failed to write field {field}"))?;
		}
		Ok(())
	}

	pub fn f64s(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, values: &[f64]) -> Result<()> {
		if !values.is_empty() {
			writer.write_pbf_key(field, PBF_LEN)?;
			writer
				.write_pbf_packed_f64(values)
				.with_context(|| format!("Failed to write field {field}"))?;
		}
		Ok(())
	}

	pub fn f32s(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, values: &[f32]) -> Result<()> {
		if !values.is_empty() {
			writer.write_pbf_key(field, PBF_LEN)?;
			writer
				.write_pbf_packed_f32(values)
				.with_context(|| format!("Failed to write field {field}"))?;
		}
		Ok(())
	}

	/// Writes a proto3 singular double, skipping the default value.
	pub fn f64_singular(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, value: f64) -> Result<()> {
		if value != 0.0 {
			writer.write_pbf_key(field, PBF_FIXED64)?;
			writer.write_f64(value)?;
		}
		Ok(())
	}

	pub fn message(writer: &mut ValueWriterBlob<byteorder::LE>, field: u32, blob: &Blob) -> Result<()> {
		writer.write_pbf_key(field, PBF_LEN)?;
		writer
			.write_pbf_blob(blob)
			.with_context(|| format!("Failed to write message field {field}"))
	}
}
