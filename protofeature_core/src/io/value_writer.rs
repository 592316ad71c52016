//! This module defines the `ValueWriter` trait for writing various types of values to different destinations.
//!
//! The writer mirrors [`ValueReader`](super::ValueReader): fixed-width numbers in a chosen byte order,
//! varints, and the Protocol Buffers helpers needed to assemble length-delimited messages.

use super::ValueWriterBlob;
use crate::Blob;
use anyhow::{Context, Result};
use byteorder::{ByteOrder, WriteBytesExt};
use std::io::Write;

/// A trait for writing values to various destinations with support for different byte orders.
pub trait ValueWriter<E: ByteOrder> {
	/// Returns a mutable reference to the underlying writer.
	fn get_writer(&mut self) -> &mut dyn Write;

	/// Returns the current write position.
	fn position(&mut self) -> Result<u64>;

	/// Returns `true` if nothing has been written yet.
	fn is_empty(&mut self) -> Result<bool> {
		Ok(self.position()? == 0)
	}

	/// Writes an unsigned variable-length integer (varint) to the writer.
	fn write_varint(&mut self, mut value: u64) -> Result<()> {
		while value >= 0x80 {
			self.get_writer().write_all(&[((value & 0x7F) as u8) | 0x80])?;
			value >>= 7;
		}
		self.get_writer().write_all(&[value as u8])?;
		Ok(())
	}

	/// Writes a signed variable-length integer (zigzag-encoded) to the writer.
	fn write_svarint(&mut self, value: i64) -> Result<()> {
		self.write_varint(((value << 1) ^ (value >> 63)) as u64)
	}

	fn write_f32(&mut self, value: f32) -> Result<()> {
		Ok(self.get_writer().write_f32::<E>(value)?)
	}

	fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.get_writer().write_f64::<E>(value)?)
	}

	/// Writes the contents of a [`Blob`] to the writer.
	fn write_blob(&mut self, blob: &Blob) -> Result<()> {
		self.get_writer().write_all(blob.as_slice())?;
		Ok(())
	}

	/// Writes a UTF-8 string as bytes to the writer.
	fn write_string(&mut self, text: &str) -> Result<()> {
		self.get_writer().write_all(text.as_bytes())?;
		Ok(())
	}

	/// Writes a Protocol Buffers (PBF) field key (field number and wire type) as a varint.
	fn write_pbf_key(&mut self, field_number: u32, wire_type: u8) -> Result<()> {
		self
			.write_varint((u64::from(field_number) << 3) | u64::from(wire_type))
			.context("Failed to write PBF key")
	}

	/// Writes a packed repeated field of unsigned 32-bit integers in Protocol Buffers format.
	fn write_pbf_packed_uint32(&mut self, data: &[u32]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		for &value in data {
			writer
				.write_varint(u64::from(value))
				.context("Failed to write varint for packed uint32")?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed uint32 blob")
	}

	/// Writes a packed repeated field of zigzag-encoded signed integers.
	fn write_pbf_packed_svarint(&mut self, data: &[i64]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		for &value in data {
			writer
				.write_svarint(value)
				.context("Failed to write svarint for packed svarint")?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed svarint blob")
	}

	/// Writes a packed repeated field of booleans.
	fn write_pbf_packed_bool(&mut self, data: &[bool]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		for &value in data {
			writer.write_varint(u64::from(value))?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed bool blob")
	}

	/// Writes a packed repeated field of little-endian 64-bit floats.
	fn write_pbf_packed_f64(&mut self, data: &[f64]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		for &value in data {
			writer.write_f64(value)?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed double blob")
	}

	/// Writes a packed repeated field of little-endian 32-bit floats.
	fn write_pbf_packed_f32(&mut self, data: &[f32]) -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		for &value in data {
			writer.write_f32(value)?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed float blob")
	}

	/// Writes a Protocol Buffers (PBF) length-delimited blob.
	fn write_pbf_blob(&mut self, blob: &Blob) -> Result<()> {
		self
			.write_varint(blob.len())
			.context("Failed to write varint for blob length")?;
		self.write_blob(blob).context("Failed to write PBF blob")
	}

	/// Writes a Protocol Buffers (PBF) length-delimited UTF-8 string.
	fn write_pbf_string(&mut self, text: &str) -> Result<()> {
		self
			.write_varint(text.len() as u64)
			.context("Failed to write varint for string length")?;
		self.write_string(text).context("Failed to write PBF string")
	}
}
