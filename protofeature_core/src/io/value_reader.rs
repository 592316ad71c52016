// This module defines the `ValueReader` trait for reading various types of values from different sources.
//
// # Overview
//
// The `ValueReader` trait provides an interface for reading integers, floating-point numbers, strings and
// Protocol Buffers primitives from a byte source. Implementations handle little-endian or big-endian byte
// order and provide sub-readers for length-delimited embedded messages.

use crate::Blob;
use anyhow::{Context, Result, bail};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// Protobuf wire type of a varint field.
pub const PBF_VARINT: u8 = 0;
/// Protobuf wire type of a 64-bit fixed-width field.
pub const PBF_FIXED64: u8 = 1;
/// Protobuf wire type of a length-delimited field (strings, bytes, messages, packed repeated).
pub const PBF_LEN: u8 = 2;
/// Protobuf wire type of a 32-bit fixed-width field.
pub const PBF_FIXED32: u8 = 5;

/// A trait for reading values from various sources with support for different byte orders.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position within the readable data.
	fn position(&mut self) -> u64;

	/// Sets the current position within the readable data.
	///
	/// # Errors
	/// Returns an error if the position lies outside the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	/// Checks if there is no data to read.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the number of bytes remaining to be read.
	fn remaining(&mut self) -> u64 {
		self.len() - self.position()
	}

	/// Checks if there are any bytes remaining to be read.
	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Reads a variable-length unsigned integer (varint) from the data.
	///
	/// # Errors
	/// Returns an error if reading fails or the varint is too long (more than 70 bits).
	fn read_varint(&mut self) -> Result<u64> {
		let mut value = 0;
		let mut shift = 0;
		loop {
			let byte = self.get_reader().read_u8()?;
			value |= (u64::from(byte) & 0x7F) << shift;
			if byte & 0x80 == 0 {
				break;
			}
			shift += 7;
			if shift >= 70 {
				bail!("Varint too long");
			}
		}
		Ok(value)
	}

	/// Reads a variable-length signed integer (zigzag-encoded varint) from the data.
	fn read_svarint(&mut self) -> Result<i64> {
		let sint_value = self.read_varint()? as i64;
		Ok((sint_value >> 1) ^ -(sint_value & 1))
	}

	/// Reads a 32-bit floating point number from the data.
	fn read_f32(&mut self) -> Result<f32> {
		Ok(self.get_reader().read_f32::<E>()?)
	}

	/// Reads a 64-bit floating point number from the data.
	fn read_f64(&mut self) -> Result<f64> {
		Ok(self.get_reader().read_f64::<E>()?)
	}

	/// Reads an unsigned 8-bit integer from the data.
	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	/// Reads an unsigned 32-bit integer from the data.
	fn read_u32(&mut self) -> Result<u32> {
		Ok(self.get_reader().read_u32::<E>()?)
	}

	/// Reads an unsigned 64-bit integer from the data.
	fn read_u64(&mut self) -> Result<u64> {
		Ok(self.get_reader().read_u64::<E>()?)
	}

	/// Reads a binary blob of the specified length.
	///
	/// # Errors
	/// Returns an error if fewer than `length` bytes remain.
	fn read_blob(&mut self, length: u64) -> Result<Blob> {
		if length > self.remaining() {
			bail!("Blob length {length} exceeds remaining data ({})", self.remaining());
		}
		let mut blob = Blob::new_sized(length as usize);
		self.get_reader().read_exact(blob.as_mut_slice())?;
		Ok(blob)
	}

	/// Reads a UTF-8 encoded string of the specified length.
	///
	/// # Errors
	/// Returns an error if reading fails or if the bytes are not valid UTF-8.
	fn read_string(&mut self, length: u64) -> Result<String> {
		let blob = self.read_blob(length)?;
		Ok(String::from_utf8(blob.into_vec())?)
	}

	/// Reads a Protocol Buffers key consisting of a field number and wire type.
	///
	/// # Returns
	/// A tuple `(field_number, wire_type)`.
	fn read_pbf_key(&mut self) -> Result<(u32, u8)> {
		let value = self.read_varint().context("Failed to read varint for PBF key")?;
		Ok(((value >> 3) as u32, (value & 0x07) as u8))
	}

	/// Returns a sub-reader limited to the given length.
	///
	/// This is useful for reading nested data structures or embedded messages.
	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b;

	/// Returns a sub-reader for a Protocol Buffers embedded message.
	///
	/// Reads the length as a varint, then returns a sub-reader limited to that length.
	fn get_pbf_sub_reader<'b>(&'b mut self) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b,
	{
		let length = self
			.read_varint()
			.context("Failed to read varint for sub-reader length")?;
		self.get_sub_reader(length).context("Failed to get sub-reader")
	}

	/// Reads a packed repeated field of unsigned 32-bit integers from a Protocol Buffers message.
	fn read_pbf_packed_uint32(&mut self) -> Result<Vec<u32>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed uint32")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			let value = reader
				.read_varint()
				.context("Failed to read varint for packed uint32")?;
			values.push(u32::try_from(value).context("uint32 value out of range")?);
		}
		drop(reader);
		Ok(values)
	}

	/// Reads a packed repeated field of zigzag-encoded signed integers (`sint32`/`sint64`).
	fn read_pbf_packed_svarint(&mut self) -> Result<Vec<i64>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed svarint")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			values.push(
				reader
					.read_svarint()
					.context("Failed to read svarint for packed svarint")?,
			);
		}
		drop(reader);
		Ok(values)
	}

	/// Reads a packed repeated field of booleans.
	fn read_pbf_packed_bool(&mut self) -> Result<Vec<bool>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed bool")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			values.push(reader.read_varint().context("Failed to read varint for packed bool")? != 0);
		}
		drop(reader);
		Ok(values)
	}

	/// Reads a packed repeated field of 64-bit floats (`double`).
	///
	/// # Errors
	/// Returns an error if the payload length is not a multiple of 8.
	fn read_pbf_packed_f64(&mut self) -> Result<Vec<f64>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed double")?;
		if !reader.len().is_multiple_of(8) {
			bail!("Packed double field has length {}, not a multiple of 8", reader.len());
		}
		let mut values = Vec::with_capacity((reader.len() / 8) as usize);
		while reader.has_remaining() {
			values.push(reader.read_f64().context("Failed to read f64 for packed double")?);
		}
		drop(reader);
		Ok(values)
	}

	/// Reads a packed repeated field of 32-bit floats (`float`).
	///
	/// # Errors
	/// Returns an error if the payload length is not a multiple of 4.
	fn read_pbf_packed_f32(&mut self) -> Result<Vec<f32>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed float")?;
		if !reader.len().is_multiple_of(4) {
			bail!("Packed float field has length {}, not a multiple of 4", reader.len());
		}
		let mut values = Vec::with_capacity((reader.len() / 4) as usize);
		while reader.has_remaining() {
			values.push(reader.read_f32().context("Failed to read f32 for packed float")?);
		}
		drop(reader);
		Ok(values)
	}

	/// Reads a Protocol Buffers string field.
	fn read_pbf_string(&mut self) -> Result<String> {
		let length = self.read_varint().context("Failed to read varint for string length")?;
		self.read_string(length).context("Failed to read PBF string")
	}

	/// Reads a Protocol Buffers binary blob field.
	fn read_pbf_blob(&mut self) -> Result<Blob> {
		let length = self.read_varint().context("Failed to read varint for blob length")?;
		self.read_blob(length).context("Failed to read PBF blob")
	}

	/// Skips over the payload of a field whose key has already been read.
	///
	/// # Errors
	/// Returns an error for unsupported wire types (the deprecated groups 3 and 4) or truncated data.
	fn skip_pbf_field(&mut self, wire_type: u8) -> Result<()> {
		match wire_type {
			PBF_VARINT => {
				self.read_varint().context("Failed to skip varint field")?;
			}
			PBF_FIXED64 => {
				self.read_u64().context("Failed to skip 64-bit field")?;
			}
			PBF_LEN => {
				self.read_pbf_blob().context("Failed to skip length-delimited field")?;
			}
			PBF_FIXED32 => {
				self.read_u32().context("Failed to skip 32-bit field")?;
			}
			w => bail!("Unsupported wire type {w}"),
		}
		Ok(())
	}
}
