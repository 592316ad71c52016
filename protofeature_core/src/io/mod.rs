//! Value readers and writers for little- and big-endian binary data, including the
//! Protocol Buffers primitives (varints, keys, packed fields) the ProtoFeature records are built from.
//!
//! # Examples
//!
//! ```rust
//! use protofeature_core::io::{ValueReader, ValueReaderSlice};
//!
//! let mut reader = ValueReaderSlice::new_le(&[0xAC, 0x02]);
//! assert_eq!(reader.read_varint().unwrap(), 300);
//! ```

mod value_reader;
mod value_reader_slice;
mod value_writer;
mod value_writer_blob;

pub use value_reader::*;
pub use value_reader_slice::*;
pub use value_writer::*;
pub use value_writer_blob::*;
