//! The error type returned by every public decode entry point.
//!
//! The wire layer works with `anyhow` and `.context(...)` chains. Typed errors raised underneath it
//! travel through `anyhow` unchanged and are recovered by downcasting in `From<anyhow::Error>`.

use std::fmt::Display;
use thiserror::Error;

/// Names one of the collection-wide dictionaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DictionaryKind {
	Key,
	Double,
	Float,
	Int32,
	Int64,
	String,
	Bytes,
}

impl Display for DictionaryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			DictionaryKind::Key => "key",
			DictionaryKind::Double => "double",
			DictionaryKind::Float => "float",
			DictionaryKind::Int32 => "int32",
			DictionaryKind::Int64 => "int64",
			DictionaryKind::String => "string",
			DictionaryKind::Bytes => "bytes",
		})
	}
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
	#[error("index {index} is out of range for the {dictionary} dictionary of length {len}")]
	IndexOutOfRange {
		dictionary: DictionaryKind,
		index: u32,
		len: usize,
	},

	#[error("structural mismatch: {0}")]
	StructuralMismatch(String),

	#[error("geometry record carries no known variant (unknown field {field})")]
	UnrecognizedGeometryVariant { field: u32 },

	#[error("nesting depth exceeds the limit of {limit}")]
	DepthLimitExceeded { limit: usize },

	#[error("malformed protobuf data: {0}")]
	Wire(String),
}

impl DecodeError {
	pub(crate) fn mismatch(message: impl Into<String>) -> Self {
		DecodeError::StructuralMismatch(message.into())
	}
}

impl From<anyhow::Error> for DecodeError {
	fn from(err: anyhow::Error) -> Self {
		match err.downcast::<DecodeError>() {
			Ok(decode_error) => decode_error,
			Err(err) => DecodeError::Wire(format!("{err:#}")),
		}
	}
}
