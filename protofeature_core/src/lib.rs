//! Shared building blocks of the ProtoFeature crates: byte buffers, value readers and
//! writers for the protobuf wire format, and a small JSON value model used for GeoJSON output.

pub mod io;

pub mod json;

pub mod types;

pub use types::*;
