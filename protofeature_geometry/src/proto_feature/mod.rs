//! Decoder for ProtoFeature, a protobuf encoding of GeoJSON feature collections.
//!
//! Property keys and non-boolean scalar values live once in collection-wide dictionaries and are
//! referenced by index. Geometries store coordinates as flattened columns plus separator indices.
//!
//! Decoding runs in two stages: the record readers parse the raw protobuf messages, then the decoders
//! rebuild property maps, lists and geometries against the [`Dictionary`].
//!
//! ```rust
//! use protofeature_geometry::decode_feature_collection;
//!
//! let collection = decode_feature_collection(&[]).unwrap();
//! assert!(collection.features.is_empty());
//! assert_eq!(
//!   collection.to_json(None).stringify(),
//!   r#"{"features":[],"type":"FeatureCollection"}"#
//! );
//! ```

mod collection;
mod config;
mod dictionary;
mod error;
mod geometry;
mod list;
mod map;
mod records;

pub use collection::assemble;
pub use config::*;
pub use dictionary::*;
pub use error::*;
pub use geometry::decode_geometry;
pub use list::{ListTag, decode_list};
pub use map::decode_map;
pub use records::{
	CoordinateArrays, FeatureCollectionRecord, GeometryCollectionRecord, GeometryRecord, GeometryVariantRecord,
	ListRecord, MapRecord, PointRecord,
};

use crate::geo::GeoCollection;
use anyhow::Context;

/// Decodes a complete feature collection with the default configuration.
pub fn decode_feature_collection(data: &[u8]) -> Result<GeoCollection, DecodeError> {
	decode_feature_collection_with_config(data, &DecoderConfig::default())
}

pub fn decode_feature_collection_with_config(data: &[u8], config: &DecoderConfig) -> Result<GeoCollection, DecodeError> {
	decode_with_dictionary_sizes(data, config).map(|(collection, _)| collection)
}

/// Like [`decode_feature_collection_with_config`], additionally reporting the dictionary sizes.
pub fn decode_with_dictionary_sizes(
	data: &[u8],
	config: &DecoderConfig,
) -> Result<(GeoCollection, DictionarySizes), DecodeError> {
	let record =
		FeatureCollectionRecord::from_slice(data, config.root_depth()).context("Failed to read FeatureCollection")?;
	assemble(&record, config.root_depth())
}
