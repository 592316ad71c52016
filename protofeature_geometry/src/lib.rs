//! Geometry model and ProtoFeature decoder.
//!
//! [`geo`] holds the GeoJSON data model (features, properties, the seven geometry variants) and its
//! JSON rendering. [`proto_feature`] turns a dictionary-compressed ProtoFeature buffer into that model.

pub mod geo;
pub mod proto_feature;

pub use proto_feature::{DecodeError, DecoderConfig, decode_feature_collection, decode_feature_collection_with_config};
