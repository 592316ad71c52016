use super::{GeoFeature, GeoProperties};
use protofeature_core::json::{JsonObject, JsonValue};

/// A decoded feature collection with its optional header properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
	pub headers: Option<GeoProperties>,
}

impl GeoCollection {
	#[must_use]
	pub fn from(features: Vec<GeoFeature>) -> Self {
		Self { features, headers: None }
	}

	/// Renders `{type: "FeatureCollection", features, headers?}`.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonObject {
		let mut obj = JsonObject::new();
		obj.set("type", JsonValue::from("FeatureCollection"));
		let features_json = JsonValue::from(self.features.iter().map(|f| f.to_json(precision)).collect::<Vec<_>>());
		obj.set("features", features_json);
		obj.set_optional("headers", self.headers.as_ref().map(GeoProperties::to_json));
		obj
	}
}
