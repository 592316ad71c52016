use super::*;
use protofeature_core::json::{JsonObject, JsonValue};

/// A feature pairs a property map with an optional geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub properties: GeoProperties,
	pub geometry: Option<Geometry>,
}

impl GeoFeature {
	#[must_use]
	pub fn new(properties: GeoProperties, geometry: Option<Geometry>) -> Self {
		Self { properties, geometry }
	}

	/// Renders `{type: "Feature", properties, geometry}`; a missing geometry becomes `null`.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> JsonObject {
		let mut obj = JsonObject::new();
		obj.set("type", "Feature");
		obj.set("properties", self.properties.to_json());
		obj.set("geometry", self.geometry.as_ref().map(|g| g.to_json(precision)));
		obj
	}
}
