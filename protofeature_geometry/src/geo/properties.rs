use super::GeoValue;
use protofeature_core::json::JsonObject;
use std::{
	collections::{BTreeMap, btree_map},
	fmt::Debug,
};

/// A property map with unique string keys. Inserting an existing key replaces its value.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties {
	properties: BTreeMap<String, GeoValue>,
}

impl GeoProperties {
	#[must_use]
	pub fn new() -> GeoProperties {
		GeoProperties {
			properties: BTreeMap::new(),
		}
	}
	pub fn insert(&mut self, key: String, value: GeoValue) {
		self.properties.insert(key, value);
	}
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&GeoValue> {
		self.properties.get(key)
	}
	pub fn iter(&self) -> btree_map::Iter<'_, String, GeoValue> {
		self.properties.iter()
	}
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.properties.keys().map(String::as_str)
	}
	#[must_use]
	pub fn len(&self) -> usize {
		self.properties.len()
	}
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	#[must_use]
	pub fn to_json(&self) -> JsonObject {
		JsonObject(self.properties.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, GeoValue);
	type IntoIter = btree_map::IntoIter<String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.into_iter()
	}
}

impl<'a> IntoIterator for &'a GeoProperties {
	type Item = (&'a String, &'a GeoValue);
	type IntoIter = btree_map::Iter<'a, String, GeoValue>;
	fn into_iter(self) -> Self::IntoIter {
		self.properties.iter()
	}
}

impl From<Vec<(&str, GeoValue)>> for GeoProperties {
	fn from(value: Vec<(&str, GeoValue)>) -> Self {
		GeoProperties {
			properties: value.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
		}
	}
}

impl FromIterator<(String, GeoValue)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, GeoValue)>>(iter: T) -> Self {
		GeoProperties {
			properties: BTreeMap::from_iter(iter),
		}
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.properties.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_overwrites_existing_key() {
		let mut props = GeoProperties::new();
		props.insert("name".to_string(), GeoValue::from("first"));
		props.insert("name".to_string(), GeoValue::from(2));
		assert_eq!(props.len(), 1);
		assert_eq!(props.get("name"), Some(&GeoValue::from(2)));
	}

	#[test]
	fn to_json_sorts_keys() {
		let props = GeoProperties::from(vec![("b", GeoValue::from(1)), ("a", GeoValue::from(true))]);
		assert_eq!(props.to_json().stringify(), r#"{"a":true,"b":1}"#);
		assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
	}

	#[test]
	fn debug_format() {
		let props = GeoProperties::from(vec![("k", GeoValue::from("v"))]);
		assert_eq!(format!("{props:?}"), r#"{"k": String("v")}"#);
	}

	#[test]
	fn from_iterator() {
		let props: GeoProperties = vec![("x".to_string(), GeoValue::from(1.5))].into_iter().collect();
		assert!(!props.is_empty());
		assert_eq!((&props).into_iter().count(), 1);
	}
}
