//! JSON object type.
use crate::json::*;
use std::{
	collections::BTreeMap,
	fmt::{Debug, Display},
};

/// A JSON object backed by a `BTreeMap<String, JsonValue>`.
#[derive(Clone, Default, PartialEq)]
pub struct JsonObject(pub BTreeMap<String, JsonValue>);

impl JsonObject {
	/// Create a new, empty `JsonObject`.
	#[must_use]
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	/// Get a reference to the raw `JsonValue` for the specified key, if present.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Set the specified key to the given value, converting it into a `JsonValue`.
	pub fn set<T>(&mut self, key: &str, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.insert(key.to_owned(), JsonValue::from(value));
	}

	/// Set the specified key only if the provided `Option` is `Some`.
	pub fn set_optional<T>(&mut self, key: &str, value: Option<T>)
	where
		JsonValue: From<T>,
	{
		if let Some(v) = value {
			self.0.insert(key.to_owned(), JsonValue::from(v));
		}
	}

	/// Serialize this `JsonObject` into a compact JSON string without extra whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		let items = self
			.0
			.iter()
			.map(|(key, value)| format!("\"{}\":{}", escape_json_string(key), stringify(value)))
			.collect::<Vec<_>>();
		format!("{{{}}}", items.join(","))
	}

	/// Serialize this `JsonObject` into a single-line, pretty-printed JSON string with spaces.
	#[must_use]
	pub fn stringify_pretty_single_line(&self) -> String {
		let items = self
			.0
			.iter()
			.map(|(key, value)| format!("\"{}\": {}", escape_json_string(key), stringify_pretty_single_line(value)))
			.collect::<Vec<_>>();
		format!("{{ {} }}", items.join(", "))
	}

	/// Serialize this `JsonObject` into a multi-line, pretty-printed JSON string with indentation.
	///
	/// `max_width` controls when to wrap lines, and `depth` sets the base indentation level.
	#[must_use]
	pub fn stringify_pretty_multi_line(&self, max_width: usize, depth: usize) -> String {
		let indent = "  ".repeat(depth);
		let items = self
			.0
			.iter()
			.map(|(key, value)| {
				let key_string = format!("{}  \"{}\": ", indent, escape_json_string(key));
				format!(
					"{key_string}{}",
					stringify_pretty_multi_line(value, max_width, depth + 1, key_string.len())
				)
			})
			.collect::<Vec<_>>();
		format!("{{\n{}\n{}}}", items.join(",\n"), indent)
	}

	/// Return an iterator over key-value pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
		self.0.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Debug for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl Display for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.stringify())
	}
}

/// Convert a `Vec<(&str, T)>` into a `JsonObject`, consuming the vector of key-value pairs.
impl<T> From<Vec<(&str, T)>> for JsonObject
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonObject(
			input
				.into_iter()
				.map(|(key, value)| (key.to_string(), JsonValue::from(value)))
				.collect(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_set_and_get() {
		let mut obj = JsonObject::default();
		obj.set("key", JsonValue::from("value"));
		assert_eq!(obj.get("key"), Some(&JsonValue::from("value")));
		assert_eq!(obj.get("missing"), None);
		assert_eq!(obj.len(), 1);
	}

	#[test]
	fn test_set_optional() {
		let mut obj = JsonObject::new();
		obj.set_optional("a", Some(1));
		obj.set_optional::<i32>("b", None);
		assert_eq!(obj.stringify(), r#"{"a":1}"#);
	}

	#[test]
	fn test_keys_serialize_sorted() {
		let obj = JsonObject::from(vec![("zeta", 1), ("alpha", 2)]);
		assert_eq!(obj.stringify(), r#"{"alpha":2,"zeta":1}"#);
		assert_eq!(obj.to_string(), r#"{"alpha":2,"zeta":1}"#);
	}

	#[test]
	fn test_stringify_escapes_keys() {
		let obj = JsonObject::from(vec![("a\"b", true)]);
		assert_eq!(obj.stringify(), r#"{"a\"b":true}"#);
	}

	#[test]
	fn test_pretty_single_line() {
		let obj = JsonObject::from(vec![("key", "value"), ("n", "x")]);
		assert_eq!(obj.stringify_pretty_single_line(), r#"{ "key": "value", "n": "x" }"#);
	}
}
