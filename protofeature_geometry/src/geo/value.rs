use super::GeoProperties;
use protofeature_core::json::JsonValue;
use std::fmt::Debug;

/// A property value: one of the scalar types of the encoding, or a nested list or map.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Bytes(Vec<u8>),
	Double(f64),
	Float(f32),
	Int32(i32),
	Int64(i64),
	List(Vec<GeoValue>),
	Map(GeoProperties),
	String(String),
}

impl GeoValue {
	/// Converts the value into JSON. Byte strings become arrays of numbers.
	#[must_use]
	pub fn to_json(&self) -> JsonValue {
		match self {
			GeoValue::Bool(v) => JsonValue::from(*v),
			GeoValue::Bytes(v) => JsonValue::from(v),
			GeoValue::Double(v) => JsonValue::from(*v),
			GeoValue::Float(v) => JsonValue::from(*v),
			GeoValue::Int32(v) => JsonValue::from(*v),
			GeoValue::Int64(v) => JsonValue::from(*v),
			GeoValue::List(list) => JsonValue::from(list.iter().map(GeoValue::to_json).collect::<Vec<_>>()),
			GeoValue::Map(map) => JsonValue::from(map.to_json()),
			GeoValue::String(v) => JsonValue::from(v),
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
			Self::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
			Self::List(v) => f.debug_tuple("List").field(v).finish(),
			Self::Map(v) => f.debug_tuple("Map").field(v).finish(),
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		GeoValue::Int32(value)
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int64(value)
	}
}

impl From<f32> for GeoValue {
	fn from(value: f32) -> Self {
		GeoValue::Float(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<Vec<u8>> for GeoValue {
	fn from(value: Vec<u8>) -> Self {
		GeoValue::Bytes(value)
	}
}

impl From<Vec<GeoValue>> for GeoValue {
	fn from(value: Vec<GeoValue>) -> Self {
		GeoValue::List(value)
	}
}

impl From<GeoProperties> for GeoValue {
	fn from(value: GeoProperties) -> Self {
		GeoValue::Map(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(GeoValue::from(true), "true")]
	#[case(GeoValue::from(vec![1u8, 255]), "[1,255]")]
	#[case(GeoValue::from(1.25), "1.25")]
	#[case(GeoValue::from(0.5f32), "0.5")]
	#[case(GeoValue::from(-7), "-7")]
	#[case(GeoValue::from(1_i64 << 40), "1099511627776")]
	#[case(GeoValue::from("a\"b"), r#""a\"b""#)]
	#[case(GeoValue::from(f64::NAN), "null")]
	fn scalar_to_json(#[case] value: GeoValue, #[case] expected: &str) {
		assert_eq!(value.to_json().stringify(), expected);
	}

	#[test]
	fn nested_to_json() {
		let inner = GeoProperties::from(vec![("k", GeoValue::from(1))]);
		let value = GeoValue::from(vec![GeoValue::from("x"), GeoValue::from(inner), GeoValue::from(vec![GeoValue::from(false)])]);
		assert_eq!(value.to_json().stringify(), r#"["x",{"k":1},[false]]"#);
	}

	#[test]
	fn debug_format() {
		assert_eq!(format!("{:?}", GeoValue::from(3)), "Int32(3)");
		assert_eq!(format!("{:?}", GeoValue::from(vec![GeoValue::from("a")])), "List([String(\"a\")])");
	}
}
