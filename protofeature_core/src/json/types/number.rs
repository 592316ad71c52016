//! `From` implementations creating `JsonValue::Number` from Rust numeric types.

use super::JsonValue;

impl From<f64> for JsonValue {
	fn from(input: f64) -> Self {
		JsonValue::Number(input)
	}
}

/// Implement `From<Number>` for `JsonValue` for types with lossless f64 conversion.
macro_rules! impl_from_number_lossless {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(f64::from(input))
				}
			}
		)+
	};
}

/// Implement `From<Number>` for `JsonValue` for types without lossless f64 conversion.
macro_rules! impl_from_number_lossy {
	($($t:ty),+ $(,)?) => {
		$(
			impl From<$t> for JsonValue {
				fn from(input: $t) -> Self {
					JsonValue::Number(input as f64)
				}
			}
		)+
	};
}

impl_from_number_lossless!(f32, u8, u16, u32, i8, i16, i32);
impl_from_number_lossy!(u64, usize, i64, isize);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(JsonValue::from(1.5f32), 1.5)]
	#[case(JsonValue::from(255u8), 255.0)]
	#[case(JsonValue::from(-7i32), -7.0)]
	#[case(JsonValue::from(4_294_967_295u32), 4_294_967_295.0)]
	#[case(JsonValue::from(-9_007_199_254_740_992i64), -9_007_199_254_740_992.0)]
	#[case(JsonValue::from(12usize), 12.0)]
	fn converts_to_number(#[case] value: JsonValue, #[case] expected: f64) {
		assert_eq!(value, JsonValue::Number(expected));
	}
}
