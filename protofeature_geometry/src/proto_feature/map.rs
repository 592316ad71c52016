use super::{DecodeError, Depth, Dictionary, MapRecord, decode_list};
use crate::geo::{GeoProperties, GeoValue};

fn check_bucket(name: &str, key_ids: &[u32], len: usize) -> Result<(), DecodeError> {
	if key_ids.len() == len {
		Ok(())
	} else {
		Err(DecodeError::mismatch(format!(
			"map {name} bucket has {} key ids but {len} values",
			key_ids.len()
		)))
	}
}

/// Rebuilds one property map.
///
/// Buckets are applied in a fixed order: double, float, int32, int64, bool, string, bytes,
/// list, map. A key seen again in a later bucket replaces the earlier value.
pub fn decode_map(record: &MapRecord, dict: &Dictionary, depth: Depth) -> Result<GeoProperties, DecodeError> {
	check_bucket("double", &record.double_key_ids, record.double_value_ids.len())?;
	check_bucket("float", &record.float_key_ids, record.float_value_ids.len())?;
	check_bucket("int32", &record.int32_key_ids, record.int32_value_ids.len())?;
	check_bucket("int64", &record.int64_key_ids, record.int64_value_ids.len())?;
	check_bucket("bool", &record.bool_key_ids, record.bool_values.len())?;
	check_bucket("string", &record.string_key_ids, record.string_value_ids.len())?;
	check_bucket("bytes", &record.bytes_key_ids, record.bytes_value_ids.len())?;
	check_bucket("list", &record.list_key_ids, record.list_values.len())?;
	check_bucket("map", &record.map_key_ids, record.map_values.len())?;

	let mut properties = GeoProperties::new();
	let mut insert = |key_id: u32, value: GeoValue| -> Result<(), DecodeError> {
		properties.insert(dict.key(key_id)?.to_string(), value);
		Ok(())
	};

	for (&k, &v) in record.double_key_ids.iter().zip(&record.double_value_ids) {
		insert(k, GeoValue::Double(dict.double(v)?))?;
	}
	for (&k, &v) in record.float_key_ids.iter().zip(&record.float_value_ids) {
		insert(k, GeoValue::Float(dict.float(v)?))?;
	}
	for (&k, &v) in record.int32_key_ids.iter().zip(&record.int32_value_ids) {
		insert(k, GeoValue::Int32(dict.int32(v)?))?;
	}
	for (&k, &v) in record.int64_key_ids.iter().zip(&record.int64_value_ids) {
		insert(k, GeoValue::Int64(dict.int64(v)?))?;
	}
	for (&k, &v) in record.bool_key_ids.iter().zip(&record.bool_values) {
		insert(k, GeoValue::Bool(v))?;
	}
	for (&k, &v) in record.string_key_ids.iter().zip(&record.string_value_ids) {
		insert(k, GeoValue::String(dict.string(v)?.to_string()))?;
	}
	for (&k, &v) in record.bytes_key_ids.iter().zip(&record.bytes_value_ids) {
		insert(k, GeoValue::Bytes(dict.bytes(v)?.to_vec()))?;
	}
	for (&k, list) in record.list_key_ids.iter().zip(&record.list_values) {
		insert(k, GeoValue::List(decode_list(list, dict, depth.descend()?)?))?;
	}
	for (&k, map) in record.map_key_ids.iter().zip(&record.map_values) {
		insert(k, GeoValue::Map(decode_map(map, dict, depth.descend()?)?))?;
	}

	Ok(properties)
}
