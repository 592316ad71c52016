use super::{DecodeError, Depth, Dictionary, DictionarySizes, FeatureCollectionRecord, decode_geometry, decode_map};
use crate::geo::{GeoCollection, GeoFeature};
use log::debug;

/// Pairs `properties[i]` with `geometries[i]` and decodes the optional headers.
pub fn assemble(record: &FeatureCollectionRecord, depth: Depth) -> Result<(GeoCollection, DictionarySizes), DecodeError> {
	let dictionary = Dictionary::new(record);
	let sizes = dictionary.sizes();
	debug!("dictionary sizes: {sizes:?}");

	if record.properties.len() != record.geometries.len() {
		return Err(DecodeError::mismatch(format!(
			"{} property maps but {} geometries",
			record.properties.len(),
			record.geometries.len()
		)));
	}

	let features = record
		.properties
		.iter()
		.zip(&record.geometries)
		.map(|(properties, geometry)| {
			Ok(GeoFeature::new(
				decode_map(properties, &dictionary, depth)?,
				decode_geometry(geometry, depth)?,
			))
		})
		.collect::<Result<Vec<_>, DecodeError>>()?;

	let headers = record
		.headers
		.as_ref()
		.map(|headers| decode_map(headers, &dictionary, depth))
		.transpose()?;

	debug!(
		"decoded {} features, headers: {}",
		features.len(),
		headers.as_ref().map_or(0, |h| h.len())
	);
	Ok((GeoCollection { features, headers }, sizes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::geo::{GeoProperties, GeoValue, Geometry};
	use crate::proto_feature::{DecoderConfig, GeometryRecord, GeometryVariantRecord, MapRecord, PointRecord};
	use pretty_assertions::assert_eq;

	fn point(x: f64, y: f64) -> GeometryRecord {
		GeometryRecord {
			variant: Some(GeometryVariantRecord::Point(PointRecord { x, y, z: 0.0 })),
			unknown_field: None,
		}
	}

	fn named(value_id: u32) -> MapRecord {
		MapRecord {
			string_key_ids: vec![0],
			string_value_ids: vec![value_id],
			..Default::default()
		}
	}

	#[test]
	fn features_and_headers() {
		let record = FeatureCollectionRecord {
			keys: vec!["name".to_string()],
			string_values: vec!["a".to_string(), "b".to_string()],
			properties: vec![named(0), named(1)],
			geometries: vec![point(1.0, 2.0), GeometryRecord::default()],
			headers: Some(named(1)),
			..Default::default()
		};
		let (collection, sizes) = assemble(&record, DecoderConfig::default().root_depth()).unwrap();
		assert_eq!(
			collection,
			GeoCollection {
				features: vec![
					GeoFeature::new(
						GeoProperties::from(vec![("name", GeoValue::from("a"))]),
						Some(Geometry::new_point([1.0, 2.0]))
					),
					GeoFeature::new(GeoProperties::from(vec![("name", GeoValue::from("b"))]), None),
				],
				headers: Some(GeoProperties::from(vec![("name", GeoValue::from("b"))])),
			}
		);
		assert_eq!(sizes.keys, 1);
		assert_eq!(sizes.strings, 2);
	}

	#[test]
	fn empty_collection() {
		let (collection, _) = assemble(&FeatureCollectionRecord::default(), DecoderConfig::default().root_depth()).unwrap();
		assert_eq!(collection, GeoCollection::default());
	}

	#[test]
	fn unequal_counts_fail() {
		let record = FeatureCollectionRecord {
			keys: vec!["name".to_string()],
			string_values: vec!["a".to_string()],
			properties: vec![named(0), named(0)],
			geometries: vec![point(0.0, 0.0)],
			..Default::default()
		};
		assert_eq!(
			assemble(&record, DecoderConfig::default().root_depth()),
			Err(DecodeError::StructuralMismatch(
				"2 property maps but 1 geometries".to_string()
			))
		);
	}

	#[test]
	fn bad_headers_fail_the_whole_decode() {
		let record = FeatureCollectionRecord {
			keys: vec!["name".to_string()],
			headers: Some(named(3)),
			..Default::default()
		};
		assert!(matches!(
			assemble(&record, DecoderConfig::default().root_depth()),
			Err(DecodeError::IndexOutOfRange { .. })
		));
	}
}
