use anyhow::{Context, Result};
use log::info;
use protofeature_core::{Blob, json::JsonValue};
use protofeature_geometry::{DecoderConfig, decode_feature_collection_with_config};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// ProtoFeature file to decode
	#[arg()]
	input_file: PathBuf,

	/// GeoJSON output file, omit to write to stdout
	#[arg()]
	output_file: Option<PathBuf>,

	/// indent the GeoJSON over multiple lines
	#[arg(long, short, display_order = 1)]
	pretty: bool,

	/// round coordinates to this many decimal places
	#[arg(long, value_name = "int", display_order = 1)]
	precision: Option<u8>,

	/// maximum nesting of maps, lists and geometry collections
	#[arg(long, value_name = "int", display_order = 2)]
	max_depth: Option<usize>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	info!("convert {:?}", arguments.input_file);

	let mut config = DecoderConfig::default();
	if let Some(max_depth) = arguments.max_depth {
		config.max_depth = max_depth;
	}

	let blob = Blob::load_from_file(&arguments.input_file)?;
	let collection = decode_feature_collection_with_config(blob.as_slice(), &config)
		.with_context(|| format!("Failed to decode {:?}", arguments.input_file))?;
	info!("decoded {} features", collection.features.len());

	let json = JsonValue::from(collection.to_json(arguments.precision));
	let text = if arguments.pretty {
		json.stringify_pretty()
	} else {
		json.stringify()
	};

	match &arguments.output_file {
		Some(path) => Blob::from(text).save_to_file(path)?,
		None => println!("{text}"),
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::tests::run_command;
	use crate::tools::fixtures::write_sample;
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use std::fs;
	use tempfile::tempdir;

	#[test]
	fn writes_geojson_file() -> Result<()> {
		let dir = tempdir()?;
		let input = write_sample(&dir);
		let output = dir.path().join("sample.geojson");

		run_command(vec![
			"protofeature",
			"convert",
			input.to_str().unwrap(),
			output.to_str().unwrap(),
			"--precision",
			"2",
		])?;

		assert_eq!(
			fs::read_to_string(&output)?,
			concat!(
				r#"{"features":["#,
				r#"{"geometry":{"coordinates":[13.4,52.52],"type":"Point"},"properties":{"name":"berlin"},"type":"Feature"},"#,
				r#"{"geometry":{"coordinates":[[13,52],[14,53]],"type":"LineString"},"properties":{},"type":"Feature"},"#,
				r#"{"geometry":null,"properties":{},"type":"Feature"}],"#,
				r#""headers":{"source":"survey"},"type":"FeatureCollection"}"#
			)
		);
		Ok(())
	}

	#[test]
	fn pretty_output_spans_lines() -> Result<()> {
		let dir = tempdir()?;
		let input = write_sample(&dir);
		let output = dir.path().join("sample.geojson");

		run_command(vec![
			"protofeature",
			"convert",
			"--pretty",
			input.to_str().unwrap(),
			output.to_str().unwrap(),
		])?;

		let text = fs::read_to_string(&output)?;
		assert!(text.starts_with("{\n"));
		assert!(text.contains("\"FeatureCollection\""));
		Ok(())
	}

	#[test]
	fn depth_limit_is_applied() -> Result<()> {
		use protofeature_geometry::proto_feature::{FeatureCollectionRecord, ListRecord, MapRecord};

		let dir = tempdir()?;
		let input = dir.path().join("nested.pf");
		FeatureCollectionRecord {
			keys: vec!["list".to_string()],
			properties: vec![MapRecord {
				list_key_ids: vec![0],
				list_values: vec![ListRecord::default()],
				..Default::default()
			}],
			geometries: vec![Default::default()],
			..Default::default()
		}
		.to_blob()?
		.save_to_file(&input)?;

		let err = run_command(vec![
			"protofeature",
			"convert",
			"--max-depth",
			"0",
			input.to_str().unwrap(),
			dir.path().join("out.geojson").to_str().unwrap(),
		])
		.unwrap_err();
		assert!(format!("{err:#}").contains("nesting depth exceeds the limit of 0"), "{err:#}");
		Ok(())
	}

	#[test]
	fn missing_input_fails() {
		let err = run_command(vec!["protofeature", "convert", "/does/not/exist.pf"]).unwrap_err();
		assert!(err.to_string().starts_with("Failed to read"));
	}
}
