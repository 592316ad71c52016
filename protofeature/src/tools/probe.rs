use anyhow::{Context, Result};
use log::info;
use protofeature_core::Blob;
use protofeature_geometry::{
	DecoderConfig,
	geo::{GeoCollection, merge_bounds},
	proto_feature::{DictionarySizes, decode_with_dictionary_sizes},
};
use std::{collections::BTreeMap, fmt::Write, path::PathBuf};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// ProtoFeature file to probe
	#[arg(required = true)]
	filename: PathBuf,

	/// also compute the bounding box of all geometries
	#[arg(long, short)]
	bounds: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	info!("probe {:?}", arguments.filename);

	let blob = Blob::load_from_file(&arguments.filename)?;
	let (collection, sizes) = decode_with_dictionary_sizes(blob.as_slice(), &DecoderConfig::default())
		.with_context(|| format!("Failed to decode {:?}", arguments.filename))?;

	print!("{}", summarize(&collection, &sizes, arguments.bounds)?);
	Ok(())
}

fn summarize(collection: &GeoCollection, sizes: &DictionarySizes, with_bounds: bool) -> Result<String> {
	let mut text = String::new();

	writeln!(text, "dictionaries:")?;
	for (name, len) in [
		("keys", sizes.keys),
		("doubles", sizes.doubles),
		("floats", sizes.floats),
		("int32s", sizes.int32s),
		("int64s", sizes.int64s),
		("strings", sizes.strings),
		("bytes", sizes.bytes),
	] {
		writeln!(text, "  {name}: {len}")?;
	}

	writeln!(text, "features: {}", collection.features.len())?;

	let mut geometry_types: BTreeMap<&str, usize> = BTreeMap::new();
	let mut without_geometry = 0;
	for feature in &collection.features {
		match &feature.geometry {
			Some(geometry) => *geometry_types.entry(geometry.get_type()).or_default() += 1,
			None => without_geometry += 1,
		}
	}
	writeln!(text, "geometries:")?;
	for (name, count) in &geometry_types {
		writeln!(text, "  {name}: {count}")?;
	}
	writeln!(text, "without geometry: {without_geometry}")?;

	match &collection.headers {
		Some(headers) => writeln!(text, "headers: {}", headers.keys().collect::<Vec<_>>().join(", "))?,
		None => writeln!(text, "headers: none")?,
	}

	if with_bounds {
		let bounds = merge_bounds(
			collection
				.features
				.iter()
				.map(|f| f.geometry.as_ref().and_then(|g| g.compute_bounds())),
		);
		match bounds {
			Some([x_min, y_min, x_max, y_max]) => writeln!(text, "bounds: [{x_min}, {y_min}, {x_max}, {y_max}]")?,
			None => writeln!(text, "bounds: none")?,
		}
	}

	Ok(text)
}
