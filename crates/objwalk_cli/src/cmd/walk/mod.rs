use std::path::PathBuf;

use objwalk::walk::{Node, RecordHandler, Registry, Schema, TypeCatalog, WalkOptions, Walker, split_array_type};

use crate::cmd::events::{EventLog, EventRow};
use crate::cmd::input::read_data;
use crate::cmd::util::emit_json;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub data: PathBuf,
	#[arg(long = "type")]
	pub type_name: String,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Record types reported as opaque scalars instead of decomposed.
	#[arg(long = "scalar")]
	pub scalar_types: Vec<String>,
	/// Labels of nodes whose children are skipped.
	#[arg(long)]
	pub prune: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Walk a data file from a typed root and print every callback.
pub fn run(args: Args) -> Result<()> {
	let Args {
		schema: schema_path,
		data: data_path,
		type_name,
		max_depth,
		scalar_types,
		prune,
		json,
	} = args;

	let schema = Schema::from_json_path(&schema_path)?;
	if !root_type_known(&schema, &type_name) {
		return Err(CliError::TypeNotFound { type_name });
	}
	let (compression, data) = read_data(&data_path)?;

	let record = scalar_types.iter().fold(RecordHandler::new(), |handler, name| handler.treat_as_scalar(name));
	let registry = Registry::with_record_handler(record);
	let mut options = WalkOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}
	let walker = Walker::new(&registry, &schema).with_options(options);

	let mut log = EventLog::new(prune);
	walker.walk(&Node::from_bytes(type_name.as_str(), &data), &mut log)?;

	if json {
		emit_json(&WalkJson {
			schema: schema_path.display().to_string(),
			data: data_path.display().to_string(),
			compression: compression.as_str(),
			type_name: &type_name,
			events: &log.rows,
		});
		return Ok(());
	}

	println!("schema: {}", schema_path.display());
	println!("data: {} ({} bytes, {})", data_path.display(), data.len(), compression.as_str());
	for line in log.render_text() {
		println!("{line}");
	}
	Ok(())
}

/// Declared type, or an inline array of one.
pub(crate) fn root_type_known(schema: &Schema, type_name: &str) -> bool {
	let elem = split_array_type(type_name).map_or(type_name, |(elem, _)| elem);
	schema.exists(elem)
}

#[derive(serde::Serialize)]
struct WalkJson<'a> {
	schema: String,
	data: String,
	compression: &'static str,
	#[serde(rename = "type")]
	type_name: &'a str,
	events: &'a [EventRow],
}
