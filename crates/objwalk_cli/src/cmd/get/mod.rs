use std::path::PathBuf;

use objwalk::walk::{Node, Registry, Schema, Walker};

use crate::cmd::input::read_data;
use crate::cmd::util::{emit_json, ptr_hex};
use crate::cmd::walk::root_type_known;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub data: PathBuf,
	#[arg(long = "type")]
	pub type_name: String,
	#[arg(long = "path")]
	pub path_expr: String,
	#[arg(long)]
	pub json: bool,
}

/// Resolve a dotted child path below a typed root and describe the node.
pub fn run(args: Args) -> Result<()> {
	let Args {
		schema: schema_path,
		data: data_path,
		type_name,
		path_expr,
		json,
	} = args;

	let schema = Schema::from_json_path(&schema_path)?;
	if !root_type_known(&schema, &type_name) {
		return Err(CliError::TypeNotFound { type_name });
	}
	let (_, data) = read_data(&data_path)?;

	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let root = Node::from_bytes(type_name.as_str(), &data);
	let node = walker.child_node(&root, &path_expr)?;

	let size = node.address.bytes().map(<[u8]>::len);
	let payload = GetJson {
		path: path_expr.clone(),
		type_name: node.type_name.to_string(),
		label: node.label.to_string(),
		indirect: node.indirect,
		size,
		ptr: node.pointer_value().map(ptr_hex),
	};

	if json {
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", payload.path);
	println!("type: {}", payload.type_name);
	println!("label: {}", payload.label);
	println!("indirect: {}", payload.indirect);
	println!("size: {}", payload.size.map_or_else(|| "-".to_owned(), |size| size.to_string()));
	if let Some(ptr) = &payload.ptr {
		println!("ptr: {ptr}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct GetJson {
	path: String,
	#[serde(rename = "type")]
	type_name: String,
	label: String,
	indirect: bool,
	size: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	ptr: Option<String>,
}
