use std::path::PathBuf;

use objwalk::walk::{Schema, TypeCatalog, TypeDef, TypeKind};

use crate::cmd::util::emit_json;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long = "type")]
	pub type_name: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// Print a catalog summary, or one type's flattened members.
pub fn run(args: Args) -> Result<()> {
	let Args { schema: path, type_name, json } = args;
	let schema = Schema::from_json_path(&path)?;

	let Some(type_name) = type_name else {
		if json {
			let payload = SchemaJson {
				path: path.display().to_string(),
				types: schema.types().map(|item| type_row(&schema, item)).collect(),
			};
			emit_json(&payload);
			return Ok(());
		}

		println!("path: {}", path.display());
		println!("types: {}", schema.len());
		println!("name\tkind\tsize\tbase");
		for item in schema.types() {
			let row = type_row(&schema, item);
			println!("{}\t{}\t{}\t{}", row.name, row.kind, row.size, row.base.as_deref().unwrap_or("-"));
		}
		return Ok(());
	};

	let item = schema.get(&type_name).ok_or_else(|| CliError::TypeNotFound { type_name: type_name.clone() })?;
	let row = type_row(&schema, item);
	let members: Vec<MemberJson> = schema
		.members(&type_name)
		.unwrap_or_default()
		.into_iter()
		.map(|member| MemberJson {
			name: member.name().to_owned(),
			declarator: member.declarator.to_owned(),
			type_name: member.type_name.to_owned(),
			offset: member.offset,
			size: member.size,
			indirect: member.is_indirect(),
		})
		.collect();

	if json {
		emit_json(&TypeDetailJson {
			path: path.display().to_string(),
			type_info: row,
			members,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("type: {}", row.name);
	println!("kind: {}", row.kind);
	println!("size: {}", row.size);
	println!("base: {}", row.base.as_deref().unwrap_or("-"));
	if !members.is_empty() {
		println!("offset\tsize\ttype\tdeclarator");
		for member in &members {
			println!("{}\t{}\t{}\t{}", member.offset, member.size, member.type_name, member.declarator);
		}
	}
	Ok(())
}

fn type_row(schema: &Schema, item: &TypeDef) -> TypeJson {
	TypeJson {
		name: item.name.to_string(),
		kind: match item.kind {
			TypeKind::Primitive => "primitive",
			TypeKind::Struct(_) => "struct",
		},
		size: item.size,
		base: schema.base_of(&item.name).map(str::to_owned),
	}
}

#[derive(serde::Serialize)]
struct TypeJson {
	name: String,
	kind: &'static str,
	size: usize,
	base: Option<String>,
}

#[derive(serde::Serialize)]
struct MemberJson {
	name: String,
	declarator: String,
	#[serde(rename = "type")]
	type_name: String,
	offset: usize,
	size: usize,
	indirect: bool,
}

#[derive(serde::Serialize)]
struct SchemaJson {
	path: String,
	types: Vec<TypeJson>,
}

#[derive(serde::Serialize)]
struct TypeDetailJson {
	path: String,
	#[serde(rename = "type")]
	type_info: TypeJson,
	members: Vec<MemberJson>,
}
