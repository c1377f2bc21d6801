use std::path::PathBuf;

use objwalk::walk::{Label, Node, Registry, SchemaBuilder, TREE_TYPE, Tree, Walker};

use crate::cmd::Result;
use crate::cmd::events::{EventLog, EventRow};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub tree: PathBuf,
	/// Branch names whose contents are skipped.
	#[arg(long)]
	pub prune: Vec<String>,
	#[arg(long)]
	pub json: bool,
}

/// Walk a hierarchical collection loaded from JSON.
pub fn run(args: Args) -> Result<()> {
	let Args { tree: path, prune, json } = args;

	let raw = std::fs::read(&path)?;
	let tree: Tree = serde_json::from_slice(&raw)?;
	let schema = SchemaBuilder::new().build();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);

	let mut log = EventLog::new(prune);
	walker.walk(&Node::from_object(TREE_TYPE, &tree).with_label(Label::Name(&tree.name)), &mut log)?;

	if json {
		emit_json(&TreeJson {
			path: path.display().to_string(),
			name: &tree.name,
			events: &log.rows,
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	for line in log.render_text() {
		println!("{line}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TreeJson<'a> {
	path: String,
	name: &'a str,
	events: &'a [EventRow],
}
