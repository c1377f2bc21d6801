#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "objwalk", about = "Walk schema-described object trees through pluggable handlers")]
struct Cli {
	/// Log filter used when `RUST_LOG` is unset.
	#[arg(long, global = true, default_value = "warn")]
	log_level: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Summarize a schema or one of its types.
	Schema(cmd::schema::Args),
	/// Walk a data file from a typed root.
	Walk(cmd::walk::Args),
	/// Resolve a child path below a typed root.
	Get(cmd::get::Args),
	/// Walk a hierarchical collection loaded from JSON.
	Tree(cmd::tree::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::Result<()> {
	let cli = Cli::parse();
	init_tracing(&cli.log_level);

	match cli.command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Walk(args) => cmd::walk::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::Tree(args) => cmd::tree::run(args),
	}
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
