pub mod events;
pub mod get;
pub mod input;
pub mod schema;
pub mod tree;
pub mod util;
pub mod walk;

#[cfg(test)]
mod test_support;

use thiserror::Error;

/// Command result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `objwalk` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Catalog, traversal, or schema failure.
	#[error(transparent)]
	Walk(#[from] objwalk::walk::WalkError),
	/// Filesystem or decoder IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input JSON document could not be parsed.
	#[error("json parse: {0}")]
	Json(#[from] serde_json::Error),
	/// zstd stream inflated beyond the configured limit.
	#[error("decompressed data exceeds limit ({limit} bytes)")]
	DecompressedTooLarge {
		/// Maximum accepted decompressed size.
		limit: usize,
	},
	/// Requested root type is not declared in the schema.
	#[error("schema has no type {type_name}")]
	TypeNotFound {
		/// Requested type name.
		type_name: String,
	},
}
