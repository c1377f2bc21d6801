use std::io::Read;
use std::path::Path;

use crate::cmd::{CliError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression detected on a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw bytes.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Read a data file, inflating it when it starts with the zstd magic.
pub fn read_data(path: &Path) -> Result<(Compression, Vec<u8>)> {
	let raw = std::fs::read(path)?;
	let (compression, bytes) = decode_bytes(raw, MAX_DECOMPRESSED_BYTES)?;
	tracing::debug!(path = %path.display(), compression = compression.as_str(), len = bytes.len(), "data loaded");
	Ok((compression, bytes))
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw, limit)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

fn decode_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(CliError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
