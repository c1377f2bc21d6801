use std::fmt;

use crate::walk::{Label, Result, WalkError};

/// One parsed step of a child path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named child.
	Field(String),
	/// Select an indexed child.
	Index(usize),
}

impl PathStep {
	/// Whether a child label is selected by this step.
	pub fn matches(&self, label: &Label<'_>) -> bool {
		match (self, label) {
			(Self::Field(name), Label::Name(candidate)) => name == candidate,
			(Self::Index(index), Label::Index(candidate)) => index == candidate,
			_ => false,
		}
	}
}

impl fmt::Display for PathStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Field(name) => f.write_str(name),
			Self::Index(index) => write!(f, "[{index}]"),
		}
	}
}

/// Parsed dotted child path such as `body.points[2].x`.
#[derive(Debug, Clone)]
pub struct ChildPath {
	/// Ordered steps.
	pub steps: Vec<PathStep>,
}

impl ChildPath {
	/// Parse dotted names with optional `[index]` selectors.
	///
	/// A path may open with an index (`[0].name`) when the root is an array.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || WalkError::InvalidPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && is_name_byte(bytes[idx]) {
				idx += 1;
			}

			if idx > start {
				steps.push(PathStep::Field(input[start..idx].to_owned()));
			} else if !(steps.is_empty() && bytes[idx] == b'[') {
				return Err(invalid());
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}

				let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}
}

fn is_name_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}

#[cfg(test)]
mod tests;
