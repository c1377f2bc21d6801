use serde::Serialize;

use crate::walk::Payload;

/// Scalar value decoded from a [`Payload`] for display or collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer widened to 64 bits.
	I64(i64),
	/// Unsigned integer widened to 64 bits.
	U64(u64),
	/// Single-precision float.
	F32(f32),
	/// Double-precision float.
	F64(f64),
	/// NUL-terminated character run.
	String(Box<str>),
	/// Element of unrecognized width.
	Bytes(Vec<u8>),
	/// Inline run of several elements.
	Array(Vec<Value>),
}

impl Payload<'_> {
	/// Decode the payload bytes by element type name and width.
	///
	/// Runs of `char`/`uchar` become strings, runs of other scalars become
	/// arrays, and widths that do not divide the byte length fall back to raw
	/// bytes.
	pub fn decode(&self) -> Value {
		if self.count == 0 {
			return Value::Array(Vec::new());
		}
		if self.bytes.len() % self.count != 0 {
			return Value::Bytes(self.bytes.to_vec());
		}

		if self.count > 1 && matches!(self.type_name, "char" | "uchar") {
			let end = self.bytes.iter().position(|byte| *byte == 0).unwrap_or(self.bytes.len());
			return Value::String(String::from_utf8_lossy(&self.bytes[..end]).into_owned().into_boxed_str());
		}

		let width = self.bytes.len() / self.count;
		if width == 0 {
			return Value::Bytes(Vec::new());
		}

		let mut values: Vec<Value> = self.bytes.chunks_exact(width).map(|chunk| decode_scalar(self.type_name, chunk)).collect();
		if values.len() == 1 {
			values.pop().unwrap_or(Value::Bytes(Vec::new()))
		} else {
			Value::Array(values)
		}
	}
}

fn decode_scalar(type_name: &str, bytes: &[u8]) -> Value {
	match (type_name, bytes.len()) {
		("float", 4) => {
			let mut arr = [0_u8; 4];
			arr.copy_from_slice(bytes);
			Value::F32(f32::from_le_bytes(arr))
		}
		("double", 8) => {
			let mut arr = [0_u8; 8];
			arr.copy_from_slice(bytes);
			Value::F64(f64::from_le_bytes(arr))
		}
		("bool", 1) => Value::Bool(bytes[0] != 0),
		(_, 1) => widen_int(type_name, u64::from(bytes[0]), 8),
		(_, 2) => {
			let mut arr = [0_u8; 2];
			arr.copy_from_slice(bytes);
			widen_int(type_name, u64::from(u16::from_le_bytes(arr)), 16)
		}
		(_, 4) => {
			let mut arr = [0_u8; 4];
			arr.copy_from_slice(bytes);
			widen_int(type_name, u64::from(u32::from_le_bytes(arr)), 32)
		}
		(_, 8) => {
			let mut arr = [0_u8; 8];
			arr.copy_from_slice(bytes);
			widen_int(type_name, u64::from_le_bytes(arr), 64)
		}
		_ => Value::Bytes(bytes.to_vec()),
	}
}

fn widen_int(type_name: &str, value: u64, bits: u32) -> Value {
	if is_unsigned_type(type_name) {
		return Value::U64(value);
	}

	let signed = match bits {
		8 => (value as i8) as i64,
		16 => (value as i16) as i64,
		32 => (value as i32) as i64,
		_ => value as i64,
	};
	Value::I64(signed)
}

fn is_unsigned_type(type_name: &str) -> bool {
	type_name.starts_with('u') || type_name.contains("uint") || type_name.contains("uchar")
}
