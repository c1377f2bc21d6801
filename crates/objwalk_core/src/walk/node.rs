use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use crate::walk::bytes::Cursor;
use crate::walk::{Result, WalkError};

/// Name or position identifying a child within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label<'a> {
	/// Record member name.
	Name(&'a str),
	/// Zero-based array position.
	Index(usize),
}

impl Label<'_> {
	/// Member name, when this is a named label.
	pub fn as_name(&self) -> Option<&str> {
		match *self {
			Self::Name(name) => Some(name),
			Self::Index(_) => None,
		}
	}

	/// Array position, when this is an indexed label.
	pub fn as_index(&self) -> Option<usize> {
		match *self {
			Self::Name(_) => None,
			Self::Index(index) => Some(index),
		}
	}
}

impl fmt::Display for Label<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Name(name) => f.write_str(name),
			Self::Index(index) => write!(f, "[{index}]"),
		}
	}
}

/// Non-owning reference to the externally owned storage behind a node.
#[derive(Clone, Copy)]
pub enum Address<'a> {
	/// Raw memory laid out as the catalog describes.
	Bytes(&'a [u8]),
	/// Borrowed in-memory object, downcast by the handler that recognizes it.
	Object(&'a (dyn Any + 'static)),
}

impl<'a> Address<'a> {
	/// Stable label for the address kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bytes(_) => "bytes",
			Self::Object(_) => "object",
		}
	}

	/// Raw bytes, when this is a byte address.
	pub fn bytes(&self) -> Option<&'a [u8]> {
		match *self {
			Self::Bytes(bytes) => Some(bytes),
			Self::Object(_) => None,
		}
	}

	/// Downcast an object address to `T`.
	pub fn downcast<T: Any>(&self) -> Option<&'a T> {
		match *self {
			Self::Bytes(_) => None,
			Self::Object(object) => object.downcast_ref::<T>(),
		}
	}
}

impl fmt::Debug for Address<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bytes(bytes) => write!(f, "Bytes(len={})", bytes.len()),
			Self::Object(_) => f.write_str("Object(..)"),
		}
	}
}

/// Handle to one point in the object graph, valid for one traversal.
#[derive(Debug, Clone)]
pub struct Node<'a> {
	/// Declared type name.
	pub type_name: Cow<'a, str>,
	/// Whether the node is reached through a pointer-like relationship.
	pub indirect: bool,
	/// Name or index within the parent.
	pub label: Label<'a>,
	/// Borrowed storage.
	pub address: Address<'a>,
}

impl<'a> Node<'a> {
	/// Root node over raw bytes.
	pub fn from_bytes(type_name: impl Into<Cow<'a, str>>, bytes: &'a [u8]) -> Self {
		Self {
			type_name: type_name.into(),
			indirect: false,
			label: Label::Name(""),
			address: Address::Bytes(bytes),
		}
	}

	/// Root node over a borrowed in-memory object.
	pub fn from_object(type_name: impl Into<Cow<'a, str>>, object: &'a (dyn Any + 'static)) -> Self {
		Self {
			type_name: type_name.into(),
			indirect: false,
			label: Label::Name(""),
			address: Address::Object(object),
		}
	}

	/// Replace the label.
	pub fn with_label(mut self, label: Label<'a>) -> Self {
		self.label = label;
		self
	}

	/// Mark the node as reached through an indirection.
	pub fn indirect(mut self, indirect: bool) -> Self {
		self.indirect = indirect;
		self
	}

	/// Raw bytes of a byte-addressed node, or an address-kind error.
	pub fn bytes(&self) -> Result<&'a [u8]> {
		self.address.bytes().ok_or_else(|| WalkError::AddressMismatch {
			type_name: self.type_name.to_string(),
			expected: "bytes",
			got: self.address.kind(),
		})
	}

	/// Borrowed object of type `T`, or an address-kind error.
	pub fn object<T: Any>(&self) -> Result<&'a T> {
		self.address.downcast::<T>().ok_or_else(|| WalkError::AddressMismatch {
			type_name: self.type_name.to_string(),
			expected: std::any::type_name::<T>(),
			got: self.address.kind(),
		})
	}

	/// Stored pointer value of an indirect byte-addressed node.
	pub fn pointer_value(&self) -> Option<u64> {
		if !self.indirect {
			return None;
		}
		Cursor::new(self.address.bytes()?).read_u64_le().ok()
	}
}

/// One untyped scalar (or inline run of scalars) handed to a visitor.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
	/// Declared element type name.
	pub type_name: &'a str,
	/// Number of elements in `bytes`.
	pub count: usize,
	/// Raw little-endian element storage.
	pub bytes: &'a [u8],
}

impl<'a> Payload<'a> {
	/// Payload holding a single element.
	pub fn single(type_name: &'a str, bytes: &'a [u8]) -> Self {
		Self { type_name, count: 1, bytes }
	}
}
