use std::borrow::Cow;

use crate::walk::bytes::Cursor;
use crate::walk::decl::split_array_type;
use crate::walk::{Address, Label, Node, Payload, Result, TypeCatalog, TypeHandler, Visitor, WalkError, Walker};

/// Decomposes `Elem[N]` nodes into indexed elements.
///
/// Basic elements, and elements whose type is on the scalar allowlist, become
/// indexed leaves; other elements are dispatched as child nodes.
#[derive(Debug, Clone, Default)]
pub struct ArrayHandler {
	scalar_types: Vec<Box<str>>,
}

impl ArrayHandler {
	/// Handler with an empty scalar allowlist.
	pub fn new() -> Self {
		Self::default()
	}

	/// Emit elements of `type_name` as opaque scalar leaves.
	pub fn treat_as_scalar(mut self, type_name: &str) -> Self {
		if !self.is_allowlisted(type_name) {
			self.scalar_types.push(type_name.into());
		}
		self
	}

	fn is_allowlisted(&self, type_name: &str) -> bool {
		self.scalar_types.iter().any(|item| item.as_ref() == type_name)
	}
}

impl TypeHandler for ArrayHandler {
	fn id(&self) -> &'static str {
		"array"
	}

	fn recognizes(&self, catalog: &dyn TypeCatalog, type_name: &str) -> bool {
		split_array_type(type_name).is_some_and(|(elem, _)| catalog.exists(elem))
	}

	fn inspect<'a>(&self, walker: &Walker<'a>, node: &Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		let catalog = walker.catalog();
		let missing = || WalkError::MissingType {
			type_name: node.type_name.to_string(),
		};
		let (elem, count) = split_array_type(&node.type_name).ok_or_else(missing)?;
		let elem_size = catalog.size_of(elem).ok_or_else(missing)?;

		let bytes = node.bytes()?;
		let need = elem_size.saturating_mul(count);
		if bytes.len() < need {
			return Err(WalkError::LayoutMismatch {
				type_name: node.type_name.to_string(),
				need,
				have: bytes.len(),
			});
		}

		if visitor.pre(node) {
			let basic = catalog.is_basic(elem) || self.is_allowlisted(elem);
			let mut cursor = Cursor::new(bytes);
			for index in 0..count {
				let item = cursor.read_exact(elem_size)?;
				if basic {
					visitor.leaf(Label::Index(index), Payload::single(elem, item));
					continue;
				}

				let child = Node {
					type_name: Cow::Owned(elem.to_owned()),
					indirect: false,
					label: Label::Index(index),
					address: Address::Bytes(item),
				};
				walker.dispatch_member(child, visitor)?;
			}
		}
		visitor.post(node);
		Ok(())
	}
}
