use std::borrow::Cow;

use crate::walk::decl::array_type_name;
use crate::walk::{Address, Label, Node, Payload, Result, TypeCatalog, TypeHandler, Visitor, WalkError, Walker};

/// Decomposes catalog record types into their top-level members.
///
/// Basic members (and members whose type is on the scalar allowlist) become
/// named leaves, inline runs included. Pointer members and by-value records are
/// handed back to the walker as child nodes; inline arrays of records surface
/// as a single `Elem[N]` node.
#[derive(Debug, Clone, Default)]
pub struct RecordHandler {
	scalar_types: Vec<Box<str>>,
}

impl RecordHandler {
	/// Handler with an empty scalar allowlist.
	pub fn new() -> Self {
		Self::default()
	}

	/// Treat `type_name` as an opaque scalar instead of decomposing it.
	pub fn treat_as_scalar(mut self, type_name: &str) -> Self {
		if !self.is_allowlisted(type_name) {
			self.scalar_types.push(type_name.into());
		}
		self
	}

	/// Allowlisted scalar type names.
	pub fn scalar_types(&self) -> impl Iterator<Item = &str> {
		self.scalar_types.iter().map(|item| item.as_ref())
	}

	fn is_allowlisted(&self, type_name: &str) -> bool {
		self.scalar_types.iter().any(|item| item.as_ref() == type_name)
	}

	fn is_scalar(&self, catalog: &dyn TypeCatalog, type_name: &str) -> bool {
		catalog.is_basic(type_name) || self.is_allowlisted(type_name)
	}

	fn inspect_members<'a>(&self, walker: &Walker<'a>, node: &Node<'a>, bytes: &'a [u8], visitor: &mut dyn Visitor<'a>) -> Result<()> {
		let catalog = walker.catalog();
		let members = catalog.members(&node.type_name).ok_or_else(|| WalkError::MissingType {
			type_name: node.type_name.to_string(),
		})?;

		for member in members {
			let decl = member.decl();
			let end = member.offset.saturating_add(member.size);
			let storage = bytes.get(member.offset..end).ok_or_else(|| WalkError::LayoutMismatch {
				type_name: node.type_name.to_string(),
				need: end,
				have: bytes.len(),
			})?;

			if decl.is_indirect() {
				let child = Node {
					type_name: Cow::Borrowed(member.type_name),
					indirect: true,
					label: Label::Name(decl.ident),
					address: Address::Bytes(storage),
				};
				walker.dispatch_member(child, visitor)?;
				continue;
			}

			if self.is_scalar(catalog, member.type_name) {
				visitor.leaf(
					Label::Name(decl.ident),
					Payload {
						type_name: member.type_name,
						count: decl.count,
						bytes: storage,
					},
				);
				continue;
			}

			if !catalog.exists(member.type_name) {
				return Err(WalkError::MissingMemberType {
					type_name: node.type_name.to_string(),
					member: decl.ident.to_owned(),
					member_type: member.type_name.to_owned(),
				});
			}

			let type_name = if decl.is_array() {
				Cow::Owned(array_type_name(member.type_name, decl.count))
			} else {
				Cow::Borrowed(member.type_name)
			};
			let child = Node {
				type_name,
				indirect: false,
				label: Label::Name(decl.ident),
				address: Address::Bytes(storage),
			};
			walker.dispatch_member(child, visitor)?;
		}

		Ok(())
	}
}

impl TypeHandler for RecordHandler {
	fn id(&self) -> &'static str {
		"record"
	}

	fn recognizes(&self, catalog: &dyn TypeCatalog, type_name: &str) -> bool {
		catalog.exists(type_name) && !self.is_scalar(catalog, type_name)
	}

	fn inspect<'a>(&self, walker: &Walker<'a>, node: &Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		let bytes = node.bytes()?;
		let need = walker.catalog().size_of(&node.type_name).ok_or_else(|| WalkError::MissingType {
			type_name: node.type_name.to_string(),
		})?;
		if bytes.len() < need {
			return Err(WalkError::LayoutMismatch {
				type_name: node.type_name.to_string(),
				need,
				have: bytes.len(),
			});
		}

		if visitor.pre(node) {
			self.inspect_members(walker, node, bytes, visitor)?;
		}
		visitor.post(node);
		Ok(())
	}
}
