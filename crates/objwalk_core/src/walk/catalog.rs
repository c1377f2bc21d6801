use crate::walk::decl::{Declarator, parse_declarator};

/// Layout and shape of one member as described by a type catalog.
#[derive(Debug, Clone, Copy)]
pub struct MemberInfo<'a> {
	/// Declared member type name (element type for arrays and pointers).
	pub type_name: &'a str,
	/// Raw declarator text, e.g. `*next` or `pos[3]`.
	pub declarator: &'a str,
	/// Byte offset of the member inside its owning type.
	pub offset: usize,
	/// Total byte size of the member storage.
	pub size: usize,
}

impl<'a> MemberInfo<'a> {
	/// Parsed pointer/array shape of the declarator.
	pub fn decl(&self) -> Declarator<'a> {
		parse_declarator(self.declarator)
	}

	/// Bare member identifier.
	pub fn name(&self) -> &'a str {
		self.decl().ident
	}

	/// Whether the member is reached through a pointer.
	pub fn is_indirect(&self) -> bool {
		self.decl().is_indirect()
	}
}

/// Live type metadata consulted by handlers during traversal.
///
/// The walker and registry never query a catalog themselves; handlers do, from
/// [`TypeHandler::recognizes`](crate::walk::TypeHandler::recognizes) and while
/// decomposing records.
pub trait TypeCatalog {
	/// Whether the catalog knows `type_name`.
	fn exists(&self, type_name: &str) -> bool;

	/// Direct base type of `type_name`, if it has one.
	fn base_of(&self, type_name: &str) -> Option<&str>;

	/// Whether `type_name` denotes a primitive scalar.
	fn is_basic(&self, type_name: &str) -> bool;

	/// Byte size of one value of `type_name`.
	fn size_of(&self, type_name: &str) -> Option<usize>;

	/// Top-level members of a record type in layout order, inherited ones first.
	fn members(&self, type_name: &str) -> Option<Vec<MemberInfo<'_>>>;

	/// Look up one member by identifier.
	fn member(&self, type_name: &str, name: &str) -> Option<MemberInfo<'_>> {
		self.members(type_name)?.into_iter().find(|member| member.name() == name)
	}

	/// Whether `type_name` is `base` or derives from it.
	fn inherits_from(&self, type_name: &str, base: &str) -> bool {
		let mut current = Some(type_name);
		while let Some(name) = current {
			if name == base {
				return self.exists(name);
			}
			current = self.base_of(name);
		}
		false
	}
}
