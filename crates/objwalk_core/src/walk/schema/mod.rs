use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::walk::decl::check_declarator;
use crate::walk::{MemberInfo, Result, TypeCatalog, WalkError};

/// Byte size of a pointer member.
pub const POINTER_SIZE: usize = 8;

const DEFAULT_PRIMITIVES: &[(&str, usize)] = &[
	("char", 1),
	("uchar", 1),
	("bool", 1),
	("int8_t", 1),
	("uint8_t", 1),
	("short", 2),
	("ushort", 2),
	("int16_t", 2),
	("uint16_t", 2),
	("int", 4),
	("uint", 4),
	("int32_t", 4),
	("uint32_t", 4),
	("float", 4),
	("int64_t", 8),
	("uint64_t", 8),
	("double", 8),
];

/// Explicitly registered type catalog with packed little-endian layouts.
#[derive(Debug, Default)]
pub struct Schema {
	types: Vec<TypeDef>,
	by_name: HashMap<Box<str>, usize>,
}

/// One declared type.
#[derive(Debug)]
pub struct TypeDef {
	/// Type name.
	pub name: Box<str>,
	/// Byte size of one value.
	pub size: usize,
	/// Primitive or record shape.
	pub kind: TypeKind,
}

/// Shape of a declared type.
#[derive(Debug)]
pub enum TypeKind {
	/// Scalar with no members.
	Primitive,
	/// Record with ordered members.
	Struct(StructDef),
}

/// Record declaration.
#[derive(Debug)]
pub struct StructDef {
	/// Index of the base struct, laid out before the own fields.
	pub base: Option<usize>,
	/// Own fields in layout order.
	pub fields: Vec<FieldDef>,
}

/// One record field with a precomputed absolute offset.
#[derive(Debug)]
pub struct FieldDef {
	/// Field type name (element type for arrays and pointers).
	pub type_name: Box<str>,
	/// Declarator text.
	pub declarator: Box<str>,
	/// Byte offset from the start of the owning record.
	pub offset: usize,
	/// Total byte size.
	pub size: usize,
}

impl Schema {
	/// Parse a JSON schema document.
	pub fn from_json_str(input: &str) -> Result<Self> {
		let def: SchemaDef = serde_json::from_str(input)?;
		def.build()
	}

	/// Read and parse a JSON schema document from disk.
	pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
		let raw = std::fs::read_to_string(path)?;
		Self::from_json_str(&raw)
	}

	/// Look up a declared type by name.
	pub fn get(&self, name: &str) -> Option<&TypeDef> {
		self.by_name.get(name).and_then(|idx| self.types.get(*idx))
	}

	/// Iterate declared types in declaration order.
	pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
		self.types.iter()
	}

	/// Number of declared types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether no types are declared.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	fn struct_def(&self, name: &str) -> Option<&StructDef> {
		match &self.get(name)?.kind {
			TypeKind::Struct(item) => Some(item),
			TypeKind::Primitive => None,
		}
	}

	fn collect_fields<'s>(&'s self, item: &'s StructDef, out: &mut Vec<&'s FieldDef>) {
		if let Some(base) = item.base.and_then(|idx| self.types.get(idx))
			&& let TypeKind::Struct(base_def) = &base.kind
		{
			self.collect_fields(base_def, out);
		}
		out.extend(item.fields.iter());
	}
}

impl TypeCatalog for Schema {
	fn exists(&self, type_name: &str) -> bool {
		self.by_name.contains_key(type_name)
	}

	fn base_of(&self, type_name: &str) -> Option<&str> {
		let base = self.struct_def(type_name)?.base?;
		self.types.get(base).map(|item| item.name.as_ref())
	}

	fn is_basic(&self, type_name: &str) -> bool {
		matches!(self.get(type_name), Some(TypeDef { kind: TypeKind::Primitive, .. }))
	}

	fn size_of(&self, type_name: &str) -> Option<usize> {
		self.get(type_name).map(|item| item.size)
	}

	fn members(&self, type_name: &str) -> Option<Vec<MemberInfo<'_>>> {
		let item = self.struct_def(type_name)?;
		let mut fields = Vec::new();
		self.collect_fields(item, &mut fields);
		Some(
			fields
				.into_iter()
				.map(|field| MemberInfo {
					type_name: &field.type_name,
					declarator: &field.declarator,
					offset: field.offset,
					size: field.size,
				})
				.collect(),
		)
	}
}

/// Incremental schema construction with declare-before-use checking.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
	schema: Schema,
}

impl SchemaBuilder {
	/// Start an empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a schema preloaded with the common C scalar types.
	pub fn with_default_primitives() -> Self {
		let mut builder = Self::new();
		for (name, size) in DEFAULT_PRIMITIVES {
			builder.insert(TypeDef {
				name: (*name).into(),
				size: *size,
				kind: TypeKind::Primitive,
			});
		}
		builder
	}

	/// Declare a primitive scalar type.
	pub fn primitive(&mut self, name: &str, size: usize) -> Result<&mut Self> {
		self.check_new(name)?;
		self.insert(TypeDef {
			name: name.into(),
			size,
			kind: TypeKind::Primitive,
		});
		Ok(self)
	}

	/// Declare a record type from `(type, declarator)` pairs.
	///
	/// By-value field types and the base must already be declared; pointer
	/// fields may name any type, including the record itself.
	pub fn structure(&mut self, name: &str, base: Option<&str>, fields: &[(&str, &str)]) -> Result<&mut Self> {
		self.check_new(name)?;

		let (base_idx, base_size) = match base {
			Some(base_name) => {
				let idx = self
					.schema
					.by_name
					.get(base_name)
					.copied()
					.filter(|idx| matches!(self.schema.types[*idx].kind, TypeKind::Struct(_)))
					.ok_or_else(|| WalkError::UnknownBaseType {
						struct_name: name.to_owned(),
						base: base_name.to_owned(),
					})?;
				(Some(idx), self.schema.types[idx].size)
			}
			None => (None, 0),
		};

		let mut seen: Vec<&str> = match base {
			Some(base_name) => self
				.schema
				.members(base_name)
				.unwrap_or_default()
				.iter()
				.map(|member| member.name())
				.collect(),
			None => Vec::new(),
		};

		let mut offset = base_size;
		let mut defs = Vec::with_capacity(fields.len());
		for (type_name, declarator) in fields {
			let decl = check_declarator(declarator).ok_or_else(|| WalkError::InvalidDeclarator {
				struct_name: name.to_owned(),
				field: (*declarator).to_owned(),
			})?;
			if seen.contains(&decl.ident) {
				return Err(WalkError::DuplicateField {
					struct_name: name.to_owned(),
					field: decl.ident.to_owned(),
				});
			}
			seen.push(decl.ident);

			let element_size = if decl.is_indirect() {
				POINTER_SIZE
			} else {
				self.schema.size_of(type_name).ok_or_else(|| WalkError::UnknownFieldType {
					struct_name: name.to_owned(),
					field: (*declarator).to_owned(),
					type_name: (*type_name).to_owned(),
				})?
			};
			let size = element_size.saturating_mul(decl.count);

			defs.push(FieldDef {
				type_name: (*type_name).into(),
				declarator: (*declarator).into(),
				offset,
				size,
			});
			offset = offset.saturating_add(size);
		}

		self.insert(TypeDef {
			name: name.into(),
			size: offset,
			kind: TypeKind::Struct(StructDef { base: base_idx, fields: defs }),
		});
		Ok(self)
	}

	/// Finish construction.
	pub fn build(self) -> Schema {
		self.schema
	}

	fn check_new(&self, name: &str) -> Result<()> {
		if self.schema.by_name.contains_key(name) {
			return Err(WalkError::DuplicateType { name: name.to_owned() });
		}
		Ok(())
	}

	fn insert(&mut self, item: TypeDef) {
		let idx = self.schema.types.len();
		self.schema.by_name.entry(item.name.clone()).or_insert(idx);
		self.schema.types.push(item);
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDef {
	#[serde(default)]
	default_primitives: bool,
	#[serde(default)]
	primitives: Vec<PrimitiveDef>,
	#[serde(default)]
	structs: Vec<StructJson>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PrimitiveDef {
	name: String,
	size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StructJson {
	name: String,
	#[serde(default)]
	base: Option<String>,
	#[serde(default)]
	fields: Vec<FieldJson>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldJson {
	#[serde(rename = "type")]
	type_name: String,
	name: String,
}

impl SchemaDef {
	fn build(self) -> Result<Schema> {
		let mut builder = if self.default_primitives {
			SchemaBuilder::with_default_primitives()
		} else {
			SchemaBuilder::new()
		};

		for item in &self.primitives {
			builder.primitive(&item.name, item.size)?;
		}
		for item in &self.structs {
			let fields: Vec<(&str, &str)> = item.fields.iter().map(|field| (field.type_name.as_str(), field.name.as_str())).collect();
			builder.structure(&item.name, item.base.as_deref(), &fields)?;
		}

		Ok(builder.build())
	}
}
