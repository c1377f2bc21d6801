use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WalkError>;

/// Errors produced while building catalogs and walking object trees.
#[derive(Debug, Error)]
pub enum WalkError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema JSON could not be parsed.
	#[error("schema parse: {0}")]
	SchemaParse(#[from] serde_json::Error),
	/// A type name was declared twice in one schema.
	#[error("schema duplicate type {name}")]
	DuplicateType {
		/// Repeated type name.
		name: String,
	},
	/// A struct field references a type that was not declared before it.
	#[error("schema field {field} on {struct_name} uses undeclared type {type_name}")]
	UnknownFieldType {
		/// Struct being declared.
		struct_name: String,
		/// Field declarator text.
		field: String,
		/// Missing field type name.
		type_name: String,
	},
	/// A struct names a base that is not a declared struct.
	#[error("schema struct {struct_name} has undeclared base {base}")]
	UnknownBaseType {
		/// Struct being declared.
		struct_name: String,
		/// Missing base type name.
		base: String,
	},
	/// A struct field declarator is not `ident`, `*ident`, `ident[N]`, or `(*ident)()`.
	#[error("schema field {field:?} on {struct_name} is not a valid declarator")]
	InvalidDeclarator {
		/// Struct being declared.
		struct_name: String,
		/// Field declarator text.
		field: String,
	},
	/// A struct declares the same field identifier twice.
	#[error("schema struct {struct_name} declares field {field} twice")]
	DuplicateField {
		/// Struct being declared.
		struct_name: String,
		/// Repeated field identifier.
		field: String,
	},
	/// A handler claimed a type the catalog does not describe.
	#[error("catalog has no type {type_name}")]
	MissingType {
		/// Type name the handler expected to find.
		type_name: String,
	},
	/// A record member has a by-value type the catalog does not describe.
	#[error("catalog has no type {member_type} for member {member} on {type_name}")]
	MissingMemberType {
		/// Owning type name.
		type_name: String,
		/// Member identifier.
		member: String,
		/// Undescribed member type name.
		member_type: String,
	},
	/// Node address kind does not match what the handler decodes.
	#[error("node {type_name} has {got} address, handler expected {expected}")]
	AddressMismatch {
		/// Node type name.
		type_name: String,
		/// Address kind the handler requires.
		expected: &'static str,
		/// Address kind carried by the node.
		got: &'static str,
	},
	/// Node bytes are shorter than the catalog layout requires.
	#[error("layout mismatch in {type_name}: need={need}, have={have}")]
	LayoutMismatch {
		/// Node type name.
		type_name: String,
		/// Bytes required by the catalog layout.
		need: usize,
		/// Bytes carried by the node.
		have: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Handler dispatch nested deeper than the configured ceiling.
	#[error("walk depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Child path expression syntax is invalid.
	#[error("invalid child path: {path}")]
	InvalidPath {
		/// Original path string.
		path: String,
	},
	/// Child path segment did not resolve to a child node.
	#[error("child not found: {segment} (in {path})")]
	ChildNotFound {
		/// Segment that failed to resolve.
		segment: String,
		/// Full path being resolved.
		path: String,
	},
	/// Child path segment names a scalar leaf rather than a node.
	#[error("child {segment} is a scalar leaf (in {path})")]
	ChildIsLeaf {
		/// Segment that named a leaf.
		segment: String,
		/// Full path being resolved.
		path: String,
	},
	/// Child path would continue through an indirection.
	#[error("child {segment} is reached through an indirection (in {path})")]
	IndirectStep {
		/// Segment naming the indirect node.
		segment: String,
		/// Full path being resolved.
		path: String,
	},
	/// No registered handler recognizes a node that must be decomposed.
	#[error("no handler for type {type_name}")]
	UnknownType {
		/// Unrecognized type name.
		type_name: String,
	},
}
