mod bytes;
mod catalog;
mod decl;
mod error;
mod handlers;
mod node;
mod path;
mod registry;
mod schema;
mod value;
mod visitor;
mod walker;

#[cfg(test)]
mod test_support;

/// Array handler for `Elem[N]` nodes.
pub use handlers::array::ArrayHandler;
/// Record handler for catalog struct types.
pub use handlers::record::RecordHandler;
/// Hierarchical-collection handler and its in-memory model.
pub use handlers::tree::{BRANCH_TYPE, Branch, LEAF_SERIES_TYPE, LeafColumn, TREE_TYPE, Tree, TreeHandler};
/// Type catalog capability and member metadata.
pub use catalog::{MemberInfo, TypeCatalog};
/// Member declarator parsing helpers.
pub use decl::{Declarator, array_type_name, check_declarator, parse_declarator, split_array_type};
/// Error and result aliases.
pub use error::{Result, WalkError};
/// Traversal data model.
pub use node::{Address, Label, Node, Payload};
/// Child path parser types.
pub use path::{ChildPath, PathStep};
/// Handler plugin contract and registry.
pub use registry::{RegisterFn, Registry, TypeHandler};
/// Explicitly registered schema catalog.
pub use schema::{FieldDef, POINTER_SIZE, Schema, SchemaBuilder, StructDef, TypeDef, TypeKind};
/// Decoded scalar values.
pub use value::Value;
/// Visitor protocol.
pub use visitor::Visitor;
/// Walker entry point and options.
pub use walker::{WalkOptions, Walker};
