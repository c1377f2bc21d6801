use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::walk::{Label, Node, Payload, Result, TypeCatalog, TypeHandler, Visitor, WalkError, Walker};

/// Type name of the top-level container.
pub const TREE_TYPE: &str = "Tree";
/// Type name of a (possibly nested) sub-container.
pub const BRANCH_TYPE: &str = "Branch";
/// Type name of a terminal branch iterated entry by entry.
pub const LEAF_SERIES_TYPE: &str = "LeafSeries<double>";

const VALUE_TYPE: &str = "double";

/// Top-level hierarchical collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tree {
	/// Collection name.
	pub name: String,
	/// Top-level branches.
	#[serde(default)]
	pub branches: Vec<Branch>,
}

/// Sub-container holding either nested branches or leaf columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branch {
	/// Branch name.
	pub name: String,
	/// Nested branches; a branch with none is iterated as a leaf series.
	#[serde(default)]
	pub branches: Vec<Branch>,
	/// Leaf columns sharing this branch's entries.
	#[serde(default)]
	pub leaves: Vec<LeafColumn>,
	/// Number of entries stored in every leaf column.
	#[serde(default)]
	pub entries: usize,
}

/// Column of fixed-length scalar runs, one run per entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafColumn {
	/// Leaf name.
	pub name: String,
	/// Declared element type, reported on the per-entry node of multi-element leaves.
	#[serde(default = "default_leaf_type", rename = "type")]
	pub type_name: String,
	/// Elements per entry; `0` reads like `1`.
	#[serde(default = "default_leaf_len")]
	pub len: usize,
	/// Entry-major values, `entries * len` of them.
	#[serde(default)]
	pub values: Vec<f64>,
}

fn default_leaf_type() -> String {
	VALUE_TYPE.to_owned()
}

fn default_leaf_len() -> usize {
	1
}

impl LeafColumn {
	/// Value of element `element` in entry `entry`.
	pub fn value(&self, entry: usize, element: usize) -> Option<f64> {
		self.values.get(entry.checked_mul(self.stride())?.checked_add(element)?).copied()
	}

	/// Values stored per entry.
	pub fn stride(&self) -> usize {
		self.len.max(1)
	}
}

/// Walks trees depth-first through branches down to per-entry leaf values.
///
/// A leaf with several elements per entry is wrapped in its own `pre`/`post`
/// pair with element-indexed leaves; a single-element leaf is reported once per
/// entry, indexed by entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeHandler;

impl TreeHandler {
	fn is_tree(catalog: &dyn TypeCatalog, type_name: &str) -> bool {
		type_name == TREE_TYPE || catalog.inherits_from(type_name, TREE_TYPE)
	}

	fn is_branch(catalog: &dyn TypeCatalog, type_name: &str) -> bool {
		type_name == BRANCH_TYPE || catalog.inherits_from(type_name, BRANCH_TYPE)
	}

	fn iterate_branches<'a>(&self, branches: &'a [Branch], visitor: &mut dyn Visitor<'a>) -> Result<()> {
		for branch in branches {
			self.iterate_branch(Label::Name(&branch.name), branch, visitor)?;
		}
		Ok(())
	}

	fn iterate_branch<'a>(&self, label: Label<'a>, branch: &'a Branch, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		if branch.branches.is_empty() {
			return self.iterate_entries(label, branch, visitor);
		}

		let node = Node::from_object(BRANCH_TYPE, branch).with_label(label);
		if visitor.pre(&node) {
			self.iterate_branches(&branch.branches, visitor)?;
		}
		visitor.post(&node);
		Ok(())
	}

	fn iterate_entries<'a>(&self, label: Label<'a>, branch: &'a Branch, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		for leaf in &branch.leaves {
			let need = branch.entries.saturating_mul(leaf.stride());
			if leaf.values.len() < need {
				return Err(WalkError::LayoutMismatch {
					type_name: format!("{}.{}", branch.name, leaf.name),
					need,
					have: leaf.values.len(),
				});
			}
		}

		let node = Node::from_object(LEAF_SERIES_TYPE, branch).with_label(label).indirect(true);
		if visitor.pre(&node) {
			for entry in 0..branch.entries {
				for leaf in &branch.leaves {
					self.emit_leaf(entry, leaf, visitor);
				}
			}
		}
		visitor.post(&node);
		Ok(())
	}

	fn emit_leaf<'a>(&self, entry: usize, leaf: &'a LeafColumn, visitor: &mut dyn Visitor<'a>) {
		match leaf.len {
			0 | 1 => {
				let bytes = leaf.value(entry, 0).unwrap_or_default().to_le_bytes();
				visitor.leaf(Label::Index(entry), Payload::single(VALUE_TYPE, &bytes));
			}
			len => {
				let node = Node::from_object(Cow::Borrowed(leaf.type_name.as_str()), leaf)
					.with_label(Label::Name(&leaf.name))
					.indirect(true);
				if visitor.pre(&node) {
					for element in 0..len {
						let bytes = leaf.value(entry, element).unwrap_or_default().to_le_bytes();
						visitor.leaf(Label::Index(element), Payload::single(VALUE_TYPE, &bytes));
					}
				}
				visitor.post(&node);
			}
		}
	}
}

impl TypeHandler for TreeHandler {
	fn id(&self) -> &'static str {
		"tree"
	}

	fn recognizes(&self, catalog: &dyn TypeCatalog, type_name: &str) -> bool {
		Self::is_tree(catalog, type_name) || Self::is_branch(catalog, type_name) || type_name == LEAF_SERIES_TYPE
	}

	fn inspect<'a>(&self, walker: &Walker<'a>, node: &Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		let catalog = walker.catalog();
		if Self::is_tree(catalog, &node.type_name) {
			let tree: &'a Tree = node.object()?;
			if visitor.pre(node) && !node.indirect {
				self.iterate_branches(&tree.branches, visitor)?;
			}
			visitor.post(node);
			return Ok(());
		}

		let branch: &'a Branch = node.object()?;
		if Self::is_branch(catalog, &node.type_name) {
			self.iterate_branch(node.label, branch, visitor)
		} else {
			self.iterate_entries(node.label, branch, visitor)
		}
	}
}
