use std::cell::Cell;

use crate::walk::{ChildPath, Label, Node, PathStep, Payload, Registry, Result, TypeCatalog, TypeHandler, Visitor, WalkError};

/// Runtime limits for one walker.
#[derive(Debug, Clone)]
pub struct WalkOptions {
	/// Maximum nesting of handler dispatches below the root.
	pub max_depth: u32,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Entry point that resolves handlers and drives visitors.
pub struct Walker<'a> {
	registry: &'a Registry,
	catalog: &'a dyn TypeCatalog,
	options: WalkOptions,
	depth: Cell<u32>,
}

impl<'a> Walker<'a> {
	/// Create a walker over a registry and the catalog its handlers consult.
	pub fn new(registry: &'a Registry, catalog: &'a dyn TypeCatalog) -> Self {
		Self {
			registry,
			catalog,
			options: WalkOptions::default(),
			depth: Cell::new(0),
		}
	}

	/// Replace the walk limits.
	pub fn with_options(mut self, options: WalkOptions) -> Self {
		self.options = options;
		self
	}

	/// Catalog handlers consult for type metadata.
	pub fn catalog(&self) -> &'a dyn TypeCatalog {
		self.catalog
	}

	/// Registry used for handler lookup.
	pub fn registry(&self) -> &'a Registry {
		self.registry
	}

	/// Walk `root`, reporting it as unknown when no handler recognizes its type.
	pub fn walk(&self, root: &Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		tracing::debug!(type_name = %root.type_name, "walk start");
		match self.registry.handler_for_type(self.catalog, &root.type_name) {
			Some(handler) => self.inspect_with(handler, root, visitor),
			None => {
				tracing::trace!(type_name = %root.type_name, "no handler for root");
				visitor.unknown(root);
				Ok(())
			}
		}
	}

	/// Dispatch a complex child produced by a handler.
	///
	/// Indirect children are never followed, and children with no handler are
	/// reported through [`Visitor::unknown`].
	pub fn dispatch_member(&self, child: Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		if child.indirect {
			tracing::trace!(type_name = %child.type_name, label = %child.label, "indirect member not followed");
			visitor.unknown(&child);
			return Ok(());
		}

		match self.registry.handler_for_type(self.catalog, &child.type_name) {
			Some(handler) => self.inspect_with(handler, &child, visitor),
			None => {
				tracing::trace!(type_name = %child.type_name, label = %child.label, "no handler for member");
				visitor.unknown(&child);
				Ok(())
			}
		}
	}

	/// Resolve a dotted child path such as `a.b[2].c` below `root`.
	///
	/// Each step decomposes only the current node, capturing the selected child
	/// and pruning everything beneath its siblings.
	pub fn child_node(&self, root: &Node<'a>, path: &str) -> Result<Node<'a>> {
		let parsed = ChildPath::parse(path)?;
		let mut current = root.clone();

		for step in &parsed.steps {
			if current.indirect {
				return Err(WalkError::IndirectStep {
					segment: current.label.to_string(),
					path: path.to_owned(),
				});
			}

			let handler = self
				.registry
				.handler_for_type(self.catalog, &current.type_name)
				.ok_or_else(|| WalkError::UnknownType {
					type_name: current.type_name.to_string(),
				})?;

			let mut finder = ChildFinder::new(step);
			self.inspect_with(handler, &current, &mut finder)?;

			current = match (finder.found, finder.leaf_hit) {
				(Some(node), _) => node,
				(None, true) => {
					return Err(WalkError::ChildIsLeaf {
						segment: step.to_string(),
						path: path.to_owned(),
					});
				}
				(None, false) => {
					return Err(WalkError::ChildNotFound {
						segment: step.to_string(),
						path: path.to_owned(),
					});
				}
			};
		}

		Ok(current)
	}

	fn inspect_with(&self, handler: &dyn TypeHandler, node: &Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()> {
		let depth = self.depth.get();
		if depth >= self.options.max_depth {
			return Err(WalkError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		tracing::trace!(handler = handler.id(), type_name = %node.type_name, depth, "inspect");
		self.depth.set(depth + 1);
		let result = handler.inspect(self, node, visitor);
		self.depth.set(depth);
		result
	}
}

/// Visitor that descends one level and captures the child a path step selects.
struct ChildFinder<'a, 's> {
	step: &'s PathStep,
	depth: u32,
	found: Option<Node<'a>>,
	leaf_hit: bool,
}

impl<'a, 's> ChildFinder<'a, 's> {
	fn new(step: &'s PathStep) -> Self {
		Self {
			step,
			depth: 0,
			found: None,
			leaf_hit: false,
		}
	}

	fn capture(&mut self, node: &Node<'a>) {
		if self.found.is_none() && self.step.matches(&node.label) {
			self.found = Some(node.clone());
		}
	}
}

impl<'a> Visitor<'a> for ChildFinder<'a, '_> {
	fn pre(&mut self, node: &Node<'a>) -> bool {
		let descend = self.depth == 0;
		if self.depth == 1 {
			self.capture(node);
		}
		self.depth += 1;
		descend
	}

	fn post(&mut self, _node: &Node<'a>) {
		self.depth = self.depth.saturating_sub(1);
	}

	fn unknown(&mut self, node: &Node<'a>) {
		if self.depth == 1 {
			self.capture(node);
		}
	}

	fn leaf(&mut self, label: Label<'_>, _payload: Payload<'_>) {
		if self.depth == 1 && self.step.matches(&label) {
			self.leaf_hit = true;
		}
	}
}

#[cfg(test)]
mod tests;
