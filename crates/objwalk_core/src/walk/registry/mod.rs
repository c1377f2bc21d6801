use std::fmt;

use crate::walk::{ArrayHandler, Node, RecordHandler, Result, TreeHandler, TypeCatalog, Visitor, Walker};

/// Decomposition plugin for one family of types.
pub trait TypeHandler {
	/// Stable identifier used in logs and listings.
	fn id(&self) -> &'static str;

	/// Whether this handler decomposes values of `type_name`.
	fn recognizes(&self, catalog: &dyn TypeCatalog, type_name: &str) -> bool;

	/// Decompose `node`, emitting its children to `visitor`.
	///
	/// Implementations call `visitor.pre(node)` first and `visitor.post(node)`
	/// last, skipping the children when `pre` returns `false`. Complex children
	/// go back through [`Walker::dispatch_member`] so the indirection and
	/// unknown-type policy stays in one place.
	fn inspect<'a>(&self, walker: &Walker<'a>, node: &Node<'a>, visitor: &mut dyn Visitor<'a>) -> Result<()>;
}

/// Plugin entry point that registers one or more handlers.
pub type RegisterFn = fn(&mut Registry);

/// Ordered handler registry with first-match-wins lookup.
#[derive(Default)]
pub struct Registry {
	handlers: Vec<Box<dyn TypeHandler>>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry holding the tree, record, and array handlers, in that order.
	///
	/// The tree handler comes first, so `Tree`, `Branch`, `LeafSeries<double>`
	/// and catalog subtypes of `Tree` or `Branch` are reserved for in-memory
	/// collections: a byte-addressed record under one of those names fails with
	/// [`WalkError::AddressMismatch`](crate::walk::WalkError::AddressMismatch)
	/// instead of being decomposed as a record.
	pub fn with_builtin_handlers() -> Self {
		Self::with_record_handler(RecordHandler::new())
	}

	/// Like [`Registry::with_builtin_handlers`], with a configured record handler.
	///
	/// The array handler shares the record handler's scalar allowlist, so an
	/// allowlisted type is a leaf both as a member and as an array element.
	pub fn with_record_handler(record: RecordHandler) -> Self {
		let array = record.scalar_types().fold(ArrayHandler::new(), |array, name| array.treat_as_scalar(name));
		let mut registry = Self::new();
		registry.register(TreeHandler).register(record).register(array);
		registry
	}

	/// Append a handler. Earlier registrations keep priority.
	pub fn register<H: TypeHandler + 'static>(&mut self, handler: H) -> &mut Self {
		self.register_boxed(Box::new(handler))
	}

	/// Append an already boxed handler.
	pub fn register_boxed(&mut self, handler: Box<dyn TypeHandler>) -> &mut Self {
		tracing::debug!(handler = handler.id(), priority = self.handlers.len(), "registered type handler");
		self.handlers.push(handler);
		self
	}

	/// Run a plugin registration function against this registry.
	pub fn install(&mut self, plugin: RegisterFn) -> &mut Self {
		plugin(self);
		self
	}

	/// First registered handler recognizing `type_name`.
	pub fn handler_for_type(&self, catalog: &dyn TypeCatalog, type_name: &str) -> Option<&dyn TypeHandler> {
		self.handlers
			.iter()
			.find(|handler| handler.recognizes(catalog, type_name))
			.map(|handler| handler.as_ref())
	}

	/// Handler identifiers in priority order.
	pub fn handler_ids(&self) -> Vec<&'static str> {
		self.handlers.iter().map(|handler| handler.id()).collect()
	}

	/// Number of registered handlers.
	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	/// Whether no handler is registered.
	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry").field("handlers", &self.handler_ids()).finish()
	}
}
