use crate::walk::{Label, Node, Payload};

/// Caller-side consumer of traversal callbacks.
///
/// Handlers call [`pre`](Visitor::pre) before decomposing a node and
/// [`post`](Visitor::post) afterwards, whether or not descent happened. The
/// engine itself never accumulates anything; visitors copy out whatever they
/// need to keep, since nodes and payloads only borrow the walked storage.
pub trait Visitor<'a> {
	/// Called before descending into `node`; return `false` to skip its children.
	fn pre(&mut self, node: &Node<'a>) -> bool;

	/// Called after `node` was processed, paired with exactly one [`pre`](Visitor::pre).
	fn post(&mut self, node: &Node<'a>);

	/// Called for a node whose type cannot be resolved or whose decomposition was declined.
	fn unknown(&mut self, node: &Node<'a>);

	/// Called for a terminal scalar, labelled by member name or array position.
	fn leaf(&mut self, label: Label<'_>, payload: Payload<'_>);
}
