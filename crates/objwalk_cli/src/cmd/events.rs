use objwalk::walk::{Label, Node, Payload, Value, Visitor};
use serde::Serialize;

use crate::cmd::util::ptr_hex;

/// Callback kind recorded by [`EventLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
	/// Node entered.
	Pre,
	/// Node left.
	Post,
	/// Node reported without decomposition.
	Unknown,
	/// Scalar value.
	Leaf,
}

/// One recorded callback, owned so it outlives the walk.
#[derive(Debug, Clone, Serialize)]
pub struct EventRow {
	pub event: EventKind,
	#[serde(skip)]
	pub depth: usize,
	pub label: String,
	#[serde(rename = "type")]
	pub type_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub indirect: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ptr: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
}

/// Visitor collecting callback rows and pruning nodes by label.
#[derive(Debug, Default)]
pub struct EventLog {
	pub rows: Vec<EventRow>,
	prune: Vec<String>,
	depth: usize,
}

impl EventLog {
	pub fn new(prune: Vec<String>) -> Self {
		Self {
			rows: Vec::new(),
			prune,
			depth: 0,
		}
	}

	fn push_node(&mut self, event: EventKind, node: &Node<'_>) {
		self.rows.push(EventRow {
			event,
			depth: self.depth,
			label: node.label.to_string(),
			type_name: node.type_name.to_string(),
			indirect: Some(node.indirect),
			ptr: node.pointer_value().map(ptr_hex),
			value: None,
		});
	}

	/// Indented text rendering, one line per `pre`, `unknown`, and `leaf`.
	pub fn render_text(&self) -> Vec<String> {
		let mut lines = Vec::new();
		for row in &self.rows {
			let indent = "  ".repeat(row.depth);
			let label = if row.label.is_empty() { "<root>" } else { row.label.as_str() };
			match row.event {
				EventKind::Pre => lines.push(format!("{indent}{label}: {}", row.type_name)),
				EventKind::Post => {}
				EventKind::Unknown => {
					let marker = if row.indirect == Some(true) { "*" } else { "" };
					let tail = row.ptr.as_deref().map(|ptr| format!(" = {ptr}")).unwrap_or_else(|| " (unhandled)".to_owned());
					lines.push(format!("{indent}{label}: {marker}{}{tail}", row.type_name));
				}
				EventKind::Leaf => {
					let value = row
						.value
						.as_ref()
						.and_then(|value| serde_json::to_string(value).ok())
						.unwrap_or_else(|| "-".to_owned());
					lines.push(format!("{indent}{label}: {} = {value}", row.type_name));
				}
			}
		}
		lines
	}
}

impl<'a> Visitor<'a> for EventLog {
	fn pre(&mut self, node: &Node<'a>) -> bool {
		let descend = !self.prune.iter().any(|name| *name == node.label.to_string());
		self.push_node(EventKind::Pre, node);
		self.depth += 1;
		descend
	}

	fn post(&mut self, node: &Node<'a>) {
		self.depth = self.depth.saturating_sub(1);
		self.push_node(EventKind::Post, node);
	}

	fn unknown(&mut self, node: &Node<'a>) {
		self.push_node(EventKind::Unknown, node);
	}

	fn leaf(&mut self, label: Label<'_>, payload: Payload<'_>) {
		self.rows.push(EventRow {
			event: EventKind::Leaf,
			depth: self.depth,
			label: label.to_string(),
			type_name: payload.type_name.to_owned(),
			indirect: None,
			ptr: None,
			value: Some(payload.decode()),
		});
	}
}
