use crate::walk::{Label, Node, Payload, Schema, SchemaBuilder, Value, Visitor};

/// One recorded visitor callback.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
	Pre { type_name: String, label: String },
	Post { type_name: String, label: String },
	Unknown { type_name: String, label: String, indirect: bool },
	Leaf { label: String, type_name: String, value: Value },
}

impl Event {
	pub(crate) fn pre(type_name: &str, label: &str) -> Self {
		Self::Pre {
			type_name: type_name.to_owned(),
			label: label.to_owned(),
		}
	}

	pub(crate) fn post(type_name: &str, label: &str) -> Self {
		Self::Post {
			type_name: type_name.to_owned(),
			label: label.to_owned(),
		}
	}

	pub(crate) fn unknown(type_name: &str, label: &str, indirect: bool) -> Self {
		Self::Unknown {
			type_name: type_name.to_owned(),
			label: label.to_owned(),
			indirect,
		}
	}

	pub(crate) fn leaf(label: &str, type_name: &str, value: Value) -> Self {
		Self::Leaf {
			label: label.to_owned(),
			type_name: type_name.to_owned(),
			value,
		}
	}
}

/// Visitor that records every callback and prunes labelled nodes on request.
#[derive(Debug, Default)]
pub(crate) struct RecordingVisitor {
	pub events: Vec<Event>,
	prune: Vec<String>,
}

impl RecordingVisitor {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn pruning(labels: &[&str]) -> Self {
		Self {
			events: Vec::new(),
			prune: labels.iter().map(|label| (*label).to_owned()).collect(),
		}
	}

	pub(crate) fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
		self.events.iter().filter(|event| pred(event)).count()
	}
}

impl<'a> Visitor<'a> for RecordingVisitor {
	fn pre(&mut self, node: &Node<'a>) -> bool {
		let label = node.label.to_string();
		let descend = !self.prune.contains(&label);
		self.events.push(Event::Pre {
			type_name: node.type_name.to_string(),
			label,
		});
		descend
	}

	fn post(&mut self, node: &Node<'a>) {
		self.events.push(Event::Post {
			type_name: node.type_name.to_string(),
			label: node.label.to_string(),
		});
	}

	fn unknown(&mut self, node: &Node<'a>) {
		self.events.push(Event::Unknown {
			type_name: node.type_name.to_string(),
			label: node.label.to_string(),
			indirect: node.indirect,
		});
	}

	fn leaf(&mut self, label: Label<'_>, payload: Payload<'_>) {
		self.events.push(Event::Leaf {
			label: label.to_string(),
			type_name: payload.type_name.to_owned(),
			value: payload.decode(),
		});
	}
}

/// `Vec3 { x, y, z }`, `Object { id }`, and
/// `Body : Object { name[8], pos, trail[2], *parent, mass }`.
pub(crate) fn body_schema() -> Schema {
	let mut builder = SchemaBuilder::with_default_primitives();
	builder
		.structure("Vec3", None, &[("float", "x"), ("float", "y"), ("float", "z")])
		.expect("vec3 declares")
		.structure("Object", None, &[("uint", "id")])
		.expect("object declares")
		.structure(
			"Body",
			Some("Object"),
			&[
				("char", "name[8]"),
				("Vec3", "pos"),
				("Vec3", "trail[2]"),
				("Body", "*parent"),
				("double", "mass"),
			],
		)
		.expect("body declares");
	builder.build()
}

/// Bytes of one `Body` with id 7, name "probe", pos (1,2,3), trail (4..9),
/// parent 0x1000, and mass 2.5.
pub(crate) fn body_bytes() -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(&7_u32.to_le_bytes());
	out.extend_from_slice(b"probe\0\0\0");
	for value in [1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0] {
		out.extend_from_slice(&value.to_le_bytes());
	}
	out.extend_from_slice(&0x1000_u64.to_le_bytes());
	out.extend_from_slice(&2.5_f64.to_le_bytes());
	out
}
