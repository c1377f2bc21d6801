use crate::walk::test_support::{Event, RecordingVisitor, body_bytes, body_schema};
use crate::walk::{Label, Node, Registry, Schema, SchemaBuilder, WalkError, WalkOptions, Walker};

fn nested_schema() -> Schema {
	let mut builder = SchemaBuilder::with_default_primitives();
	builder
		.structure("Vec2", None, &[("float", "x"), ("float", "y")])
		.expect("vec2")
		.structure("Inner", None, &[("int", "tag"), ("Vec2", "v")])
		.expect("inner")
		.structure("Outer", None, &[("Inner", "inner"), ("Inner", "*alias")])
		.expect("outer");
	builder.build()
}

fn nested_bytes() -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(&5_i32.to_le_bytes());
	out.extend_from_slice(&0.25_f32.to_le_bytes());
	out.extend_from_slice(&0.75_f32.to_le_bytes());
	out.extend_from_slice(&0_u64.to_le_bytes());
	out
}

#[test]
fn unhandled_root_is_reported_once_as_unknown() {
	let schema = body_schema();
	let registry = Registry::new();
	let walker = Walker::new(&registry, &schema);
	let bytes = body_bytes();

	let mut visitor = RecordingVisitor::new();
	walker.walk(&Node::from_bytes("Body", &bytes), &mut visitor).expect("walk succeeds");

	assert_eq!(visitor.events, vec![Event::unknown("Body", "", false)]);
}

#[test]
fn every_pre_is_closed_by_a_matching_post() {
	let schema = body_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = body_bytes();

	let mut visitor = RecordingVisitor::new();
	walker.walk(&Node::from_bytes("Body", &bytes), &mut visitor).expect("walk succeeds");

	let mut stack = Vec::new();
	for event in &visitor.events {
		match event {
			Event::Pre { type_name, label } => stack.push((type_name.clone(), label.clone())),
			Event::Post { type_name, label } => {
				let open = stack.pop().expect("post has an open pre");
				assert_eq!(open, (type_name.clone(), label.clone()));
			}
			_ => {}
		}
	}
	assert!(stack.is_empty(), "unclosed pre callbacks: {stack:?}");
	assert!(visitor.count(|event| matches!(event, Event::Pre { .. })) > 1);
}

#[test]
fn pruned_root_emits_only_pre_and_post() {
	let schema = body_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = body_bytes();

	let mut visitor = RecordingVisitor::pruning(&[""]);
	walker.walk(&Node::from_bytes("Body", &bytes), &mut visitor).expect("walk succeeds");

	assert_eq!(visitor.events, vec![Event::pre("Body", ""), Event::post("Body", "")]);
}

#[test]
fn pruned_member_hides_its_descendants() {
	let schema = body_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = body_bytes();

	let mut visitor = RecordingVisitor::pruning(&["trail"]);
	walker.walk(&Node::from_bytes("Body", &bytes), &mut visitor).expect("walk succeeds");

	let start = visitor.events.iter().position(|event| *event == Event::pre("Vec3[2]", "trail")).expect("trail pre");
	assert_eq!(visitor.events[start + 1], Event::post("Vec3[2]", "trail"));
	assert!(visitor.events.contains(&Event::pre("Vec3", "pos")), "siblings still descend");
}

#[test]
fn child_node_follows_named_steps() {
	let schema = nested_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = nested_bytes();
	let root = Node::from_bytes("Outer", &bytes);

	let node = walker.child_node(&root, "inner.v").expect("inner.v resolves");
	assert_eq!(node.type_name, "Vec2");
	assert_eq!(node.label, Label::Name("v"));
	assert!(!node.indirect);
	assert_eq!(node.bytes().expect("bytes").len(), 8);

	let mut visitor = RecordingVisitor::new();
	walker.walk(&node, &mut visitor).expect("resolved child walks");
	assert_eq!(visitor.count(|event| matches!(event, Event::Leaf { .. })), 2);
}

#[test]
fn child_node_reports_the_unresolved_segment() {
	let schema = nested_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = nested_bytes();
	let root = Node::from_bytes("Outer", &bytes);

	let err = walker.child_node(&root, "inner.x").expect_err("x is not a member of inner");
	match err {
		WalkError::ChildNotFound { segment, path } => {
			assert_eq!(segment, "x");
			assert_eq!(path, "inner.x");
		}
		other => panic!("unexpected error: {other}"),
	}

	let err = walker.child_node(&root, "inner.tag").expect_err("tag is a scalar");
	assert!(matches!(err, WalkError::ChildIsLeaf { .. }));

	let err = walker.child_node(&root, "alias.tag").expect_err("alias is a pointer");
	assert!(matches!(err, WalkError::IndirectStep { ref segment, .. } if segment == "alias"));

	let err = walker.child_node(&root, "inner..v").expect_err("malformed path");
	assert!(matches!(err, WalkError::InvalidPath { .. }));
}

#[test]
fn child_node_returns_indirect_members_without_following_them() {
	let schema = nested_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = nested_bytes();
	let root = Node::from_bytes("Outer", &bytes);

	let node = walker.child_node(&root, "alias").expect("alias resolves");
	assert!(node.indirect);
	assert_eq!(node.type_name, "Inner");
	assert_eq!(node.pointer_value(), Some(0));
}

#[test]
fn child_node_indexes_into_record_arrays() {
	let schema = body_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema);
	let bytes = body_bytes();
	let root = Node::from_bytes("Body", &bytes);

	let node = walker.child_node(&root, "trail[1]").expect("trail[1] resolves");
	assert_eq!(node.type_name, "Vec3");
	assert_eq!(node.label, Label::Index(1));
	assert_eq!(node.bytes().expect("bytes"), &bytes[36..48]);

	let err = walker.child_node(&root, "trail[2]").expect_err("trail has two elements");
	assert!(matches!(err, WalkError::ChildNotFound { ref segment, .. } if segment == "[2]"));
}

#[test]
fn child_node_needs_a_handler_for_intermediate_nodes() {
	let schema = nested_schema();
	let registry = Registry::new();
	let walker = Walker::new(&registry, &schema);
	let bytes = nested_bytes();

	let err = walker.child_node(&Node::from_bytes("Outer", &bytes), "inner").expect_err("no handler");
	assert!(matches!(err, WalkError::UnknownType { ref type_name } if type_name == "Outer"));
}

#[test]
fn depth_ceiling_aborts_the_walk() {
	let schema = body_schema();
	let registry = Registry::with_builtin_handlers();
	let walker = Walker::new(&registry, &schema).with_options(WalkOptions { max_depth: 1 });
	let bytes = body_bytes();

	let mut visitor = RecordingVisitor::new();
	let err = walker.walk(&Node::from_bytes("Body", &bytes), &mut visitor).expect_err("nested record exceeds depth 1");
	assert!(matches!(err, WalkError::DepthExceeded { max_depth: 1 }));

	let walker = Walker::new(&registry, &schema);
	let mut visitor = RecordingVisitor::new();
	walker.walk(&Node::from_bytes("Body", &bytes), &mut visitor).expect("default depth is enough");
}
