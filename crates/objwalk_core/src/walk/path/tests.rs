use super::{ChildPath, PathStep};
use crate::walk::{Label, WalkError};

#[test]
fn dotted_names_and_indices_parse_in_order() {
	let path = ChildPath::parse("body.points[2].x").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Field("body".to_owned()),
			PathStep::Field("points".to_owned()),
			PathStep::Index(2),
			PathStep::Field("x".to_owned()),
		]
	);
}

#[test]
fn leading_index_is_accepted() {
	let path = ChildPath::parse("[1][0].id").expect("path parses");
	assert_eq!(path.steps, vec![PathStep::Index(1), PathStep::Index(0), PathStep::Field("id".to_owned())]);
}

#[test]
fn malformed_paths_are_rejected() {
	for input in ["", ".a", "a.", "a..b", "a[", "a[x]", "a[1", "a-b", "a.[0]"] {
		let err = ChildPath::parse(input).expect_err(input);
		assert!(matches!(err, WalkError::InvalidPath { .. }), "unexpected error for {input:?}");
	}
}

#[test]
fn steps_match_labels_of_their_own_kind() {
	assert!(PathStep::Field("x".to_owned()).matches(&Label::Name("x")));
	assert!(!PathStep::Field("x".to_owned()).matches(&Label::Name("y")));
	assert!(!PathStep::Field("0".to_owned()).matches(&Label::Index(0)));
	assert!(PathStep::Index(3).matches(&Label::Index(3)));
	assert_eq!(PathStep::Index(3).to_string(), "[3]");
}
