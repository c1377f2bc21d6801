//! Reference handlers for the record, array, and hierarchical-collection shapes.

pub(crate) mod array;
pub(crate) mod record;
pub(crate) mod tree;
