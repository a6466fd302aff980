//! Construction of [`NodeTable`](crate::model::NodeTable)s from path lists and
//! nested trees. Both builders are one-shot: a table is never extended after
//! it has been returned.

pub mod paths;
pub mod tree;

pub use paths::build_from_paths;
pub use tree::build_from_tree;
