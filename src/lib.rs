//! Conversion between nested hierarchies and flat node tables.
//!
//! A hierarchy arrives either as a list of separator-delimited paths or as a
//! nested tree value and is flattened into a [`model::NodeTable`]: one row per
//! node with parent linkage, materialised path, depth and sibling order. The
//! modules are kept narrow: builders live in [`aideon::hierarchy::flatten`],
//! the inverse in [`aideon::hierarchy::reconstruct`], read-only traversal in
//! [`aideon::hierarchy::query`], invariant checks in
//! [`aideon::hierarchy::validate`], and file adapters under
//! [`aideon::hierarchy::io`].

pub mod aideon;

pub use aideon::hierarchy::{
    HierarchyError, Result, compact, config, error, flatten, io, logging, model, path, query,
    reconstruct, render, sync, validate,
};
