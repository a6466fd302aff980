use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::model::TreeValue;

/// Reads a nested tree document.
///
/// Each object needs a `code`; `name` falls back to the code and `children`
/// to an empty list.
pub fn read_tree(path: &Path) -> Result<TreeValue> {
    if !path.exists() {
        return Err(HierarchyError::MissingInput(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Writes a tree (input value or reconstructed node) as pretty-printed JSON.
pub fn write_tree<T: Serialize>(path: &Path, tree: &T) -> Result<()> {
    let json_string = serde_json::to_string_pretty(tree)?;
    fs::write(path, json_string)?;
    Ok(())
}
