use std::fs;
use std::path::Path;

use crate::aideon::hierarchy::error::{HierarchyError, Result};

/// Reads one raw path per line. Blank lines are kept; the path builder
/// discards them.
pub fn read_paths(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(HierarchyError::MissingInput(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    let source = source.strip_prefix('\u{feff}').unwrap_or(&source);
    Ok(source.lines().map(str::to_string).collect())
}
