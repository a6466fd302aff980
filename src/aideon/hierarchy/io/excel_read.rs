use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::aideon::hierarchy::config::HierarchyOptions;
use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::io::columns::ColumnLayout;
use crate::aideon::hierarchy::io::excel_write::NODES_SHEET;
use crate::aideon::hierarchy::model::NodeTable;

/// Reads a table from a workbook produced by
/// [`excel_write`](crate::io::excel_write).
pub fn read_table(path: &Path, options: &HierarchyOptions) -> Result<NodeTable> {
    if !path.exists() {
        return Err(HierarchyError::MissingInput(path.to_path_buf()));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, NODES_SHEET)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)))
            .collect(),
        None => return Ok(NodeTable::new(options)),
    };
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut nodes = Vec::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| cell_to_string(Some(cell))).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        nodes.push(layout.parse(|index| cells.get(index).map(String::as_str))?);
    }

    Ok(NodeTable::with_nodes(options, nodes))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| HierarchyError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(HierarchyError::from)?;
    Ok(range)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
