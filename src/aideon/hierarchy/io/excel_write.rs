use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::aideon::hierarchy::error::Result;
use crate::aideon::hierarchy::io::columns::{NODE_COLUMNS, node_cells};
use crate::aideon::hierarchy::model::NodeTable;

/// Sheet holding the node rows.
pub const NODES_SHEET: &str = "Nodes";

/// Writes the table to a single-sheet workbook at the given path.
pub fn write_table(path: &Path, table: &NodeTable) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let worksheet = workbook_writer.add_worksheet();
    worksheet.set_name(NODES_SHEET)?;

    for (col_idx, header) in NODE_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, node) in table.nodes.iter().enumerate() {
        for (col_idx, cell) in node_cells(node).iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    if !table.nodes.is_empty() {
        let mut excel_table = rust_xlsxwriter::Table::new();
        let excel_table = excel_table.set_autofilter(true);
        let col_end = (NODE_COLUMNS.len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, table.nodes.len() as u32, col_end, &excel_table)?;
    }

    workbook_writer.save(path)?;
    Ok(())
}
