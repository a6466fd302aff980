use chrono::{DateTime, SecondsFormat, Utc};

use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::model::{Node, Timestamp};

/// Column order shared by every tabular backend.
pub const NODE_COLUMNS: [&str; 12] = [
    "id",
    "code",
    "name",
    "parent_id",
    "parent_code",
    "level",
    "path",
    "order",
    "is_leaf",
    "is_active",
    "created_at",
    "updated_at",
];

/// Renders a node as cells in [`NODE_COLUMNS`] order.
pub fn node_cells(node: &Node) -> [String; 12] {
    [
        node.id.to_string(),
        node.code.clone(),
        node.name.clone(),
        node.parent_id.to_string(),
        node.parent_code.clone(),
        node.level.to_string(),
        node.path.clone(),
        node.order.to_string(),
        node.is_leaf.to_string(),
        node.is_active.to_string(),
        format_timestamp(&node.created_at),
        format_timestamp(&node.updated_at),
    ]
}

/// Maps [`NODE_COLUMNS`] to their positions in a persisted header row.
///
/// Extra columns are ignored and columns may appear in any order.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    positions: [usize; 12],
}

impl ColumnLayout {
    pub fn from_headers<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| header.as_ref().trim().to_string())
            .collect();

        let mut positions = [0; 12];
        for (slot, column) in positions.iter_mut().zip(NODE_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| HierarchyError::MissingColumn(column.to_string()))?;
        }
        Ok(Self { positions })
    }

    /// Builds a node from one data row. `cell` returns the raw text at a
    /// header position; absent cells read as empty.
    pub fn parse<'r, F>(&self, cell: F) -> Result<Node>
    where
        F: Fn(usize) -> Option<&'r str>,
    {
        let raw = |column: usize| cell(self.positions[column]).unwrap_or("");
        let text = |column: usize| raw(column).trim();

        Ok(Node {
            id: parse_number(NODE_COLUMNS[0], text(0))?,
            code: raw(1).to_string(),
            name: raw(2).to_string(),
            parent_id: parse_number(NODE_COLUMNS[3], text(3))?,
            parent_code: raw(4).to_string(),
            level: parse_number(NODE_COLUMNS[5], text(5))?,
            path: raw(6).to_string(),
            order: parse_number(NODE_COLUMNS[7], text(7))?,
            is_leaf: parse_bool(NODE_COLUMNS[8], text(8))?,
            is_active: parse_bool(NODE_COLUMNS[9], text(9))?,
            created_at: parse_timestamp(NODE_COLUMNS[10], text(10))?,
            updated_at: parse_timestamp(NODE_COLUMNS[11], text(11))?,
        })
    }
}

fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn invalid(column: &str, value: &str) -> HierarchyError {
    HierarchyError::InvalidCell {
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(column: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(column, value))
}

fn parse_bool(column: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        _ => Err(invalid(column, value)),
    }
}

fn parse_timestamp(column: &str, value: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| invalid(column, value))
}
