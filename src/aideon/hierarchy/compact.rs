//! Narrow, dictionary-encoded column layout for [`NodeTable`]s.
//!
//! Integer columns shrink to the smallest width that holds realistic
//! hierarchies and string columns are stored once per distinct value.

use std::collections::HashMap;

use tracing::debug;

use crate::aideon::hierarchy::config::HierarchyOptions;
use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable, Timestamp};

/// A string column stored as distinct values plus per-row indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryColumn {
    categories: Vec<String>,
    codes: Vec<u32>,
    lookup: HashMap<String, u32>,
}

impl CategoryColumn {
    fn push(&mut self, value: &str) -> Result<()> {
        let code = match self.lookup.get(value) {
            Some(code) => *code,
            None => {
                let code = narrow::<u32>("category", self.categories.len() as u64)?;
                self.categories.push(value.to_string());
                self.lookup.insert(value.to_string(), code);
                code
            }
        };
        self.codes.push(code);
        Ok(())
    }

    /// Distinct values in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Value stored at `row`.
    pub fn get(&self, row: usize) -> Option<&str> {
        let code = *self.codes.get(row)?;
        self.categories.get(code as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Column-oriented, width-reduced copy of a [`NodeTable`].
///
/// Only [`NodeTable::compact`] fills the columns, so every column holds one
/// entry per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactNodeTable {
    separator: char,
    target_field: String,
    ids: Vec<u32>,
    parent_ids: Vec<u32>,
    levels: Vec<u8>,
    orders: Vec<u16>,
    codes: CategoryColumn,
    names: CategoryColumn,
    parent_codes: CategoryColumn,
    paths: CategoryColumn,
    is_leaf: Vec<bool>,
    is_active: Vec<bool>,
    created_at: Vec<Timestamp>,
    updated_at: Vec<Timestamp>,
}

impl CompactNodeTable {
    fn with_capacity(table: &NodeTable) -> Self {
        let rows = table.len();
        Self {
            separator: table.separator,
            target_field: table.target_field.clone(),
            ids: Vec::with_capacity(rows),
            parent_ids: Vec::with_capacity(rows),
            levels: Vec::with_capacity(rows),
            orders: Vec::with_capacity(rows),
            codes: CategoryColumn::default(),
            names: CategoryColumn::default(),
            parent_codes: CategoryColumn::default(),
            paths: CategoryColumn::default(),
            is_leaf: Vec::with_capacity(rows),
            is_active: Vec::with_capacity(rows),
            created_at: Vec::with_capacity(rows),
            updated_at: Vec::with_capacity(rows),
        }
    }

    fn push(&mut self, node: &Node) -> Result<()> {
        self.ids.push(narrow("id", node.id)?);
        self.parent_ids.push(narrow("parent_id", node.parent_id)?);
        self.levels.push(narrow("level", node.level.into())?);
        self.orders.push(narrow("order", node.order.into())?);
        self.codes.push(&node.code)?;
        self.names.push(&node.name)?;
        self.parent_codes.push(&node.parent_code)?;
        self.paths.push(&node.path)?;
        self.is_leaf.push(node.is_leaf);
        self.is_active.push(node.is_active);
        self.created_at.push(node.created_at);
        self.updated_at.push(node.updated_at);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn parent_ids(&self) -> &[u32] {
        &self.parent_ids
    }

    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn orders(&self) -> &[u16] {
        &self.orders
    }

    pub fn codes(&self) -> &CategoryColumn {
        &self.codes
    }

    pub fn names(&self) -> &CategoryColumn {
        &self.names
    }

    pub fn parent_codes(&self) -> &CategoryColumn {
        &self.parent_codes
    }

    pub fn paths(&self) -> &CategoryColumn {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Materialises the row at `row`, or `None` past the last row.
    pub fn node(&self, row: usize) -> Option<Node> {
        Some(Node {
            id: NodeId::from(*self.ids.get(row)?),
            code: self.codes.get(row)?.to_string(),
            name: self.names.get(row)?.to_string(),
            parent_id: NodeId::from(*self.parent_ids.get(row)?),
            parent_code: self.parent_codes.get(row)?.to_string(),
            level: u32::from(*self.levels.get(row)?),
            path: self.paths.get(row)?.to_string(),
            order: u32::from(*self.orders.get(row)?),
            is_leaf: *self.is_leaf.get(row)?,
            is_active: *self.is_active.get(row)?,
            created_at: *self.created_at.get(row)?,
            updated_at: *self.updated_at.get(row)?,
        })
    }

    /// Restores the row-oriented table.
    pub fn expand(&self) -> NodeTable {
        let options = HierarchyOptions {
            separator: self.separator,
            target_field: self.target_field.clone(),
        };
        let nodes = (0..self.len()).map_while(|row| self.node(row)).collect();
        NodeTable::with_nodes(&options, nodes)
    }
}

impl NodeTable {
    /// Re-encodes the table into its compact column layout.
    pub fn compact(&self) -> Result<CompactNodeTable> {
        let mut compact = CompactNodeTable::with_capacity(self);
        for node in &self.nodes {
            compact.push(node)?;
        }
        debug!(
            rows = compact.len(),
            distinct_paths = compact.paths.categories().len(),
            "compacted node table"
        );
        Ok(compact)
    }
}

fn narrow<T: TryFrom<u64>>(column: &'static str, value: u64) -> Result<T> {
    T::try_from(value).map_err(|_| HierarchyError::ColumnOverflow { column, value })
}
