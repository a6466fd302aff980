use std::collections::HashMap;

use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable};
use crate::aideon::hierarchy::path;

/// Read-only traversal over a [`NodeTable`].
///
/// The engine indexes the table once on creation; the table must not change
/// while the engine borrows it.
pub struct QueryEngine<'a> {
    table: &'a NodeTable,
    by_id: HashMap<NodeId, Vec<usize>>,
    by_path: HashMap<&'a str, Vec<usize>>,
    by_parent: HashMap<NodeId, Vec<usize>>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(table: &'a NodeTable) -> Self {
        let mut by_id: HashMap<NodeId, Vec<usize>> = HashMap::new();
        let mut by_path: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut by_parent: HashMap<NodeId, Vec<usize>> = HashMap::new();

        for (row, node) in table.nodes.iter().enumerate() {
            by_id.entry(node.id).or_default().push(row);
            by_path.entry(node.path.as_str()).or_default().push(row);
            by_parent.entry(node.parent_id).or_default().push(row);
        }

        Self {
            table,
            by_id,
            by_path,
            by_parent,
        }
    }

    /// Returns the single row carrying `id`.
    pub fn node(&self, id: NodeId) -> Result<&'a Node> {
        match self.by_id.get(&id).map(Vec::as_slice) {
            Some([row]) => Ok(&self.table.nodes[*row]),
            Some([_, _, ..]) => Err(HierarchyError::AmbiguousNode(id)),
            _ => Err(HierarchyError::NodeNotFound(id)),
        }
    }

    /// Rows whose parent is `id`, in table order.
    pub fn children(&self, id: NodeId) -> Result<Vec<&'a Node>> {
        self.node(id)?;
        Ok(self.rows(self.by_parent.get(&id)))
    }

    /// Rows below `id`, found through the materialised path, in table order.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<&'a Node>> {
        let target = self.node(id)?;
        let prefix = format!("{}{}", target.path, self.table.separator);
        Ok(self
            .table
            .nodes
            .iter()
            .filter(|node| node.path.starts_with(&prefix))
            .collect())
    }

    /// Rows on the path from the root down to the parent of `id`.
    pub fn ancestors(&self, id: NodeId) -> Result<Vec<&'a Node>> {
        let target = self.node(id)?;
        let separator = self.table.separator;
        let parts = path::segments(&target.path, separator);

        let mut ancestors = Vec::new();
        for end in 1..parts.len() {
            let prefix = path::join(&parts[..end], separator);
            ancestors.extend(self.rows(self.by_path.get(prefix.as_str())));
        }
        Ok(ancestors)
    }

    /// Rows sharing the parent of `id`, excluding `id` itself.
    pub fn siblings(&self, id: NodeId) -> Result<Vec<&'a Node>> {
        let target = self.node(id)?;
        Ok(self
            .rows(self.by_parent.get(&target.parent_id))
            .into_iter()
            .filter(|node| node.id != id)
            .collect())
    }

    fn rows(&self, rows: Option<&Vec<usize>>) -> Vec<&'a Node> {
        rows.map(|rows| rows.iter().map(|&row| &self.table.nodes[row]).collect())
            .unwrap_or_default()
    }
}

/// Shorthand for [`QueryEngine::children`] on a one-off lookup.
pub fn children(table: &NodeTable, id: NodeId) -> Result<Vec<&Node>> {
    QueryEngine::new(table).children(id)
}

/// Shorthand for [`QueryEngine::descendants`] on a one-off lookup.
pub fn descendants(table: &NodeTable, id: NodeId) -> Result<Vec<&Node>> {
    QueryEngine::new(table).descendants(id)
}

/// Shorthand for [`QueryEngine::ancestors`] on a one-off lookup.
pub fn ancestors(table: &NodeTable, id: NodeId) -> Result<Vec<&Node>> {
    QueryEngine::new(table).ancestors(id)
}

/// Shorthand for [`QueryEngine::siblings`] on a one-off lookup.
pub fn siblings(table: &NodeTable, id: NodeId) -> Result<Vec<&Node>> {
    QueryEngine::new(table).siblings(id)
}
