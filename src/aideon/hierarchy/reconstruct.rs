use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable, TreeNode};

/// Rebuilds the nested tree rooted at the lowest-id root row.
///
/// Tables with several roots are accepted; the remaining roots are ignored.
/// Use [`reconstruct_forest`] to obtain all of them.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn reconstruct(table: &NodeTable) -> Result<TreeNode> {
    let index = ChildIndex::new(table);
    let root = index
        .roots
        .first()
        .copied()
        .ok_or(HierarchyError::RootNotFound)?;
    if index.roots.len() > 1 {
        debug!(
            root_count = index.roots.len(),
            chosen = table.nodes[root].id,
            "several roots present, using the lowest id"
        );
    }
    Ok(index.build(root, &mut HashSet::new()))
}

/// Rebuilds one tree per root row, in ascending root id order.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn reconstruct_forest(table: &NodeTable) -> Vec<TreeNode> {
    let index = ChildIndex::new(table);
    index
        .roots
        .iter()
        .map(|&root| index.build(root, &mut HashSet::new()))
        .collect()
}

struct ChildIndex<'a> {
    nodes: &'a [Node],
    roots: Vec<usize>,
    children: HashMap<NodeId, Vec<usize>>,
}

impl<'a> ChildIndex<'a> {
    fn new(table: &'a NodeTable) -> Self {
        let mut roots = Vec::new();
        let mut children: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (row, node) in table.nodes.iter().enumerate() {
            if node.is_root() {
                roots.push(row);
            } else {
                children.entry(node.parent_id).or_default().push(row);
            }
        }

        let nodes = table.nodes.as_slice();
        roots.sort_by_key(|&row| nodes[row].id);
        for rows in children.values_mut() {
            rows.sort_by_key(|&row| (nodes[row].order, nodes[row].id));
        }

        Self {
            nodes,
            roots,
            children,
        }
    }

    // `expanded` holds ids whose children were already emitted, so tables with
    // duplicated ids cannot recurse forever.
    fn build(&self, row: usize, expanded: &mut HashSet<NodeId>) -> TreeNode {
        let node = &self.nodes[row];
        let mut children = Vec::new();
        if expanded.insert(node.id) {
            if let Some(rows) = self.children.get(&node.id) {
                for &child in rows {
                    children.push(self.build(child, expanded));
                }
            }
        }

        TreeNode {
            id: node.id,
            code: node.code.clone(),
            name: node.name.clone(),
            children,
        }
    }
}
