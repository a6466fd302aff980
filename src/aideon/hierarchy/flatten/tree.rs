use tracing::{info, instrument};

use crate::aideon::hierarchy::config::HierarchyOptions;
use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable, ROOT_PARENT, Timestamp, TreeValue};

/// Builds a table from a nested tree value.
///
/// Rows are emitted in depth-first pre-order: each node is followed by its
/// whole subtree before the next sibling starts. Children keep input order.
#[instrument(level = "info", skip_all, fields(root = %root.code))]
pub fn build_from_tree(root: &TreeValue, options: &HierarchyOptions, now: Timestamp) -> NodeTable {
    let mut table = NodeTable::new(options);
    table.nodes.reserve(root.size());

    // (value, parent row index, 1-based sibling order)
    let mut stack: Vec<(&TreeValue, Option<usize>, u32)> = vec![(root, None, 1)];

    while let Some((value, parent, order)) = stack.pop() {
        let (parent_id, parent_code, level, path) = match parent {
            Some(index) => {
                let parent = &table.nodes[index];
                (
                    parent.id,
                    parent.code.clone(),
                    parent.level + 1,
                    table.child_path(&parent.path, &value.code),
                )
            }
            None => (ROOT_PARENT, String::new(), 1, value.code.clone()),
        };

        let row = table.nodes.len();
        table.nodes.push(Node {
            id: row as NodeId + 1,
            code: value.code.clone(),
            name: value.name.clone(),
            parent_id,
            parent_code,
            level,
            path,
            order,
            is_leaf: value.children.is_empty(),
            is_active: true,
            created_at: now,
            updated_at: now,
        });

        for (index, child) in value.children.iter().enumerate().rev() {
            stack.push((child, Some(row), index as u32 + 1));
        }
    }

    info!(node_count = table.len(), "built table from tree");
    table
}
