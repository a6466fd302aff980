use std::collections::{HashMap, HashSet};

use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable};

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const PIPE: &str = "│   ";
const BLANK: &str = "   ";

/// Draws the table as an indented tree, one node per line.
///
/// Roots and children appear in table order. With `show_code` each line reads
/// `code (name)`, otherwise just the name.
pub fn render_tree(table: &NodeTable, show_code: bool) -> String {
    let mut children: HashMap<NodeId, Vec<&Node>> = HashMap::new();
    for node in table.nodes.iter().filter(|node| !node.is_root()) {
        children.entry(node.parent_id).or_default().push(node);
    }

    let mut out = String::new();
    let roots: Vec<&Node> = table.roots().collect();
    let mut stack: Vec<(&Node, String, bool)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(index, root)| (*root, String::new(), index + 1 == roots.len()))
        .collect();
    let mut drawn: HashSet<NodeId> = HashSet::new();

    while let Some((node, prefix, is_last)) = stack.pop() {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let label = if show_code {
            format!("{} ({})", node.code, node.name)
        } else {
            node.name.clone()
        };
        out.push_str(&format!("{prefix}{connector}{label}\n"));

        if !drawn.insert(node.id) {
            continue;
        }
        let Some(kids) = children.get(&node.id) else {
            continue;
        };
        let child_prefix = format!("{prefix}{}", if is_last { BLANK } else { PIPE });
        for (index, child) in kids.iter().enumerate().rev() {
            stack.push((*child, child_prefix.clone(), index + 1 == kids.len()));
        }
    }

    out
}
