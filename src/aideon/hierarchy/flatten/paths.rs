use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::aideon::hierarchy::config::HierarchyOptions;
use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable, ROOT_PARENT, Timestamp};
use crate::aideon::hierarchy::path;

/// Builds a table from separator-delimited path strings.
///
/// Node identity is keyed by code alone: callers must supply codes that are
/// unique across the whole forest. A code seen again under a different parent
/// is merged into the node created on its first appearance, keeping the level
/// and path recorded there.
#[instrument(
    level = "info",
    skip_all,
    fields(path_count = paths.len(), target_field = %options.target_field)
)]
pub fn build_from_paths<S: AsRef<str>>(
    paths: &[S],
    options: &HierarchyOptions,
    now: Timestamp,
) -> NodeTable {
    let separator = options.separator;
    let normalized: Vec<String> = paths
        .iter()
        .filter_map(|raw| path::normalize(raw.as_ref(), separator))
        .collect();

    let mut registry = CodeRegistry::default();
    for full_path in &normalized {
        let parts = path::segments(full_path, separator);
        for position in 0..parts.len() {
            registry.visit(&parts, position, separator);
        }
    }

    let table = registry.into_table(options, now);
    info!(node_count = table.len(), "built table from paths");
    table
}

struct PendingNode {
    code: String,
    parent_code: Option<String>,
    level: u32,
    path: String,
}

#[derive(Default)]
struct CodeRegistry {
    ids: HashMap<String, NodeId>,
    pending: Vec<PendingNode>,
}

impl CodeRegistry {
    fn visit(&mut self, parts: &[&str], position: usize, separator: char) {
        let code = parts[position];
        let parent_code = position.checked_sub(1).map(|index| parts[index]);

        if let Some(&id) = self.ids.get(code) {
            let existing = &self.pending[(id - 1) as usize];
            if existing.parent_code.as_deref() != parent_code {
                debug!(
                    code,
                    kept_path = %existing.path,
                    "code seen under another parent, merging into first occurrence"
                );
            }
            return;
        }

        let id = self.pending.len() as NodeId + 1;
        self.ids.insert(code.to_string(), id);
        self.pending.push(PendingNode {
            code: code.to_string(),
            parent_code: parent_code.map(str::to_string),
            level: position as u32 + 1,
            path: path::join(&parts[..=position], separator),
        });
    }

    fn into_table(self, options: &HierarchyOptions, now: Timestamp) -> NodeTable {
        let parent_ids: Vec<NodeId> = self
            .pending
            .iter()
            .map(|pending| match &pending.parent_code {
                Some(code) => self.ids.get(code).copied().unwrap_or(ROOT_PARENT),
                None => ROOT_PARENT,
            })
            .collect();

        let mut child_counts: HashMap<NodeId, u32> = HashMap::new();
        let mut orders = Vec::with_capacity(parent_ids.len());
        for parent_id in &parent_ids {
            let count = child_counts.entry(*parent_id).or_insert(0);
            *count += 1;
            orders.push(*count);
        }

        let nodes = self
            .pending
            .into_iter()
            .enumerate()
            .map(|(index, pending)| {
                let id = index as NodeId + 1;
                Node {
                    id,
                    name: pending.code.clone(),
                    code: pending.code,
                    parent_id: parent_ids[index],
                    parent_code: pending.parent_code.unwrap_or_default(),
                    level: pending.level,
                    path: pending.path,
                    order: orders[index],
                    is_leaf: !child_counts.contains_key(&id),
                    is_active: true,
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect();

        NodeTable::with_nodes(options, nodes)
    }
}
