//! Structural checks over a [`NodeTable`].

use std::collections::HashMap;
use std::fmt;

use crate::aideon::hierarchy::model::{Node, NodeId, NodeTable, ROOT_PARENT};

const ROOT_LEVEL: u32 = 1;

/// Kind of invariant a row breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The row id is `0`.
    ZeroId,
    /// Another row carries the same id.
    DuplicateId,
    /// `parent_id` names no row.
    MissingParent { parent_id: NodeId },
    /// `path` does not extend the parent path.
    PathMismatch { expected_prefix: String },
    /// `level` is not the parent level plus one, or not 1 on a root.
    LevelMismatch { expected: u32, actual: u32 },
}

/// A single finding, localised to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Position of the row in the table.
    pub row: usize,
    pub id: NodeId,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} (id {}): ", self.row, self.id)?;
        match &self.kind {
            ViolationKind::ZeroId => write!(f, "id must be non-zero"),
            ViolationKind::DuplicateId => write!(f, "id is not unique"),
            ViolationKind::MissingParent { parent_id } => {
                write!(f, "parent {parent_id} does not exist")
            }
            ViolationKind::PathMismatch { expected_prefix } => {
                write!(f, "path does not start with '{expected_prefix}'")
            }
            ViolationKind::LevelMismatch { expected, actual } => {
                write!(f, "level {actual} should be {expected}")
            }
        }
    }
}

/// Returns `true` when every row satisfies the table invariants.
pub fn validate(table: &NodeTable) -> bool {
    diagnose(table).is_empty()
}

/// Lists every invariant violation, in row order.
///
/// Path and level are only checked against a parent that resolves to a
/// single row.
pub fn diagnose(table: &NodeTable) -> Vec<Violation> {
    let mut by_id: HashMap<NodeId, Vec<usize>> = HashMap::new();
    for (row, node) in table.nodes.iter().enumerate() {
        by_id.entry(node.id).or_default().push(row);
    }

    let mut violations = Vec::new();
    for (row, node) in table.nodes.iter().enumerate() {
        let mut report = |kind| {
            violations.push(Violation {
                row,
                id: node.id,
                kind,
            })
        };

        if node.id == ROOT_PARENT {
            report(ViolationKind::ZeroId);
        } else if by_id.get(&node.id).is_some_and(|rows| rows.len() > 1) {
            report(ViolationKind::DuplicateId);
        }

        if node.is_root() {
            if node.level != ROOT_LEVEL {
                report(ViolationKind::LevelMismatch {
                    expected: ROOT_LEVEL,
                    actual: node.level,
                });
            }
            continue;
        }

        let parent = match by_id.get(&node.parent_id).map(Vec::as_slice) {
            None | Some([]) => {
                report(ViolationKind::MissingParent {
                    parent_id: node.parent_id,
                });
                continue;
            }
            Some([single]) => &table.nodes[*single],
            Some(_) => continue,
        };

        check_against_parent(table, node, parent, &mut report);
    }
    violations
}

fn check_against_parent(
    table: &NodeTable,
    node: &Node,
    parent: &Node,
    report: &mut impl FnMut(ViolationKind),
) {
    let expected_prefix = format!("{}{}", parent.path, table.separator);
    if !node.path.starts_with(&expected_prefix) {
        report(ViolationKind::PathMismatch { expected_prefix });
    }

    let expected = parent.level + 1;
    if node.level != expected {
        report(ViolationKind::LevelMismatch {
            expected,
            actual: node.level,
        });
    }
}
