use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aideon::hierarchy::config::HierarchyOptions;

/// Identifier assigned to a row. `0` is reserved for "no parent".
pub type NodeId = u64;

/// Parent id carried by root rows.
pub const ROOT_PARENT: NodeId = 0;

/// Timestamp stamped onto rows when they are created.
pub type Timestamp = DateTime<Utc>;

/// One row of the flattened hierarchy.
///
/// Field order matches the column order used by the persistence backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub code: String,
    /// Display label. Equal to `code` when the source carries no name.
    pub name: String,
    pub parent_id: NodeId,
    /// Copy of the parent's code, empty for roots. Not authoritative.
    pub parent_code: String,
    /// Depth, starting at 1 for roots.
    pub level: u32,
    /// Codes from the root down to this node, joined by the table separator.
    pub path: String,
    /// 1-based position among siblings.
    pub order: u32,
    /// Whether the node had no children when the table was built.
    pub is_leaf: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT
    }
}

/// Ordered collection of [`Node`] rows sharing one path separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable {
    pub separator: char,
    /// Name of the source field the codes were taken from.
    pub target_field: String,
    pub nodes: Vec<Node>,
}

impl NodeTable {
    /// Creates an empty table using the configured separator and field label.
    pub fn new(options: &HierarchyOptions) -> Self {
        Self::with_nodes(options, Vec::new())
    }

    pub fn with_nodes(options: &HierarchyOptions, nodes: Vec<Node>) -> Self {
        Self {
            separator: options.separator,
            target_field: options.target_field.clone(),
            nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Rows with `parent_id == 0`, in table order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_root())
    }

    /// Returns the first row carrying the given code.
    pub fn find_by_code(&self, code: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.code == code)
    }

    /// Joins a child code onto a parent path with the table separator.
    pub fn child_path(&self, parent_path: &str, code: &str) -> String {
        format!("{parent_path}{}{code}", self.separator)
    }
}

impl<'a> IntoIterator for &'a NodeTable {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Nested input accepted by the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeValue {
    pub code: String,
    pub name: String,
    pub children: Vec<TreeValue>,
}

impl TreeValue {
    /// Creates a childless value.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Creates a childless value whose name equals its code.
    pub fn leaf(code: impl Into<String>) -> Self {
        let code = code.into();
        Self::new(code.clone(), code)
    }

    /// Appends a child and returns the updated value.
    pub fn with_child(mut self, child: TreeValue) -> Self {
        self.children.push(child);
        self
    }

    /// Number of values in this subtree, including itself.
    pub fn size(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(value) = stack.pop() {
            total += 1;
            stack.extend(value.children.iter());
        }
        total
    }
}

#[derive(Deserialize)]
struct RawTreeValue {
    code: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    children: Vec<TreeValue>,
}

impl<'de> Deserialize<'de> for TreeValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTreeValue::deserialize(deserializer)?;
        let name = raw.name.unwrap_or_else(|| raw.code.clone());
        Ok(TreeValue {
            code: raw.code,
            name,
            children: raw.children,
        })
    }
}

/// Nested tree rebuilt from a [`NodeTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub code: String,
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Drops ids, keeping only the structure the builder consumes.
    pub fn to_value(&self) -> TreeValue {
        TreeValue {
            code: self.code.clone(),
            name: self.name.clone(),
            children: self.children.iter().map(TreeNode::to_value).collect(),
        }
    }
}

impl From<&TreeNode> for TreeValue {
    fn from(node: &TreeNode) -> Self {
        node.to_value()
    }
}
