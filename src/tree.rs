//! Resource tree domain: node model and the reconciliation passes.
//!
//! A catalog is exchanged as a forest of nested [`ResourceNode`] records.
//! The passes in the submodules flatten such a forest into an id-keyed map,
//! rebuild a forest from a flat map, merge two catalogs, flatten the merged
//! tree into path records, and audit the result.

pub mod flatten;
pub mod merge;
pub mod paths;
pub mod rebuild;
pub mod verify;

pub use flatten::{flatten_forest, FlatMap, FlatNode, FlattenOutcome};
pub use merge::{merge_forests, MergeOutcome};
pub use paths::{flatten_paths, PathEntry};
pub use rebuild::{rebuild_forest, RebuildOutcome};
pub use verify::{verify_merge, IntegrityReport, SortViolation};

use crate::types::{ResourceId, SortKey};
use serde::{Deserialize, Serialize};

/// Kind tag of a catalog resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Navigable container surfaced in a menu hierarchy
    Menu,
    /// Leaf capability attached to a menu entry
    Function,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Menu
    }
}

/// A node of a resource catalog tree.
///
/// Mirrors the shape catalogs are exchanged in: `id` may be absent in raw
/// exports (such records cannot participate in rebuilding and are skipped
/// with a diagnostic), and a `parent_id` that is absent or the integer `0`
/// marks a root. Children are owned exclusively by their parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub sort_key: SortKey,
    pub children: Vec<ResourceNode>,
}

impl ResourceNode {
    /// Create a childless node with the given identifier and name.
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        ResourceNode {
            id: Some(id.into()),
            name: name.into(),
            ..ResourceNode::default()
        }
    }

    /// Whether the declared parent marks this node as a root.
    pub fn is_root(&self) -> bool {
        match &self.parent_id {
            None => true,
            Some(parent) => parent.is_root_marker(),
        }
    }
}

/// Count every node in the forest, children included.
pub fn node_count(forest: &[ResourceNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + node_count(&node.children))
        .sum()
}
