//! Path Flattener
//!
//! Walks a merged forest pre-order and emits one flat record per node
//! carrying the full separator-joined path and depth. Emission order is
//! part of the contract: a parent's record precedes all of its descendants'
//! and siblings appear in their established sorted order, so a downstream
//! renderer can stream the records as-is.

use super::{NodeKind, ResourceNode};
use crate::types::{ResourceId, SortKey};
use serde::{Deserialize, Serialize};

/// One row of the flattened lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEntry {
    /// Ancestor names joined by the separator, ending in this node's name
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Root nodes are at depth 1
    pub depth: usize,
    pub sort_key: SortKey,
}

/// Flatten a forest into path records, pre-order depth-first.
pub fn flatten_paths(forest: &[ResourceNode], separator: &str) -> Vec<PathEntry> {
    let mut entries = Vec::new();
    for node in forest {
        walk(node, "", 1, separator, &mut entries);
    }
    entries
}

fn walk(
    node: &ResourceNode,
    parent_path: &str,
    depth: usize,
    separator: &str,
    entries: &mut Vec<PathEntry>,
) {
    let path = if parent_path.is_empty() {
        node.name.clone()
    } else {
        format!("{}{}{}", parent_path, separator, node.name)
    };
    entries.push(PathEntry {
        path: path.clone(),
        id: node.id.clone(),
        kind: node.kind,
        depth,
        sort_key: node.sort_key,
    });
    for child in &node.children {
        walk(child, &path, depth + 1, separator, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_ancestor_names() {
        let mut business = ResourceNode::new(1, "Business");
        business.children.push(ResourceNode::new(2, "Orders"));

        let entries = flatten_paths(&[business], "/");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "Business");
        assert_eq!(entries[0].depth, 1);
        assert_eq!(entries[1].path, "Business/Orders");
        assert_eq!(entries[1].depth, 2);
    }

    #[test]
    fn parent_record_precedes_descendants() {
        let mut sys = ResourceNode::new(1, "Sys");
        let mut users = ResourceNode::new(2, "Users");
        users.children.push(ResourceNode::new(3, "Create"));
        sys.children.push(users);
        sys.children.push(ResourceNode::new(4, "Roles"));

        let entries = flatten_paths(&[sys], "/");

        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["Sys", "Sys/Users", "Sys/Users/Create", "Sys/Roles"]
        );
    }

    #[test]
    fn separator_is_caller_chosen() {
        let mut sys = ResourceNode::new(1, "Sys");
        sys.children.push(ResourceNode::new(2, "Users"));

        let entries = flatten_paths(&[sys], " - ");

        assert_eq!(entries[1].path, "Sys - Users");
    }

    #[test]
    fn names_are_concatenated_verbatim() {
        let mut odd = ResourceNode::new(1, "a/b");
        odd.children.push(ResourceNode::new(2, "c"));

        let entries = flatten_paths(&[odd], "/");

        // No escaping: the path is a plain join of display names.
        assert_eq!(entries[1].path, "a/b/c");
    }
}
