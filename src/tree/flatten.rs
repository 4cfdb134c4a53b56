//! Tree Flattener
//!
//! Collapses a nested catalog forest into an id-keyed map of children-free
//! node copies. The flat map is the order-independent intermediate the
//! other passes work from; a companion encounter index preserves pre-order
//! discovery order for deterministic sibling tie-breaks.

use crate::error::MissingIdentifier;
use crate::tree::{NodeKind, ResourceNode};
use crate::types::{ResourceId, SortKey};
use std::collections::HashMap;
use tracing::warn;

/// A node stripped of its subtree: the attributes and declared parent only.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode {
    pub id: ResourceId,
    pub parent_id: Option<ResourceId>,
    pub name: String,
    pub kind: NodeKind,
    pub sort_key: SortKey,
}

impl FlatNode {
    /// Whether the declared parent marks this node as a root.
    pub fn is_root(&self) -> bool {
        match &self.parent_id {
            None => true,
            Some(parent) => parent.is_root_marker(),
        }
    }
}

/// Identifier-keyed map of flattened nodes.
pub type FlatMap = HashMap<ResourceId, FlatNode>;

/// Result of flattening one forest.
#[derive(Debug, Default)]
pub struct FlattenOutcome {
    /// Identifier to flattened node
    pub map: FlatMap,
    /// Pre-order discovery order of identifiers; a duplicate id keeps its
    /// first slot even though the later record's attributes win
    pub order: Vec<ResourceId>,
    /// Records skipped because they carry no identifier
    pub skipped: Vec<MissingIdentifier>,
}

/// Flatten a forest into an id-keyed map of children-free copies.
///
/// Traversal is pre-order depth-first. Records without an identifier are
/// excluded from the map and reported on the outcome's `skipped` list;
/// their subtrees are still traversed.
pub fn flatten_forest(forest: &[ResourceNode]) -> FlattenOutcome {
    let mut outcome = FlattenOutcome::default();
    for node in forest {
        flatten_into(node, &mut outcome);
    }
    outcome
}

fn flatten_into(node: &ResourceNode, outcome: &mut FlattenOutcome) {
    match &node.id {
        Some(id) => {
            let flat = FlatNode {
                id: id.clone(),
                parent_id: node.parent_id.clone(),
                name: node.name.clone(),
                kind: node.kind,
                sort_key: node.sort_key,
            };
            if outcome.map.insert(id.clone(), flat).is_none() {
                outcome.order.push(id.clone());
            }
        }
        None => {
            warn!(name = %node.name, "record without identifier skipped");
            outcome.skipped.push(MissingIdentifier {
                name: node.name.clone(),
                parent_id: node.parent_id.clone(),
            });
        }
    }
    for child in &node.children {
        flatten_into(child, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_of(id: i64, parent: i64, name: &str) -> ResourceNode {
        ResourceNode {
            parent_id: Some(ResourceId::Int(parent)),
            ..ResourceNode::new(id, name)
        }
    }

    #[test]
    fn flattens_pre_order_with_children_cleared() {
        let mut root = ResourceNode::new(1, "Sys");
        let mut users = child_of(2, 1, "Users");
        users.children.push(child_of(4, 2, "Create"));
        root.children.push(users);
        root.children.push(child_of(3, 1, "Roles"));

        let outcome = flatten_forest(&[root]);

        assert_eq!(outcome.order, vec![1.into(), 2.into(), 4.into(), 3.into()]);
        assert_eq!(outcome.map.len(), 4);
        assert!(outcome.skipped.is_empty());
        let users = &outcome.map[&ResourceId::Int(2)];
        assert_eq!(users.name, "Users");
        assert_eq!(users.parent_id, Some(ResourceId::Int(1)));
    }

    #[test]
    fn id_less_record_is_skipped_but_its_subtree_survives() {
        let mut anonymous = ResourceNode {
            name: "Untitled".to_string(),
            ..ResourceNode::default()
        };
        anonymous.children.push(ResourceNode::new(9, "Orphaned child"));

        let outcome = flatten_forest(&[anonymous]);

        assert_eq!(outcome.map.len(), 1);
        assert!(outcome.map.contains_key(&ResourceId::Int(9)));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].name, "Untitled");
    }

    #[test]
    fn duplicate_id_in_one_source_keeps_first_slot_with_last_attributes() {
        let first = ResourceNode::new(1, "First");
        let second = ResourceNode::new(2, "Second");
        let replay = ResourceNode::new(1, "Replayed");

        let outcome = flatten_forest(&[first, second, replay]);

        assert_eq!(outcome.order, vec![1.into(), 2.into()]);
        assert_eq!(outcome.map[&ResourceId::Int(1)].name, "Replayed");
    }
}
