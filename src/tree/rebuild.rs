//! Tree Rebuilder
//!
//! Rewires a flat id-keyed map back into a forest using each node's
//! declared parent. Two passes: child-id lists are indexed first, then the
//! forest is materialized from the declared roots, so a child record may be
//! encountered before its parent. A node whose parent never resolves is an
//! orphan: excluded from the forest, kept on a diagnostic side list.

use super::flatten::{FlatMap, FlatNode};
use super::{node_count, ResourceNode};
use crate::types::ResourceId;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of rebuilding a forest from a flat map.
#[derive(Debug)]
pub struct RebuildOutcome {
    /// Forest wired from the declared roots
    pub forest: Vec<ResourceNode>,
    /// Nodes whose declared parent is not present in the map
    pub orphans: Vec<FlatNode>,
}

/// Rebuild a forest from a flat map, visiting ids in `order`.
///
/// The encounter order decides the order children are appended in, which
/// the merger's stable sibling sort later uses as its tie-break. Linear in
/// node count: one wiring pass plus one materialization walk.
pub fn rebuild_forest(map: &FlatMap, order: &[ResourceId]) -> RebuildOutcome {
    let mut child_ids: HashMap<&ResourceId, Vec<&ResourceId>> = HashMap::new();
    let mut roots: Vec<&ResourceId> = Vec::new();
    let mut orphans: Vec<FlatNode> = Vec::new();

    for id in order {
        let Some(node) = map.get(id) else { continue };
        if node.is_root() {
            roots.push(id);
        } else if let Some(parent) = node.parent_id.as_ref() {
            if map.contains_key(parent) {
                child_ids.entry(parent).or_default().push(id);
            } else {
                warn!(id = %id, parent = %parent, "unresolved parent, node dropped as orphan");
                orphans.push(node.clone());
            }
        }
    }

    let forest: Vec<ResourceNode> = roots
        .iter()
        .filter_map(|id| map.get(*id))
        .map(|root| materialize(root, map, &child_ids))
        .collect();

    // A parent cycle leaves nodes wired to each other but reachable from no
    // root; they vanish from the forest and the verifier reports the ids.
    let attached = map.len().saturating_sub(orphans.len());
    let reachable = node_count(&forest);
    if reachable < attached {
        debug!(
            unreachable = attached - reachable,
            "nodes not reachable from any declared root"
        );
    }

    RebuildOutcome { forest, orphans }
}

fn materialize(
    flat: &FlatNode,
    map: &FlatMap,
    child_ids: &HashMap<&ResourceId, Vec<&ResourceId>>,
) -> ResourceNode {
    let children = child_ids
        .get(&flat.id)
        .map(|ids| {
            ids.iter()
                .filter_map(|id| map.get(*id))
                .map(|child| materialize(child, map, child_ids))
                .collect()
        })
        .unwrap_or_default();

    ResourceNode {
        id: Some(flat.id.clone()),
        parent_id: flat.parent_id.clone(),
        name: flat.name.clone(),
        kind: flat.kind,
        sort_key: flat.sort_key,
        children,
    }
}
