//! Tree Merger
//!
//! Combines two catalog forests into one canonical forest. The second
//! catalog is authoritative on identifier collision: its record replaces
//! the first's wholesale, and where the node lands in the hierarchy is
//! recomputed from its own declared parent. After rebuilding, every sibling
//! list is sorted by sort key, stable on discovery order.

use super::flatten::{flatten_forest, FlatNode};
use super::rebuild::{rebuild_forest, RebuildOutcome};
use super::ResourceNode;
use crate::error::MissingIdentifier;
use crate::types::ResourceId;
use tracing::{debug, info};

/// Result of merging two forests, with the diagnostics gathered on the way.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Merged, fully linked, sorted forest
    pub forest: Vec<ResourceNode>,
    /// Identifiers declared by both catalogs; the second catalog's record won
    pub overridden: Vec<ResourceId>,
    /// Records without identifiers, skipped during flattening
    pub skipped: Vec<MissingIdentifier>,
    /// Nodes dropped because their declared parent never resolved
    pub orphans: Vec<FlatNode>,
}

/// Merge two catalog forests; the second wins on identifier collision.
///
/// An empty result is a valid, degenerate outcome when both inputs are
/// empty. Duplicate identifiers across the catalogs are never an error:
/// they are override events, counted on the outcome.
pub fn merge_forests(first: &[ResourceNode], second: &[ResourceNode]) -> MergeOutcome {
    let mut flat = flatten_forest(first);
    let replacement = flatten_forest(second);
    flat.skipped.extend(replacement.skipped);

    // Union of the two maps. An overridden id keeps the first catalog's
    // encounter slot so sibling tie-breaks stay deterministic.
    let mut overridden = Vec::new();
    let mut replacement_map = replacement.map;
    for id in replacement.order {
        if let Some(node) = replacement_map.remove(&id) {
            if flat.map.insert(id.clone(), node).is_some() {
                debug!(id = %id, "identifier redefined by second catalog");
                overridden.push(id);
            } else {
                flat.order.push(id);
            }
        }
    }

    let RebuildOutcome { mut forest, orphans } = rebuild_forest(&flat.map, &flat.order);
    sort_forest(&mut forest);

    info!(
        total = flat.map.len(),
        roots = forest.len(),
        overridden = overridden.len(),
        orphans = orphans.len(),
        "catalogs merged"
    );

    MergeOutcome {
        forest,
        overridden,
        skipped: flat.skipped,
        orphans,
    }
}

/// Recursively sort every sibling list by sort key.
///
/// `sort_by_key` is stable, so equal keys keep their encounter order and
/// repeated sorting is idempotent.
pub fn sort_forest(forest: &mut [ResourceNode]) {
    forest.sort_by_key(|node| node.sort_key);
    for node in forest.iter_mut() {
        sort_forest(&mut node.children);
    }
}
