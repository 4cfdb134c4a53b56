//! Integrity Verifier
//!
//! Read-only audit of a merge. Recounts nodes, recomputes identifier sets,
//! and rechecks sibling ordering and path depths without trusting the
//! merger's internals. Findings are reported on the returned
//! [`IntegrityReport`], never corrected in place.

use super::paths::flatten_paths;
use super::{node_count, NodeKind, ResourceNode};
use crate::error::IntegrityViolation;
use crate::types::ResourceId;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Location of the first sibling-order breach found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortViolation {
    /// Name of the child whose sort key precedes its left sibling's
    pub name: String,
    /// Depth of that child; roots are at depth 1
    pub depth: usize,
}

/// Outcome of the audit. `violations` is empty for a correct merge.
#[derive(Debug, Serialize)]
pub struct IntegrityReport {
    /// Distinct identifiers in the first catalog
    pub first_ids: usize,
    /// Distinct identifiers in the second catalog
    pub second_ids: usize,
    /// Nodes in the merged forest
    pub merged_count: usize,
    /// Size of the identifier union, the expected merged count
    pub expected_count: usize,
    /// Identifiers declared by both catalogs: intentional override events
    pub overlap: BTreeSet<ResourceId>,
    /// Identifiers from the union absent in the merged forest
    pub missing_ids: BTreeSet<ResourceId>,
    /// Identifiers in the merged forest that neither catalog declares
    pub extra_ids: BTreeSet<ResourceId>,
    /// Menu nodes in the merged forest
    pub menu_count: usize,
    /// Function nodes in the merged forest
    pub function_count: usize,
    pub first_sort_violation: Option<SortViolation>,
    pub violations: Vec<IntegrityViolation>,
}

impl IntegrityReport {
    /// Whether the audit found no invariant breaches.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Audit a merged forest against the two catalogs it was built from.
pub fn verify_merge(
    first: &[ResourceNode],
    second: &[ResourceNode],
    merged: &[ResourceNode],
) -> IntegrityReport {
    let first_set = collect_ids(first);
    let second_set = collect_ids(second);
    let merged_set = collect_ids(merged);

    let expected: BTreeSet<ResourceId> = first_set.union(&second_set).cloned().collect();
    let overlap: BTreeSet<ResourceId> = first_set.intersection(&second_set).cloned().collect();
    let missing_ids: BTreeSet<ResourceId> = expected.difference(&merged_set).cloned().collect();
    let extra_ids: BTreeSet<ResourceId> = merged_set.difference(&expected).cloned().collect();

    let merged_count = node_count(merged);
    let expected_count = expected.len();

    let mut violations = Vec::new();
    if merged_count != expected_count {
        violations.push(IntegrityViolation::CountMismatch {
            expected: expected_count,
            actual: merged_count,
        });
    }
    for id in &missing_ids {
        violations.push(IntegrityViolation::MissingId { id: id.clone() });
    }
    for id in &extra_ids {
        violations.push(IntegrityViolation::UnknownId { id: id.clone() });
    }

    let mut sort_violations = Vec::new();
    check_sort_order(merged, 1, &mut sort_violations);
    let first_sort_violation = sort_violations.first().map(|(name, depth)| SortViolation {
        name: name.clone(),
        depth: *depth,
    });
    for (name, depth) in sort_violations {
        violations.push(IntegrityViolation::SortOrder { name, depth });
    }

    check_path_depths(merged, &mut violations);

    let (menu_count, function_count) = count_kinds(merged);

    debug!(
        merged = merged_count,
        expected = expected_count,
        violations = violations.len(),
        "integrity audit complete"
    );

    IntegrityReport {
        first_ids: first_set.len(),
        second_ids: second_set.len(),
        merged_count,
        expected_count,
        overlap,
        missing_ids,
        extra_ids,
        menu_count,
        function_count,
        first_sort_violation,
        violations,
    }
}

fn collect_ids(forest: &[ResourceNode]) -> BTreeSet<ResourceId> {
    let mut ids = BTreeSet::new();
    collect_into(forest, &mut ids);
    ids
}

fn collect_into(forest: &[ResourceNode], ids: &mut BTreeSet<ResourceId>) {
    for node in forest {
        if let Some(id) = &node.id {
            ids.insert(id.clone());
        }
        collect_into(&node.children, ids);
    }
}

/// Record one violation per mis-ordered sibling list, naming the first
/// child whose key undercuts its left sibling's.
fn check_sort_order(
    siblings: &[ResourceNode],
    depth: usize,
    violations: &mut Vec<(String, usize)>,
) {
    for pair in siblings.windows(2) {
        if pair[1].sort_key < pair[0].sort_key {
            violations.push((pair[1].name.clone(), depth));
            break;
        }
    }
    for node in siblings {
        check_sort_order(&node.children, depth + 1, violations);
    }
}

/// Check the path flattener's depth sequence against the structure the
/// pre-order contract implies: an entry of depth d+1 attaches to the most
/// recent entry of depth d.
fn check_path_depths(merged: &[ResourceNode], violations: &mut Vec<IntegrityViolation>) {
    let entries = flatten_paths(merged, "/");
    let mut depth_stack: Vec<usize> = Vec::new();
    for entry in &entries {
        while depth_stack.last().is_some_and(|top| *top >= entry.depth) {
            depth_stack.pop();
        }
        let expected = depth_stack.last().copied().unwrap_or(0) + 1;
        if entry.depth != expected {
            violations.push(IntegrityViolation::DepthMismatch {
                path: entry.path.clone(),
                expected,
                actual: entry.depth,
            });
        }
        depth_stack.push(entry.depth);
    }
}

fn count_kinds(forest: &[ResourceNode]) -> (usize, usize) {
    let mut menus = 0;
    let mut functions = 0;
    count_kinds_into(forest, &mut menus, &mut functions);
    (menus, functions)
}

fn count_kinds_into(forest: &[ResourceNode], menus: &mut usize, functions: &mut usize) {
    for node in forest {
        match node.kind {
            NodeKind::Menu => *menus += 1,
            NodeKind::Function => *functions += 1,
        }
        count_kinds_into(&node.children, menus, functions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::merge::merge_forests;

    fn root(id: i64, name: &str, sort_key: i64) -> ResourceNode {
        ResourceNode {
            parent_id: Some(ResourceId::Int(0)),
            sort_key,
            ..ResourceNode::new(id, name)
        }
    }

    #[test]
    fn clean_merge_passes_every_check() {
        let first = vec![root(1, "Sys", 2)];
        let second = vec![root(2, "Biz", 1), root(1, "Sys v2", 2)];

        let merged = merge_forests(&first, &second);
        let report = verify_merge(&first, &second, &merged.forest);

        assert!(report.is_clean(), "violations: {:?}", report.violations);
        assert_eq!(report.merged_count, 2);
        assert_eq!(report.expected_count, 2);
        assert_eq!(report.overlap.len(), 1);
        assert!(report.first_sort_violation.is_none());
    }

    #[test]
    fn dropped_identifier_is_reported_missing() {
        let first = vec![root(1, "Sys", 1), root(2, "Biz", 2)];
        let second: Vec<ResourceNode> = Vec::new();
        let tampered = vec![root(1, "Sys", 1)];

        let report = verify_merge(&first, &second, &tampered);

        assert!(!report.is_clean());
        assert!(report.missing_ids.contains(&ResourceId::Int(2)));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::CountMismatch { expected: 2, actual: 1 })));
    }

    #[test]
    fn invented_identifier_is_reported_extra() {
        let first = vec![root(1, "Sys", 1)];
        let merged = vec![root(1, "Sys", 1), root(99, "Phantom", 2)];

        let report = verify_merge(&first, &[], &merged);

        assert!(report.extra_ids.contains(&ResourceId::Int(99)));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::UnknownId { .. })));
    }

    #[test]
    fn misordered_siblings_are_located_by_name_and_depth() {
        let mut sys = root(1, "Sys", 1);
        sys.children.push(ResourceNode {
            parent_id: Some(ResourceId::Int(1)),
            sort_key: 5,
            ..ResourceNode::new(2, "Late")
        });
        sys.children.push(ResourceNode {
            parent_id: Some(ResourceId::Int(1)),
            sort_key: 3,
            ..ResourceNode::new(3, "Early")
        });
        let first = vec![sys.clone()];

        let report = verify_merge(&first, &[], &[sys]);

        let violation = report.first_sort_violation.expect("sort violation");
        assert_eq!(violation.name, "Early");
        assert_eq!(violation.depth, 2);
    }

    #[test]
    fn kind_distribution_is_counted() {
        let mut sys = root(1, "Sys", 1);
        sys.children.push(ResourceNode {
            parent_id: Some(ResourceId::Int(1)),
            kind: NodeKind::Function,
            ..ResourceNode::new(2, "Export")
        });
        let forest = vec![sys];

        let report = verify_merge(&forest, &[], &forest);

        assert_eq!(report.menu_count, 1);
        assert_eq!(report.function_count, 1);
    }

    #[test]
    fn cross_catalog_overlap_is_informational_not_a_violation() {
        let first = vec![root(5, "Shared", 1)];
        let second = vec![root(5, "Shared v2", 1)];

        let merged = merge_forests(&first, &second);
        let report = verify_merge(&first, &second, &merged.forest);

        assert_eq!(report.overlap.len(), 1);
        assert!(report.is_clean());
    }
}
