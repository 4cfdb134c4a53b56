//! Report rendering.
//!
//! Formats merge summaries, integrity reports, and tree listings as
//! human-readable text. JSON output goes straight through serde; this
//! module only owns the text shape.

use crate::tree::merge::MergeOutcome;
use crate::tree::verify::IntegrityReport;
use crate::tree::{node_count, ResourceNode};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the outcome of a merge as a short summary.
pub fn format_merge_summary(outcome: &MergeOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Merge Summary")));
    out.push_str(&format!("  Root resources: {}\n", outcome.forest.len()));
    out.push_str(&format!(
        "  Total resources: {}\n",
        node_count(&outcome.forest)
    ));
    out.push_str(&format!(
        "  Overridden by second catalog: {}\n",
        outcome.overridden.len()
    ));
    out.push_str(&format!(
        "  Skipped (no identifier): {}\n",
        outcome.skipped.len()
    ));
    out.push_str(&format!("  Orphans: {}\n", outcome.orphans.len()));

    if !outcome.orphans.is_empty() {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Orphans")));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Id", "Name", "Declared parent"]);
        for orphan in &outcome.orphans {
            let parent = orphan
                .parent_id
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![orphan.id.to_string(), orphan.name.clone(), parent]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if !outcome.skipped.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Records without identifier")
        ));
        for skipped in &outcome.skipped {
            out.push_str(&format!("  {}\n", skipped.name));
        }
    }

    out
}

/// Format an integrity report as human-readable text.
pub fn format_integrity_text(report: &IntegrityReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Integrity Report")
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Check", "Value"]);
    table.add_row(vec![
        "First catalog ids".to_string(),
        report.first_ids.to_string(),
    ]);
    table.add_row(vec![
        "Second catalog ids".to_string(),
        report.second_ids.to_string(),
    ]);
    table.add_row(vec![
        "Merged node count".to_string(),
        report.merged_count.to_string(),
    ]);
    table.add_row(vec![
        "Expected (id union)".to_string(),
        report.expected_count.to_string(),
    ]);
    table.add_row(vec![
        "Menu / function".to_string(),
        format!("{} / {}", report.menu_count, report.function_count),
    ]);
    out.push_str(&format!("{}\n\n", table));

    if report.overlap.is_empty() {
        out.push_str("  No identifiers shared between the catalogs.\n");
    } else {
        // Shared ids are intentional override events, not errors.
        let sample: Vec<String> = report
            .overlap
            .iter()
            .take(5)
            .map(|id| id.to_string())
            .collect();
        out.push_str(&format!(
            "  Identifiers redefined by the second catalog: {} (e.g. {})\n",
            report.overlap.len(),
            sample.join(", ")
        ));
    }

    if report.is_clean() {
        out.push_str("\n  All integrity checks passed.\n");
    } else {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Violations")
        ));
        for violation in &report.violations {
            out.push_str(&format!("  - {}\n", violation));
        }
    }

    out
}

/// Format a forest as an indented listing with sort keys, mirroring the
/// established order. At most `max_roots` root subtrees are printed;
/// `0` means all of them.
pub fn format_tree_text(forest: &[ResourceNode], max_roots: usize) -> String {
    let mut out = String::new();
    let shown = if max_roots == 0 {
        forest.len()
    } else {
        forest.len().min(max_roots)
    };
    for node in &forest[..shown] {
        format_subtree(node, 0, &mut out);
    }
    if shown < forest.len() {
        out.push_str(&format!(
            "... {} more root subtrees\n",
            forest.len() - shown
        ));
    }
    out
}

fn format_subtree(node: &ResourceNode, level: usize, out: &mut String) {
    out.push_str(&format!(
        "{}{} (sort: {})\n",
        "  ".repeat(level),
        node.name,
        node.sort_key
    ));
    for child in &node.children {
        format_subtree(child, level + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::merge::merge_forests;
    use crate::tree::verify::verify_merge;
    use crate::types::ResourceId;

    fn sample_forest() -> Vec<ResourceNode> {
        let mut sys = ResourceNode {
            parent_id: Some(ResourceId::Int(0)),
            sort_key: 1,
            ..ResourceNode::new(1, "Sys")
        };
        sys.children.push(ResourceNode {
            parent_id: Some(ResourceId::Int(1)),
            sort_key: 2,
            ..ResourceNode::new(2, "Users")
        });
        vec![sys]
    }

    #[test]
    fn merge_summary_reports_counts() {
        let outcome = merge_forests(&sample_forest(), &[]);
        let text = format_merge_summary(&outcome);
        assert!(text.contains("Root resources: 1"));
        assert!(text.contains("Total resources: 2"));
        assert!(text.contains("Orphans: 0"));
    }

    #[test]
    fn integrity_text_lists_violations() {
        let first = sample_forest();
        let tampered: Vec<ResourceNode> = Vec::new();
        let report = verify_merge(&first, &[], &tampered);
        let text = format_integrity_text(&report);
        assert!(text.contains("Violations"));
        assert!(text.contains("missing from the merged forest"));
    }

    #[test]
    fn tree_listing_indents_children_and_truncates() {
        let forest = [sample_forest(), sample_forest()].concat();
        let text = format_tree_text(&forest, 1);
        assert!(text.contains("Sys (sort: 1)"));
        assert!(text.contains("  Users (sort: 2)"));
        assert!(text.contains("... 1 more root subtrees"));
    }
}
