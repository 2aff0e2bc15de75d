//! Finding alignment between two snapshots
//!
//! Findings correspond when their `area` strings are byte-equal.
//! Matching is deliberately case sensitive: area labels come from a
//! single upstream vocabulary, and silently folding case would merge
//! regions the analysis service considers distinct.

use std::collections::HashSet;

use super::types::MatchedFindings;
use crate::core::Finding;

/// Pure: align two finding sets by anatomical area.
///
/// Produces the three disjoint views used by the rest of the pipeline:
/// findings whose area vanished (`resolved`), findings whose area is
/// new (`introduced`), and one before/after pair per shared area
/// (`matched`). Order follows the input slices, so equal inputs yield
/// equal output.
pub fn match_findings(before: &[Finding], after: &[Finding]) -> MatchedFindings {
    let before_areas: HashSet<&str> = before.iter().map(|f| f.area.as_str()).collect();
    let after_areas: HashSet<&str> = after.iter().map(|f| f.area.as_str()).collect();

    MatchedFindings {
        resolved: findings_outside(before, &after_areas),
        introduced: findings_outside(after, &before_areas),
        matched: pair_shared_areas(before, after),
    }
}

/// Pure: findings whose area does not appear in the other snapshot.
fn findings_outside(findings: &[Finding], other_areas: &HashSet<&str>) -> Vec<Finding> {
    findings
        .iter()
        .filter(|f| !other_areas.contains(f.area.as_str()))
        .cloned()
        .collect()
}

/// Pure: one (before, after) pair per area present in both snapshots.
///
/// Duplicate areas within a snapshot are tolerated: the first finding
/// on each side wins and later duplicates are dropped from the
/// matched view.
fn pair_shared_areas(before: &[Finding], after: &[Finding]) -> Vec<(Finding, Finding)> {
    let mut paired: HashSet<&str> = HashSet::new();
    before
        .iter()
        .filter(|b| paired.insert(b.area.as_str()))
        .filter_map(|b| {
            after
                .iter()
                .find(|a| a.area == b.area)
                .map(|a| (b.clone(), a.clone()))
        })
        .collect()
}
