//! Per-pair change classification
//!
//! The verdict for a matched pair depends on severity movement alone.
//! Confidence drift is reported alongside as an unsigned magnitude
//! and never influences the verdict.

use super::types::{ChangeVerdict, ChangedIssue, VerdictCounts};
use crate::core::Finding;

/// Pure: signed severity movement for a matched pair. Negative means
/// the finding improved.
pub fn severity_delta(before: &Finding, after: &Finding) -> i8 {
    after.severity.rank() as i8 - before.severity.rank() as i8
}

/// Pure: absolute confidence drift as a percentage in [0, 100].
pub fn confidence_drift(before: &Finding, after: &Finding) -> f64 {
    (after.confidence - before.confidence).abs() * 100.0
}

/// Pure: map a severity delta to its verdict.
fn verdict_for_delta(delta: i8) -> ChangeVerdict {
    match delta {
        d if d < 0 => ChangeVerdict::Improved,
        d if d > 0 => ChangeVerdict::Worsened,
        _ => ChangeVerdict::Stable,
    }
}

/// Pure: classify one matched pair.
pub fn classify_pair(before: Finding, after: Finding) -> ChangedIssue {
    let change = verdict_for_delta(severity_delta(&before, &after));
    let change_percentage = confidence_drift(&before, &after);
    ChangedIssue {
        area: before.area.clone(),
        before,
        after,
        change,
        change_percentage,
    }
}

/// Pure: classify every matched pair, preserving pair order.
pub fn classify_pairs(matched: Vec<(Finding, Finding)>) -> Vec<ChangedIssue> {
    matched
        .into_iter()
        .map(|(before, after)| classify_pair(before, after))
        .collect()
}

/// Pure: tally verdicts across classified pairs.
pub fn count_verdicts(issues: &[ChangedIssue]) -> VerdictCounts {
    issues
        .iter()
        .fold(VerdictCounts::default(), |mut counts, issue| {
            match issue.change {
                ChangeVerdict::Improved => counts.improved += 1,
                ChangeVerdict::Worsened => counts.worsened += 1,
                ChangeVerdict::Stable => counts.stable += 1,
            }
            counts
        })
}
