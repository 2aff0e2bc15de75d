//! Aggregate scoring across a whole comparison
//!
//! The score is a signed ratio against the size of the baseline
//! finding set. Resolved areas and improved pairs count for the
//! patient; worsened pairs and newly introduced findings count
//! against. New findings always count against, whatever their
//! severity.

use super::types::{ChangeVerdict, VerdictCounts};

/// Pure: signed improvement score for a comparison.
///
/// The divisor is the baseline finding count floored at 1, so an
/// empty baseline still yields a finite score instead of a division
/// error. The result is unbounded: more regressions than baseline
/// findings push it below -1.0.
pub fn improvement_score(
    resolved_count: usize,
    introduced_count: usize,
    counts: VerdictCounts,
    baseline_total: usize,
) -> f64 {
    let gains = (resolved_count + counts.improved) as f64;
    let losses = (counts.worsened + introduced_count) as f64;
    let baseline = baseline_total.max(1) as f64;
    (gains - losses) / baseline
}

/// Pure: overall verdict from the signed score.
pub fn overall_verdict(score: f64) -> ChangeVerdict {
    if score > 0.0 {
        ChangeVerdict::Improved
    } else if score < 0.0 {
        ChangeVerdict::Worsened
    } else {
        ChangeVerdict::Stable
    }
}

/// Pure: score magnitude as a percentage.
///
/// Not clamped: values above 100 are meaningful (regressions
/// outnumbering the baseline) and display layers decide how to cap
/// them.
pub fn change_percentage(score: f64) -> f64 {
    score.abs() * 100.0
}
