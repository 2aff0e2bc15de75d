//! Longitudinal comparison of two completed scan analyses
//!
//! This module implements the whole engine as a pure pipeline over two
//! read-only [`ScanResult`] snapshots:
//!
//! - `matcher` - aligns findings between snapshots by anatomical area
//! - `classifier` - labels each matched pair improved/worsened/stable
//! - `scoring` - collapses the delta into one signed score and verdict
//! - `narrative` - renders deterministic summary and report text
//! - `types` - the value types flowing between stages
//!
//! The orchestrator validates preconditions, runs the stages in order,
//! and assembles the [`ComparisonResult`]. There is no I/O and no
//! state between calls; callers may run comparisons concurrently
//! without coordination.

pub mod classifier;
pub mod matcher;
pub mod narrative;
pub mod scoring;
pub mod types;

pub use types::{ChangeVerdict, ChangedIssue, ComparisonResult, MatchedFindings, VerdictCounts};

use crate::core::{
    ExamContext, Finding, ScanResult, ScandeltaError, ScandeltaResult, SeverityLevel,
};

/// Compares two completed scan analyses.
///
/// ```
/// use scandelta::comparison::ScanComparator;
/// use scandelta::core::{ExamContext, ScanResult, SeverityLevel};
///
/// let before = ScanResult {
///     id: "r1".into(),
///     scan_id: "s1".into(),
///     findings: Some(vec![]),
///     severity: Some(SeverityLevel::Normal),
///     confidence_score: 0.9,
///     abnormalities_detected: false,
///     triage_priority: 4,
///     ai_model: "MedVision AI v2.4".into(),
///     heatmap_image: None,
///     raw_analysis: None,
///     report_id: None,
///     processed_at: None,
/// };
/// let after = before.clone();
///
/// let result = ScanComparator::new(&before, &after)
///     .with_exam(ExamContext::new("xray", "chest"))
///     .compare()
///     .unwrap();
/// assert_eq!(result.overall_change.as_str(), "stable");
/// ```
pub struct ScanComparator<'a> {
    before: &'a ScanResult,
    after: &'a ScanResult,
    exam: ExamContext,
}

impl<'a> ScanComparator<'a> {
    pub fn new(before: &'a ScanResult, after: &'a ScanResult) -> Self {
        Self {
            before,
            after,
            exam: ExamContext::default(),
        }
    }

    /// Attach exam labels for the generated report text.
    pub fn with_exam(mut self, exam: ExamContext) -> Self {
        self.exam = exam;
        self
    }

    /// Run the comparison.
    ///
    /// Fails with [`ScandeltaError::MissingAnalysis`] when either
    /// snapshot lacks findings or severity; a snapshot still being
    /// analyzed cannot be compared. Never returns a partial result.
    pub fn compare(&self) -> ScandeltaResult<ComparisonResult> {
        let (before_findings, before_severity) = analyzed_parts(self.before)?;
        let (after_findings, after_severity) = analyzed_parts(self.after)?;
        Ok(compare_findings(
            before_findings,
            after_findings,
            before_severity,
            after_severity,
            &self.exam,
        ))
    }
}

/// Compare two completed scan analyses without exam labels.
pub fn compare_scan_results(
    before: &ScanResult,
    after: &ScanResult,
) -> ScandeltaResult<ComparisonResult> {
    ScanComparator::new(before, after).compare()
}

/// Pure: precondition check that a snapshot carries completed analysis.
fn analyzed_parts(result: &ScanResult) -> ScandeltaResult<(&[Finding], SeverityLevel)> {
    let findings = result
        .findings
        .as_deref()
        .ok_or_else(|| missing(result, "findings"))?;
    let severity = result.severity.ok_or_else(|| missing(result, "severity"))?;
    Ok((findings, severity))
}

fn missing(result: &ScanResult, field: &'static str) -> ScandeltaError {
    ScandeltaError::MissingAnalysis {
        id: result.id.clone(),
        field,
    }
}

/// Pure: run the full pipeline over validated findings.
fn compare_findings(
    before: &[Finding],
    after: &[Finding],
    before_severity: SeverityLevel,
    after_severity: SeverityLevel,
    exam: &ExamContext,
) -> ComparisonResult {
    let MatchedFindings {
        resolved,
        introduced,
        matched,
    } = matcher::match_findings(before, after);

    let changed_issues = classifier::classify_pairs(matched);
    let counts = classifier::count_verdicts(&changed_issues);

    let score =
        scoring::improvement_score(resolved.len(), introduced.len(), counts, before.len());
    let overall_change = scoring::overall_verdict(score);
    let change_percentage = scoring::change_percentage(score);

    let summary = narrative::build_summary(
        overall_change,
        change_percentage,
        &resolved,
        &introduced,
        &changed_issues,
        before_severity,
        after_severity,
    );
    let recommendations = narrative::build_recommendations(
        overall_change,
        &introduced,
        &changed_issues,
        after_severity,
    );
    let clinical_insight = narrative::build_clinical_insight(
        overall_change,
        exam,
        &resolved,
        &introduced,
        after,
        before_severity,
        after_severity,
    );

    ComparisonResult {
        overall_change,
        change_percentage,
        resolved_issues: resolved,
        new_issues: introduced,
        changed_issues,
        summary,
        recommendations,
        clinical_insight,
    }
}
