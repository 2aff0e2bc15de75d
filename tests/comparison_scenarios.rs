// Integration tests for the comparison engine
// These tests verify end-to-end behavior over realistic snapshots

use anyhow::Result;
use pretty_assertions::assert_eq;
use scandelta::{
    compare_scan_results, ChangeVerdict, ExamContext, Finding, ScanComparator, ScanResult,
    ScandeltaError, SeverityLevel,
};
use std::fs;
use std::path::PathBuf;

fn load_fixture(name: &str) -> Result<ScanResult> {
    let path = PathBuf::from("tests/data/fixtures").join(name);
    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

fn finding(area: &str, severity: SeverityLevel, confidence: f64) -> Finding {
    Finding {
        id: format!("f-{area}"),
        area: area.to_string(),
        description: String::new(),
        severity,
        confidence,
    }
}

fn snapshot(id: &str, findings: Vec<Finding>, severity: SeverityLevel) -> ScanResult {
    ScanResult {
        id: id.to_string(),
        scan_id: format!("scan-{id}"),
        findings: Some(findings),
        severity: Some(severity),
        confidence_score: 0.9,
        abnormalities_detected: true,
        triage_priority: 5,
        ai_model: "MedVision AI v2.4".to_string(),
        heatmap_image: None,
        raw_analysis: None,
        report_id: None,
        processed_at: None,
    }
}

#[test]
fn resolved_finding_scores_as_improvement() {
    let before = snapshot(
        "before",
        vec![finding("lung", SeverityLevel::High, 0.9)],
        SeverityLevel::High,
    );
    let after = snapshot("after", vec![], SeverityLevel::Normal);

    let result = compare_scan_results(&before, &after).unwrap();

    assert_eq!(result.resolved_issues.len(), 1);
    assert_eq!(result.resolved_issues[0].area, "lung");
    assert_eq!(result.overall_change, ChangeVerdict::Improved);
    assert_eq!(result.change_percentage, 100.0);
}

#[test]
fn new_critical_finding_triggers_consultation_advice() {
    let before = snapshot("before", vec![], SeverityLevel::Normal);
    let after = snapshot(
        "after",
        vec![finding("liver", SeverityLevel::Critical, 0.8)],
        SeverityLevel::Critical,
    );

    let result = compare_scan_results(&before, &after).unwrap();

    assert_eq!(result.new_issues.len(), 1);
    assert_eq!(result.overall_change, ChangeVerdict::Worsened);
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.contains("immediate medical consultation is strongly advised")));
}

#[test]
fn severity_worsening_with_steady_confidence_has_zero_drift() {
    let before = snapshot(
        "before",
        vec![finding("knee", SeverityLevel::Low, 0.7)],
        SeverityLevel::Low,
    );
    let after = snapshot(
        "after",
        vec![finding("knee", SeverityLevel::High, 0.7)],
        SeverityLevel::High,
    );

    let result = compare_scan_results(&before, &after).unwrap();

    assert_eq!(result.changed_issues.len(), 1);
    let issue = &result.changed_issues[0];
    assert_eq!(issue.change, ChangeVerdict::Worsened);
    assert_eq!(issue.change_percentage, 0.0);
    assert_eq!(result.overall_change, ChangeVerdict::Worsened);
}

#[test]
fn empty_snapshots_stay_stable_with_advice() {
    let before = snapshot("before", vec![], SeverityLevel::Normal);
    let after = snapshot("after", vec![], SeverityLevel::Normal);

    let result = compare_scan_results(&before, &after).unwrap();

    assert_eq!(result.overall_change, ChangeVerdict::Stable);
    assert_eq!(result.change_percentage, 0.0);
    assert!(result.resolved_issues.is_empty());
    assert!(result.new_issues.is_empty());
    assert!(result.changed_issues.is_empty());
    assert!(!result.recommendations.is_empty());
}

#[test]
fn empty_baseline_survives_division_guard() {
    let before = snapshot("before", vec![], SeverityLevel::Normal);
    let after = snapshot(
        "after",
        vec![finding("x", SeverityLevel::Medium, 0.5)],
        SeverityLevel::Medium,
    );

    let result = compare_scan_results(&before, &after).unwrap();

    assert!(result.change_percentage.is_finite());
    assert_eq!(result.overall_change, ChangeVerdict::Worsened);
    assert_eq!(result.change_percentage, 100.0);
}

#[test]
fn chest_fixture_pair_compares_end_to_end() -> Result<()> {
    let before = load_fixture("chest_before.json")?;
    let after = load_fixture("chest_after.json")?;

    let result = ScanComparator::new(&before, &after)
        .with_exam(ExamContext::new("xray", "chest"))
        .compare()?;

    assert_eq!(result.overall_change, ChangeVerdict::Improved);
    assert_eq!(result.change_percentage, 50.0);

    assert_eq!(result.resolved_issues.len(), 1);
    assert_eq!(result.resolved_issues[0].area, "Lower left lobe");
    assert_eq!(result.new_issues.len(), 1);
    assert_eq!(result.new_issues[0].area, "Mediastinum");
    assert_eq!(result.changed_issues.len(), 1);
    assert_eq!(result.changed_issues[0].area, "Upper right lobe");
    assert_eq!(result.changed_issues[0].change, ChangeVerdict::Improved);
    assert!((result.changed_issues[0].change_percentage - 3.0).abs() < 1e-9);

    assert_eq!(
        result.summary,
        "Analysis shows an overall improvement of 50.0%. \
         1 condition(s) have been resolved. \
         Severity level has changed from MEDIUM to MEDIUM. \
         Detailed analysis shows 1 improved area(s) and 0 worsened area(s)."
    );

    assert_eq!(result.recommendations.len(), 3);
    assert!(result.recommendations[0].contains("Mediastinum"));
    assert!(result.recommendations[1].contains("current treatment plan"));
    assert!(result.recommendations[2].contains("routine follow-up"));

    assert!(result
        .clinical_insight
        .starts_with("## Comparative Analysis Report: XRAY of CHEST"));
    assert!(result
        .clinical_insight
        .contains("Previously identified abnormalities in Lower left lobe have resolved"));
    assert!(result
        .clinical_insight
        .contains("New findings have emerged in Mediastinum"));
    assert!(result.clinical_insight.contains("6-12 months"));

    Ok(())
}

#[test]
fn pending_snapshot_fails_comparison() -> Result<()> {
    let pending = load_fixture("pending.json")?;
    let after = load_fixture("chest_after.json")?;

    let err = compare_scan_results(&pending, &after).unwrap_err();

    match err {
        ScandeltaError::MissingAnalysis { id, field } => {
            assert_eq!(id, "result-3");
            assert_eq!(field, "findings");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn unrecognized_severity_defaults_instead_of_failing() {
    let legacy = r#"{
        "id": "result-legacy",
        "scanId": "scan-legacy",
        "findings": [
            {"id": "f-1", "area": "Upper right lobe", "description": "Opacity", "confidence": 0.8, "severity": "indeterminate"}
        ],
        "severity": "low"
    }"#;
    let before: ScanResult = serde_json::from_str(legacy).unwrap();
    let after = snapshot(
        "after",
        vec![finding("Upper right lobe", SeverityLevel::Medium, 0.8)],
        SeverityLevel::Medium,
    );

    let result = compare_scan_results(&before, &after).unwrap();

    let issue = &result.changed_issues[0];
    assert_eq!(issue.before.severity, SeverityLevel::Normal);
    assert_eq!(issue.change, ChangeVerdict::Worsened);
}

#[test]
fn area_case_difference_splits_into_resolved_and_new() {
    let before = snapshot(
        "before",
        vec![finding("Medial Meniscus", SeverityLevel::Medium, 0.8)],
        SeverityLevel::Medium,
    );
    let after = snapshot(
        "after",
        vec![finding("medial meniscus", SeverityLevel::Medium, 0.8)],
        SeverityLevel::Medium,
    );

    let result = compare_scan_results(&before, &after).unwrap();

    assert_eq!(result.resolved_issues.len(), 1);
    assert_eq!(result.new_issues.len(), 1);
    assert!(result.changed_issues.is_empty());
}

#[test]
fn repeated_comparison_serializes_identically() -> Result<()> {
    let before = load_fixture("chest_before.json")?;
    let after = load_fixture("chest_after.json")?;
    let exam = ExamContext::new("xray", "chest");

    let first = ScanComparator::new(&before, &after)
        .with_exam(exam.clone())
        .compare()?;
    let second = ScanComparator::new(&before, &after)
        .with_exam(exam)
        .compare()?;

    assert_eq!(
        serde_json::to_vec(&first)?,
        serde_json::to_vec(&second)?
    );
    Ok(())
}

#[test]
fn result_json_uses_upstream_field_names() -> Result<()> {
    let before = load_fixture("chest_before.json")?;
    let after = load_fixture("chest_after.json")?;

    let result = compare_scan_results(&before, &after)?;
    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&result)?)?;

    let object = json.as_object().expect("result serializes to an object");
    for key in [
        "overallChange",
        "changePercentage",
        "resolvedIssues",
        "newIssues",
        "changedIssues",
        "summary",
        "recommendations",
        "clinicalInsight",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }

    let changed = json["changedIssues"][0]
        .as_object()
        .expect("changed issue is an object");
    assert!(changed.contains_key("changePercentage"));
    assert!(changed.contains_key("before"));
    assert!(changed.contains_key("after"));
    Ok(())
}
