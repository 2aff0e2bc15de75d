//! Deterministic report text
//!
//! Every sentence here is selected by verdicts and counts alone.
//! The product surfaces this text as AI-assisted analysis, so it must
//! stay reproducible: same structured delta, same words, every run.

use super::classifier::count_verdicts;
use super::types::{ChangeVerdict, ChangedIssue};
use crate::core::{ExamContext, Finding, SeverityLevel};

const DISCLAIMER: &str = "This analysis was performed using advanced medical imaging AI \
and should be interpreted in conjunction with clinical findings by a qualified healthcare \
professional.";

/// Pure: one-paragraph summary of the comparison.
pub fn build_summary(
    verdict: ChangeVerdict,
    change_percentage: f64,
    resolved: &[Finding],
    introduced: &[Finding],
    changed: &[ChangedIssue],
    before_severity: SeverityLevel,
    after_severity: SeverityLevel,
) -> String {
    let counts = count_verdicts(changed);

    let opening = match verdict {
        ChangeVerdict::Improved => {
            format!("Analysis shows an overall improvement of {change_percentage:.1}%.")
        }
        ChangeVerdict::Worsened => {
            format!("Analysis indicates a decline of {change_percentage:.1}%.")
        }
        ChangeVerdict::Stable => {
            "The condition appears stable with no significant changes.".to_string()
        }
    };

    let detail = match verdict {
        ChangeVerdict::Improved => (!resolved.is_empty())
            .then(|| format!("{} condition(s) have been resolved.", resolved.len())),
        ChangeVerdict::Worsened => (!introduced.is_empty())
            .then(|| format!("{} new issue(s) detected.", introduced.len())),
        ChangeVerdict::Stable => changed
            .iter()
            .any(|issue| issue.change != ChangeVerdict::Stable)
            .then(|| {
                "While some areas show minor variations, the overall severity remains unchanged."
                    .to_string()
            }),
    };

    let severity_shift = (verdict != ChangeVerdict::Stable).then(|| {
        format!(
            "Severity level has changed from {} to {}.",
            before_severity.as_str().to_uppercase(),
            after_severity.as_str().to_uppercase()
        )
    });

    let area_breakdown = (counts.improved > 0 || counts.worsened > 0).then(|| {
        format!(
            "Detailed analysis shows {} improved area(s) and {} worsened area(s).",
            counts.improved, counts.worsened
        )
    });

    [Some(opening), detail, severity_shift, area_breakdown]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pure: ordered recommendation list.
///
/// Rules fire independently and append in a fixed order, so the list
/// is never empty: the trend rules for improved and stable always
/// contribute, and a worsened trend fires the follow-up rule.
pub fn build_recommendations(
    verdict: ChangeVerdict,
    introduced: &[Finding],
    changed: &[ChangedIssue],
    after_severity: SeverityLevel,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if verdict == ChangeVerdict::Worsened {
        recommendations.push(
            "Schedule an immediate follow-up with your healthcare provider to discuss \
             the progression of your condition."
                .to_string(),
        );
    }

    if !introduced.is_empty() {
        recommendations.push(format!(
            "New findings require medical attention. Consider consulting a specialist \
             for the {}.",
            area_list(introduced)
        ));
    }

    let worsened_areas: Vec<&str> = changed
        .iter()
        .filter(|issue| issue.change == ChangeVerdict::Worsened)
        .map(|issue| issue.area.as_str())
        .collect();
    if !worsened_areas.is_empty() {
        recommendations.push(format!(
            "Areas showing deterioration ({}) should be closely monitored.",
            worsened_areas.join(", ")
        ));
    }

    if after_severity.is_severe() {
        recommendations.push(
            "Due to the current severity level, immediate medical consultation is \
             strongly advised."
                .to_string(),
        );
    }

    match verdict {
        ChangeVerdict::Improved => recommendations.extend([
            "Continue with your current treatment plan as it shows positive results.".to_string(),
            "Schedule a routine follow-up to maintain progress monitoring.".to_string(),
        ]),
        ChangeVerdict::Stable => recommendations.extend([
            "Maintain your current treatment regimen and continue regular monitoring.".to_string(),
            "Consider discussing preventive measures with your healthcare provider.".to_string(),
        ]),
        ChangeVerdict::Worsened => {}
    }

    recommendations
}

/// Pure: full clinical-insight report in markdown.
///
/// Sections mirror a radiology comparison report. The exam labels
/// come from [`ExamContext`] and fall back to "unknown" rather than
/// failing, since the engine never requires them.
pub fn build_clinical_insight(
    verdict: ChangeVerdict,
    exam: &ExamContext,
    resolved: &[Finding],
    introduced: &[Finding],
    after_findings: &[Finding],
    before_severity: SeverityLevel,
    after_severity: SeverityLevel,
) -> String {
    let severe: Vec<&Finding> = after_findings
        .iter()
        .filter(|f| f.severity.is_severe())
        .collect();

    [
        insight_header(exam),
        executive_summary(verdict, before_severity, after_severity),
        detailed_findings(verdict, exam, resolved, introduced, &severe),
        radiological_interpretation(verdict, exam),
        clinical_correlation(verdict),
        insight_recommendations(verdict, introduced, &severe),
        DISCLAIMER.to_string(),
    ]
    .join("\n\n")
}

fn insight_header(exam: &ExamContext) -> String {
    format!(
        "## Comparative Analysis Report: {} of {}",
        exam.scan_type_label().to_uppercase(),
        exam.body_part_label().to_uppercase()
    )
}

fn executive_summary(
    verdict: ChangeVerdict,
    before_severity: SeverityLevel,
    after_severity: SeverityLevel,
) -> String {
    let status = match verdict {
        ChangeVerdict::Improved => "has shown improvement",
        ChangeVerdict::Worsened => "has deteriorated",
        ChangeVerdict::Stable => "remains stable",
    };
    let trajectory = match verdict {
        ChangeVerdict::Improved => "positive",
        ChangeVerdict::Worsened => "concerning",
        ChangeVerdict::Stable => "stable",
    };
    format!(
        "### Executive Summary\n\
         The patient's condition {status} between the two examinations. The overall \
         severity has changed from {} to {}, indicating a {trajectory} trajectory.",
        before_severity.as_str().to_uppercase(),
        after_severity.as_str().to_uppercase()
    )
}

fn detailed_findings(
    verdict: ChangeVerdict,
    exam: &ExamContext,
    resolved: &[Finding],
    introduced: &[Finding],
    severe: &[&Finding],
) -> String {
    let intro = format!(
        "The comparative analysis of the {} scans reveals significant changes in the {} region.",
        exam.scan_type_label(),
        exam.body_part_label()
    );

    let resolved_sentence = (!resolved.is_empty()).then(|| {
        format!(
            "Previously identified abnormalities in {} have resolved, suggesting \
             therapeutic efficacy.",
            area_list(resolved)
        )
    });

    let new_sentence = if introduced.is_empty() {
        "No new concerning areas have been identified.".to_string()
    } else {
        format!(
            "New findings have emerged in {}, which warrant clinical attention.",
            area_list(introduced)
        )
    };

    let severe_paragraph = if severe.is_empty() {
        "No high-severity findings are present in the current scan.".to_string()
    } else {
        let trend = if verdict == ChangeVerdict::Worsened {
            "progressive deterioration and may require urgent intervention."
        } else {
            "persistent abnormalities despite treatment."
        };
        format!(
            "Of particular concern are the {} high/critical severity findings in {}. \
             These areas demonstrate {trend}",
            severe.len(),
            severe
                .iter()
                .map(|f| f.area.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    let paragraph = [Some(intro), resolved_sentence, Some(new_sentence)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    format!("### Detailed Findings\n{paragraph}\n\n{severe_paragraph}")
}

fn radiological_interpretation(verdict: ChangeVerdict, exam: &ExamContext) -> String {
    let interpretation = match verdict {
        ChangeVerdict::Improved => {
            "reduction in pathological markers, with improved tissue architecture and \
             diminished inflammatory response."
        }
        ChangeVerdict::Worsened => {
            "progression of pathological features, with increased tissue involvement and \
             potential structural changes."
        }
        ChangeVerdict::Stable => {
            "relatively unchanged pathological features, with similar tissue presentation \
             across both timepoints."
        }
    };
    format!(
        "### Radiological Interpretation\nThe {} images demonstrate {interpretation}",
        exam.scan_type_label()
    )
}

fn clinical_correlation(verdict: ChangeVerdict) -> String {
    let correlation = match verdict {
        ChangeVerdict::Improved => {
            "correlate with a positive response to the current treatment regimen and \
             suggest continuing the established therapeutic approach."
        }
        ChangeVerdict::Worsened => {
            "indicate suboptimal response to the current treatment regimen and suggest \
             reevaluation of the therapeutic approach."
        }
        ChangeVerdict::Stable => {
            "suggest a plateau in response to the current treatment regimen and may \
             warrant consideration of treatment modifications."
        }
    };
    format!("### Clinical Correlation\nThese imaging findings {correlation}")
}

fn insight_recommendations(
    verdict: ChangeVerdict,
    introduced: &[Finding],
    severe: &[&Finding],
) -> String {
    let first = match verdict {
        ChangeVerdict::Improved => "Continue current treatment protocol with regular monitoring.",
        ChangeVerdict::Worsened => {
            "Consider escalation of therapy and more frequent follow-up imaging."
        }
        ChangeVerdict::Stable => {
            "Maintain vigilant monitoring while evaluating potential adjustments to treatment."
        }
    };

    let focus = if introduced.is_empty() {
        "maintaining current status".to_string()
    } else {
        format!("newly identified areas: {}", area_list(introduced))
    };

    let window = follow_up_window(verdict);

    let fourth = if severe.is_empty() {
        "Continue holistic evaluation of the entire region during follow-up.".to_string()
    } else {
        format!(
            "Prioritize evaluation of the {} high-severity findings.",
            severe.len()
        )
    };

    format!(
        "### Recommendations\n\
         1. {first}\n\
         2. Focus clinical attention on {focus}.\n\
         3. Schedule follow-up imaging in {window} to reassess progression.\n\
         4. {fourth}"
    )
}

/// Pure: suggested re-imaging interval for a trend.
pub fn follow_up_window(verdict: ChangeVerdict) -> &'static str {
    match verdict {
        ChangeVerdict::Improved => "6-12 months",
        ChangeVerdict::Worsened => "3-6 months",
        ChangeVerdict::Stable => "4-8 months",
    }
}

fn area_list(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| f.area.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
