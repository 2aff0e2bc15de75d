//! Value types produced by the comparison pipeline
//!
//! Everything here is plain data. The pipeline stages in the sibling
//! modules construct these types; serialization order is fixed by
//! field order so repeated runs emit byte-identical JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Finding;

/// Direction of change, for one matched pair or a whole comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeVerdict {
    Improved,
    Worsened,
    Stable,
}

impl ChangeVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeVerdict::Improved => "improved",
            ChangeVerdict::Worsened => "worsened",
            ChangeVerdict::Stable => "stable",
        }
    }
}

impl fmt::Display for ChangeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding present in both snapshots, with its classified movement
///
/// `change` reflects severity movement only. `change_percentage` is
/// the absolute confidence drift as a percentage and carries no sign;
/// a pair can be `stable` with a large drift, or `worsened` with none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedIssue {
    pub area: String,
    pub before: Finding,
    pub after: Finding,
    pub change: ChangeVerdict,
    pub change_percentage: f64,
}

/// Findings aligned by area between two snapshots
///
/// The three views partition the areas involved: `resolved` areas
/// appear only before, `introduced` only after, `matched` in both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchedFindings {
    pub resolved: Vec<Finding>,
    pub introduced: Vec<Finding>,
    pub matched: Vec<(Finding, Finding)>,
}

/// Tally of per-pair verdicts across the matched set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub improved: usize,
    pub worsened: usize,
    pub stable: usize,
}

impl VerdictCounts {
    pub fn total(&self) -> usize {
        self.improved + self.worsened + self.stable
    }
}

/// Full structured delta between two completed scan analyses
///
/// This is the engine's only output. All narrative fields are derived
/// from the structured fields, so equal inputs produce equal results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub overall_change: ChangeVerdict,
    pub change_percentage: f64,
    pub resolved_issues: Vec<Finding>,
    pub new_issues: Vec<Finding>,
    pub changed_issues: Vec<ChangedIssue>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub clinical_insight: String,
}

impl ComparisonResult {
    /// Matched pairs whose severity moved down
    pub fn improved_issues(&self) -> impl Iterator<Item = &ChangedIssue> {
        self.changed_issues
            .iter()
            .filter(|issue| issue.change == ChangeVerdict::Improved)
    }

    /// Matched pairs whose severity moved up
    pub fn worsened_issues(&self) -> impl Iterator<Item = &ChangedIssue> {
        self.changed_issues
            .iter()
            .filter(|issue| issue.change == ChangeVerdict::Worsened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeverityLevel;

    fn finding(area: &str, severity: SeverityLevel) -> Finding {
        Finding {
            id: format!("f-{area}"),
            area: area.to_string(),
            description: String::new(),
            severity,
            confidence: 0.5,
        }
    }

    fn changed(area: &str, change: ChangeVerdict) -> ChangedIssue {
        let (before, after) = match change {
            ChangeVerdict::Improved => (SeverityLevel::High, SeverityLevel::Low),
            ChangeVerdict::Worsened => (SeverityLevel::Low, SeverityLevel::High),
            ChangeVerdict::Stable => (SeverityLevel::Medium, SeverityLevel::Medium),
        };
        ChangedIssue {
            area: area.to_string(),
            before: finding(area, before),
            after: finding(area, after),
            change,
            change_percentage: 0.0,
        }
    }

    #[test]
    fn verdict_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChangeVerdict::Improved).unwrap(),
            "\"improved\""
        );
        assert_eq!(ChangeVerdict::Worsened.to_string(), "worsened");
    }

    #[test]
    fn changed_issue_uses_camel_case_keys() {
        let issue = ChangedIssue {
            area: "Lung base".to_string(),
            before: finding("Lung base", SeverityLevel::High),
            after: finding("Lung base", SeverityLevel::Low),
            change: ChangeVerdict::Improved,
            change_percentage: 4.0,
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"changePercentage\":4.0"));
        assert!(json.contains("\"change\":\"improved\""));
    }

    #[test]
    fn verdict_counts_total() {
        let counts = VerdictCounts {
            improved: 2,
            worsened: 1,
            stable: 3,
        };
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn verdict_accessors_partition_changed_issues() {
        let result = ComparisonResult {
            overall_change: ChangeVerdict::Stable,
            change_percentage: 0.0,
            resolved_issues: vec![],
            new_issues: vec![],
            changed_issues: vec![
                changed("Upper right lobe", ChangeVerdict::Improved),
                changed("Left base", ChangeVerdict::Worsened),
                changed("Trachea", ChangeVerdict::Stable),
            ],
            summary: String::new(),
            recommendations: vec![],
            clinical_insight: String::new(),
        };

        let improved: Vec<&str> = result
            .improved_issues()
            .map(|issue| issue.area.as_str())
            .collect();
        let worsened: Vec<&str> = result
            .worsened_issues()
            .map(|issue| issue.area.as_str())
            .collect();

        assert_eq!(improved, ["Upper right lobe"]);
        assert_eq!(worsened, ["Left base"]);
    }
}
