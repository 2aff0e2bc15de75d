//! Common type definitions used across the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Severity levels assigned by the analysis pipeline
///
/// Levels form a total order from `Normal` (no abnormality) up to
/// `Critical`. A finding severity that is absent, `null`, or a name
/// outside this set deserializes to the default `Normal`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    #[default]
    Normal,
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    /// Numeric rank used for delta arithmetic (normal = 0 .. critical = 4)
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Get the display name for this level
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Normal => "normal",
            SeverityLevel::Low => "low",
            SeverityLevel::Medium => "medium",
            SeverityLevel::High => "high",
            SeverityLevel::Critical => "critical",
        }
    }

    /// True for levels that warrant urgent clinical attention
    pub fn is_severe(self) -> bool {
        matches!(self, SeverityLevel::High | SeverityLevel::Critical)
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single localized observation reported by the analysis pipeline
///
/// Fields other than `id` default when absent so that partially
/// populated upstream records still deserialize; severity also
/// tolerates `null` and unrecognized names. A finding with an
/// empty `area` never matches across snapshots except against another
/// empty `area`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "severity_or_normal")]
    pub severity: SeverityLevel,
    #[serde(default)]
    pub confidence: f64,
}

/// Reads a finding severity, mapping `null` and unrecognized names to
/// `Normal`. Very old upstream records carry severities outside the
/// known set; a snapshot still parses in that case.
fn severity_or_normal<'de, D>(deserializer: D) -> Result<SeverityLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(match name.as_deref() {
        Some("low") => SeverityLevel::Low,
        Some("medium") => SeverityLevel::Medium,
        Some("high") => SeverityLevel::High,
        Some("critical") => SeverityLevel::Critical,
        _ => SeverityLevel::Normal,
    })
}

/// Completed analysis of a single scan
///
/// Snapshots arrive as JSON from the analysis service and are treated
/// as read-only. `findings` and `severity` are `None` while analysis
/// is pending; comparison requires both to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: String,
    #[serde(default)]
    pub scan_id: String,
    pub findings: Option<Vec<Finding>>,
    pub severity: Option<SeverityLevel>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub abnormalities_detected: bool,
    #[serde(default)]
    pub triage_priority: u8,
    #[serde(default)]
    pub ai_model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl ScanResult {
    /// Number of findings, zero while analysis is pending
    pub fn finding_count(&self) -> usize {
        self.findings.as_ref().map_or(0, Vec::len)
    }
}

/// Exam metadata carried into report text
///
/// The comparison engine never reads these labels for matching or
/// scoring; they only appear in the generated clinical insight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamContext {
    pub scan_type: Option<String>,
    pub body_part: Option<String>,
}

impl ExamContext {
    pub fn new(scan_type: impl Into<String>, body_part: impl Into<String>) -> Self {
        Self {
            scan_type: Some(scan_type.into()),
            body_part: Some(body_part.into()),
        }
    }

    /// Scan modality label, lowercase, `"unknown"` when absent
    pub fn scan_type_label(&self) -> &str {
        self.scan_type.as_deref().unwrap_or("unknown")
    }

    /// Body region label, `"unknown"` when absent
    pub fn body_part_label(&self) -> &str {
        self.body_part.as_deref().unwrap_or("unknown")
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum ScandeltaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scan result '{id}' has no {field}; analysis must complete before comparison")]
    MissingAnalysis { id: String, field: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type ScandeltaResult<T> = Result<T, ScandeltaError>;
