use crate::comparison::{ChangeVerdict, ComparisonResult};
use crate::core::{ExamContext, Finding, SeverityLevel};
use crate::formatting::{severity_label, verdict_label};
use colored::*;
use serde_json;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// Everything a writer needs to render one comparison
///
/// The result alone does not carry the snapshot severities or exam
/// labels, so the command layer bundles them here.
pub struct ComparisonReport<'a> {
    pub result: &'a ComparisonResult,
    pub exam: &'a ExamContext,
    pub before_severity: SeverityLevel,
    pub after_severity: SeverityLevel,
}

pub trait OutputWriter {
    fn write_comparison(&mut self, report: &ComparisonReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_comparison(&mut self, report: &ComparisonReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report.result)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_comparison(&mut self, report: &ComparisonReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_overview(report)?;
        self.write_findings(report.result)?;
        self.write_recommendations(report.result)?;
        self.write_insight(report.result)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ComparisonReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Scan Comparison Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Exam: {} of {}",
            report.exam.scan_type_label().to_uppercase(),
            report.exam.body_part_label().to_uppercase()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overview(&mut self, report: &ComparisonReport) -> anyhow::Result<()> {
        let result = report.result;

        writeln!(self.writer, "## Overview")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        self.write_overview_row("Overall change", result.overall_change.as_str())?;
        self.write_overview_row(
            "Change percentage",
            &format!("{:.1}%", result.change_percentage),
        )?;
        self.write_overview_row(
            "Severity",
            &format!(
                "{} -> {}",
                report.before_severity.as_str().to_uppercase(),
                report.after_severity.as_str().to_uppercase()
            ),
        )?;
        self.write_overview_row("Resolved findings", &result.resolved_issues.len().to_string())?;
        self.write_overview_row("New findings", &result.new_issues.len().to_string())?;
        self.write_overview_row("Tracked areas", &result.changed_issues.len().to_string())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.summary)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_overview_row(&mut self, metric: &str, value: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "| {metric} | {value} |")?;
        Ok(())
    }

    fn write_findings(&mut self, result: &ComparisonResult) -> anyhow::Result<()> {
        self.write_finding_list("Resolved Findings", &result.resolved_issues)?;
        self.write_finding_list("New Findings", &result.new_issues)?;

        if result.changed_issues.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "## Tracked Areas ({})",
            result.changed_issues.len()
        )?;
        writeln!(self.writer)?;
        for issue in &result.changed_issues {
            writeln!(
                self.writer,
                "- **{}**: {} -> {} ({}, confidence drift {:.1}%)",
                issue.area,
                issue.before.severity,
                issue.after.severity,
                issue.change,
                issue.change_percentage
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_finding_list(&mut self, title: &str, findings: &[Finding]) -> anyhow::Result<()> {
        if findings.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## {title} ({})", findings.len())?;
        writeln!(self.writer)?;
        for finding in findings {
            if finding.description.is_empty() {
                writeln!(
                    self.writer,
                    "- **{}** ({}, confidence {:.0}%)",
                    finding.area,
                    finding.severity,
                    finding.confidence * 100.0
                )?;
            } else {
                writeln!(
                    self.writer,
                    "- **{}** ({}, confidence {:.0}%): {}",
                    finding.area,
                    finding.severity,
                    finding.confidence * 100.0,
                    finding.description
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, result: &ComparisonResult) -> anyhow::Result<()> {
        if result.recommendations.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        for (i, recommendation) in result.recommendations.iter().enumerate() {
            writeln!(self.writer, "{}. {recommendation}", i + 1)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_insight(&mut self, result: &ComparisonResult) -> anyhow::Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", result.clinical_insight)?;
        Ok(())
    }
}

const PERCENTAGE_BAR_WIDTH: usize = 30;

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_comparison(&mut self, report: &ComparisonReport) -> anyhow::Result<()> {
        print_header(report);
        print_main_findings(report.result);
        print_summary(report.result);
        print_recommendations(report.result);
        Ok(())
    }
}

fn print_header(report: &ComparisonReport) {
    let result = report.result;

    println!("{}", "SCAN COMPARISON ANALYSIS:".bold().blue());
    println!("{}", "-------------------------".blue());
    println!(
        "Scan Type: {}",
        report.exam.scan_type_label().to_uppercase()
    );
    println!(
        "Body Part: {}",
        report.exam.body_part_label().to_uppercase()
    );
    println!("Overall Change: {}", verdict_label(result.overall_change));
    println!("Change Percentage: {:.1}%", result.change_percentage);
    println!(
        "{}",
        percentage_bar(result.change_percentage, result.overall_change)
    );
    println!(
        "Severity Change: {} → {}",
        severity_label(report.before_severity),
        severity_label(report.after_severity)
    );
    println!();
}

/// Render the change percentage as a bar, clamped to 100% for display
fn render_percentage_bar(percentage: f64, width: usize) -> String {
    let fraction = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (fraction * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}

fn percentage_bar(percentage: f64, verdict: ChangeVerdict) -> ColoredString {
    let bar = render_percentage_bar(percentage, PERCENTAGE_BAR_WIDTH);
    match verdict {
        ChangeVerdict::Improved => bar.green(),
        ChangeVerdict::Worsened => bar.red(),
        ChangeVerdict::Stable => bar.yellow(),
    }
}

fn print_main_findings(result: &ComparisonResult) {
    println!("{}", "MAIN FINDINGS:".bold());

    if result.resolved_issues.is_empty() {
        println!("{} No resolved issues", "✓".green());
    } else {
        println!(
            "{} {} resolved issues: {}",
            "✓".green(),
            result.resolved_issues.len(),
            join_areas(&result.resolved_issues)
        );
    }

    if result.new_issues.is_empty() {
        println!("{} No new issues detected", "✓".green());
    } else {
        println!(
            "{} {} new issues: {}",
            "⚠".yellow(),
            result.new_issues.len(),
            join_areas(&result.new_issues)
        );
    }

    let improved: Vec<&str> = result
        .improved_issues()
        .map(|issue| issue.area.as_str())
        .collect();
    if !improved.is_empty() {
        println!(
            "{} {} improved areas: {}",
            "↗".green(),
            improved.len(),
            improved.join(", ")
        );
    }

    let worsened: Vec<&str> = result
        .worsened_issues()
        .map(|issue| issue.area.as_str())
        .collect();
    if !worsened.is_empty() {
        println!(
            "{} {} worsened areas: {}",
            "↘".red(),
            worsened.len(),
            worsened.join(", ")
        );
    }

    println!();
}

fn print_summary(result: &ComparisonResult) {
    println!("{}", "ANALYSIS SUMMARY:".bold());
    println!("{}", result.summary);
    println!();
}

fn print_recommendations(result: &ComparisonResult) {
    if result.recommendations.is_empty() {
        return;
    }

    println!("{}", "KEY RECOMMENDATIONS:".bold());
    for recommendation in &result.recommendations {
        println!("• {recommendation}");
    }
}

fn join_areas(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| f.area.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
}
