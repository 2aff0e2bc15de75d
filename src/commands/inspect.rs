//! Inspect command: summarize one scan result on the terminal
//!
//! Useful for checking what a snapshot contains before comparing it,
//! in particular whether analysis has completed.

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::core::ScanResult;
use crate::formatting::{severity_label, FormattingConfig};
use crate::io;

pub struct InspectConfig {
    pub path: PathBuf,
    pub plain: bool,
}

pub fn inspect_result(config: InspectConfig) -> Result<()> {
    if config.plain {
        FormattingConfig::plain().apply();
    } else {
        FormattingConfig::from_env().apply();
    }

    let result = io::read_scan_result(&config.path)?;
    print_result(&result);
    Ok(())
}

fn print_result(result: &ScanResult) {
    println!("{}", format!("SCAN RESULT: {}", result.id).bold().blue());
    println!("Scan: {}", result.scan_id);
    if !result.ai_model.is_empty() {
        println!("Model: {}", result.ai_model);
    }
    if let Some(processed_at) = result.processed_at {
        println!(
            "Processed: {}",
            processed_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!(
        "Confidence: {}%",
        (result.confidence_score * 100.0).round() as i64
    );

    match result.severity {
        Some(severity) => println!("Severity: {}", severity_label(severity)),
        None => println!("Severity: {}", "not yet analyzed".dimmed()),
    }

    if result.abnormalities_detected {
        println!("Triage Priority: {}/10", result.triage_priority);
    }
    println!();

    match &result.findings {
        None => println!("Analysis pending; no findings recorded."),
        Some(findings) if findings.is_empty() => println!("No findings. Scan reads as clear."),
        Some(findings) => {
            println!("{}", format!("FINDINGS ({}):", findings.len()).bold());
            for (i, finding) in findings.iter().enumerate() {
                if finding.description.is_empty() {
                    println!(
                        "  {}. {} [{}] ({}%)",
                        i + 1,
                        finding.area,
                        severity_label(finding.severity),
                        (finding.confidence * 100.0).round() as i64
                    );
                } else {
                    println!(
                        "  {}. {} [{}] ({}%) - {}",
                        i + 1,
                        finding.area,
                        severity_label(finding.severity),
                        (finding.confidence * 100.0).round() as i64,
                        finding.description
                    );
                }
            }
        }
    }
}
