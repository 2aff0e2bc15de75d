pub mod output;

pub use output::{
    create_writer, ComparisonReport, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter,
    TerminalWriter,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::ScanResult;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Load a scan result snapshot from a JSON file
pub fn read_scan_result(path: &Path) -> Result<ScanResult> {
    let content = read_file(path)
        .with_context(|| format!("Failed to read scan result from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse scan result JSON from {}", path.display()))
}
