//! Compare command: the I/O shell around the comparison engine
//!
//! Loads two snapshot files, resolves exam labels and output
//! preferences from flags and project config, runs the pure engine,
//! and hands the result to a writer.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::comparison::ScanComparator;
use crate::config::{load_config, ScandeltaConfig};
use crate::core::ExamContext;
use crate::formatting::FormattingConfig;
use crate::io;
use crate::io::output::{
    create_writer, ComparisonReport, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter,
};

pub struct CompareConfig {
    pub before_path: PathBuf,
    pub after_path: PathBuf,
    pub scan_type: Option<String>,
    pub body_part: Option<String>,
    pub format: Option<OutputFormat>,
    pub output_path: Option<PathBuf>,
    pub plain: bool,
}

pub fn compare_scans(config: CompareConfig) -> Result<()> {
    let project = load_config();

    resolve_formatting(config.plain, &project).apply();

    let before = io::read_scan_result(&config.before_path)?;
    let after = io::read_scan_result(&config.after_path)?;

    let exam = resolve_exam(&config, &project);
    let result = ScanComparator::new(&before, &after)
        .with_exam(exam.clone())
        .compare()?;

    let report = ComparisonReport {
        result: &result,
        exam: &exam,
        before_severity: before.severity.unwrap_or_default(),
        after_severity: after.severity.unwrap_or_default(),
    };

    let format = config
        .format
        .or_else(|| project.default_format())
        .unwrap_or(OutputFormat::Terminal);

    match &config.output_path {
        Some(path) => write_report_file(path, format, &report),
        None => create_writer(format).write_comparison(&report),
    }
}

/// Flags win over config-file exam defaults, field by field.
fn resolve_exam(config: &CompareConfig, project: &ScandeltaConfig) -> ExamContext {
    let defaults = project.exam_defaults();
    ExamContext {
        scan_type: config.scan_type.clone().or(defaults.scan_type),
        body_part: config.body_part.clone().or(defaults.body_part),
    }
}

fn resolve_formatting(plain: bool, project: &ScandeltaConfig) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else if let Some(mode) = project.color_mode() {
        FormattingConfig::new(mode)
    } else {
        FormattingConfig::from_env()
    }
}

fn write_report_file(path: &Path, format: OutputFormat, report: &ComparisonReport) -> Result<()> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Json => JsonWriter::new(&mut buffer).write_comparison(report)?,
        OutputFormat::Markdown => MarkdownWriter::new(&mut buffer).write_comparison(report)?,
        OutputFormat::Terminal => anyhow::bail!(
            "terminal format prints to the screen; use --format json or markdown with --output"
        ),
    }

    let content = String::from_utf8(buffer)?;
    io::write_file(path, &content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    println!("Report written to {}", path.display());
    Ok(())
}
