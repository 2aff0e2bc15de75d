//! Project configuration from `.scandelta.toml`
//!
//! The file is optional. Loading walks from the working directory up
//! through its ancestors and takes the first file found; a malformed
//! file degrades to defaults with a warning instead of failing the
//! run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::core::ExamContext;
use crate::formatting::ColorMode;
use crate::io::output::OutputFormat;

pub const CONFIG_FILE_NAME: &str = ".scandelta.toml";

// Walking past this many ancestors means we are outside any project.
const MAX_SEARCH_DEPTH: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScandeltaConfig {
    #[serde(default)]
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub exam: Option<ExamDefaults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamDefaults {
    pub scan_type: Option<String>,
    pub body_part: Option<String>,
}

impl ScandeltaConfig {
    /// Default output format from the config file, if one parses
    pub fn default_format(&self) -> Option<OutputFormat> {
        let raw = self.output.as_ref()?.format.as_deref()?;
        let parsed = parse_format(raw);
        if parsed.is_none() {
            log::warn!("Unknown output format '{raw}' in {CONFIG_FILE_NAME}; ignoring");
        }
        parsed
    }

    /// Color mode from the config file, if one parses
    pub fn color_mode(&self) -> Option<ColorMode> {
        let raw = self.output.as_ref()?.color.as_deref()?;
        let parsed = ColorMode::parse(raw);
        if parsed.is_none() {
            log::warn!("Unknown color mode '{raw}' in {CONFIG_FILE_NAME}; ignoring");
        }
        parsed
    }

    /// Exam labels from the config file, unset fields left empty
    pub fn exam_defaults(&self) -> ExamContext {
        match &self.exam {
            Some(exam) => ExamContext {
                scan_type: exam.scan_type.clone(),
                body_part: exam.body_part.clone(),
            },
            None => ExamContext::default(),
        }
    }
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s.to_lowercase().as_str() {
        "terminal" => Some(OutputFormat::Terminal),
        "json" => Some(OutputFormat::Json),
        "markdown" => Some(OutputFormat::Markdown),
        _ => None,
    }
}

/// Load configuration from the nearest `.scandelta.toml`, or defaults
pub fn load_config() -> ScandeltaConfig {
    let Ok(cwd) = std::env::current_dir() else {
        return ScandeltaConfig::default();
    };

    cwd.ancestors()
        .take(MAX_SEARCH_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|candidate| try_load_config_from_path(&candidate))
        .unwrap_or_default()
}

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<ScandeltaConfig, String> {
    toml::from_str::<ScandeltaConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))
}

/// Try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ScandeltaConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}
