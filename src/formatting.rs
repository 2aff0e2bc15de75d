//! Terminal color handling
//!
//! Color selection follows the usual environment conventions
//! (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`) with a `--plain` escape
//! hatch for piping reports into other tools.

use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::comparison::ChangeVerdict;
use crate::core::SeverityLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        // Check CLICOLOR environment variable
        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        // Check CLICOLOR_FORCE environment variable
        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Create a plain output configuration (ASCII-only, no colors)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    /// Push the resolved mode into the global colored state
    pub fn apply(self) {
        colored::control::set_override(self.color.should_use_color());
    }
}

/// Colored badge for an overall or per-pair verdict
pub fn verdict_label(verdict: ChangeVerdict) -> ColoredString {
    match verdict {
        ChangeVerdict::Improved => "IMPROVED".green().bold(),
        ChangeVerdict::Worsened => "WORSENED".red().bold(),
        ChangeVerdict::Stable => "STABLE".yellow().bold(),
    }
}

/// Colored label for a severity level
pub fn severity_label(level: SeverityLevel) -> ColoredString {
    match level {
        SeverityLevel::Normal | SeverityLevel::Low => level.as_str().green(),
        SeverityLevel::Medium => level.as_str().yellow(),
        SeverityLevel::High => level.as_str().red(),
        SeverityLevel::Critical => level.as_str().red().bold(),
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check if stdout is a TTY
    std::io::stdout().is_terminal()
}
