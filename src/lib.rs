// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod formatting;
pub mod io;

// Re-export commonly used types
pub use crate::comparison::{
    compare_scan_results, ChangeVerdict, ChangedIssue, ComparisonResult, ScanComparator,
};
pub use crate::core::{
    ExamContext, Finding, ScanResult, ScandeltaError, ScandeltaResult, SeverityLevel,
};
pub use crate::io::output::{create_writer, ComparisonReport, OutputFormat, OutputWriter};
