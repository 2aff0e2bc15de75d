use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scandelta")]
#[command(about = "Longitudinal comparison of medical scan analyses", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare a baseline scan analysis against a follow-up
    Compare {
        /// Baseline scan result (JSON)
        before: PathBuf,

        /// Follow-up scan result (JSON)
        after: PathBuf,

        /// Scan modality label for report text (e.g. xray, mri, ct)
        #[arg(long = "scan-type")]
        scan_type: Option<String>,

        /// Body region label for report text (e.g. chest, knee)
        #[arg(long = "body-part")]
        body_part: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Plain output without colors
        #[arg(long)]
        plain: bool,
    },

    /// Summarize a single scan result file
    Inspect {
        /// Scan result to summarize (JSON)
        result: PathBuf,

        /// Plain output without colors
        #[arg(long)]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Markdown),
            crate::io::output::OutputFormat::Markdown
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Terminal),
            crate::io::output::OutputFormat::Terminal
        );
    }

    #[test]
    fn test_parse_compare_command() {
        let args = vec![
            "scandelta",
            "compare",
            "before.json",
            "after.json",
            "--scan-type",
            "xray",
            "--body-part",
            "chest",
            "--format",
            "json",
        ];

        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Compare {
                before,
                after,
                scan_type,
                body_part,
                format,
                output,
                plain,
            } => {
                assert_eq!(before, PathBuf::from("before.json"));
                assert_eq!(after, PathBuf::from("after.json"));
                assert_eq!(scan_type.as_deref(), Some("xray"));
                assert_eq!(body_part.as_deref(), Some("chest"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(output, None);
                assert!(!plain);
            }
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_compare_defaults_leave_format_unset() {
        let cli = Cli::parse_from(["scandelta", "compare", "a.json", "b.json"]);
        match cli.command {
            Commands::Compare {
                scan_type,
                body_part,
                format,
                plain,
                ..
            } => {
                assert_eq!(scan_type, None);
                assert_eq!(body_part, None);
                assert_eq!(format, None);
                assert!(!plain);
            }
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_parse_compare_output_file() {
        let cli = Cli::parse_from([
            "scandelta",
            "compare",
            "a.json",
            "b.json",
            "-f",
            "markdown",
            "-o",
            "report.md",
            "--plain",
        ]);
        match cli.command {
            Commands::Compare {
                format,
                output,
                plain,
                ..
            } => {
                assert_eq!(format, Some(OutputFormat::Markdown));
                assert_eq!(output, Some(PathBuf::from("report.md")));
                assert!(plain);
            }
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_parse_inspect_command() {
        let cli = Cli::parse_from(["scandelta", "inspect", "result.json"]);
        match cli.command {
            Commands::Inspect { result, plain } => {
                assert_eq!(result, PathBuf::from("result.json"));
                assert!(!plain);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_parse_init_command() {
        let cli = Cli::parse_from(["scandelta", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result =
            Cli::try_parse_from(["scandelta", "compare", "a.json", "b.json", "-f", "html"]);
        assert!(result.is_err());
    }
}
