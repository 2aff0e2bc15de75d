use anyhow::Result;
use clap::Parser;
use scandelta::cli::{Cli, Commands};
use scandelta::commands::{CompareConfig, InspectConfig};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

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
            let config = CompareConfig {
                before_path: before,
                after_path: after,
                scan_type,
                body_part,
                format: format.map(Into::into),
                output_path: output,
                plain,
            };
            scandelta::commands::compare_scans(config)
        }
        Commands::Inspect { result, plain } => {
            scandelta::commands::inspect_result(InspectConfig {
                path: result,
                plain,
            })
        }
        Commands::Init { force } => scandelta::commands::init_config(force),
    }
}
