use crate::io;
use anyhow::Result;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"# Scandelta Configuration

[output]
# terminal | json | markdown
format = "terminal"
# auto | always | never
color = "auto"

[exam]
# Default labels for report text; override per run with
# --scan-type and --body-part.
# scan_type = "xray"
# body_part = "chest"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".scandelta.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created .scandelta.toml configuration file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::io::output::OutputFormat;

    #[test]
    fn default_template_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.default_format(), Some(OutputFormat::Terminal));
        assert_eq!(
            config.color_mode(),
            Some(crate::formatting::ColorMode::Auto)
        );
        assert_eq!(config.exam_defaults().scan_type, None);
    }
}
