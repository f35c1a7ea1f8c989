//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
///
/// Every key is optional at this stage; missing required keys are reported by
/// [`PartialConfig::build`] so both file formats fail the same way.
pub fn parse_toml_string(contents: &str) -> Result<PartialConfig> {
    let config: PartialConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with file configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, config: PartialConfig) -> PartialConfig {
    config.merge(cli.overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_toml_basic() {
        let toml = r#"
node_nums = 4
small_skew_degree = 1.2
big_skew_degree = 1.0
small_table_size = 1000
big_table_size = 10000
frequency_threshold = 0.05
seed = 42
write_manifest = true
"#;
        let config = parse_toml_string(toml).unwrap().build().unwrap();
        assert_eq!(config.node_nums, 4);
        assert_eq!(config.big_skew_degree, 1.0);
        assert_eq!(config.big_table_size, 10000);
        assert_eq!(config.seed, Some(42));
        assert!(config.write_manifest);
    }

    #[test]
    fn test_parse_toml_missing_key() {
        let partial = parse_toml_string("node_nums = 2\n").unwrap();
        match partial.build() {
            Err(GenError::MissingParameter(key)) => assert_eq!(key, "small_skew_degree"),
            other => panic!("expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_toml_wrong_type() {
        assert!(parse_toml_string("node_nums = \"four\"\n").is_err());
    }

    #[test]
    fn test_merge_cli_with_config() {
        let file =
            parse_toml_string("node_nums = 2\nseed = 1\nfrequency_threshold = 0.1\n").unwrap();
        let cli = Cli::parse_from(["skewgen", "--node-nums", "6", "--threshold", "0.2"]);
        let merged = merge_cli_with_config(&cli, file);

        assert_eq!(merged.node_nums, Some(6));
        assert_eq!(merged.frequency_threshold, Some(0.2));
        assert_eq!(merged.seed, Some(1));
    }
}
