//! `key=value` configuration file parsing
//!
//! The format shared with the join benchmark itself: one `key=value` pair per
//! line. Lines starting with `#` and lines without `=` are ignored, as are keys
//! this tool does not use (the same file configures the benchmark servers).

use super::PartialConfig;
use crate::error::GenError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Parse a `key=value` configuration file
pub fn parse_ini_file(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_ini_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse `key=value` configuration from string
pub fn parse_ini_string(contents: &str) -> Result<PartialConfig, GenError> {
    let mut config = PartialConfig::default();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "node_nums" => config.node_nums = Some(parse_value(key, value)?),
            "small_skew_degree" => config.small_skew_degree = Some(parse_value(key, value)?),
            "big_skew_degree" => config.big_skew_degree = Some(parse_value(key, value)?),
            "small_table_size" => config.small_table_size = Some(parse_value(key, value)?),
            "big_table_size" => config.big_table_size = Some(parse_value(key, value)?),
            "frequency_threshold" => config.frequency_threshold = Some(parse_value(key, value)?),
            "lower_bound" => config.lower_bound = Some(parse_value(key, value)?),
            "max_sample_batches" => config.max_sample_batches = Some(parse_value(key, value)?),
            "seed" => config.seed = Some(parse_value(key, value)?),
            "output_dir" => config.output_dir = Some(PathBuf::from(value)),
            "write_manifest" => config.write_manifest = Some(parse_bool(key, value)?),
            _ => debug!("ignoring config key '{}'", key),
        }
    }

    Ok(config)
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, GenError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| GenError::invalid(key, format!("'{}': {}", value, e)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GenError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(GenError::invalid(key, format!("'{}' is not a boolean", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# join-compare settings
server_port=50051
node_nums=4
small_skew_degree=1.2
big_skew_degree=0.5
small_table_size=1000
big_table_size=500
frequency_threshold=0.05
";

    #[test]
    fn test_parse_ini_basic() {
        let config = parse_ini_string(SAMPLE).unwrap().build().unwrap();
        assert_eq!(config.node_nums, 4);
        assert_eq!(config.small_skew_degree, 1.2);
        assert_eq!(config.big_skew_degree, 0.5);
        assert_eq!(config.small_table_size, 1000);
        assert_eq!(config.big_table_size, 500);
        assert_eq!(config.frequency_threshold, 0.05);
    }

    #[test]
    fn test_parse_ini_skips_comments_and_junk() {
        let config = parse_ini_string("#node_nums=9\nnot a pair\n\n  node_nums = 3  \n").unwrap();
        assert_eq!(config.node_nums, Some(3));
    }

    #[test]
    fn test_parse_ini_optional_keys() {
        let config = parse_ini_string(
            "lower_bound=2\nmax_sample_batches=1000\nseed=99\noutput_dir=/tmp/out\nwrite_manifest=yes\n",
        )
        .unwrap();
        assert_eq!(config.lower_bound, Some(2));
        assert_eq!(config.max_sample_batches, Some(1000));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.write_manifest, Some(true));
    }

    #[test]
    fn test_parse_ini_invalid_value() {
        match parse_ini_string("node_nums=four\n") {
            Err(GenError::InvalidParameter { name, .. }) => assert_eq!(name, "node_nums"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ini_missing_key() {
        let partial = parse_ini_string("node_nums=4\n").unwrap();
        assert!(matches!(partial.build(), Err(GenError::MissingParameter(_))));
    }
}
