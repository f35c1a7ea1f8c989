//! Configuration module
//!
//! Handles the key=value configuration file, TOML configuration files, CLI
//! overrides and validation.
//!
//! Loading happens in two steps. A file (or nothing) is read into a
//! [`PartialConfig`] where every key is optional, CLI arguments are merged on
//! top, and [`PartialConfig::build`] turns the result into a [`GenConfig`],
//! failing with [`GenError::MissingParameter`] for the first absent key.

pub mod cli;
pub mod ini;
pub mod toml;
pub mod validator;

use crate::error::GenError;
use crate::util::format::format_float;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Complete generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenConfig {
    /// Number of worker nodes (one shard per node)
    pub node_nums: usize,
    /// Zipf shape `a` of the small table
    pub small_skew_degree: f64,
    /// Zipf shape `a` of the big table
    pub big_skew_degree: f64,
    /// Row count of the small table
    pub small_table_size: usize,
    /// Row count of the big table
    pub big_table_size: usize,
    /// Fraction of rows above which a value counts as skewed
    pub frequency_threshold: f64,
    /// Smallest generated value (inclusive)
    #[serde(default)]
    pub lower_bound: u64,
    /// Rejection batch cap for Zipfian sampling (None = unbounded)
    #[serde(default)]
    pub max_sample_batches: Option<u64>,
    /// RNG seed (None = seed from entropy)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory the run directory is created in
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Write manifest.json into the run directory
    #[serde(default)]
    pub write_manifest: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// The two generated tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Small,
    Big,
}

impl TableKind {
    /// File name used for the table's row files
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Small => "small",
            TableKind::Big => "big",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation parameters of one table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub kind: TableKind,
    pub size: usize,
    pub skew_degree: f64,
}

impl GenConfig {
    /// Small and big table parameters, in generation order
    pub fn tables(&self) -> [TableConfig; 2] {
        [
            TableConfig {
                kind: TableKind::Small,
                size: self.small_table_size,
                skew_degree: self.small_skew_degree,
            },
            TableConfig {
                kind: TableKind::Big,
                size: self.big_table_size,
                skew_degree: self.big_skew_degree,
            },
        ]
    }

    /// Name of the run directory: `{nodes}_{small}_{small_a}_{big}_{big_a}`
    pub fn run_name(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.node_nums,
            self.small_table_size,
            format_float(self.small_skew_degree),
            self.big_table_size,
            format_float(self.big_skew_degree)
        )
    }

    /// Full path of the run directory
    pub fn run_dir(&self) -> PathBuf {
        self.output_dir.join(self.run_name())
    }
}

impl fmt::Display for GenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:        {}", self.node_nums)?;
        writeln!(
            f,
            "Small table:  {} rows, skew degree {}",
            self.small_table_size,
            format_float(self.small_skew_degree)
        )?;
        writeln!(
            f,
            "Big table:    {} rows, skew degree {}",
            self.big_table_size,
            format_float(self.big_skew_degree)
        )?;
        writeln!(f, "Threshold:    {}", format_float(self.frequency_threshold))?;
        writeln!(f, "Lower bound:  {}", self.lower_bound)?;
        match self.max_sample_batches {
            Some(max) => writeln!(f, "Batch cap:    {}", max)?,
            None => writeln!(f, "Batch cap:    unbounded")?,
        }
        match self.seed {
            Some(seed) => writeln!(f, "Seed:         {}", seed)?,
            None => writeln!(f, "Seed:         random")?,
        }
        write!(f, "Output:       {}", self.run_dir().display())
    }
}

/// Configuration with every key optional, as read from a file or the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartialConfig {
    pub node_nums: Option<usize>,
    pub small_skew_degree: Option<f64>,
    pub big_skew_degree: Option<f64>,
    pub small_table_size: Option<usize>,
    pub big_table_size: Option<usize>,
    pub frequency_threshold: Option<f64>,
    pub lower_bound: Option<u64>,
    pub max_sample_batches: Option<u64>,
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub write_manifest: Option<bool>,
}

fn required<T>(value: Option<T>, key: &str) -> Result<T, GenError> {
    value.ok_or_else(|| GenError::MissingParameter(key.to_string()))
}

impl PartialConfig {
    /// Overlay every key set in `other` onto `self`
    pub fn merge(mut self, other: PartialConfig) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            node_nums,
            small_skew_degree,
            big_skew_degree,
            small_table_size,
            big_table_size,
            frequency_threshold,
            lower_bound,
            max_sample_batches,
            seed,
            output_dir,
            write_manifest
        );
        self
    }

    /// Fill defaults and fail on the first missing required key
    pub fn build(self) -> Result<GenConfig, GenError> {
        Ok(GenConfig {
            node_nums: required(self.node_nums, "node_nums")?,
            small_skew_degree: required(self.small_skew_degree, "small_skew_degree")?,
            big_skew_degree: required(self.big_skew_degree, "big_skew_degree")?,
            small_table_size: required(self.small_table_size, "small_table_size")?,
            big_table_size: required(self.big_table_size, "big_table_size")?,
            frequency_threshold: required(self.frequency_threshold, "frequency_threshold")?,
            lower_bound: self.lower_bound.unwrap_or(0),
            max_sample_batches: self.max_sample_batches,
            seed: self.seed,
            output_dir: self.output_dir.unwrap_or_else(default_output_dir),
            write_manifest: self.write_manifest.unwrap_or(false),
        })
    }
}

/// Read a configuration file, picking the format from the extension
///
/// `.toml` files are parsed as TOML, anything else as `key=value` lines.
pub fn load_file(path: &Path) -> anyhow::Result<PartialConfig> {
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        self::toml::parse_toml_file(path)
    } else {
        ini::parse_ini_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PartialConfig {
        PartialConfig {
            node_nums: Some(4),
            small_skew_degree: Some(1.2),
            big_skew_degree: Some(1.0),
            small_table_size: Some(1000),
            big_table_size: Some(5000),
            frequency_threshold: Some(0.05),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_defaults() {
        let config = full().build().unwrap();
        assert_eq!(config.lower_bound, 0);
        assert_eq!(config.max_sample_batches, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.write_manifest);
    }

    #[test]
    fn test_build_missing_parameter() {
        let partial = PartialConfig {
            frequency_threshold: None,
            ..full()
        };
        match partial.build() {
            Err(GenError::MissingParameter(key)) => assert_eq!(key, "frequency_threshold"),
            other => panic!("expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_overrides_only_set_keys() {
        let overrides = PartialConfig {
            node_nums: Some(8),
            seed: Some(7),
            ..Default::default()
        };
        let config = full().merge(overrides).build().unwrap();
        assert_eq!(config.node_nums, 8);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.small_table_size, 1000);
    }

    #[test]
    fn test_run_name_keeps_float_suffix() {
        let config = full().build().unwrap();
        assert_eq!(config.run_name(), "4_1000_1.2_5000_1.0");
        assert_eq!(config.run_dir(), PathBuf::from("./4_1000_1.2_5000_1.0"));
    }

    #[test]
    fn test_tables_order() {
        let config = full().build().unwrap();
        let [small, big] = config.tables();
        assert_eq!(small.kind, TableKind::Small);
        assert_eq!(small.size, 1000);
        assert_eq!(big.kind, TableKind::Big);
        assert_eq!(big.skew_degree, 1.0);
    }
}
