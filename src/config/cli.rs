//! CLI argument parsing using clap

use super::PartialConfig;
use clap::Parser;
use std::path::PathBuf;

/// skewgen - skewed table generator for distributed join benchmarks
#[derive(Parser, Debug)]
#[command(name = "skewgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (`key=value` lines, or TOML if the name ends in .toml)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    // === Table Options ===
    /// Number of worker nodes (one shard per node)
    #[arg(short = 'n', long)]
    pub node_nums: Option<usize>,

    /// Row count of the small table
    #[arg(long)]
    pub small_size: Option<usize>,

    /// Row count of the big table
    #[arg(long)]
    pub big_size: Option<usize>,

    /// Skew degree of the small table (< 1 selects uniform values)
    #[arg(long)]
    pub small_skew: Option<f64>,

    /// Skew degree of the big table (< 1 selects uniform values)
    #[arg(long)]
    pub big_skew: Option<f64>,

    /// Fraction of rows above which a value is reported as skewed
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Smallest generated value
    #[arg(long)]
    pub lower_bound: Option<u64>,

    // === Sampling Options ===
    /// Stop Zipfian rejection sampling after this many batches
    #[arg(long)]
    pub max_sample_batches: Option<u64>,

    /// RNG seed for reproducible output
    #[arg(long, env = "SKEWGEN_SEED")]
    pub seed: Option<u64>,

    // === Output Options ===
    /// Directory the run directory is created in
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Write manifest.json into the run directory
    #[arg(long)]
    pub manifest: bool,

    /// Validate and print the configuration without generating anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.node_nums == Some(0) {
            anyhow::bail!("node_nums must be at least 1");
        }

        if self.max_sample_batches == Some(0) {
            anyhow::bail!("max_sample_batches must be at least 1");
        }

        Ok(())
    }

    /// Keys set on the command line, for merging over a config file
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            node_nums: self.node_nums,
            small_skew_degree: self.small_skew,
            big_skew_degree: self.big_skew,
            small_table_size: self.small_size,
            big_table_size: self.big_size,
            frequency_threshold: self.threshold,
            lower_bound: self.lower_bound,
            max_sample_batches: self.max_sample_batches,
            seed: self.seed,
            output_dir: self.output_dir.clone(),
            write_manifest: self.manifest.then_some(true),
        }
    }
}
