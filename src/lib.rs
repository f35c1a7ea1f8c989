//! skewgen - skewed synthetic tables for distributed join benchmarks
//!
//! skewgen produces two tables ("small" and "big") whose value columns follow a
//! bounded Zipf law (or a uniform law for skew degrees below 1), splits each
//! table across a number of worker nodes in uneven random shards, and reports
//! which values are skewed, both per table and per node.
//!
//! # Architecture
//!
//! - **distribution**: bounded Zipfian / uniform samplers and the factory that picks one
//! - **skew**: frequency counting and threshold-based skew detection
//! - **partition**: random shard sizing and per-shard skew accounting
//! - **coordinator**: runs the pipeline and writes a run directory
//! - **config** / **output**: configuration loading and on-disk formats

pub mod config;
pub mod coordinator;
pub mod distribution;
pub mod error;
pub mod output;
pub mod partition;
pub mod skew;
pub mod util;

// Re-export commonly used types
pub use config::GenConfig;
pub use distribution::{create_sampler, SamplerKind, Table, TableSampler, Value};
pub use error::GenError;
pub use partition::{shard_skew, split, Shard};
pub use skew::{detect, SkewSet};

/// Result type used throughout skewgen
pub type Result<T> = anyhow::Result<T>;
