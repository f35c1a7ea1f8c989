//! JSON run manifest
//!
//! A machine-readable record of one run: the effective configuration, the seed
//! needed to reproduce it, and per table the sampler used, the global skew set
//! and every node's shard size and shard skew.

use crate::config::{GenConfig, TableKind};
use crate::coordinator::{RunSummary, TableReport};
use crate::distribution::Value;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One `value,count` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSkewEntry {
    pub value: Value,
    pub count: u64,
}

impl From<&(Value, u64)> for JsonSkewEntry {
    fn from(&(value, count): &(Value, u64)) -> Self {
        Self { value, count }
    }
}

/// One node's part of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonShard {
    pub node_id: usize,
    pub offset: usize,
    pub rows: usize,
    pub skew: Vec<JsonSkewEntry>,
}

/// One generated table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonTable {
    pub kind: TableKind,
    pub sampler: String,
    pub skew_degree: f64,
    pub rows: usize,
    /// Global skew report, relative to the run directory
    pub skew_file: String,
    pub skewed: Vec<JsonSkewEntry>,
    pub shards: Vec<JsonShard>,
}

/// Complete run manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub seed: u64,
    pub config: GenConfig,
    pub tables: Vec<JsonTable>,
}

impl JsonTable {
    fn from_report(report: &TableReport, run_dir: &Path) -> Self {
        let skew_file = report
            .skew_file
            .strip_prefix(run_dir)
            .unwrap_or(report.skew_file.as_path())
            .display()
            .to_string();

        Self {
            kind: report.kind,
            sampler: report.sampler.to_string(),
            skew_degree: report.skew_degree,
            rows: report.rows,
            skew_file,
            skewed: report.skew.entries().iter().map(JsonSkewEntry::from).collect(),
            shards: report
                .shards
                .iter()
                .map(|s| JsonShard {
                    node_id: s.node_id,
                    offset: s.offset,
                    rows: s.rows,
                    skew: s.skew.iter().map(JsonSkewEntry::from).collect(),
                })
                .collect(),
        }
    }
}

impl RunManifest {
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: summary.generated_at,
            elapsed_ms: summary.elapsed.as_millis() as u64,
            seed: summary.seed,
            config: summary.config.clone(),
            tables: summary
                .tables
                .iter()
                .map(|t| JsonTable::from_report(t, &summary.run_dir))
                .collect(),
        }
    }
}

/// Write a manifest as pretty-printed JSON
pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create manifest: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, manifest).context("Failed to serialize manifest")?;
    writeln!(out).with_context(|| format!("Failed to write manifest: {}", path.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

    Ok(())
}

/// Read a manifest written by [`write_manifest`]
pub fn read_manifest(path: &Path) -> Result<RunManifest> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open manifest: {}", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))
}
