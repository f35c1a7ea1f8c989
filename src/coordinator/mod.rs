//! Run orchestration
//!
//! Drives one generation run end to end:
//!
//! 1. sample the small table, then the big table
//! 2. shuffle each table in place [`SHUFFLE_ROUNDS`] times
//! 3. detect the global skew set of each table
//! 4. draw shard sizes for each table
//! 5. write global skew reports, then every node's rows and shard skew reports
//!
//! Steps 1-4 finish for both tables before anything is written, because each
//! shard's skew report depends on its table's global skew set. Shards of one
//! table are written in parallel; each shard gets its own padding RNG seeded
//! from the run RNG, so a seeded run produces identical files.

use crate::config::{GenConfig, TableConfig, TableKind};
use crate::distribution::{create_sampler, SamplerKind, Table, Value};
use crate::output::json::{self, RunManifest};
use crate::output::skew::write_skew_report;
use crate::output::table::write_rows;
use crate::output::RunLayout;
use crate::partition;
use crate::skew::{self, SkewSet};
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Number of in-place shuffles applied to each generated table
pub const SHUFFLE_ROUNDS: usize = 10;

/// A generated, shuffled and partitioned table that has not been written yet
#[derive(Debug, Clone)]
pub struct PreparedTable {
    pub config: TableConfig,
    pub sampler: SamplerKind,
    pub rows: Table,
    pub skew: SkewSet,
    pub shard_sizes: Vec<usize>,
}

/// What was written for one node of one table
#[derive(Debug, Clone, PartialEq)]
pub struct ShardReport {
    pub node_id: usize,
    pub offset: usize,
    pub rows: usize,
    /// Globally skewed values present on this node, with local counts
    pub skew: Vec<(Value, u64)>,
}

/// What was written for one table
#[derive(Debug, Clone)]
pub struct TableReport {
    pub kind: TableKind,
    pub sampler: SamplerKind,
    pub skew_degree: f64,
    pub rows: usize,
    pub skew: SkewSet,
    pub skew_file: PathBuf,
    pub shards: Vec<ShardReport>,
}

/// Outcome of a complete run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub config: GenConfig,
    pub seed: u64,
    pub run_dir: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub tables: Vec<TableReport>,
}

/// Seed from the config, or a fresh one from entropy
pub fn resolve_seed(config: &GenConfig) -> u64 {
    config
        .seed
        .unwrap_or_else(|| Xoshiro256PlusPlus::from_entropy().gen())
}

/// Generate, shuffle, detect and partition one table
pub fn prepare_table<R: Rng + ?Sized>(
    table: &TableConfig,
    config: &GenConfig,
    rng: &mut R,
) -> Result<PreparedTable> {
    let sampler = create_sampler(
        table.skew_degree,
        table.size as u64,
        table.size,
        config.lower_bound,
    )
    .with_context(|| format!("Failed to create sampler for {} table", table.kind))?
    .with_max_batches(config.max_sample_batches);

    info!(
        "generating {} table: {} rows, {} sampler, skew degree {}",
        table.kind,
        table.size,
        sampler.kind(),
        table.skew_degree
    );

    let mut rows = sampler
        .generate(rng)
        .with_context(|| format!("Failed to generate {} table", table.kind))?;
    for _ in 0..SHUFFLE_ROUNDS {
        rows.shuffle(rng);
    }

    let skew = skew::detect(&rows, table.skew_degree, config.frequency_threshold);
    debug!("{} table: {} skewed values", table.kind, skew.len());

    let shard_sizes = partition::shard_sizes(rows.len(), config.node_nums, rng)
        .with_context(|| format!("Failed to partition {} table", table.kind))?;

    Ok(PreparedTable {
        config: *table,
        sampler: sampler.kind(),
        rows,
        skew,
        shard_sizes,
    })
}

/// Write one table's row files and shard skew reports
///
/// The global skew report is written separately by [`run`], before any shard.
pub fn write_shards<R: Rng + ?Sized>(
    layout: &RunLayout,
    table: &PreparedTable,
    rng: &mut R,
) -> Result<Vec<ShardReport>> {
    let kind = table.config.kind;
    let shards = partition::materialize(&table.rows, &table.shard_sizes);
    let seeds: Vec<u64> = shards.iter().map(|_| rng.gen()).collect();

    shards
        .par_iter()
        .zip(seeds.par_iter())
        .map(|(shard, &seed)| -> Result<ShardReport> {
            let mut padding_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            write_rows(&layout.table_path(shard.node_id, kind), shard.rows, &mut padding_rng)?;

            let local = partition::shard_skew(shard.rows, &table.skew);
            write_skew_report(&layout.shard_skew_path(shard.node_id, kind), &local)?;

            Ok(ShardReport {
                node_id: shard.node_id,
                offset: shard.offset,
                rows: shard.len(),
                skew: local,
            })
        })
        .collect()
}

/// Run a complete generation
pub fn run(config: &GenConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let seed = resolve_seed(config);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    info!("seed: {}", seed);

    let prepared = config
        .tables()
        .iter()
        .map(|table| prepare_table(table, config, &mut rng))
        .collect::<Result<Vec<_>>>()?;

    let layout = RunLayout::new(config.run_dir());
    layout.create(config.node_nums)?;

    let mut skew_files = Vec::with_capacity(prepared.len());
    for table in &prepared {
        let path = layout.global_skew_path(table.rows.len(), table.config.skew_degree);
        write_skew_report(&path, table.skew.entries())?;
        skew_files.push(path);
    }

    let mut tables = Vec::with_capacity(prepared.len());
    for (table, skew_file) in prepared.into_iter().zip(skew_files) {
        info!(
            "writing {} table, num_row = {}...",
            table.config.kind,
            table.rows.len()
        );
        let shards = write_shards(&layout, &table, &mut rng)?;
        tables.push(TableReport {
            kind: table.config.kind,
            sampler: table.sampler,
            skew_degree: table.config.skew_degree,
            rows: table.rows.len(),
            skew: table.skew,
            skew_file,
            shards,
        });
    }

    let summary = RunSummary {
        config: config.clone(),
        seed,
        run_dir: layout.root().to_path_buf(),
        generated_at: Utc::now(),
        elapsed: start.elapsed(),
        tables,
    };

    if config.write_manifest {
        let path = layout.manifest_path();
        json::write_manifest(&path, &RunManifest::from_summary(&summary))?;
        info!("manifest written to {}", path.display());
    }

    Ok(summary)
}
