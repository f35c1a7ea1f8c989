//! Skew report files
//!
//! One `value,count` line per skewed value.

use crate::distribution::Value;
use crate::Result;
use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `value,count` lines in the given order
pub fn write_skew_report(path: &Path, entries: &[(Value, u64)]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create skew report: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for (value, count) in entries {
        writeln!(out, "{},{}", value, count)
            .with_context(|| format!("Failed to write skew report: {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write skew report: {}", path.display()))?;

    Ok(())
}

/// Read a skew report back into `(value, count)` pairs
pub fn read_skew_report(path: &Path) -> Result<Vec<(Value, u64)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read skew report: {}", path.display()))?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| -> Result<(Value, u64)> {
            let (value, count) = line
                .split_once(',')
                .with_context(|| format!("{}:{}: expected 'value,count'", path.display(), i + 1))?;
            let value: Value = value
                .trim()
                .parse()
                .with_context(|| format!("{}:{}: invalid value", path.display(), i + 1))?;
            let count: u64 = count
                .trim()
                .parse()
                .with_context(|| format!("{}:{}: invalid count", path.display(), i + 1))?;
            Ok((value, count))
        })
        .collect()
}
