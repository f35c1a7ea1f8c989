//! Row files
//!
//! One row per line: `value,padding`, where padding is [`PADDING_LEN`] random
//! alphanumeric characters.

use crate::distribution::Value;
use crate::util::padding::{fill_padding, PADDING_LEN};
use crate::Result;
use anyhow::Context;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the rows of one shard
pub fn write_rows<R: Rng + ?Sized>(path: &Path, rows: &[Value], rng: &mut R) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create table file: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let mut line = String::with_capacity(PADDING_LEN + 24);

    for value in rows {
        line.clear();
        line.push_str(&value.to_string());
        line.push(',');
        fill_padding(rng, PADDING_LEN, &mut line);
        line.push('\n');
        out.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write table file: {}", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("Failed to write table file: {}", path.display()))?;

    Ok(())
}
