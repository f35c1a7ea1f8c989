//! Human-readable text output

use crate::config::GenConfig;
use crate::coordinator::RunSummary;
use crate::util::format::format_float;

/// Print the effective configuration before a run
pub fn print_configuration(config: &GenConfig) {
    println!("Configuration:");
    for line in config.to_string().lines() {
        println!("  {}", line);
    }
}

/// Print run results to console
///
/// Shows per table the sampler used, the skewed values and each node's share.
pub fn print_summary(summary: &RunSummary) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    GENERATION RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Elapsed Time: {:.3}s", summary.elapsed.as_secs_f64());
    println!("Seed:         {}", summary.seed);
    println!("Output:       {}", summary.run_dir.display());

    for table in &summary.tables {
        println!();
        println!(
            "{} table: {} rows ({}, skew degree {})",
            capitalize(table.kind.as_str()),
            format_number(table.rows as u64),
            table.sampler,
            format_float(table.skew_degree)
        );

        if table.skew.is_empty() {
            println!("  Skewed values: none");
        } else {
            println!("  Skewed values: {}", table.skew.len());
            for (value, count) in table.skew.entries().iter().take(5) {
                println!(
                    "    {:>10}  {:>10} rows ({:.2}%)",
                    value,
                    format_number(*count),
                    percent(*count, table.rows)
                );
            }
            if table.skew.len() > 5 {
                println!("    ... {} more", table.skew.len() - 5);
            }
        }

        println!("  Nodes:");
        for shard in &table.shards {
            println!(
                "    node {:>3}: {:>10} rows ({:>6.2}%), {} skewed values",
                shard.node_id,
                format_number(shard.rows as u64),
                percent(shard.rows as u64, table.rows),
                shard.skew.len()
            );
        }
    }

    println!();
    println!("═══════════════════════════════════════════════════════════");
}

fn percent(part: u64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Format number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
