//! Configuration validation

use super::*;
use anyhow::{Context, Result};
use tracing::warn;

/// Validate complete configuration
pub fn validate_config(config: &GenConfig) -> Result<()> {
    validate_nodes(config)?;
    for table in config.tables() {
        validate_table(&table, config.lower_bound)?;
    }
    validate_threshold(config.frequency_threshold)?;
    validate_sampling(config)?;

    Ok(())
}

/// Validate node count
pub fn validate_nodes(config: &GenConfig) -> Result<()> {
    if config.node_nums == 0 {
        anyhow::bail!("node_nums must be at least 1");
    }

    if config.node_nums > config.small_table_size.max(config.big_table_size) {
        warn!(
            "node_nums ({}) exceeds every table size, some shards will be empty",
            config.node_nums
        );
    }

    Ok(())
}

/// Validate one table's size and skew degree
///
/// Tables sample values up to their own row count, so the row count must
/// leave a non-empty interval above `lower_bound`.
pub fn validate_table(table: &TableConfig, lower_bound: u64) -> Result<()> {
    if !table.skew_degree.is_finite() || table.skew_degree < 0.0 {
        anyhow::bail!(
            "{}_skew_degree must be a finite, non-negative number, got {}",
            table.kind,
            table.skew_degree
        );
    }

    if table.size as u64 <= lower_bound {
        return Err(GenError::InvalidBound {
            lower: lower_bound,
            upper: table.size as u64,
        })
        .with_context(|| format!("{}_table_size too small", table.kind));
    }

    if table.skew_degree > 5.0 {
        warn!(
            "{}_skew_degree {} is very high, almost every row will hold the same value",
            table.kind, table.skew_degree
        );
    }

    Ok(())
}

/// Validate frequency threshold
///
/// Values outside [0, 1] are allowed but almost certainly a mistake.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_nan() {
        anyhow::bail!("frequency_threshold must be a number");
    }

    if !(0.0..=1.0).contains(&threshold) {
        warn!(
            "frequency_threshold {} is outside [0, 1]: {}",
            threshold,
            if threshold < 0.0 {
                "every value will be reported as skewed"
            } else {
                "no value will be reported as skewed"
            }
        );
    }

    Ok(())
}

/// Validate sampling options
pub fn validate_sampling(config: &GenConfig) -> Result<()> {
    if config.max_sample_batches == Some(0) {
        anyhow::bail!("max_sample_batches must be at least 1 if specified");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GenConfig {
        PartialConfig {
            node_nums: Some(4),
            small_skew_degree: Some(1.2),
            big_skew_degree: Some(0.5),
            small_table_size: Some(1000),
            big_table_size: Some(500),
            frequency_threshold: Some(0.05),
            ..Default::default()
        }
        .build()
        .unwrap()
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate_config(&base()).is_ok());
    }

    #[test]
    fn test_validate_zero_nodes() {
        let config = GenConfig {
            node_nums: 0,
            ..base()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_skew_degree() {
        for a in [-1.0, f64::NAN, f64::INFINITY] {
            let config = GenConfig {
                small_skew_degree: a,
                ..base()
            };
            assert!(validate_config(&config).is_err(), "a = {}", a);
        }
    }

    #[test]
    fn test_validate_bound_too_high() {
        let config = GenConfig {
            lower_bound: 500,
            ..base()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.downcast_ref::<GenError>().is_some());
        assert!(err.to_string().contains("big_table_size"));
    }

    #[test]
    fn test_validate_empty_table() {
        let config = GenConfig {
            small_table_size: 0,
            ..base()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_threshold_out_of_range_is_allowed() {
        let config = GenConfig {
            frequency_threshold: 1.5,
            ..base()
        };
        assert!(validate_config(&config).is_ok());

        let config = GenConfig {
            frequency_threshold: f64::NAN,
            ..base()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_batch_cap() {
        let config = GenConfig {
            max_sample_batches: Some(0),
            ..base()
        };
        assert!(validate_config(&config).is_err());
    }
}
