//! Bounded value distributions
//!
//! This module provides the samplers that produce a table's value column. Each
//! sampler emits exactly `N` integer values restricted to an interval, drawn
//! from one of two laws:
//!
//! - **Zipfian**: long-tailed, most of the mass on small integers (hot keys)
//! - **Uniform**: every value in the interval equally likely
//!
//! # Selecting a sampler
//!
//! The skew degree `a` picks the law. This is a hard branch, not a blend:
//!
//! | skew degree | sampler | interval |
//! |-------------|---------|----------|
//! | `a < 1`     | [`UniformSampler`] | `[lower, upper)` |
//! | `a >= 1`    | [`ZipfSampler`]    | `[lower, upper]` |
//!
//! The bound asymmetry between the two variants is intentional and kept for
//! compatibility with existing fixtures.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use skewgen::distribution::{create_sampler, SamplerKind};
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
//! let sampler = create_sampler(1.2, 1000, 1000, 0).unwrap();
//! assert_eq!(sampler.kind(), SamplerKind::Zipfian);
//!
//! let table = sampler.generate(&mut rng).unwrap();
//! assert_eq!(table.len(), 1000);
//! assert!(table.iter().all(|&v| v <= 1000));
//! ```

use crate::error::GenError;
use rand::Rng;
use std::fmt;

pub mod uniform;
pub mod zipf;

pub use uniform::UniformSampler;
pub use zipf::ZipfSampler;

/// A single generated value
pub type Value = u64;

/// An ordered sequence of generated values
pub type Table = Vec<Value>;

/// Sampler interface shared by both variants
///
/// Implementations hold their parameters only. Randomness is supplied by the
/// caller so a run can be reproduced from a seed.
pub trait BoundedSampler {
    /// Generate a full table
    ///
    /// The returned table always holds exactly [`BoundedSampler::len`] values,
    /// each inside the sampler's interval.
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Table, GenError>;

    /// Number of values produced per call to `generate`
    fn len(&self) -> usize;

    /// True when the sampler produces an empty table
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which law a [`TableSampler`] draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerKind {
    Zipfian,
    Uniform,
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerKind::Zipfian => write!(f, "zipfian"),
            SamplerKind::Uniform => write!(f, "uniform"),
        }
    }
}

/// Sampler chosen by [`create_sampler`]
#[derive(Debug, Clone)]
pub enum TableSampler {
    Zipfian(ZipfSampler),
    Uniform(UniformSampler),
}

impl TableSampler {
    pub fn kind(&self) -> SamplerKind {
        match self {
            TableSampler::Zipfian(_) => SamplerKind::Zipfian,
            TableSampler::Uniform(_) => SamplerKind::Uniform,
        }
    }

    /// Cap the number of rejection batches a Zipfian sampler may draw
    ///
    /// Has no effect on the uniform variant, which never rejects.
    pub fn with_max_batches(self, max_batches: Option<u64>) -> Self {
        match self {
            TableSampler::Zipfian(s) => TableSampler::Zipfian(s.with_max_batches(max_batches)),
            other => other,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Table, GenError> {
        match self {
            TableSampler::Zipfian(s) => s.generate(rng),
            TableSampler::Uniform(s) => s.generate(rng),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableSampler::Zipfian(s) => s.len(),
            TableSampler::Uniform(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pick the sampler for a skew degree
///
/// `a < 1` selects the uniform variant, anything else the Zipfian one. Both
/// variants reject an empty interval (`lower_bound >= upper_bound`) up front
/// rather than looping while trying to satisfy it.
///
/// # Arguments
///
/// * `skew_degree` - Zipf shape parameter `a`
/// * `upper_bound` - Largest value (inclusive for Zipfian, exclusive for uniform)
/// * `n` - Number of values to generate
/// * `lower_bound` - Smallest value (inclusive)
pub fn create_sampler(
    skew_degree: f64,
    upper_bound: u64,
    n: usize,
    lower_bound: u64,
) -> Result<TableSampler, GenError> {
    if skew_degree.is_nan() {
        return Err(GenError::invalid("skew_degree", "must be a number"));
    }

    if skew_degree < 1.0 {
        UniformSampler::new(upper_bound, n, lower_bound).map(TableSampler::Uniform)
    } else {
        ZipfSampler::new(skew_degree, upper_bound, n, lower_bound).map(TableSampler::Zipfian)
    }
}
