//! Bounded Zipf sampler
//!
//! Draws from a Zipf (power law) law and keeps only the values that fall in
//! `[lower_bound, upper_bound]`.
//!
//! # Characteristics
//!
//! - Power law: P(k) ∝ 1 / k^a, k = 1, 2, 3, ...
//! - a close to 1: long flat tail
//! - Large a (2.0+): almost all mass on value 1
//!
//! # Algorithm
//!
//! Values are drawn in fixed batches of [`ZIPF_BATCH_SIZE`]. Each batch is
//! filtered to the interval and appended until at least `N` values have been
//! accepted, then the table is truncated to `N` in draw order.
//!
//! Because draws start at 1 and decay, `upper_bound` acts as the cardinality
//! ceiling of the table. A narrow interval far from 1 can reject nearly every
//! draw; without a batch cap the loop keeps going until it is satisfied.

use super::{BoundedSampler, Table};
use crate::error::GenError;
use rand::Rng;
use rand_distr::{Distribution, Zeta, Zipf};
use tracing::debug;

/// Number of draws per rejection batch
pub const ZIPF_BATCH_SIZE: usize = 100;

/// Zipf sampler restricted to an inclusive interval
#[derive(Debug, Clone)]
pub struct ZipfSampler {
    /// Shape parameter a (>= 1)
    a: f64,
    lower_bound: u64,
    upper_bound: u64,
    n: usize,
    /// Give up after this many batches (None = never)
    max_batches: Option<u64>,
}

/// Underlying unbounded draw
///
/// The zeta law is only normalisable for a > 1. At a == 1 the finite Zipf law
/// over `[1, upper_bound]` is used instead; after rejection to the interval
/// both give the same shape.
enum Kernel {
    Zeta(Zeta<f64>),
    Finite(Zipf<f64>),
}

impl Kernel {
    #[inline]
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Kernel::Zeta(d) => d.sample(rng),
            Kernel::Finite(d) => d.sample(rng),
        }
    }
}

impl ZipfSampler {
    /// Create a sampler for `n` values in `[lower_bound, upper_bound]`
    pub fn new(a: f64, upper_bound: u64, n: usize, lower_bound: u64) -> Result<Self, GenError> {
        if !a.is_finite() || a < 1.0 {
            return Err(GenError::invalid(
                "skew_degree",
                format!("Zipfian sampling needs a finite a >= 1, got {}", a),
            ));
        }
        if lower_bound >= upper_bound {
            return Err(GenError::InvalidBound {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        Ok(Self {
            a,
            lower_bound,
            upper_bound,
            n,
            max_batches: None,
        })
    }

    /// Set the rejection batch cap
    pub fn with_max_batches(mut self, max_batches: Option<u64>) -> Self {
        self.max_batches = max_batches;
        self
    }

    fn kernel(&self) -> Result<Kernel, GenError> {
        if self.a > 1.0 {
            Zeta::new(self.a)
                .map(Kernel::Zeta)
                .map_err(|e| GenError::invalid("skew_degree", e.to_string()))
        } else {
            Zipf::new(self.upper_bound, self.a)
                .map(Kernel::Finite)
                .map_err(|e| GenError::invalid("skew_degree", e.to_string()))
        }
    }
}

impl BoundedSampler for ZipfSampler {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Table, GenError> {
        let kernel = self.kernel()?;
        let lo = self.lower_bound as f64;
        let hi = self.upper_bound as f64;

        let mut table = Vec::with_capacity(self.n);
        let mut batches = 0u64;

        while table.len() < self.n {
            if let Some(max) = self.max_batches {
                if batches >= max {
                    return Err(GenError::BoundsUnsatisfiable {
                        lower: self.lower_bound,
                        upper: self.upper_bound,
                        requested: self.n,
                        collected: table.len(),
                        batches,
                    });
                }
            }
            batches += 1;

            for _ in 0..ZIPF_BATCH_SIZE {
                let x = kernel.draw(rng);
                if x >= lo && x <= hi {
                    table.push(x as u64);
                }
            }
        }

        table.truncate(self.n);
        debug!(
            a = self.a,
            rows = self.n,
            batches,
            "zipfian table generated"
        );
        Ok(table)
    }

    fn len(&self) -> usize {
        self.n
    }
}
