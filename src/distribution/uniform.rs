//! Uniform random sampler
//!
//! Every value in `[lower_bound, upper_bound)` has equal probability. The
//! upper bound is exclusive, unlike the Zipfian sampler. Used when the skew
//! degree is below 1.

use super::{BoundedSampler, Table};
use crate::error::GenError;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Uniform sampler over a half-open interval
#[derive(Debug, Clone)]
pub struct UniformSampler {
    lower_bound: u64,
    upper_bound: u64,
    n: usize,
}

impl UniformSampler {
    /// Create a sampler for `n` values in `[lower_bound, upper_bound)`
    pub fn new(upper_bound: u64, n: usize, lower_bound: u64) -> Result<Self, GenError> {
        if lower_bound >= upper_bound {
            return Err(GenError::InvalidBound {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        Ok(Self {
            lower_bound,
            upper_bound,
            n,
        })
    }
}

impl BoundedSampler for UniformSampler {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Table, GenError> {
        let dist = Uniform::new(self.lower_bound, self.upper_bound);
        Ok((0..self.n).map(|_| dist.sample(rng)).collect())
    }

    fn len(&self) -> usize {
        self.n
    }
}
