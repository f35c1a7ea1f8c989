//! Skewed value detection
//!
//! A value is *skewed* when it occurs in strictly more than
//! `threshold * len(table)` rows. Detection runs once on the full table; shards
//! reuse that result (see [`crate::partition::shard_skew`]) instead of
//! detecting skew on their own.
//!
//! Entries with equal counts come out in hash map iteration order, which is
//! not stable between runs. Only the set of values, their counts and the
//! descending count order are guaranteed.

use crate::distribution::Value;
use std::collections::{HashMap, HashSet};

/// Occurrence count per value
pub type FrequencyMap = HashMap<Value, u64>;

/// Count every value in a single pass
pub fn frequencies(values: &[Value]) -> FrequencyMap {
    let mut map = FrequencyMap::new();
    for &v in values {
        *map.entry(v).or_insert(0) += 1;
    }
    map
}

/// Skewed values of a table with their counts, sorted by descending count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkewSet {
    entries: Vec<(Value, u64)>,
}

impl SkewSet {
    pub fn entries(&self) -> &[(Value, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Global count of a value, if it is skewed
    pub fn count_of(&self, value: Value) -> Option<u64> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, c)| *c)
    }

    /// Set of skewed values for membership checks
    pub fn values(&self) -> HashSet<Value> {
        self.entries.iter().map(|(v, _)| *v).collect()
    }

    /// Most frequent skewed value
    pub fn top(&self) -> Option<(Value, u64)> {
        self.entries.first().copied()
    }
}

/// Find the values whose count strictly exceeds `threshold * len(table)`
///
/// `skew_degree` only labels the table this set belongs to and takes no part
/// in the comparison. Thresholds outside `[0, 1]` are accepted as-is: a
/// negative threshold marks every present value as skewed, a threshold of 1
/// or more marks none.
pub fn detect(table: &[Value], skew_degree: f64, threshold: f64) -> SkewSet {
    let threshold_count = threshold * table.len() as f64;

    let mut entries: Vec<(Value, u64)> = frequencies(table)
        .into_iter()
        .filter(|&(_, count)| count as f64 > threshold_count)
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    tracing::debug!(
        rows = table.len(),
        skew_degree,
        threshold,
        skewed = entries.len(),
        "skew detection complete"
    );

    SkewSet { entries }
}
