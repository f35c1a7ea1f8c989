//! Node partitioning
//!
//! Splits a (shuffled) table into one contiguous shard per node. Shard sizes
//! are random and deliberately uneven:
//!
//! - `half = len / 2` is fixed up front
//! - every node but the last takes `uniform(0 ..= min(half, remaining))` rows
//! - the last node takes whatever remains
//!
//! Later nodes see a shrinking `remaining`, so middle shards are often small or
//! empty. Every call draws fresh sizes. The shard lengths always sum to the
//! table length.

use crate::distribution::Value;
use crate::error::GenError;
use crate::skew::SkewSet;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Contiguous slice of a table assigned to one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard<'a> {
    /// Node index (0-based)
    pub node_id: usize,
    /// Offset of the first row in the source table
    pub offset: usize,
    /// Rows owned by this node
    pub rows: &'a [Value],
}

impl<'a> Shard<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Draw the row count of each node
pub fn shard_sizes<R: Rng + ?Sized>(
    len: usize,
    node_count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GenError> {
    if node_count == 0 {
        return Err(GenError::InvalidNodeCount(node_count));
    }

    let half = len as f64 / 2.0;
    let mut remaining = len;
    let mut sizes = Vec::with_capacity(node_count);

    for i in 0..node_count {
        if i == node_count - 1 {
            sizes.push(remaining);
            break;
        }
        let max = half.min(remaining as f64).floor() as usize;
        let length = rng.gen_range(0..=max);
        remaining -= length;
        sizes.push(length);
    }

    Ok(sizes)
}

/// Split a table into `node_count` contiguous shards of random size
pub fn split<'a, R: Rng + ?Sized>(
    table: &'a [Value],
    node_count: usize,
    rng: &mut R,
) -> Result<Vec<Shard<'a>>, GenError> {
    let sizes = shard_sizes(table.len(), node_count, rng)?;
    Ok(materialize(table, &sizes))
}

/// Cut a table into consecutive slices of the given lengths
///
/// `sizes` must sum to `table.len()`, as returned by [`shard_sizes`].
pub fn materialize<'a>(table: &'a [Value], sizes: &[usize]) -> Vec<Shard<'a>> {
    debug_assert_eq!(sizes.iter().sum::<usize>(), table.len());

    let mut offset = 0;
    sizes
        .iter()
        .enumerate()
        .map(|(node_id, &length)| {
            let shard = Shard {
                node_id,
                offset,
                rows: &table[offset..offset + length],
            };
            offset += length;
            info!("node {} rows: {}", node_id, length);
            shard
        })
        .collect()
}

/// Count the globally skewed values inside one shard
///
/// Only values in `skew` are counted, even if some other value is frequent
/// within the shard. Entries are listed in order of first appearance.
pub fn shard_skew(rows: &[Value], skew: &SkewSet) -> Vec<(Value, u64)> {
    let skewed: HashSet<Value> = skew.values();
    let mut index: HashMap<Value, usize> = HashMap::new();
    let mut local: Vec<(Value, u64)> = Vec::new();

    for &v in rows {
        if !skewed.contains(&v) {
            continue;
        }
        match index.get(&v) {
            Some(&i) => local[i].1 += 1,
            None => {
                index.insert(v, local.len());
                local.push((v, 1));
            }
        }
    }

    local
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skew::detect;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_split_covers_table() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let table: Vec<Value> = (0..1000).collect();

        for seed in 0..50u64 {
            let mut rng2 = Xoshiro256PlusPlus::seed_from_u64(seed);
            let node_count = rng.gen_range(1..12);
            let shards = split(&table, node_count, &mut rng2).unwrap();

            assert_eq!(shards.len(), node_count);
            assert_eq!(shards.iter().map(|s| s.len()).sum::<usize>(), table.len());

            // Contiguous, in order, no gaps
            let rejoined: Vec<Value> = shards.iter().flat_map(|s| s.rows.iter().copied()).collect();
            assert_eq!(rejoined, table);
            for (i, s) in shards.iter().enumerate() {
                assert_eq!(s.node_id, i);
            }
        }
    }

    #[test]
    fn test_split_single_node_takes_all() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let table = vec![3, 1, 4, 1, 5];
        let shards = split(&table, 1, &mut rng).unwrap();

        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0].rows, &table[..]);
        assert_eq!(shards[0].offset, 0);
    }

    #[test]
    fn test_split_empty_table() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let shards = split(&[], 4, &mut rng).unwrap();

        assert_eq!(shards.len(), 4);
        assert!(shards.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_materialize_offsets() {
        let table: Vec<Value> = (0..10).collect();
        let shards = materialize(&table, &[3, 0, 5, 2]);

        let offsets: Vec<usize> = shards.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 3, 3, 8]);
        assert_eq!(shards[2].rows, &[3, 4, 5, 6, 7]);
        assert!(shards[1].is_empty());
    }

    #[test]
    fn test_split_zero_nodes() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert!(matches!(
            split(&[1, 2, 3], 0, &mut rng),
            Err(GenError::InvalidNodeCount(0))
        ));
    }

    #[test]
    fn test_non_final_shards_capped_at_half() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);

        for _ in 0..200 {
            let sizes = shard_sizes(101, 5, &mut rng).unwrap();
            assert!(sizes[..4].iter().all(|&s| s <= 50), "{:?}", sizes);
            assert_eq!(sizes.iter().sum::<usize>(), 101);
        }
    }

    #[test]
    fn test_sizes_rerandomized_per_call() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let first = shard_sizes(10_000, 6, &mut rng).unwrap();
        let differs = (0..20).any(|_| shard_sizes(10_000, 6, &mut rng).unwrap() != first);
        assert!(differs);
    }

    #[test]
    fn test_shard_skew_restricted_to_global_set() {
        // Global: 1 (x5) and 2 (x3) are skewed at 0.2 of 14 rows; 9 is not
        let table = vec![1, 1, 2, 9, 9, 1, 2, 1, 7, 2, 1, 8, 6, 5];
        let skew = detect(&table, 1.2, 0.2);
        assert_eq!(skew.values(), HashSet::from([1, 2]));

        // First shard has 9 twice, which is locally frequent but not globally skewed
        let local = shard_skew(&table[..5], &skew);
        assert_eq!(local, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_shard_skew_never_exceeds_global() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(31);
        let table: Vec<Value> = (0..2000)
            .map(|_| if rng.gen_bool(0.3) { 1 } else { rng.gen_range(0..200) })
            .collect();
        let skew = detect(&table, 1.2, 0.05);
        assert!(!skew.is_empty());

        let shards = split(&table, 4, &mut rng).unwrap();
        let mut totals: HashMap<Value, u64> = HashMap::new();
        for shard in &shards {
            for (v, c) in shard_skew(shard.rows, &skew) {
                let global = skew.count_of(v).expect("local value must be globally skewed");
                assert!(c <= global);
                *totals.entry(v).or_insert(0) += c;
            }
        }

        // Shards partition the table, so local counts add back up to the global ones
        for &(v, c) in skew.entries() {
            assert_eq!(totals.get(&v).copied().unwrap_or(0), c);
        }
    }

    #[test]
    fn test_shard_skew_empty_global_set() {
        let skew = SkewSet::default();
        assert!(shard_skew(&[1, 1, 1], &skew).is_empty());
    }
}
