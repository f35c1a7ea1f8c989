//! Row padding strings
//!
//! Each row carries a decorative payload so row files have a realistic width.
//! The payload is built from chunks of at most [`CHUNK_LEN`] characters, each
//! chunk drawn without replacement from `[A-Za-z0-9]`, so characters never
//! repeat within a chunk.

use rand::seq::SliceRandom;
use rand::Rng;

/// Payload length of every row
pub const PADDING_LEN: usize = 256;

/// Longest run of distinct characters
pub const CHUNK_LEN: usize = 32;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Append `len` random alphanumeric characters to `buf`
pub fn fill_padding<R: Rng + ?Sized>(rng: &mut R, len: usize, buf: &mut String) {
    let mut rest = len;
    while rest > 0 {
        let chunk = rest.min(CHUNK_LEN);
        buf.extend(
            ALPHANUMERIC
                .choose_multiple(rng, chunk)
                .map(|&b| b as char),
        );
        rest -= chunk;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashSet;

    fn random_padding<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
        let mut s = String::with_capacity(len);
        fill_padding(rng, len, &mut s);
        s
    }

    #[test]
    fn test_padding_length_and_charset() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for len in [0, 1, 31, 32, 33, 256] {
            let s = random_padding(&mut rng, len);
            assert_eq!(s.len(), len);
            assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_padding_chunks_have_distinct_chars() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let s = random_padding(&mut rng, PADDING_LEN);

        for chunk in s.as_bytes().chunks(CHUNK_LEN) {
            let unique: HashSet<u8> = chunk.iter().copied().collect();
            assert_eq!(unique.len(), chunk.len());
        }
    }
}
