// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Optimal Bloom filter parameters.
//!
//! Given an expected number of items `n` and a target false positive rate `p`,
//! the bit vector size is `m = ceil(-(n * ln p) / ln(2)^2)` and the number of
//! hashes is `k = ceil((m / n) * ln 2)`. Both are rounded up, never to nearest,
//! since they determine the snapshot layout.
use std::f64;

use crate::error::{Error, Result};

/// The default approximate item capacity.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// The default false positive probability value, 1%.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// `ln` squared.
const LN_SQR: f64 = f64::consts::LN_2 * f64::consts::LN_2;

/// Return the optimal `(bits, hashes)` pair for a filter holding `capacity`
/// items at a false positive rate of `fp_rate`.
///
/// Fails if `capacity` is zero or `fp_rate` is not strictly between 0 and 1.
pub fn optimal_params(capacity: usize, fp_rate: f64) -> Result<(usize, usize)> {
    if capacity == 0 {
        return Err(Error::InvalidParameter(String::from(
            "expected items must be positive",
        )));
    }
    // Also rejects NaN.
    if !(fp_rate > 0. && fp_rate < 1.) {
        return Err(Error::InvalidParameter(format!(
            "false positive rate must be in (0, 1), got {fp_rate}"
        )));
    }
    let nbits = optimal_bits(capacity, fp_rate);
    let nhashes = optimal_hashes(nbits, capacity);

    Ok((nbits, nhashes))
}

/// Return the optimal bit vector size for a Bloom filter given an approximate
/// size and a desired false positive rate.
pub fn optimal_bits(capacity: usize, fp_rate: f64) -> usize {
    (-((fp_rate.ln() * (capacity as f64)) / LN_SQR)).ceil() as usize
}

/// Return the optimal item capacity of a filter given a bit vector size and false positive rate.
pub fn optimal_capacity(nbits: usize, fp_rate: f64) -> usize {
    ((-(nbits as f64) * LN_SQR) / fp_rate.ln()).round() as usize
}

/// Return the optimal number of hash functions for a Bloom filter given a
/// bit vector size and an approximate set size.
///
/// Also called `k`.
pub fn optimal_hashes(nbits: usize, capacity: usize) -> usize {
    ((nbits as f64 / capacity as f64) * f64::consts::LN_2).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_params() {
        assert_eq!(optimal_params(1000, 0.01).unwrap(), (9586, 7));
        assert_eq!(optimal_params(1, 0.99).unwrap(), (1, 1));
    }

    #[test]
    fn test_invalid_params() {
        for (n, p) in [(0, 0.01), (100, 0.), (100, 1.), (100, -0.5), (100, 1.5)] {
            assert!(
                matches!(optimal_params(n, p), Err(Error::InvalidParameter(_))),
                "({n}, {p}) should be rejected"
            );
        }
        assert!(matches!(
            optimal_params(100, f64::NAN),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_optimal_bits() {
        assert_eq!(optimal_bits(10, 0.04), 67);
        assert_eq!(optimal_bits(5000, 0.01), 47926);
        assert_eq!(optimal_bits(100000, 0.01), 958506);
    }

    #[test]
    fn test_optimal_hashes() {
        assert_eq!(optimal_hashes(67, 10), 5);
        assert_eq!(optimal_hashes(47926, 5000), 7);
        assert_eq!(optimal_hashes(958506, 100000), 7);
        assert_eq!(optimal_hashes(8, 1), 6);
        // 4.75 * ln 2, not 4 * ln 2.
        assert_eq!(optimal_hashes(19, 4), 4);
    }

    #[test]
    fn test_optimal_capacity() {
        assert_eq!(optimal_capacity(optimal_bits(128, 0.01), 0.01), 128);
        assert_eq!(optimal_capacity(optimal_bits(84198, 0.03), 0.03), 84198);
        assert_eq!(optimal_capacity(optimal_bits(958472, 0.04), 0.04), 958472);
    }
}
