// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Filter configuration.
use serde::{Deserialize, Serialize};

use crate::bloom::BloomFilter;
use crate::error::Result;
use crate::hash::KeyHasher;
use crate::params::{optimal_params, DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE};

/// Sizing of a filter. Fields missing from a deserialized configuration take
/// their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Approximate number of distinct items the filter will hold.
    pub expected_items: usize,
    /// Target false positive probability, in `(0, 1)`.
    pub false_positive_rate: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_items: DEFAULT_CAPACITY,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
        }
    }
}

impl FilterConfig {
    /// Return the `(bits, hashes)` this configuration yields.
    pub fn params(&self) -> Result<(usize, usize)> {
        optimal_params(self.expected_items, self.false_positive_rate)
    }

    /// Build an empty filter.
    pub fn build(&self) -> Result<BloomFilter> {
        BloomFilter::new(self.expected_items, self.false_positive_rate)
    }

    /// Build an empty filter whose keys are hashed by `hasher`.
    pub fn build_with_hasher<H: KeyHasher>(&self, hasher: H) -> Result<BloomFilter<H>> {
        BloomFilter::with_hasher(self.expected_items, self.false_positive_rate, hasher)
    }
}
