// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Filter diagnostics.
use std::fmt;

use serde::Serialize;

/// A point-in-time summary of a filter, as returned by
/// [`BloomFilter::stats`](crate::BloomFilter::stats).
///
/// None of these values are used by the filter itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of bits (`m`).
    pub bit_count: usize,
    /// Number of hashes (`k`).
    pub hash_count: usize,
    /// Number of insertions, duplicates included.
    pub item_count: u64,
    /// Number of bits set.
    pub bits_set: usize,
    /// `bits_set / bit_count`.
    pub load_factor: f64,
    /// `load_factor ^ hash_count`. An approximation, not a measured rate.
    pub estimated_false_positive_rate: f64,
    /// Size of the bit storage.
    pub size_bytes: usize,
    /// Size of the bit storage in mebibytes.
    pub size_mb: f64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bits={} hashes={} items={} load={:.2}% fp~{:.4}% size={:.2}MB",
            self.bit_count,
            self.hash_count,
            self.item_count,
            self.load_factor * 100.,
            self.estimated_false_positive_rate * 100.,
            self.size_mb,
        )
    }
}
