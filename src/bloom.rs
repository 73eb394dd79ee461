// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! A Bloom filter over string keys using double hashing.

use tracing::{debug, trace};

use crate::bitvec::BitVec;
use crate::error::{Error, Result};
use crate::hash::{probe_index, Key, KeyHasher, MixHasher};
use crate::params::{
    optimal_bits, optimal_capacity, optimal_hashes, optimal_params, DEFAULT_CAPACITY,
    DEFAULT_FALSE_POSITIVE_RATE,
};
use crate::stats::Stats;

/// A Bloom filter whose keys are hashed with `H`.
#[derive(Clone, Debug)]
pub struct BloomFilter<H = MixHasher> {
    pub(crate) bits: BitVec,
    pub(crate) nhashes: usize,
    pub(crate) count: u64,
    pub(crate) hasher: H,
}

impl BloomFilter {
    /// Return a new Bloom filter for approximately `capacity` items at a false
    /// positive probability of `fp_rate`.
    ///
    /// Fails if `capacity` is zero or `fp_rate` is outside `(0, 1)`.
    pub fn new(capacity: usize, fp_rate: f64) -> Result<Self> {
        Self::with_hasher(capacity, fp_rate, MixHasher)
    }

    /// Return a new Bloom filter given a size in bytes for the filter.
    /// The number of hashes is chosen for the capacity that size supports at
    /// [`DEFAULT_FALSE_POSITIVE_RATE`].
    pub fn with_size(nbytes: usize) -> Result<Self> {
        let nbits = nbytes * 8;
        let capacity = optimal_capacity(nbits, DEFAULT_FALSE_POSITIVE_RATE);

        if capacity == 0 {
            return Err(Error::InvalidParameter(format!(
                "{} bytes cannot hold any items",
                nbytes
            )));
        }
        let nhashes = optimal_hashes(nbits, capacity);

        Ok(Self::from_parts(BitVec::new(nbits), nhashes, 0, MixHasher))
    }
}

impl Default for BloomFilter {
    fn default() -> Self {
        let nbits = optimal_bits(DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE);
        let nhashes = optimal_hashes(nbits, DEFAULT_CAPACITY);

        Self::from_parts(BitVec::new(nbits), nhashes, 0, MixHasher)
    }
}

impl<H: KeyHasher> BloomFilter<H> {
    /// Like [`BloomFilter::new`], with keys hashed by `hasher`.
    pub fn with_hasher(capacity: usize, fp_rate: f64, hasher: H) -> Result<Self> {
        let (nbits, nhashes) = optimal_params(capacity, fp_rate)?;

        Ok(Self::from_parts(BitVec::new(nbits), nhashes, 0, hasher))
    }

    pub(crate) fn from_parts(bits: BitVec, nhashes: usize, count: u64, hasher: H) -> Self {
        debug!(
            bits = bits.len(),
            hashes = nhashes,
            bytes = bits.as_bytes().len(),
            "Bloom filter allocated"
        );

        Self {
            bits,
            nhashes,
            count,
            hasher,
        }
    }

    /// Add an item to the Bloom filter. Setting bits is idempotent, but the
    /// item counter is incremented on every call.
    pub fn insert<K: Key + ?Sized>(&mut self, item: &K) {
        let (h1, h2) = self.hasher.hash_pair(item.key_bytes());
        let nbits = self.bits.len();

        for i in 0..self.nhashes {
            self.bits.set(probe_index(h1, h2, i, nbits));
        }
        self.count = self.count.saturating_add(1);
    }

    /// Add every item in order. Equivalent to calling [`BloomFilter::insert`]
    /// once per item.
    pub fn insert_all<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Key,
    {
        let before = self.count;

        for item in items {
            self.insert(&item);
        }
        trace!(items = self.count - before, "Bulk insert complete");
    }

    /// Return whether or not a given item is likely in the Bloom filter or not. There is a
    /// possibility for a false positive with the probability being under the Bloom filter's `p`
    /// value, but a false negative will never occur.
    pub fn contains<K: Key + ?Sized>(&self, item: &K) -> bool {
        let (h1, h2) = self.hasher.hash_pair(item.key_bytes());
        let nbits = self.bits.len();

        (0..self.nhashes).all(|i| self.bits.is_set(probe_index(h1, h2, i, nbits)))
    }

    /// Return the number of bits in this filter.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    /// Number of hashes used (`k` parameter).
    pub fn hashes(&self) -> usize {
        self.nhashes
    }

    /// Number of insertions performed, duplicates included.
    pub fn item_count(&self) -> u64 {
        self.count
    }

    /// Fraction of bits currently set.
    pub fn load_factor(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Count the approximate number of distinct items in the filter.
    ///
    /// Saturates once every bit is set.
    pub fn estimated_count(&self) -> usize {
        let nbits = self.bits.len() as f64;
        let nbits_set = self.bits.count_ones() as f64;
        let nhashes = self.nhashes as f64;
        let count = -(nbits / nhashes) * (1. - (nbits_set / nbits)).ln();

        count.round() as usize
    }

    /// Return diagnostic statistics.
    pub fn stats(&self) -> Stats {
        let load_factor = self.load_factor();
        let size_bytes = self.bits.as_bytes().len();

        Stats {
            bit_count: self.bits.len(),
            hash_count: self.nhashes,
            item_count: self.count,
            bits_set: self.bits.count_ones(),
            load_factor,
            estimated_false_positive_rate: load_factor.powi(self.nhashes as i32),
            size_bytes,
            size_mb: size_bytes as f64 / (1024. * 1024.),
        }
    }

    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

impl<H: KeyHasher + Clone + PartialEq> BloomFilter<H> {
    /// Check whether two filters can be intersected and unioned.
    pub fn is_comparable(&self, other: &Self) -> bool {
        self.nhashes == other.nhashes
            && self.bits.len() == other.bits.len()
            && self.hasher == other.hasher
    }

    /// Compute the union of two Bloom filters. The item counter of the result
    /// is the sum of both counters.
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.check_comparable(other, "union")?;

        Ok(Self {
            bits: self.bits.union(&other.bits),
            nhashes: self.nhashes,
            count: self.count.saturating_add(other.count),
            hasher: self.hasher.clone(),
        })
    }

    /// Compute the intersection of two Bloom filters. The item counter of the
    /// result is its estimated count.
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        self.check_comparable(other, "intersect")?;

        let mut result = Self {
            bits: self.bits.intersection(&other.bits),
            nhashes: self.nhashes,
            count: 0,
            hasher: self.hasher.clone(),
        };
        result.count = result.estimated_count() as u64;

        Ok(result)
    }

    fn check_comparable(&self, other: &Self, op: &str) -> Result<()> {
        if self.is_comparable(other) {
            return Ok(());
        }
        Err(Error::Incompatible(format!(
            "unable to {} filters with different configurations: \
             {} bits/{} hashes and {} bits/{} hashes",
            op,
            self.bits.len(),
            self.nhashes,
            other.bits.len(),
            other.nhashes
        )))
    }
}

impl<K: Key, H: KeyHasher> Extend<K> for BloomFilter<H> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<H> AsRef<[u8]> for BloomFilter<H> {
    fn as_ref(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

impl<H> PartialEq for BloomFilter<H> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits && self.nhashes == other.nhashes
    }
}

impl<H> Eq for BloomFilter<H> {}
