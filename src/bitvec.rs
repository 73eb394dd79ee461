// Copyright (c) 2020 Helge Wrede, Alexander Schultheiß, Lukas Simon
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Bit vector functionality.
use std::fmt::Debug;

use crate::error::{Error, Result};

/// A packed bit vector. Bit `i` lives in byte `i / 8` under mask `1 << (i % 8)`.
///
/// Bits can be set but never unset, and the number of set bits is tracked as
/// they are set.
#[derive(Clone, PartialEq, Eq)]
pub struct BitVec {
    bytes: Vec<u8>,
    nbits: usize,
    ones: usize,
}

impl BitVec {
    /// Create a new bit vector of the given capacity, in bits.
    pub fn new(capacity: usize) -> Self {
        Self {
            nbits: capacity,
            bytes: vec![0; byte_len(capacity)],
            ones: 0,
        }
    }

    /// Restore a vector of `nbits` bits from its byte storage.
    ///
    /// Fails if the storage isn't exactly `ceil(nbits / 8)` bytes long, or if
    /// any padding bit past `nbits` is set.
    pub fn from_bytes(nbits: usize, bytes: Vec<u8>) -> Result<Self> {
        let expected = byte_len(nbits);

        if bytes.len() != expected {
            return Err(Error::MalformedSnapshot(format!(
                "expected {} bytes for {} bits, got {}",
                expected,
                nbits,
                bytes.len()
            )));
        }
        if nbits % 8 != 0 {
            let padding = !0u8 << (nbits % 8);
            if bytes.last().map_or(false, |b| b & padding != 0) {
                return Err(Error::MalformedSnapshot(format!(
                    "padding bits past bit {} are set",
                    nbits
                )));
            }
        }
        let ones = bytes.iter().map(|b| b.count_ones() as usize).sum();

        Ok(Self { bytes, nbits, ones })
    }

    /// Get the length in bits of the vector.
    pub fn len(&self) -> usize {
        self.nbits
    }

    /// Check whether this vector is empty, ie. has a length of zero.
    pub fn is_empty(&self) -> bool {
        self.nbits == 0
    }

    /// Set a single bit to `1`. Returns `true` if the bit was previously unset.
    pub fn set(&mut self, index: usize) -> bool {
        let (byte_index, mask) = self.locate(index);
        let byte = &mut self.bytes[byte_index];

        if *byte & mask == mask {
            return false;
        }
        *byte |= mask;
        self.ones += 1;

        true
    }

    /// Check whether a bit is set.
    pub fn is_set(&self, index: usize) -> bool {
        let (byte_index, mask) = self.locate(index);

        self.bytes[byte_index] & mask == mask
    }

    /// Count the number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    /// Count the number of `0` bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Return the union of two bit vectors.
    /// This is a bitwise `OR` of two vectors.
    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, "union", |a, b| a | b)
    }

    /// Return the intersection of two bit vectors.
    /// This is a bitwise `AND` of two vectors.
    pub fn intersection(&self, other: &Self) -> Self {
        self.combine(other, "intersect", |a, b| a & b)
    }

    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn combine(&self, other: &Self, op: &str, f: impl Fn(u8, u8) -> u8) -> Self {
        if self.nbits != other.nbits {
            panic!(
                "unable to {} bitvecs with different lengths: {} and {}",
                op, self.nbits, other.nbits
            );
        }
        let bytes: Vec<u8> = self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| f(*a, *b))
            .collect();
        let ones = bytes.iter().map(|b| b.count_ones() as usize).sum();

        Self {
            bytes,
            nbits: self.nbits,
            ones,
        }
    }

    fn locate(&self, index: usize) -> (usize, u8) {
        if index >= self.len() {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index,
            )
        }
        (index / 8, 0x01 << (index % 8))
    }
}

impl Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = (0..self.nbits)
            .map(|i| if self.is_set(i) { '1' } else { '0' })
            .collect();
        write!(f, "BitVec({})", bits)
    }
}

/// Number of bytes needed to hold `nbits` bits.
fn byte_len(nbits: usize) -> usize {
    nbits / 8 + usize::from(nbits % 8 != 0)
}
