// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Key hashing and probe index derivation.
//!
//! Two 32-bit base hashes `h1` and `h2` are computed once per key, and the
//! `i`-th probe is derived from them by double hashing:
//!
//! g<sub>i</sub>(x) = (h<sub>1</sub>(x) + i·h<sub>2</sub>(x)) mod m
//!
//! The sum is carried in a 64-bit accumulator, so `i·h2` never wraps before the
//! reduction modulo `m`.
use std::hash::Hasher;

use siphasher::sip::SipHasher13;

/// Seeds used for SipHash.
const HASHER_SEEDS: [[u8; 16]; 2] = [
    [
        136, 168, 28, 251, 141, 239, 69, 38, 166, 209, 98, 201, 2, 169, 146, 170,
    ],
    [
        103, 236, 177, 212, 54, 11, 66, 5, 194, 86, 6, 254, 82, 93, 203, 37,
    ],
];

/// Initial accumulator of [`hash_a`].
const SEED_A: u32 = 0x811c_9dc5;
/// Multiplier of [`hash_a`].
const MUL_A: u32 = 0x0100_0193;
/// Diffusion shift of [`hash_a`].
const SHIFT_A: u32 = 15;

/// Initial accumulator of [`hash_b`].
const SEED_B: u32 = 0x9747_b28c;
/// Multiplier of [`hash_b`].
const MUL_B: u32 = 0x5bd1_e995;
/// Diffusion shift of [`hash_b`].
const SHIFT_B: u32 = 13;

/// A value that can be inserted into a filter.
///
/// Keys are hashed through their canonical byte representation. Two keys
/// with equal bytes are the same key.
pub trait Key {
    /// Return the bytes that identify this key.
    fn key_bytes(&self) -> &[u8];
}

impl Key for str {
    fn key_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Key for String {
    fn key_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<K: Key + ?Sized> Key for &K {
    fn key_bytes(&self) -> &[u8] {
        (**self).key_bytes()
    }
}

/// Produces the two base hashes from which probe indices are derived.
pub trait KeyHasher {
    /// Hash a key's bytes into the `(h1, h2)` pair.
    fn hash_pair(&self, bytes: &[u8]) -> (u32, u32);
}

/// The default hasher: [`hash_a`] and [`hash_b`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MixHasher;

impl KeyHasher for MixHasher {
    fn hash_pair(&self, bytes: &[u8]) -> (u32, u32) {
        (hash_a(bytes), hash_b(bytes))
    }
}

/// A keyed hasher built on two SipHash-1-3 instances.
#[derive(Clone, Debug)]
pub struct SipKeyHasher {
    hashers: [SipHasher13; 2],
}

impl SipKeyHasher {
    /// Create a hasher from two 128-bit SipHash keys.
    pub fn new(k1: &[u8; 16], k2: &[u8; 16]) -> Self {
        Self {
            hashers: [SipHasher13::new_with_key(k1), SipHasher13::new_with_key(k2)],
        }
    }
}

impl Default for SipKeyHasher {
    fn default() -> Self {
        Self::new(&HASHER_SEEDS[0], &HASHER_SEEDS[1])
    }
}

impl PartialEq for SipKeyHasher {
    fn eq(&self, other: &Self) -> bool {
        self.hashers[0].keys() == other.hashers[0].keys()
            && self.hashers[1].keys() == other.hashers[1].keys()
    }
}

impl Eq for SipKeyHasher {}

impl KeyHasher for SipKeyHasher {
    fn hash_pair(&self, bytes: &[u8]) -> (u32, u32) {
        let mut sip1 = self.hashers[0];
        let mut sip2 = self.hashers[1];

        sip1.write(bytes);
        sip2.write(bytes);

        (sip1.finish() as u32, sip2.finish() as u32)
    }
}

/// First base hash.
pub fn hash_a(bytes: &[u8]) -> u32 {
    mix(bytes, SEED_A, MUL_A, SHIFT_A)
}

/// Second base hash. Uses a different seed, multiplier and shift than
/// [`hash_a`], so the two are not trivially correlated.
pub fn hash_b(bytes: &[u8]) -> u32 {
    mix(bytes, SEED_B, MUL_B, SHIFT_B)
}

fn mix(bytes: &[u8], seed: u32, mul: u32, shift: u32) -> u32 {
    bytes.iter().fold(seed, |acc, &b| {
        let acc = (acc ^ b as u32).wrapping_mul(mul);
        acc ^ (acc >> shift)
    })
}

/// Return the index of probe `i` in a bit vector of `nbits` bits.
///
/// # Panics
///
/// Panics if `nbits` is zero.
pub fn probe_index(h1: u32, h2: u32, i: usize, nbits: usize) -> usize {
    let r = h1 as u64 + i as u64 * h2 as u64;
    (r % nbits as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("key-{}", i)).collect()
    }

    #[test]
    fn test_empty_key_is_seed() {
        assert_eq!(hash_a(b""), SEED_A);
        assert_eq!(hash_b(b""), SEED_B);
    }

    #[test]
    fn test_deterministic() {
        for key in keys(64) {
            assert_eq!(hash_a(key.as_bytes()), hash_a(key.as_bytes()));
            assert_eq!(hash_b(key.as_bytes()), hash_b(key.as_bytes()));
            assert_eq!(
                MixHasher.hash_pair(key.as_bytes()),
                (hash_a(key.as_bytes()), hash_b(key.as_bytes()))
            );
        }
    }

    #[test]
    fn test_hashes_differ() {
        let same = keys(1000)
            .iter()
            .filter(|k| hash_a(k.as_bytes()) == hash_b(k.as_bytes()))
            .count();
        assert_eq!(same, 0);
    }

    #[test]
    fn test_low_bit_balance() {
        let keys = keys(10_000);
        for hash in [hash_a as fn(&[u8]) -> u32, hash_b] {
            let odd = keys.iter().filter(|k| hash(k.as_bytes()) & 1 == 1).count();
            let ratio = odd as f64 / keys.len() as f64;

            assert!(ratio > 0.45 && ratio < 0.55, "ratio {ratio} is skewed");
        }
    }

    #[test]
    fn test_probe_index_does_not_wrap() {
        let (h1, h2) = (u32::MAX, u32::MAX - 1);
        let nbits = 9586;

        for i in 0..64 {
            let expected = (h1 as u128 + i as u128 * h2 as u128) % nbits as u128;
            assert_eq!(probe_index(h1, h2, i, nbits) as u128, expected);
        }
        // A 32-bit accumulator would have wrapped here.
        let wrapped = h1.wrapping_add(2u32.wrapping_mul(h2)) as usize % nbits;
        assert_ne!(probe_index(h1, h2, 2, nbits), wrapped);
    }

    #[test]
    fn test_probe_index_in_range() {
        for key in keys(256) {
            let (h1, h2) = MixHasher.hash_pair(key.as_bytes());
            for i in 0..7 {
                assert!(probe_index(h1, h2, i, 67) < 67);
            }
        }
    }

    #[test]
    fn test_key_impls() {
        let owned = String::from("alpha");

        assert_eq!("alpha".key_bytes(), b"alpha");
        assert_eq!(owned.key_bytes(), b"alpha");
        assert_eq!((&owned).key_bytes(), b"alpha");
        assert_eq!((&&"alpha").key_bytes(), b"alpha");
    }

    #[test]
    fn test_sip_hasher() {
        let a = SipKeyHasher::default();
        let b = SipKeyHasher::new(&[7; 16], &[9; 16]);

        assert_eq!(a, SipKeyHasher::default());
        assert_ne!(a, b);
        assert_eq!(a.hash_pair(b"alpha"), a.hash_pair(b"alpha"));
        assert_ne!(a.hash_pair(b"alpha"), b.hash_pair(b"alpha"));
    }
}
