//! A Bloom filter over string keys, a space-efficient probabilistic set.
//!
//! # Bloom Filters
//!
//! A Bloom filter is a space-efficient probabilistic data structure that is
//! used to test whether an element is a member of a set. It allows for queries
//! to return: "possibly in set" or "definitely not in set". Elements can be
//! added to the set, but not removed; the more elements that are added to the
//! set, the larger the probability of false positives. It has been shown that
//! fewer than 10 bits per element are required for a 1% false positive
//! probability, independent of the size or number of elements in the set.
//!
//! A filter is created from the approximate number of items expected to be
//! inserted and a target false positive probability, from which the bit
//! vector size `m` and number of hashes `k` are derived (see [`params`]).
//!
//! # Double Hashing
//!
//! Each key is hashed once by two independent 32-bit functions, and the `k`
//! bit positions are derived from those two values:
//!
//! g<sub>i</sub>(x) = (H<sub>1</sub>(x) + iH<sub>2</sub>(x)) mod m
//!
//! Adam Kirsch and Michael Mitzenmacher showed in *Less Hashing, Same
//! Performance: Building a Better Bloom Filter* that this costs nothing in
//! asymptotic false positive probability.
//!
//! # Snapshots
//!
//! A filter can be captured as a [`Snapshot`] holding its size, hash count,
//! item counter and raw bytes, and restored from one. Snapshots are
//! serializable with `serde`, and checked for consistency when restored.
//!
//! # Example
//!
//! ```
//! use bloomset::BloomFilter;
//!
//! let mut filter = BloomFilter::new(32, 0.01)?;
//!
//! filter.insert("foo");
//! filter.insert("bar");
//!
//! assert!(filter.contains("foo"));
//! assert!(filter.contains("bar"));
//! assert_eq!(filter.item_count(), 2);
//!
//! let restored = BloomFilter::from_snapshot(filter.snapshot())?;
//! assert!(restored.contains("foo"));
//! # Ok::<(), bloomset::Error>(())
//! ```
#![warn(missing_docs)]
#![allow(clippy::bool_assert_comparison)]

pub mod bitvec;
pub mod bloom;
pub mod config;
pub mod error;
pub mod hash;
pub mod params;
pub mod snapshot;
pub mod stats;

pub use bloom::BloomFilter;
pub use config::FilterConfig;
pub use error::{Error, Result};
pub use hash::{Key, KeyHasher, MixHasher, SipKeyHasher};
pub use params::{DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE};
pub use snapshot::Snapshot;
pub use stats::Stats;
