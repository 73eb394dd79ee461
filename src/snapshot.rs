// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Portable filter snapshots.
//!
//! A snapshot carries the filter configuration and the raw bit storage:
//!
//! ```json
//! { "size": 9586, "hashCount": 7, "itemCount": 1, "bitArray": [0, 4, ...] }
//! ```
//!
//! `bitArray` holds exactly `ceil(size / 8)` bytes, bit `i` stored in byte
//! `i / 8` under mask `1 << (i % 8)`. The hasher is not recorded; a snapshot
//! must be restored with the hasher it was taken with.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitvec::BitVec;
use crate::bloom::BloomFilter;
use crate::error::{Error, Result};
use crate::hash::{KeyHasher, MixHasher};

/// Serializable state of a [`BloomFilter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Number of bits.
    pub size: usize,
    /// Number of hashes.
    pub hash_count: usize,
    /// Insertion counter. Defaults to zero when absent.
    #[serde(default)]
    pub item_count: u64,
    /// Bit storage, one entry per byte.
    pub bit_array: Vec<u8>,
}

impl Snapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. Only the shape is checked here; sizes are checked
    /// when the snapshot is restored into a filter.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl BloomFilter {
    /// Restore a filter from a snapshot.
    ///
    /// Fails with [`Error::MalformedSnapshot`] if the size or hash count is
    /// zero, or if the bit storage doesn't match the declared size.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        Self::from_snapshot_with_hasher(snapshot, MixHasher)
    }

    /// Restore a filter from a JSON-encoded snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_snapshot(Snapshot::from_json(json)?)
    }
}

impl<H: KeyHasher> BloomFilter<H> {
    /// Like [`BloomFilter::from_snapshot`], with keys hashed by `hasher`.
    pub fn from_snapshot_with_hasher(snapshot: Snapshot, hasher: H) -> Result<Self> {
        let Snapshot {
            size,
            hash_count,
            item_count,
            bit_array,
        } = snapshot;

        let bits = validate(size, hash_count)
            .and_then(|_| BitVec::from_bytes(size, bit_array))
            .map_err(|err| {
                debug!(size, hash_count, "Snapshot rejected: {}", err);
                err
            })?;

        Ok(Self::from_parts(bits, hash_count, item_count, hasher))
    }

    /// Capture the filter's current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.bits.len(),
            hash_count: self.nhashes,
            item_count: self.count,
            bit_array: self.bits.as_bytes().to_vec(),
        }
    }

    /// Capture the filter's current state as JSON.
    pub fn to_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }
}

impl<H: KeyHasher> From<&BloomFilter<H>> for Snapshot {
    fn from(filter: &BloomFilter<H>) -> Self {
        filter.snapshot()
    }
}

impl TryFrom<Snapshot> for BloomFilter {
    type Error = Error;

    fn try_from(snapshot: Snapshot) -> Result<Self> {
        Self::from_snapshot(snapshot)
    }
}

fn validate(size: usize, hash_count: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::MalformedSnapshot(String::from("size must be positive")));
    }
    if hash_count == 0 {
        return Err(Error::MalformedSnapshot(String::from(
            "hash count must be positive",
        )));
    }
    Ok(())
}
