// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Errors returned by filter construction and snapshot restoration.
use thiserror::Error;

/// An error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Expected item count or false positive rate out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A snapshot whose shape doesn't match its declared size.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Two filters with different configurations were combined.
    #[error("incompatible filters: {0}")]
    Incompatible(String),

    /// A snapshot couldn't be encoded or decoded as JSON.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
