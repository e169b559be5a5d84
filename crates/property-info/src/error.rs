// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the model, codec, matcher and attribute store.

use thiserror::Error;

/// Errors produced by property-info operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyInfoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("insufficient capacity: need {needed} bytes, have {available}")]
    InsufficientCapacity { needed: usize, available: usize },

    #[error("unsupported type code {0:#010x}")]
    UnsupportedType(u32),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{list} list exceeds its capacity of {cap}")]
    CapacityExceeded { list: &'static str, cap: usize },

    #[error("truncated buffer: wanted {wanted} bytes at offset {offset}")]
    Truncated { offset: usize, wanted: usize },

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidString { offset: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("value table holds {0} entries, more than a 16-bit count can carry")]
    TooManyValues(usize),

    #[error("attribute store error: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for PropertyInfoError {
    fn from(err: std::io::Error) -> Self {
        PropertyInfoError::Store(err.to_string())
    }
}

impl From<toml::de::Error> for PropertyInfoError {
    fn from(err: toml::de::Error) -> Self {
        PropertyInfoError::Config(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, PropertyInfoError>;
