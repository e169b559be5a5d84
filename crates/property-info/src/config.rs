// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! Supports both programmatic and file-based (TOML) configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PropertyInfoError, Result};

/// Smallest possible flattened blob: marker, property count, flags.
pub const HEADER_SIZE: usize = 9;

/// Byte order used when flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrderMode {
    /// Host byte order.
    #[default]
    Native,
    BigEndian,
    LittleEndian,
}

impl ByteOrderMode {
    pub fn is_big_endian(self) -> bool {
        match self {
            ByteOrderMode::Native => cfg!(target_endian = "big"),
            ByteOrderMode::BigEndian => true,
            ByteOrderMode::LittleEndian => false,
        }
    }

    /// The order a host of the other endianness would produce.
    pub fn foreign() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrderMode::LittleEndian
        } else {
            ByteOrderMode::BigEndian
        }
    }
}

/// Flatten/unflatten settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Byte order written by flatten. Unflatten always honors the marker.
    #[serde(default)]
    pub byte_order: ByteOrderMode,

    /// Largest buffer unflatten will accept. Unlimited when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_blob_size: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrderMode::Native,
            max_blob_size: None,
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PropertyInfoError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Flatten in the given byte order.
    pub fn with_byte_order(mut self, byte_order: ByteOrderMode) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Reject blobs larger than `max_blob_size` bytes when unflattening.
    pub fn with_max_blob_size(mut self, max_blob_size: usize) -> Self {
        self.max_blob_size = Some(max_blob_size);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.max_blob_size.filter(|&limit| limit < HEADER_SIZE) {
            return Err(PropertyInfoError::Config(format!(
                "max_blob_size {} is below the {}-byte header",
                limit, HEADER_SIZE
            )));
        }
        Ok(())
    }
}
