// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic flatten/unflatten surface shared by serializable objects.

use crate::error::Result;

/// Type tag of a flattened property-info blob ('SCTD').
pub const PROPERTY_INFO_TYPE: u32 = 0x5343_5444;

/// An object that can be written to and rebuilt from a tagged byte blob.
pub trait Flattenable {
    /// Tag identifying this object's blobs.
    fn type_code(&self) -> u32;

    /// Whether every instance flattens to the same size.
    fn is_fixed_size(&self) -> bool;

    fn allows_type_code(&self, code: u32) -> bool {
        code == self.type_code()
    }

    /// Exact number of bytes [`Flattenable::flatten`] writes.
    fn flattened_size(&self) -> usize;

    /// Write into `buffer`, returning the bytes written.
    fn flatten(&self, buffer: Option<&mut [u8]>) -> Result<usize>;

    /// Replace this object's contents with the blob in `buffer`.
    fn unflatten(&mut self, type_code: u32, buffer: Option<&[u8]>) -> Result<()>;
}
