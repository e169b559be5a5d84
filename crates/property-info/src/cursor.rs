// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors for flattened property-info buffers.
//!
//! The writer emits integers in a fixed byte order chosen once per blob. The
//! reader always reads host order and, when the blob came from the other
//! endianness, swaps every integer as it is read.

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};

use crate::error::{PropertyInfoError, Result};

/// Generate write methods for fixed-width integers.
///
/// Each generated method checks bounds, encodes in the cursor's byte order
/// and advances the offset.
macro_rules! impl_write {
    ($name:ident, $type:ty, $size:expr, $method:ident) => {
        pub fn $name(&mut self, value: $type) -> Result<()> {
            let big_endian = self.big_endian;
            let dst = self.reserve($size)?;
            if big_endian {
                BigEndian::$method(dst, value);
            } else {
                LittleEndian::$method(dst, value);
            }
            Ok(())
        }
    };
}

/// Generate read methods for fixed-width integers.
///
/// Each generated method checks bounds, decodes in host order, then applies
/// the swap correction.
macro_rules! impl_read {
    ($name:ident, $type:ty, $size:expr, $method:ident) => {
        pub fn $name(&mut self) -> Result<$type> {
            let src = self.take($size)?;
            let raw = NativeEndian::$method(src);
            Ok(if self.swap { raw.swap_bytes() } else { raw })
        }
    };
}

/// Mutable cursor for writing (bounds-checked).
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
    big_endian: bool,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8], big_endian: bool) -> Self {
        Self {
            buffer,
            offset: 0,
            big_endian,
        }
    }

    fn reserve(&mut self, len: usize) -> Result<&mut [u8]> {
        let end = self.offset.checked_add(len).filter(|&end| end <= self.buffer.len());
        let Some(end) = end else {
            return Err(PropertyInfoError::InsufficientCapacity {
                needed: self.offset.saturating_add(len),
                available: self.buffer.len(),
            });
        };
        let start = self.offset;
        self.offset = end;
        Ok(&mut self.buffer[start..end])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?[0] = value;
        Ok(())
    }

    impl_write!(write_u16, u16, 2, write_u16);
    impl_write!(write_u32, u32, 4, write_u32);
    impl_write!(write_i32, i32, 4, write_i32);

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.reserve(data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// Write `data` followed by a NUL byte.
    pub fn write_cstr(&mut self, data: &[u8]) -> Result<()> {
        self.write_bytes(data)?;
        self.write_u8(0)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
    swap: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            swap: false,
        }
    }

    /// Enable byte swapping for every subsequent integer read.
    pub fn set_swap(&mut self, swap: bool) {
        self.swap = swap;
    }

    pub fn swaps(&self) -> bool {
        self.swap
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(PropertyInfoError::Truncated {
                offset: self.offset,
                wanted: len,
            });
        }
        let buffer: &'a [u8] = self.buffer;
        let slice = &buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    impl_read!(read_u16, u16, 2, read_u16);
    impl_read!(read_u32, u32, 4, read_u32);
    impl_read!(read_i32, i32, 4, read_i32);

    /// Look at the next 32-bit word without consuming it.
    pub fn peek_u32(&self) -> Result<u32> {
        let mut peek = Cursor {
            buffer: self.buffer,
            offset: self.offset,
            swap: self.swap,
        };
        peek.read_u32()
    }

    /// Read a NUL-terminated UTF-8 string, consuming the terminator.
    pub fn read_cstr(&mut self) -> Result<&'a str> {
        let start = self.offset;
        let rest = &self.buffer[start.min(self.buffer.len())..];
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(PropertyInfoError::Truncated {
                offset: start,
                wanted: rest.len() + 1,
            });
        };
        let bytes = self.take(len + 1)?;
        std::str::from_utf8(&bytes[..len])
            .map_err(|_| PropertyInfoError::InvalidString { offset: start })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
