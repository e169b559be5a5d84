// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Flattened size computation and buffer writer.
//!
//! # Wire layout
//!
//! ```text
//! +--------------------------------------------------------------+
//! | marker (1) | property count (4, signed) | flags (4)          |
//! +--------------------------------------------------------------+
//! | property main chunks (flags bit 0), once per property:       |
//! |   name\0 | usage\0 | extra_data (4)                          |
//! |   commands (4 each) | 0 (4) | specifiers (4 each) | 0 (4)   |
//! +--------------------------------------------------------------+
//! | property type chunks, once per property:                     |
//! |   types (4 each) | 0 (4)                                     |
//! |   per compound type: (field name\0 | type (4))* | 0 (4)      |
//! |   0 (4)                                                      |
//! +--------------------------------------------------------------+
//! | value table (flags bit 1):                                   |
//! |   count (2) | per value: kind (4) | value (4) | name\0 |     |
//! |   usage\0 | extra_data (4)                                   |
//! +--------------------------------------------------------------+
//! ```
//!
//! Integers use the byte order announced by the marker (nonzero means
//! big-endian). Main chunks and type chunks are written in two separate
//! passes rather than interleaved.

use crate::config::{CodecConfig, HEADER_SIZE};
use crate::cursor::CursorMut;
use crate::error::{PropertyInfoError, Result};
use crate::model::{wire_bytes, PropertyEntry, ValueEntry};
use crate::table::PropertyTable;

/// Flags bit: a property table follows the header.
pub const FLAG_PROPERTIES: u32 = 0x1;
/// Flags bit: a value table follows the property table.
pub const FLAG_VALUES: u32 = 0x2;

const WORD: usize = 4;

fn cstr_size(s: Option<&str>) -> usize {
    s.map_or(0, |s| wire_bytes(s).len()) + 1
}

fn code_list_size(codes: &[u32]) -> usize {
    (codes.len() + 1) * WORD
}

fn main_chunk_size(entry: &PropertyEntry<'_>) -> usize {
    cstr_size(Some(entry.name()))
        + cstr_size(entry.usage())
        + WORD
        + code_list_size(entry.commands.codes())
        + code_list_size(entry.specifiers.codes())
}

fn type_chunk_size(entry: &PropertyEntry<'_>) -> usize {
    let compound: usize = entry
        .wire_compound_types()
        .map(|compound| {
            compound
                .wire_fields()
                .map(|field| cstr_size(Some(&*field.name)) + WORD)
                .sum::<usize>()
                + WORD
        })
        .sum();
    code_list_size(entry.types.codes()) + compound + WORD
}

fn value_size(value: &ValueEntry<'_>) -> usize {
    WORD + WORD + cstr_size(Some(value.name())) + cstr_size(value.usage()) + WORD
}

/// Exact number of bytes [`flatten`] writes for `table`.
pub fn flattened_size<T: PropertyTable + ?Sized>(table: &T) -> usize {
    let mut size = HEADER_SIZE;
    if let Some(props) = table.properties() {
        size += props.iter().map(main_chunk_size).sum::<usize>();
        size += props.iter().map(type_chunk_size).sum::<usize>();
    }
    if let Some(values) = table.values() {
        size += 2;
        size += values.iter().map(value_size).sum::<usize>();
    }
    size
}

fn write_code_list(cursor: &mut CursorMut<'_>, codes: &[u32]) -> Result<()> {
    for &code in codes {
        cursor.write_u32(code)?;
    }
    cursor.write_u32(0)
}

fn write_main_chunk(cursor: &mut CursorMut<'_>, entry: &PropertyEntry<'_>) -> Result<()> {
    cursor.write_cstr(wire_bytes(entry.name()))?;
    cursor.write_cstr(wire_bytes(entry.usage().unwrap_or("")))?;
    cursor.write_u32(entry.extra_data)?;
    write_code_list(cursor, entry.commands.codes())?;
    write_code_list(cursor, entry.specifiers.codes())
}

fn write_type_chunk(cursor: &mut CursorMut<'_>, entry: &PropertyEntry<'_>) -> Result<()> {
    write_code_list(cursor, entry.types.codes())?;
    for compound in entry.wire_compound_types() {
        for field in compound.wire_fields() {
            cursor.write_cstr(wire_bytes(&field.name))?;
            cursor.write_u32(field.type_code)?;
        }
        cursor.write_u32(0)?;
    }
    cursor.write_u32(0)
}

fn write_value(cursor: &mut CursorMut<'_>, value: &ValueEntry<'_>) -> Result<()> {
    cursor.write_u32(value.kind.into())?;
    cursor.write_u32(value.value)?;
    cursor.write_cstr(wire_bytes(value.name()))?;
    cursor.write_cstr(wire_bytes(value.usage().unwrap_or("")))?;
    cursor.write_u32(value.extra_data)
}

/// Write `table` into `buffer`, returning the number of bytes written.
///
/// # Errors
///
/// - `InvalidArgument` if `buffer` is absent.
/// - `InsufficientCapacity` if `buffer` is shorter than [`flattened_size`].
/// - `TooManyValues` if the value table does not fit a 16-bit count.
pub fn flatten<T: PropertyTable + ?Sized>(
    table: &T,
    buffer: Option<&mut [u8]>,
    config: &CodecConfig,
) -> Result<usize> {
    let buffer = buffer.ok_or(PropertyInfoError::InvalidArgument(
        "flatten destination buffer is absent",
    ))?;

    let needed = flattened_size(table);
    if buffer.len() < needed {
        return Err(PropertyInfoError::InsufficientCapacity {
            needed,
            available: buffer.len(),
        });
    }

    let prop_count = table.properties().map_or(0, <[_]>::len);
    let prop_count = i32::try_from(prop_count).map_err(|_| {
        PropertyInfoError::InvalidData(format!(
            "{prop_count} properties exceed the signed 32-bit count"
        ))
    })?;
    let value_count = match table.values() {
        Some(values) => Some(
            u16::try_from(values.len())
                .map_err(|_| PropertyInfoError::TooManyValues(values.len()))?,
        ),
        None => None,
    };

    let mut flags = 0;
    if table.properties().is_some() {
        flags |= FLAG_PROPERTIES;
    }
    if value_count.is_some() {
        flags |= FLAG_VALUES;
    }

    let big_endian = config.byte_order.is_big_endian();
    let mut cursor = CursorMut::new(&mut buffer[..needed], big_endian);
    cursor.write_u8(u8::from(big_endian))?;
    cursor.write_i32(prop_count)?;
    cursor.write_u32(flags)?;

    if let Some(props) = table.properties() {
        for entry in props {
            write_main_chunk(&mut cursor, entry)?;
        }
        for entry in props {
            write_type_chunk(&mut cursor, entry)?;
        }
    }

    if let (Some(values), Some(count)) = (table.values(), value_count) {
        cursor.write_u16(count)?;
        for value in values {
            write_value(&mut cursor, value)?;
        }
    }

    let written = cursor.offset();
    debug_assert_eq!(written, needed);
    log::debug!(
        "[PROPERTY-INFO] flattened {} properties, {} values into {} bytes ({})",
        prop_count,
        value_count.unwrap_or(0),
        written,
        if big_endian { "big-endian" } else { "little-endian" }
    );
    Ok(written)
}

/// Flatten into a freshly allocated vector of exactly the flattened size.
pub fn flatten_to_vec<T: PropertyTable + ?Sized>(table: &T, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; flattened_size(table)];
    flatten(table, Some(buffer.as_mut_slice()), config)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ByteOrderMode;
    use crate::model::{CompoundType, TypeField, ValueKind};
    use crate::table::BorrowedTables;

    const GET: u32 = 0x5047_4554;
    const INT32: u32 = 0x4C4F_4E47;

    fn le() -> CodecConfig {
        CodecConfig::default().with_byte_order(ByteOrderMode::LittleEndian)
    }

    #[test]
    fn test_empty_schema_is_header_only() {
        let tables = BorrowedTables::empty();
        assert_eq!(flattened_size(&tables), 9);

        let bytes = flatten_to_vec(&tables, &le()).expect("flatten");
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_absent_usage_is_single_nul() {
        let props = [PropertyEntry::named("A").with_extra_data(0x0102_0304)];
        let tables = BorrowedTables::new(Some(&props[..]), None);
        // header 9 + "A\0" 2 + "\0" 1 + extra 4 + 2 terminators 8 + types 4 + groups 4
        assert_eq!(flattened_size(&tables), 32);

        let bytes = flatten_to_vec(&tables, &le()).expect("flatten");
        assert_eq!(
            bytes,
            vec![
                0, // little-endian marker
                1, 0, 0, 0, // one property
                1, 0, 0, 0, // property table only
                b'A', 0, // name
                0, // usage
                4, 3, 2, 1, // extra data
                0, 0, 0, 0, // commands
                0, 0, 0, 0, // specifiers
                0, 0, 0, 0, // types
                0, 0, 0, 0, // compound types
            ]
        );
    }

    #[test]
    fn test_big_endian_marker_and_fields() {
        let props = [PropertyEntry::named("P").with_command(GET).expect("cap")];
        let tables = BorrowedTables::new(Some(&props[..]), None);
        let config = CodecConfig::default().with_byte_order(ByteOrderMode::BigEndian);
        let bytes = flatten_to_vec(&tables, &config).expect("flatten");
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..5], &[0, 0, 0, 1]);
        assert_eq!(&bytes[5..9], &[0, 0, 0, 1]);
        // "P\0" "\0" extra(4) then the first command
        assert_eq!(&bytes[16..20], &GET.to_be_bytes());
    }

    #[test]
    fn test_value_table_layout() {
        let values = [ValueEntry::named("Q", 7)
            .with_kind(ValueKind::TypeCode)
            .with_usage("u")
            .with_extra_data(9)];
        let tables = BorrowedTables::new(None, Some(&values[..]));
        assert_eq!(flattened_size(&tables), 9 + 2 + 4 + 4 + 2 + 2 + 4);

        let bytes = flatten_to_vec(&tables, &le()).expect("flatten");
        assert_eq!(&bytes[1..9], &[0, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(
            &bytes[9..],
            &[1, 0, 1, 0, 0, 0, 7, 0, 0, 0, b'Q', 0, b'u', 0, 9, 0, 0, 0]
        );
    }

    #[test]
    fn test_compound_types_layout() {
        let shape = CompoundType::new()
            .with_field(TypeField::new("x", INT32))
            .expect("cap");
        let props = [PropertyEntry::named("P")
            .with_type(INT32)
            .expect("cap")
            .with_compound_type(shape)
            .expect("cap")];
        let tables = BorrowedTables::new(Some(&props[..]), None);
        let bytes = flatten_to_vec(&tables, &le()).expect("flatten");
        assert_eq!(bytes.len(), flattened_size(&tables));
        // main chunk: "P\0" "\0" extra(4) cmds(4) specs(4) = 15 bytes after header
        let type_chunk = &bytes[9 + 15..];
        let mut expected = Vec::new();
        expected.extend_from_slice(&INT32.to_le_bytes());
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(b"x\0");
        expected.extend_from_slice(&INT32.to_le_bytes());
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(type_chunk, expected.as_slice());
    }

    #[test]
    fn test_absent_buffer_is_invalid_argument() {
        let tables = BorrowedTables::empty();
        let err = flatten(&tables, None, &le()).unwrap_err();
        assert!(matches!(err, PropertyInfoError::InvalidArgument(_)));
    }

    #[test]
    fn test_short_buffer_is_insufficient_capacity() {
        let props = [PropertyEntry::named("Frame")];
        let tables = BorrowedTables::new(Some(&props[..]), None);
        let size = flattened_size(&tables);

        let mut exact = vec![0u8; size];
        assert_eq!(flatten(&tables, Some(exact.as_mut_slice()), &le()), Ok(size));

        let mut short = vec![0u8; size - 1];
        assert_eq!(
            flatten(&tables, Some(short.as_mut_slice()), &le()),
            Err(PropertyInfoError::InsufficientCapacity {
                needed: size,
                available: size - 1
            })
        );
    }

    #[test]
    fn test_larger_buffer_writes_exact_size() {
        let tables = BorrowedTables::empty();
        let mut buffer = vec![0xEEu8; 32];
        assert_eq!(flatten(&tables, Some(buffer.as_mut_slice()), &le()), Ok(9));
        assert_eq!(buffer[9], 0xEE);
    }

    #[test]
    fn test_too_many_values() {
        let values: Vec<ValueEntry<'_>> = (0..=u16::MAX as u32)
            .map(|i| ValueEntry::named("v", i))
            .collect();
        let tables = BorrowedTables::new(None, Some(&values[..]));
        let err = flatten_to_vec(&tables, &le()).unwrap_err();
        assert_eq!(err, PropertyInfoError::TooManyValues(65536));
    }

    #[test]
    fn test_embedded_nul_cuts_string() {
        let props = [PropertyEntry::named("ab\0cd")];
        let tables = BorrowedTables::new(Some(&props[..]), None);
        let bytes = flatten_to_vec(&tables, &le()).expect("flatten");
        assert_eq!(&bytes[9..12], b"ab\0");
        assert_eq!(bytes.len(), flattened_size(&tables));
    }
}
