// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Flattened buffer parser.
//!
//! Mirrors the layout documented in [`crate::flatten`]. The marker byte is
//! compared with the host byte order once; the resulting swap flag is set on
//! the cursor so every integer read afterwards is corrected in one place.
//! All reads are bounds-checked, and counts are checked against the bytes
//! left before anything is allocated.

use std::borrow::Cow;

use crate::bounded::BoundedList;
use crate::config::CodecConfig;
use crate::cursor::Cursor;
use crate::error::{PropertyInfoError, Result};
use crate::flatten::{FLAG_PROPERTIES, FLAG_VALUES};
use crate::model::{
    CompoundType, PropertyEntry, TypeField, ValueEntry, ValueKind, MAX_COMMANDS,
    MAX_COMPOUND_FIELDS, MAX_COMPOUND_TYPES, MAX_SPECIFIERS, MAX_TYPES,
};
use crate::table::OwnedTables;

/// Smallest encoding of one property: both chunks with empty strings and lists.
const MIN_PROPERTY_SIZE: usize = 1 + 1 + 4 + 4 + 4 + 4 + 4;
/// Smallest encoding of one value entry.
const MIN_VALUE_SIZE: usize = 4 + 4 + 1 + 1 + 4;

const HOST_IS_BIG_ENDIAN: bool = cfg!(target_endian = "big");

fn owned(s: &str) -> Cow<'static, str> {
    Cow::Owned(s.to_owned())
}

/// Empty usage strings are indistinguishable from absent ones on the wire.
fn owned_usage(s: &str) -> Option<Cow<'static, str>> {
    (!s.is_empty()).then(|| owned(s))
}

fn read_code_list<const N: usize>(
    cursor: &mut Cursor<'_>,
    list: &'static str,
) -> Result<BoundedList<'static, u32, N>> {
    let mut codes = Vec::new();
    loop {
        let code = cursor.read_u32()?;
        if code == 0 {
            break;
        }
        if codes.len() == N {
            return Err(PropertyInfoError::CapacityExceeded { list, cap: N });
        }
        codes.push(code);
    }
    BoundedList::from_vec(codes).map_err(|_| PropertyInfoError::CapacityExceeded { list, cap: N })
}

fn read_main_chunk(cursor: &mut Cursor<'_>) -> Result<PropertyEntry<'static>> {
    let name = owned(cursor.read_cstr()?);
    let usage = owned_usage(cursor.read_cstr()?);
    let extra_data = cursor.read_u32()?;
    let commands = read_code_list::<MAX_COMMANDS>(cursor, "commands")?;
    let specifiers = read_code_list::<MAX_SPECIFIERS>(cursor, "specifiers")?;
    Ok(PropertyEntry {
        name: Some(name),
        usage,
        extra_data,
        commands,
        specifiers,
        ..PropertyEntry::default()
    })
}

/// A compound field starts with its non-empty name, so a zero word can only
/// be a terminator.
fn read_compound_type(cursor: &mut Cursor<'_>) -> Result<CompoundType<'static>> {
    let mut fields = Vec::new();
    while cursor.peek_u32()? != 0 {
        if fields.len() == MAX_COMPOUND_FIELDS {
            return Err(PropertyInfoError::CapacityExceeded {
                list: "compound type fields",
                cap: MAX_COMPOUND_FIELDS,
            });
        }
        let offset = cursor.offset();
        let name = cursor.read_cstr()?;
        if name.is_empty() {
            return Err(PropertyInfoError::InvalidData(format!(
                "empty compound field name at offset {offset}"
            )));
        }
        let name = owned(name);
        let type_code = cursor.read_u32()?;
        fields.push(TypeField { name, type_code });
    }
    cursor.read_u32()?;
    let fields = BoundedList::from_vec(fields).map_err(|_| PropertyInfoError::CapacityExceeded {
        list: "compound type fields",
        cap: MAX_COMPOUND_FIELDS,
    })?;
    Ok(CompoundType { fields })
}

fn read_type_chunk(cursor: &mut Cursor<'_>, entry: &mut PropertyEntry<'static>) -> Result<()> {
    entry.types = read_code_list::<MAX_TYPES>(cursor, "types")?;

    let mut compound_types = Vec::new();
    while cursor.peek_u32()? != 0 {
        if compound_types.len() == MAX_COMPOUND_TYPES {
            return Err(PropertyInfoError::CapacityExceeded {
                list: "compound types",
                cap: MAX_COMPOUND_TYPES,
            });
        }
        compound_types.push(read_compound_type(cursor)?);
    }
    cursor.read_u32()?;
    entry.compound_types =
        BoundedList::from_vec(compound_types).map_err(|_| PropertyInfoError::CapacityExceeded {
            list: "compound types",
            cap: MAX_COMPOUND_TYPES,
        })?;
    Ok(())
}

fn read_value(cursor: &mut Cursor<'_>) -> Result<ValueEntry<'static>> {
    let kind = ValueKind::from(cursor.read_u32()?);
    let value = cursor.read_u32()?;
    let name = owned(cursor.read_cstr()?);
    let usage = owned_usage(cursor.read_cstr()?);
    let extra_data = cursor.read_u32()?;
    Ok(ValueEntry {
        name: Some(name),
        usage,
        kind,
        value,
        extra_data,
    })
}

fn check_count(count: usize, min_size: usize, cursor: &Cursor<'_>, what: &str) -> Result<()> {
    let needed = count.saturating_mul(min_size);
    if needed > cursor.remaining() {
        return Err(PropertyInfoError::InvalidData(format!(
            "{count} {what} need at least {needed} bytes, only {} left at offset {}",
            cursor.remaining(),
            cursor.offset()
        )));
    }
    Ok(())
}

fn read_properties(cursor: &mut Cursor<'_>, count: usize) -> Result<Vec<PropertyEntry<'static>>> {
    check_count(count, MIN_PROPERTY_SIZE, cursor, "properties")?;

    let mut props = Vec::with_capacity(count);
    for index in 0..count {
        let entry = read_main_chunk(cursor)?;
        log::trace!(
            "[PROPERTY-INFO] property {} '{}' main chunk ends at {}",
            index,
            entry.name(),
            cursor.offset()
        );
        props.push(entry);
    }
    for entry in &mut props {
        read_type_chunk(cursor, entry)?;
    }
    Ok(props)
}

fn read_values(cursor: &mut Cursor<'_>) -> Result<Vec<ValueEntry<'static>>> {
    let count = usize::from(cursor.read_u16()?);
    check_count(count, MIN_VALUE_SIZE, cursor, "values")?;

    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_value(cursor)?);
    }
    Ok(values)
}

fn parse(buffer: &[u8]) -> Result<OwnedTables> {
    let mut cursor = Cursor::new(buffer);

    let big_endian = cursor.read_u8()? != 0;
    cursor.set_swap(big_endian != HOST_IS_BIG_ENDIAN);

    let count = cursor.read_i32()?;
    let flags = cursor.read_u32()?;

    if flags & !(FLAG_PROPERTIES | FLAG_VALUES) != 0 {
        return Err(PropertyInfoError::InvalidData(format!(
            "unknown flags {flags:#x}"
        )));
    }
    let count = usize::try_from(count)
        .map_err(|_| PropertyInfoError::InvalidData(format!("negative property count {count}")))?;
    if flags & FLAG_PROPERTIES == 0 && count != 0 {
        return Err(PropertyInfoError::InvalidData(format!(
            "property count {count} without a property table"
        )));
    }

    let properties = if flags & FLAG_PROPERTIES != 0 {
        Some(read_properties(&mut cursor, count)?)
    } else {
        None
    };
    let values = if flags & FLAG_VALUES != 0 {
        Some(read_values(&mut cursor)?)
    } else {
        None
    };

    if !cursor.is_eof() {
        log::debug!(
            "[PROPERTY-INFO] ignoring {} trailing bytes after offset {}",
            cursor.remaining(),
            cursor.offset()
        );
    }
    log::debug!(
        "[PROPERTY-INFO] unflattened {} properties, {} values from {} bytes (swap={})",
        properties.as_ref().map_or(0, Vec::len),
        values.as_ref().map_or(0, Vec::len),
        buffer.len(),
        cursor.swaps()
    );

    Ok(OwnedTables::new(properties, values))
}

/// Parse a flattened buffer into freshly owned tables.
///
/// Nothing is returned unless the whole buffer parses; callers can keep
/// their previous state on error.
pub fn unflatten_tables(buffer: &[u8], config: &CodecConfig) -> Result<OwnedTables> {
    if let Some(limit) = config.max_blob_size.filter(|&limit| buffer.len() > limit) {
        return Err(PropertyInfoError::InvalidData(format!(
            "blob of {} bytes exceeds the {} byte limit",
            buffer.len(),
            limit
        )));
    }
    parse(buffer).map_err(|err| {
        log::warn!("[PROPERTY-INFO] rejected flattened buffer: {}", err);
        err
    })
}
