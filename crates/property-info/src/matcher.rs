// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Request routing against a property table.

use crate::error::{PropertyInfoError, Result};
use crate::model::{PropertyEntry, ValueEntry};
use crate::table::PropertyTable;

/// Successful match: position in the property table and the entry's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyMatch {
    pub index: usize,
    pub extra_data: u32,
}

/// Whether `entry` accepts `command` at the given specifier depth.
///
/// An empty command list accepts anything. Otherwise only the innermost
/// specifier (`specifier_index == 0`) is checked against the list.
pub fn find_command(entry: &PropertyEntry<'_>, command: u32, specifier_index: i32) -> bool {
    let commands = entry.commands.codes();
    commands.is_empty() || (specifier_index == 0 && commands.contains(&command))
}

/// Whether `entry` accepts the specifier `form`. An empty list accepts any.
pub fn find_specifier(entry: &PropertyEntry<'_>, form: u32) -> bool {
    let specifiers = entry.specifiers.codes();
    specifiers.is_empty() || specifiers.contains(&form)
}

/// First property named `property` accepting `command` and `specifier_form`.
pub fn find_match<T: PropertyTable + ?Sized>(
    table: &T,
    command: u32,
    specifier_index: i32,
    specifier_form: u32,
    property: &str,
) -> Result<PropertyMatch> {
    table
        .properties()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .find(|(_, entry)| {
            entry.name() == property
                && find_command(entry, command, specifier_index)
                && find_specifier(entry, specifier_form)
        })
        .map(|(index, entry)| PropertyMatch {
            index,
            extra_data: entry.extra_data,
        })
        .ok_or_else(|| PropertyInfoError::NotFound(format!("property '{property}'")))
}

/// First value entry named `name`.
pub fn find_value<'t, T: PropertyTable + ?Sized>(
    table: &'t T,
    name: &str,
) -> Result<&'t ValueEntry<'t>> {
    table
        .values()
        .unwrap_or_default()
        .iter()
        .find(|value| value.name() == name)
        .ok_or_else(|| PropertyInfoError::NotFound(format!("value '{name}'")))
}
