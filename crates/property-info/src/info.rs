// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The `PropertyInfo` container.
//!
//! Holds either caller-borrowed tables or owned tables rebuilt from a blob.
//! Matching and flattening only ever see the [`PropertyTable`] view, so both
//! regimes share one code path. Owned storage is freed by [`PropertyInfo::release`]
//! or on drop, exactly once.

use std::fmt;

use crate::config::CodecConfig;
use crate::error::{PropertyInfoError, Result};
use crate::flatten;
use crate::flattenable::{Flattenable, PROPERTY_INFO_TYPE};
use crate::matcher::{self, PropertyMatch};
use crate::model::{PropertyEntry, ValueEntry};
use crate::store::AttributeStore;
use crate::table::{BorrowedTables, OwnedTables, PropertyTable};
use crate::unflatten::unflatten_tables;

#[derive(Debug)]
enum Tables<'a> {
    Borrowed(BorrowedTables<'a>),
    Owned(OwnedTables),
}

/// Scripting schema: properties with their verbs, forms and types, plus
/// named constant values.
///
/// Not `Clone`: use [`PropertyInfo::deep_clone`] for an owned copy.
#[derive(Debug)]
pub struct PropertyInfo<'a> {
    tables: Tables<'a>,
}

impl<'a> PropertyInfo<'a> {
    /// Wrap caller tables. Each table is cut at its first sentinel entry and
    /// is never released by the container.
    pub fn new(
        properties: Option<&'a [PropertyEntry<'a>]>,
        values: Option<&'a [ValueEntry<'a>]>,
    ) -> Self {
        Self {
            tables: Tables::Borrowed(BorrowedTables::new(properties, values)),
        }
    }

    /// Container with both tables absent.
    pub fn empty() -> Self {
        Self {
            tables: Tables::Borrowed(BorrowedTables::empty()),
        }
    }

    /// Take ownership of already-built tables.
    pub fn from_owned(tables: OwnedTables) -> Self {
        Self {
            tables: Tables::Owned(tables),
        }
    }

    /// Build an owned container from a flattened blob.
    pub fn from_flattened(buffer: &[u8]) -> Result<Self> {
        let mut info = Self::empty();
        info.unflatten(PROPERTY_INFO_TYPE, Some(buffer))?;
        Ok(info)
    }

    /// Active tables as a read-only view.
    pub fn table(&self) -> &dyn PropertyTable {
        match &self.tables {
            Tables::Borrowed(tables) => tables,
            Tables::Owned(tables) => tables,
        }
    }

    pub fn properties(&self) -> Option<&[PropertyEntry<'_>]> {
        self.table().properties()
    }

    pub fn values(&self) -> Option<&[ValueEntry<'_>]> {
        self.table().values()
    }

    pub fn count_properties(&self) -> usize {
        self.table().count_properties()
    }

    pub fn count_values(&self) -> usize {
        self.table().count_values()
    }

    /// Whether the container owns its tables.
    pub fn is_owned(&self) -> bool {
        self.table().is_owned()
    }

    /// Drop owned tables. Borrowed tables are left untouched, and calling
    /// this twice is harmless.
    pub fn release(&mut self) {
        if let Tables::Owned(tables) = &self.tables {
            log::trace!(
                "[PROPERTY-INFO] releasing {} properties, {} values",
                tables.count_properties(),
                tables.count_values()
            );
            self.tables = Tables::Borrowed(BorrowedTables::empty());
        }
    }

    /// Owned copy of every table, string and list.
    pub fn deep_clone(&self) -> PropertyInfo<'static> {
        PropertyInfo::from_owned(OwnedTables::copy_of(self.table()))
    }

    /// Route a request to the first property accepting it.
    ///
    /// See [`matcher::find_match`] for the matching rules.
    pub fn find_match(
        &self,
        command: u32,
        specifier_index: i32,
        specifier_form: u32,
        property: &str,
    ) -> Result<PropertyMatch> {
        matcher::find_match(self.table(), command, specifier_index, specifier_form, property)
    }

    /// First value entry named `name`.
    pub fn find_value(&self, name: &str) -> Result<&ValueEntry<'_>> {
        matcher::find_value(self.table(), name)
    }

    pub fn flattened_size(&self) -> usize {
        flatten::flattened_size(self.table())
    }

    /// Flatten in host byte order.
    pub fn flatten(&self, buffer: Option<&mut [u8]>) -> Result<usize> {
        self.flatten_with(&CodecConfig::default(), buffer)
    }

    pub fn flatten_with(&self, config: &CodecConfig, buffer: Option<&mut [u8]>) -> Result<usize> {
        flatten::flatten(self.table(), buffer, config)
    }

    pub fn flatten_to_vec(&self) -> Result<Vec<u8>> {
        flatten::flatten_to_vec(self.table(), &CodecConfig::default())
    }

    /// Replace the contents with the blob in `buffer`.
    ///
    /// On error the container keeps its previous tables.
    pub fn unflatten(&mut self, type_code: u32, buffer: Option<&[u8]>) -> Result<()> {
        self.unflatten_with(&CodecConfig::default(), type_code, buffer)
    }

    pub fn unflatten_with(
        &mut self,
        config: &CodecConfig,
        type_code: u32,
        buffer: Option<&[u8]>,
    ) -> Result<()> {
        if type_code != PROPERTY_INFO_TYPE {
            return Err(PropertyInfoError::UnsupportedType(type_code));
        }
        let buffer = buffer.ok_or(PropertyInfoError::InvalidArgument(
            "unflatten source buffer is absent",
        ))?;
        let tables = unflatten_tables(buffer, config)?;
        self.release();
        self.tables = Tables::Owned(tables);
        Ok(())
    }

    /// Flatten and store under the attribute `name`.
    pub fn store_attr<S: AttributeStore + ?Sized>(&self, store: &mut S, name: &str) -> Result<()> {
        let bytes = self.flatten_to_vec()?;
        store.write_attr(name, &bytes)
    }

    /// Replace the contents with the blob stored under `name`.
    pub fn load_attr<S: AttributeStore + ?Sized>(&mut self, store: &S, name: &str) -> Result<()> {
        let bytes = store.read_attr(name)?;
        self.unflatten(PROPERTY_INFO_TYPE, Some(bytes.as_slice()))
    }
}

impl Default for PropertyInfo<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Flattenable for PropertyInfo<'_> {
    fn type_code(&self) -> u32 {
        PROPERTY_INFO_TYPE
    }

    fn is_fixed_size(&self) -> bool {
        false
    }

    fn flattened_size(&self) -> usize {
        PropertyInfo::flattened_size(self)
    }

    fn flatten(&self, buffer: Option<&mut [u8]>) -> Result<usize> {
        PropertyInfo::flatten(self, buffer)
    }

    fn unflatten(&mut self, type_code: u32, buffer: Option<&[u8]>) -> Result<()> {
        PropertyInfo::unflatten(self, type_code, buffer)
    }
}

/// Render a code as four characters, most significant byte first.
/// Non-printable bytes show as `.`.
pub fn four_cc(code: u32) -> String {
    code.to_be_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect()
}

impl fmt::Display for PropertyInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "      property   commands                       types                specifiers"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for entry in self.properties().unwrap_or_default() {
            write!(f, "{:>14}", entry.name())?;
            for &command in entry.commands.codes() {
                write!(f, "   {:<31}", four_cc(command))?;
            }
            for &type_code in entry.types.codes() {
                write!(f, "{} ", four_cc(type_code))?;
            }
            for &form in entry.specifiers.codes() {
                write!(f, "{form} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
