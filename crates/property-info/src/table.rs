// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Borrowed and owned table storage behind one read-only interface.

use crate::model::{PropertyEntry, ValueEntry};

/// Read-only view of a property table and its value table.
///
/// Either table may be absent independently. Present tables are already
/// trimmed to their logical length (no sentinel inside the slice).
pub trait PropertyTable {
    fn properties(&self) -> Option<&[PropertyEntry<'_>]>;

    fn values(&self) -> Option<&[ValueEntry<'_>]>;

    /// Whether releasing this storage frees anything.
    fn is_owned(&self) -> bool;

    fn count_properties(&self) -> usize {
        self.properties().map_or(0, <[_]>::len)
    }

    fn count_values(&self) -> usize {
        self.values().map_or(0, <[_]>::len)
    }
}

/// Tables supplied by the caller. Never released by this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorrowedTables<'a> {
    properties: Option<&'a [PropertyEntry<'a>]>,
    values: Option<&'a [ValueEntry<'a>]>,
}

impl<'a> BorrowedTables<'a> {
    /// Wrap raw tables, cutting each at its first sentinel entry.
    pub fn new(
        properties: Option<&'a [PropertyEntry<'a>]>,
        values: Option<&'a [ValueEntry<'a>]>,
    ) -> Self {
        let properties = properties.map(|table| &table[..PropertyEntry::table_len(table)]);
        let values = values.map(|table| &table[..ValueEntry::table_len(table)]);
        Self { properties, values }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl PropertyTable for BorrowedTables<'_> {
    fn properties(&self) -> Option<&[PropertyEntry<'_>]> {
        self.properties
    }

    fn values(&self) -> Option<&[ValueEntry<'_>]> {
        self.values
    }

    fn is_owned(&self) -> bool {
        false
    }
}

/// Tables held by the container, typically rebuilt from a flattened buffer.
#[derive(Debug, Default)]
pub struct OwnedTables {
    properties: Option<Vec<PropertyEntry<'static>>>,
    values: Option<Vec<ValueEntry<'static>>>,
}

impl OwnedTables {
    /// Take ownership of already-trimmed tables.
    pub fn new(
        properties: Option<Vec<PropertyEntry<'static>>>,
        values: Option<Vec<ValueEntry<'static>>>,
    ) -> Self {
        let properties = properties.map(|mut table| {
            table.truncate(PropertyEntry::table_len(&table));
            table
        });
        let values = values.map(|mut table| {
            table.truncate(ValueEntry::table_len(&table));
            table
        });
        Self { properties, values }
    }

    /// Deep copy of any table view.
    pub fn copy_of<T: PropertyTable + ?Sized>(table: &T) -> Self {
        Self {
            properties: table
                .properties()
                .map(|props| props.iter().map(PropertyEntry::to_static).collect()),
            values: table
                .values()
                .map(|values| values.iter().map(ValueEntry::to_static).collect()),
        }
    }
}

impl PropertyTable for OwnedTables {
    fn properties(&self) -> Option<&[PropertyEntry<'_>]> {
        self.properties.as_deref()
    }

    fn values(&self) -> Option<&[ValueEntry<'_>]> {
        self.values.as_deref()
    }

    fn is_owned(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrowed_tables_trim_at_sentinel() {
        let props = [
            PropertyEntry::named("A"),
            PropertyEntry::named("B"),
            PropertyEntry::END,
            PropertyEntry::named("C"),
        ];
        let values = [ValueEntry::named("V", 1)];
        let tables = BorrowedTables::new(Some(&props[..]), Some(&values[..]));
        assert_eq!(tables.count_properties(), 2);
        assert_eq!(tables.count_values(), 1);
        assert!(!tables.is_owned());
    }

    #[test]
    fn test_absent_tables_count_zero() {
        let tables = BorrowedTables::empty();
        assert!(tables.properties().is_none());
        assert!(tables.values().is_none());
        assert_eq!(tables.count_properties(), 0);
    }

    #[test]
    fn test_present_but_empty_is_not_absent() {
        let props = [PropertyEntry::END];
        let tables = BorrowedTables::new(Some(&props[..]), None);
        assert_eq!(tables.properties().map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_owned_tables_truncate_and_copy() {
        let owned = OwnedTables::new(
            Some(vec![PropertyEntry::named("A"), PropertyEntry::END]),
            None,
        );
        assert!(owned.is_owned());
        assert_eq!(owned.count_properties(), 1);

        let copy = OwnedTables::copy_of(&owned);
        assert_eq!(copy.properties(), owned.properties());
        assert!(copy.values().is_none());
    }
}
