// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property and value table entries.
//!
//! Entries are plain data. A raw table is a slice of entries terminated by
//! the first entry whose `name` is `None` (see [`PropertyEntry::END`]); the
//! logical length of a table is always found by scanning for that sentinel.
//!
//! Strings are `Cow` so the same entry type serves both `static` tables
//! (borrowed) and tables rebuilt from a flattened buffer (owned).
//!
//! Equality and [`PropertyEntry::to_static`] only look at what reaches the
//! wire: code lists up to the first zero, strings up to the first NUL,
//! compound fields up to the first unnamed one and an absent usage equal to
//! an empty one.
//!
//! ```
//! use property_info::{CompoundType, PropertyEntry, TypeField};
//!
//! static POINT: [TypeField<'static>; 2] = [TypeField::new("x", 0x4C4F_4E47), TypeField::new("y", 0x4C4F_4E47)];
//! static SHAPES: [CompoundType<'static>; 1] = [CompoundType::from_static(&POINT)];
//! static PROPS: [PropertyEntry<'static>; 2] = [
//!     PropertyEntry::from_static(
//!         "Origin",
//!         Some("get or set the origin"),
//!         7,
//!         &[0x5047_4554],
//!         &[1],
//!         &[0x4250_4E54],
//!         &SHAPES,
//!     ),
//!     PropertyEntry::END,
//! ];
//! assert_eq!(PropertyEntry::table_len(&PROPS), 1);
//! ```

use std::borrow::Cow;

use crate::bounded::{BoundedList, CodeList};
use crate::error::{PropertyInfoError, Result};

/// Maximum verb codes per property.
pub const MAX_COMMANDS: usize = 10;
/// Maximum specifier forms per property.
pub const MAX_SPECIFIERS: usize = 10;
/// Maximum type codes per property.
pub const MAX_TYPES: usize = 10;
/// Maximum alternative compound shapes per property.
pub const MAX_COMPOUND_TYPES: usize = 3;
/// Maximum named fields per compound shape.
pub const MAX_COMPOUND_FIELDS: usize = 5;

/// Bytes of `s` as written on the wire: everything before the first NUL.
pub(crate) fn wire_bytes(s: &str) -> &[u8] {
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

fn owned_str(s: &Cow<'_, str>) -> Cow<'static, str> {
    Cow::Owned(s.as_ref().to_owned())
}

fn wire_usage(usage: Option<&str>) -> &[u8] {
    wire_bytes(usage.unwrap_or(""))
}

/// Owned copy of the codes before the terminator.
fn wire_codes<const N: usize>(list: &CodeList<'_, N>) -> CodeList<'static, N> {
    let mut owned = list.map_owned(|&code| code);
    owned.truncate(list.codes().len());
    owned
}

fn check_code(code: u32) -> Result<u32> {
    if code == 0 {
        return Err(PropertyInfoError::InvalidArgument(
            "zero code is reserved as list terminator",
        ));
    }
    Ok(code)
}

// ---------------------------------------------------------------------------
// Compound types
// ---------------------------------------------------------------------------

/// One named field of a compound type.
#[derive(Debug, Clone)]
pub struct TypeField<'a> {
    pub name: Cow<'a, str>,
    pub type_code: u32,
}

impl<'a> TypeField<'a> {
    pub const fn new(name: &'a str, type_code: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            type_code,
        }
    }

    pub fn owned(name: impl Into<String>, type_code: u32) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            type_code,
        }
    }

    pub fn to_static(&self) -> TypeField<'static> {
        TypeField {
            name: owned_str(&self.name),
            type_code: self.type_code,
        }
    }
}

/// A structured type expressed as up to five named fields.
#[derive(Debug, Clone, Default)]
pub struct CompoundType<'a> {
    pub fields: BoundedList<'a, TypeField<'a>, MAX_COMPOUND_FIELDS>,
}

impl<'a> CompoundType<'a> {
    pub const fn new() -> Self {
        Self {
            fields: BoundedList::new(),
        }
    }

    pub const fn from_static(fields: &'a [TypeField<'a>]) -> Self {
        Self {
            fields: BoundedList::from_static(fields),
        }
    }

    /// Append a field. Field names must be non-empty.
    pub fn with_field(mut self, field: TypeField<'a>) -> Result<Self> {
        if field.name.is_empty() {
            return Err(PropertyInfoError::InvalidArgument(
                "compound type field name must not be empty",
            ));
        }
        let visible = self.wire_fields().count();
        self.fields.truncate(visible);
        self.fields
            .try_push(field)
            .map_err(|_| PropertyInfoError::CapacityExceeded {
                list: "compound type fields",
                cap: MAX_COMPOUND_FIELDS,
            })?;
        Ok(self)
    }

    /// Fields that reach the wire: the list ends at the first unnamed field.
    pub fn wire_fields(&self) -> impl Iterator<Item = &TypeField<'a>> {
        self.fields
            .iter()
            .take_while(|field| !wire_bytes(&field.name).is_empty())
    }

    pub fn to_static(&self) -> CompoundType<'static> {
        let mut fields = self.fields.map_owned(TypeField::to_static);
        fields.truncate(self.wire_fields().count());
        CompoundType { fields }
    }
}

impl PartialEq for TypeField<'_> {
    fn eq(&self, other: &Self) -> bool {
        wire_bytes(&self.name) == wire_bytes(&other.name) && self.type_code == other.type_code
    }
}

impl Eq for TypeField<'_> {}

impl PartialEq for CompoundType<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.wire_fields().eq(other.wire_fields())
    }
}

impl Eq for CompoundType<'_> {}

// ---------------------------------------------------------------------------
// PropertyEntry
// ---------------------------------------------------------------------------

/// A named scriptable property with its accepted verbs, forms and types.
#[derive(Debug, Clone, Default)]
pub struct PropertyEntry<'a> {
    /// `None` only for the terminating sentinel.
    pub name: Option<Cow<'a, str>>,
    pub usage: Option<Cow<'a, str>>,
    /// Opaque tag handed back on a successful match.
    pub extra_data: u32,
    /// Empty means any command.
    pub commands: CodeList<'a, MAX_COMMANDS>,
    /// Empty means any specifier form.
    pub specifiers: CodeList<'a, MAX_SPECIFIERS>,
    pub types: CodeList<'a, MAX_TYPES>,
    pub compound_types: BoundedList<'a, CompoundType<'a>, MAX_COMPOUND_TYPES>,
}

impl<'a> PropertyEntry<'a> {
    /// Table terminator.
    pub const END: PropertyEntry<'static> = PropertyEntry {
        name: None,
        usage: None,
        extra_data: 0,
        commands: BoundedList::new(),
        specifiers: BoundedList::new(),
        types: BoundedList::new(),
        compound_types: BoundedList::new(),
    };

    /// Entry suitable for a `static` table.
    #[allow(clippy::too_many_arguments)]
    pub const fn from_static(
        name: &'a str,
        usage: Option<&'a str>,
        extra_data: u32,
        commands: &'a [u32],
        specifiers: &'a [u32],
        types: &'a [u32],
        compound_types: &'a [CompoundType<'a>],
    ) -> Self {
        let usage = match usage {
            Some(usage) => Some(Cow::Borrowed(usage)),
            None => None,
        };
        Self {
            name: Some(Cow::Borrowed(name)),
            usage,
            extra_data,
            commands: BoundedList::from_static(commands),
            specifiers: BoundedList::from_static(specifiers),
            types: BoundedList::from_static(types),
            compound_types: BoundedList::from_static(compound_types),
        }
    }

    /// Start building an entry at runtime.
    pub fn named(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_usage(mut self, usage: impl Into<Cow<'a, str>>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_extra_data(mut self, extra_data: u32) -> Self {
        self.extra_data = extra_data;
        self
    }

    pub fn with_command(mut self, command: u32) -> Result<Self> {
        let command = check_code(command)?;
        self.commands.trim_at_terminator();
        self.commands
            .try_push(command)
            .map_err(|_| PropertyInfoError::CapacityExceeded {
                list: "commands",
                cap: MAX_COMMANDS,
            })?;
        Ok(self)
    }

    pub fn with_specifier(mut self, form: u32) -> Result<Self> {
        let form = check_code(form)?;
        self.specifiers.trim_at_terminator();
        self.specifiers
            .try_push(form)
            .map_err(|_| PropertyInfoError::CapacityExceeded {
                list: "specifiers",
                cap: MAX_SPECIFIERS,
            })?;
        Ok(self)
    }

    pub fn with_type(mut self, type_code: u32) -> Result<Self> {
        let type_code = check_code(type_code)?;
        self.types.trim_at_terminator();
        self.types
            .try_push(type_code)
            .map_err(|_| PropertyInfoError::CapacityExceeded {
                list: "types",
                cap: MAX_TYPES,
            })?;
        Ok(self)
    }

    pub fn with_compound_type(mut self, compound: CompoundType<'a>) -> Result<Self> {
        if compound.wire_fields().next().is_none() {
            return Err(PropertyInfoError::InvalidArgument(
                "compound type must have at least one field",
            ));
        }
        let visible = self.wire_compound_types().count();
        self.compound_types.truncate(visible);
        self.compound_types
            .try_push(compound)
            .map_err(|_| PropertyInfoError::CapacityExceeded {
                list: "compound types",
                cap: MAX_COMPOUND_TYPES,
            })?;
        Ok(self)
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_none()
    }

    /// Property name, empty for the sentinel.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Compound shapes that reach the wire: the list ends at the first shape
    /// without fields.
    pub fn wire_compound_types(&self) -> impl Iterator<Item = &CompoundType<'a>> {
        self.compound_types
            .iter()
            .take_while(|compound| compound.wire_fields().next().is_some())
    }

    /// Logical length of a raw table: index of the first sentinel.
    pub fn table_len(table: &[PropertyEntry<'_>]) -> usize {
        table
            .iter()
            .position(PropertyEntry::is_sentinel)
            .unwrap_or(table.len())
    }

    /// Deep copy with every string owned. Lists are copied up to their
    /// terminators.
    pub fn to_static(&self) -> PropertyEntry<'static> {
        let mut compound_types = self.compound_types.map_owned(CompoundType::to_static);
        compound_types.truncate(self.wire_compound_types().count());
        PropertyEntry {
            name: self.name.as_ref().map(owned_str),
            usage: self.usage.as_ref().map(owned_str),
            extra_data: self.extra_data,
            commands: wire_codes(&self.commands),
            specifiers: wire_codes(&self.specifiers),
            types: wire_codes(&self.types),
            compound_types,
        }
    }
}

impl PartialEq for PropertyEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name.as_deref().map(wire_bytes) == other.name.as_deref().map(wire_bytes)
            && wire_usage(self.usage()) == wire_usage(other.usage())
            && self.extra_data == other.extra_data
            && self.commands.codes() == other.commands.codes()
            && self.specifiers.codes() == other.specifiers.codes()
            && self.types.codes() == other.types.codes()
            && self.wire_compound_types().eq(other.wire_compound_types())
    }
}

impl Eq for PropertyEntry<'_> {}

// ---------------------------------------------------------------------------
// ValueEntry
// ---------------------------------------------------------------------------

/// Role of a named constant in the value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A symbolic command (verb) code.
    Command,
    /// A symbolic type code.
    TypeCode,
    /// Any other kind, kept verbatim.
    Other(u32),
}

impl From<u32> for ValueKind {
    fn from(raw: u32) -> Self {
        match raw {
            0 => ValueKind::Command,
            1 => ValueKind::TypeCode,
            other => ValueKind::Other(other),
        }
    }
}

impl From<ValueKind> for u32 {
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Command => 0,
            ValueKind::TypeCode => 1,
            ValueKind::Other(raw) => raw,
        }
    }
}

/// A named constant exposed alongside the property table.
#[derive(Debug, Clone)]
pub struct ValueEntry<'a> {
    /// `None` only for the terminating sentinel.
    pub name: Option<Cow<'a, str>>,
    pub usage: Option<Cow<'a, str>>,
    pub kind: ValueKind,
    pub value: u32,
    pub extra_data: u32,
}

impl<'a> ValueEntry<'a> {
    /// Table terminator.
    pub const END: ValueEntry<'static> = ValueEntry {
        name: None,
        usage: None,
        kind: ValueKind::Command,
        value: 0,
        extra_data: 0,
    };

    pub const fn from_static(
        name: &'a str,
        usage: Option<&'a str>,
        kind: ValueKind,
        value: u32,
        extra_data: u32,
    ) -> Self {
        let usage = match usage {
            Some(usage) => Some(Cow::Borrowed(usage)),
            None => None,
        };
        Self {
            name: Some(Cow::Borrowed(name)),
            usage,
            kind,
            value,
            extra_data,
        }
    }

    pub fn named(name: impl Into<Cow<'a, str>>, value: u32) -> Self {
        Self {
            name: Some(name.into()),
            usage: None,
            kind: ValueKind::Command,
            value,
            extra_data: 0,
        }
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<Cow<'a, str>>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_extra_data(mut self, extra_data: u32) -> Self {
        self.extra_data = extra_data;
        self
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_none()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Logical length of a raw table: index of the first sentinel.
    pub fn table_len(table: &[ValueEntry<'_>]) -> usize {
        table
            .iter()
            .position(ValueEntry::is_sentinel)
            .unwrap_or(table.len())
    }

    pub fn to_static(&self) -> ValueEntry<'static> {
        ValueEntry {
            name: self.name.as_ref().map(owned_str),
            usage: self.usage.as_ref().map(owned_str),
            kind: self.kind,
            value: self.value,
            extra_data: self.extra_data,
        }
    }
}

impl PartialEq for ValueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name.as_deref().map(wire_bytes) == other.name.as_deref().map(wire_bytes)
            && wire_usage(self.usage()) == wire_usage(other.usage())
            && self.kind == other.kind
            && self.value == other.value
            && self.extra_data == other.extra_data
    }
}

impl Eq for ValueEntry<'_> {}
