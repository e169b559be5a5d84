// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property Info
//!
//! Scripting schema container: the properties an object exposes, the
//! commands and specifier forms each accepts, the types it carries and a
//! table of named constant values. Supports:
//! - Borrowed `static` tables or owned tables rebuilt from a blob
//! - Exact-size flattening in either byte order
//! - Unflattening with byte-order correction and bounds checking
//! - Request routing (`find_match`)
//!
//! # Quick Start
//!
//! ```
//! use property_info::{PropertyEntry, PropertyInfo};
//!
//! const GET: u32 = 0x5047_4554; // 'PGET'
//!
//! static PROPS: [PropertyEntry<'static>; 2] = [
//!     PropertyEntry::from_static("Title", Some("window title"), 1, &[GET], &[1], &[], &[]),
//!     PropertyEntry::END,
//! ];
//!
//! let info = PropertyInfo::new(Some(&PROPS[..]), None);
//! let found = info.find_match(GET, 0, 1, "Title").unwrap();
//! assert_eq!(found.extra_data, 1);
//!
//! let blob = info.flatten_to_vec().unwrap();
//! let copy = PropertyInfo::from_flattened(&blob).unwrap();
//! assert!(copy.is_owned());
//! assert_eq!(copy.properties(), info.properties());
//! ```

pub mod bounded;
pub mod config;
mod cursor;
pub mod error;
pub mod flatten;
pub mod flattenable;
pub mod info;
pub mod matcher;
pub mod model;
pub mod store;
pub mod table;
pub mod unflatten;

pub use bounded::{BoundedList, CodeList};
pub use config::{ByteOrderMode, CodecConfig, HEADER_SIZE};
pub use error::{PropertyInfoError, Result};
pub use flatten::{flattened_size, FLAG_PROPERTIES, FLAG_VALUES};
pub use flattenable::{Flattenable, PROPERTY_INFO_TYPE};
pub use info::{four_cc, PropertyInfo};
pub use matcher::{find_command, find_specifier, PropertyMatch};
pub use model::{
    CompoundType, PropertyEntry, TypeField, ValueEntry, ValueKind, MAX_COMMANDS,
    MAX_COMPOUND_FIELDS, MAX_COMPOUND_TYPES, MAX_SPECIFIERS, MAX_TYPES,
};
pub use store::{AttributeStore, DirAttributeStore, MemoryAttributeStore};
pub use table::{BorrowedTables, OwnedTables, PropertyTable};
pub use unflatten::unflatten_tables;
