// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-capacity ordered lists used by property entries.
//!
//! A list either borrows a caller slice (so tables can live in `static`
//! items) or owns a `Vec`. The capacity `N` is enforced on every push and on
//! construction, so an entry can never hold more elements than the wire
//! format allows.

use std::fmt;

/// Backing storage: borrowed slice or owned vector.
#[derive(Clone)]
enum Storage<'a, T> {
    Static(&'a [T]),
    Owned(Vec<T>),
}

/// Ordered list holding at most `N` elements.
#[derive(Clone)]
pub struct BoundedList<'a, T, const N: usize> {
    items: Storage<'a, T>,
}

impl<'a, T, const N: usize> BoundedList<'a, T, N> {
    /// Maximum number of elements.
    pub const CAPACITY: usize = N;

    /// Empty list.
    pub const fn new() -> Self {
        Self {
            items: Storage::Static(&[]),
        }
    }

    /// Borrow a caller slice without copying.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `static`) if `items` is longer
    /// than `N`.
    pub const fn from_static(items: &'a [T]) -> Self {
        assert!(items.len() <= N, "bounded list exceeds its capacity");
        Self {
            items: Storage::Static(items),
        }
    }

    /// Take ownership of `items`, rejecting vectors longer than `N`.
    pub fn from_vec(items: Vec<T>) -> Result<Self, Vec<T>> {
        if items.len() > N {
            return Err(items);
        }
        Ok(Self {
            items: Storage::Owned(items),
        })
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.items {
            Storage::Static(items) => items,
            Storage::Owned(items) => items.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= N
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Whether the list borrows caller storage.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.items, Storage::Static(_))
    }

    /// Keep the first `len` elements. Borrowed storage is re-sliced, not copied.
    pub fn truncate(&mut self, len: usize) {
        if let Storage::Static(items) = self.items {
            self.items = Storage::Static(&items[..len.min(items.len())]);
        } else if let Storage::Owned(items) = &mut self.items {
            items.truncate(len);
        }
    }

    /// Build an owned list by converting every element.
    pub fn map_owned<'b, U, F>(&self, f: F) -> BoundedList<'b, U, N>
    where
        F: FnMut(&T) -> U,
    {
        BoundedList {
            items: Storage::Owned(self.iter().map(f).collect()),
        }
    }
}

impl<T: Clone, const N: usize> BoundedList<'_, T, N> {
    /// Append `item`, handing it back if the list is already full.
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        if let Storage::Static(items) = self.items {
            self.items = Storage::Owned(items.to_vec());
        }
        if let Storage::Owned(items) = &mut self.items {
            items.push(item);
        }
        Ok(())
    }
}

impl<T, const N: usize> Default for BoundedList<'_, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for BoundedList<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for BoundedList<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for BoundedList<'_, T, N> {}

impl<'s, T, const N: usize> IntoIterator for &'s BoundedList<'_, T, N> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// List of 32-bit codes (commands, specifier forms, type codes).
///
/// A zero code terminates the list on the wire, so [`CodeList::codes`] stops
/// at the first zero found in borrowed storage.
pub type CodeList<'a, const N: usize> = BoundedList<'a, u32, N>;

impl<const N: usize> BoundedList<'_, u32, N> {
    /// Codes up to (not including) the first zero.
    pub fn codes(&self) -> &[u32] {
        let items = self.as_slice();
        let end = items.iter().position(|&c| c == 0).unwrap_or(items.len());
        &items[..end]
    }

    pub fn contains_code(&self, code: u32) -> bool {
        self.codes().contains(&code)
    }

    /// Drop the terminator and anything after it.
    pub fn trim_at_terminator(&mut self) {
        let len = self.codes().len();
        self.truncate(len);
    }
}
