// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PropertyInfoError, Result};

/// Named binary attributes attached to some storage entry.
///
/// Flattened property info travels through this seam as an opaque blob.
pub trait AttributeStore {
    fn read_attr(&self, name: &str) -> Result<Vec<u8>>;

    fn write_attr(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryAttributeStore
// ---------------------------------------------------------------------------

/// In-process attribute map.
#[derive(Debug, Default, Clone)]
pub struct MemoryAttributeStore {
    attrs: HashMap<String, Vec<u8>>,
}

impl MemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn read_attr(&self, name: &str) -> Result<Vec<u8>> {
        self.attrs
            .get(name)
            .cloned()
            .ok_or_else(|| PropertyInfoError::NotFound(format!("attribute '{name}'")))
    }

    fn write_attr(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.attrs.insert(name.to_owned(), bytes.to_vec());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DirAttributeStore
// ---------------------------------------------------------------------------

/// One file per attribute, stored at `{directory}/{name}.attr`.
pub struct DirAttributeStore {
    directory: PathBuf,
}

impl DirAttributeStore {
    /// Open a store rooted at `directory`, creating it if needed.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|e| {
                PropertyInfoError::Store(format!(
                    "failed to create directory {}: {}",
                    directory.display(),
                    e
                ))
            })?;
        }
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn attr_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.attr", sanitize_name(name)))
    }
}

impl AttributeStore for DirAttributeStore {
    fn read_attr(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.attr_path(name);
        if !path.exists() {
            return Err(PropertyInfoError::NotFound(format!("attribute '{name}'")));
        }
        let bytes = fs::read(&path).map_err(|e| {
            PropertyInfoError::Store(format!("failed to read {}: {}", path.display(), e))
        })?;
        log::debug!("[PROPERTY-INFO] read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }

    fn write_attr(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.attr_path(name);
        fs::write(&path, bytes).map_err(|e| {
            PropertyInfoError::Store(format!("failed to write {}: {}", path.display(), e))
        })?;
        log::debug!("[PROPERTY-INFO] wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Percent-encode characters that are problematic in file names, and `%`
/// itself, so distinct attribute names never share a file.
fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' | '%' => {
                out.push_str(&format!("%{:02X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}
