// vcs-inventory: Remote Working Copy Inventory
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File-backed inventory storage.
//!
//! ```text
//! update_field(cluster, field, value)
//!     load()  --> InventoryDocument (fresh from disk)
//!     set_field()
//!     save()  --> tempfile in same dir (target's mode) --> fsync --> persist
//! ```
//!
//! Every write is a full read-modify-write round trip. Nothing is cached
//! between calls, so edits made to the file by others between two writes are
//! picked up (last writer wins).

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{InventoryDocument, ProbeField};
use crate::error::InventoryError;

/// Reads and writes one inventory file.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    path: PathBuf,
}

impl InventoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Read and parse the inventory file.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Read` if the file cannot be read, `Parse` or
    /// `Malformed` if its content is not an inventory.
    pub fn load(&self) -> Result<InventoryDocument, InventoryError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| InventoryError::Read {
            path: self.display_path(),
            source,
        })?;
        InventoryDocument::parse(&text, &self.display_path())
    }

    /// Overwrite the inventory file with `document`.
    ///
    /// The content goes to a temporary file next to the target, is synced to
    /// disk, and then renamed over it. The target keeps its permissions, and
    /// a symlinked inventory is updated at the file it points to.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Write` if serialization, the temporary file, or
    /// the final rename fails.
    pub fn save(&self, document: &InventoryDocument) -> Result<(), InventoryError> {
        let write_err = |source: std::io::Error| InventoryError::Write {
            path: self.display_path(),
            source,
        };

        let json = document
            .to_pretty_json()
            .map_err(|e| write_err(std::io::Error::from(e)))?;

        let target = std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        if let Ok(metadata) = std::fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&target).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Re-read the file, set one field for one cluster, write it back.
    ///
    /// # Errors
    ///
    /// Propagates load, lookup and save failures.
    pub fn update_field(
        &self,
        cluster: &str,
        field: ProbeField,
        value: &str,
    ) -> Result<(), InventoryError> {
        let mut document = self.load()?;
        document.set_field(cluster, field, value)?;
        self.save(&document)?;
        debug!(cluster, %field, value = value.trim(), "inventory updated");
        Ok(())
    }
}
