//! Vault note references.
//!
//! # Responsibility
//! - Identify one note by its vault-relative path.
//! - Derive title (basename) and parent folder the way the host shows them.
//!
//! # Invariants
//! - Stored paths use `/` separators and carry no leading `/`.
//! - References are read-only; the core never mutates notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Read-only reference to one note in the host vault.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteRef {
    path: String,
}

impl NoteRef {
    /// Creates a reference, normalizing separators and leading slashes.
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into().replace('\\', "/");
        Self {
            path: raw.trim_start_matches('/').to_string(),
        }
    }

    /// Vault-relative path, e.g. `Journal/Daily/2024-06-15.md`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name including extension.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// File name without extension. Used as the preview title.
    pub fn basename(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }

    /// Extension without the dot, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[idx + 1..]),
            _ => None,
        }
    }

    /// Parent folder path; empty for notes at the vault root.
    pub fn parent_path(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }
}

impl Display for NoteRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// One enumerated periodic note with the date its host extracted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedNote {
    pub date: NaiveDate,
    pub note: NoteRef,
}

impl DatedNote {
    pub fn new(date: NaiveDate, note: NoteRef) -> Self {
        Self { date, note }
    }
}
