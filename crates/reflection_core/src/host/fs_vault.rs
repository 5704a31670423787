//! Directory-backed host: a vault is a folder of markdown files.
//!
//! # Responsibility
//! - Enumerate periodic notes anywhere under each configured folder.
//! - Read note contents from disk.
//!
//! # Invariants
//! - Enumeration walks nested folders and is sorted by vault-relative path.
//! - A configured folder that does not exist is an enumeration error.

use super::{anchor_from_stem, compile_period_format, date_notes, HostError, HostResult};
use super::PeriodicNotesHost;
use crate::config::PeriodicSettings;
use crate::model::note::{DatedNote, NoteRef};
use crate::model::period::{Granularity, PeriodType};
use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Vault rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    settings: Option<PeriodicSettings>,
}

impl FsVault {
    /// Creates a vault with no periodic settings loaded yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: PeriodicSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Loads periodic settings from a JSON file.
    pub fn load_settings(&mut self, path: impl AsRef<Path>) -> HostResult<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| io_error(path, &err))?;
        let settings = PeriodicSettings::from_json_str(&raw).map_err(|err| HostError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        self.settings = Some(settings);
        Ok(())
    }

    fn list_folder(&self, folder: &str) -> HostResult<Vec<NoteRef>> {
        let dir = if folder.is_empty() {
            self.root.clone()
        } else {
            self.root.join(folder)
        };

        let mut paths = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(false) {
            let entry = entry.map_err(|err| walk_error(&dir, &err))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let Some(relative) = relative.to_str() else {
                continue;
            };
            paths.push(relative.replace('\\', "/"));
        }
        paths.sort();

        Ok(paths.into_iter().map(NoteRef::new).collect())
    }
}

impl PeriodicNotesHost for FsVault {
    fn periodic_settings(&self) -> HostResult<PeriodicSettings> {
        self.settings
            .clone()
            .ok_or_else(|| HostError::NotReady("periodic notes settings not loaded".to_string()))
    }

    fn enumerate_notes(&self, period: PeriodType) -> HostResult<Vec<DatedNote>> {
        let started_at = Instant::now();
        let settings = self.periodic_settings()?;
        let Some(config) = settings.get(period) else {
            return Ok(vec![]);
        };
        let format = compile_period_format(&settings, period)?;
        let notes = date_notes(&format, self.list_folder(config.normalized_folder())?);
        info!(
            "event=vault_scan module=host status=ok period={} count={} duration_ms={}",
            period,
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notes)
    }

    fn extract_period_anchor(&self, file: &NoteRef, granularity: Granularity) -> Option<NaiveDate> {
        anchor_from_stem(self.settings.as_ref(), file, granularity)
    }

    fn read_note_contents(&self, note: &NoteRef) -> HostResult<String> {
        let path = self.root.join(note.path());
        std::fs::read_to_string(&path).map_err(|err| io_error(&path, &err))
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> HostError {
    HostError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn walk_error(dir: &Path, err: &walkdir::Error) -> HostError {
    HostError::Io {
        path: err.path().unwrap_or(dir).display().to_string(),
        message: err.to_string(),
    }
}
