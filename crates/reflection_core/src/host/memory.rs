//! In-memory host for embedding and tests.

use super::{anchor_from_stem, compile_period_format, date_notes, HostError, HostResult};
use super::PeriodicNotesHost;
use crate::config::{normalize_folder, PeriodicSettings};
use crate::model::note::{DatedNote, NoteRef};
use crate::model::period::{Granularity, PeriodType};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Vault held entirely in memory.
///
/// `settings == None` models a settings provider that has not loaded yet.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVault {
    settings: Option<PeriodicSettings>,
    files: BTreeMap<NoteRef, String>,
    enumeration_failure: Option<String>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: PeriodicSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn set_settings(&mut self, settings: Option<PeriodicSettings>) {
        self.settings = settings;
    }

    /// Adds or replaces one note and returns its reference.
    pub fn add_note(&mut self, path: impl Into<String>, contents: impl Into<String>) -> NoteRef {
        let note = NoteRef::new(path);
        self.files.insert(note.clone(), contents.into());
        note
    }

    /// Makes every enumeration fail with `NotReady(message)` until
    /// `restore_enumeration` is called.
    pub fn fail_enumeration(&mut self, message: impl Into<String>) {
        self.enumeration_failure = Some(message.into());
    }

    pub fn restore_enumeration(&mut self) {
        self.enumeration_failure = None;
    }
}

impl PeriodicNotesHost for InMemoryVault {
    fn periodic_settings(&self) -> HostResult<PeriodicSettings> {
        self.settings
            .clone()
            .ok_or_else(|| HostError::NotReady("periodic notes settings not loaded".to_string()))
    }

    fn enumerate_notes(&self, period: PeriodType) -> HostResult<Vec<DatedNote>> {
        if let Some(message) = &self.enumeration_failure {
            return Err(HostError::NotReady(message.clone()));
        }
        let settings = self.periodic_settings()?;
        let Some(config) = settings.get(period) else {
            return Ok(vec![]);
        };
        let format = compile_period_format(&settings, period)?;
        let folder = config.normalized_folder();
        let in_folder = self
            .files
            .keys()
            .filter(|note| is_under_folder(note, folder))
            .cloned();
        Ok(date_notes(&format, in_folder))
    }

    fn extract_period_anchor(&self, file: &NoteRef, granularity: Granularity) -> Option<NaiveDate> {
        anchor_from_stem(self.settings.as_ref(), file, granularity)
    }

    fn read_note_contents(&self, note: &NoteRef) -> HostResult<String> {
        self.files.get(note).cloned().ok_or_else(|| HostError::Io {
            path: note.path().to_string(),
            message: "note not found".to_string(),
        })
    }
}

/// `true` when `note` sits in `folder` or any folder nested below it.
fn is_under_folder(note: &NoteRef, folder: &str) -> bool {
    let parent = normalize_folder(note.parent_path());
    folder.is_empty()
        || parent == folder
        || parent
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
}
