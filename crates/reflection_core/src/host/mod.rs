//! Host collaborator contracts and bundled host implementations.
//!
//! # Responsibility
//! - Define the `PeriodicNotesHost` seam through which the core reads
//!   settings, enumerates periodic notes, extracts anchors and reads notes.
//! - Provide an in-memory host (embedding, tests) and a directory-backed host.
//!
//! # Invariants
//! - Host calls never panic; failures are reported as `HostError`.
//! - Enumeration returns notes in a stable order so index construction is
//!   deterministic.

pub mod format;
pub mod fs_vault;
pub mod memory;

use crate::config::{default_format, PeriodicSettings};
use crate::model::note::{DatedNote, NoteRef};
use crate::model::period::{Granularity, PeriodType};
use chrono::NaiveDate;
use format::{FormatError, NoteFormat};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HostResult<T> = Result<T, HostError>;

/// Failures reported by host collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Required host component (settings provider, periodic-notes plugin)
    /// is not loaded yet.
    NotReady(String),
    /// File system access failed.
    Io { path: String, message: String },
    /// Configured filename format cannot be compiled.
    InvalidFormat(FormatError),
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady(message) => write!(f, "host not ready: {message}"),
            Self::Io { path, message } => write!(f, "io error at `{path}`: {message}"),
            Self::InvalidFormat(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HostError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFormat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for HostError {
    fn from(value: FormatError) -> Self {
        Self::InvalidFormat(value)
    }
}

/// Collaborator contract between the core and its host editor.
pub trait PeriodicNotesHost {
    /// Reads periodic-notes settings from the host provider.
    fn periodic_settings(&self) -> HostResult<PeriodicSettings>;

    /// Full scan of existing notes of one kind, each with its extracted date.
    fn enumerate_notes(&self, period: PeriodType) -> HostResult<Vec<DatedNote>>;

    /// Date a file represents at the given granularity, if any.
    fn extract_period_anchor(&self, file: &NoteRef, granularity: Granularity) -> Option<NaiveDate>;

    /// Raw markdown of one note.
    fn read_note_contents(&self, note: &NoteRef) -> HostResult<String>;
}

/// Compiles the configured filename format for `period`.
pub(crate) fn compile_period_format(
    settings: &PeriodicSettings,
    period: PeriodType,
) -> HostResult<NoteFormat> {
    let format = settings
        .get(period)
        .map(|config| config.effective_format(period))
        .unwrap_or_else(|| default_format(period));
    Ok(NoteFormat::compile(format, period.granularity())?)
}

/// Anchor extraction shared by the bundled hosts: parse the file stem with
/// the format of the kind matching `granularity`.
pub(crate) fn anchor_from_stem(
    settings: Option<&PeriodicSettings>,
    file: &NoteRef,
    granularity: Granularity,
) -> Option<NaiveDate> {
    let period = match granularity {
        Granularity::Day => PeriodType::Daily,
        Granularity::Week => PeriodType::Weekly,
    };
    let fallback = PeriodicSettings::default();
    let format = match compile_period_format(settings.unwrap_or(&fallback), period) {
        Ok(format) => format,
        Err(err) => {
            debug!(
                "event=anchor_extract module=host status=error granularity={} error={}",
                granularity.as_str(),
                err
            );
            return None;
        }
    };
    format.parse(file.basename())
}

/// Keeps markdown notes whose stem matches `format`, preserving input order.
pub(crate) fn date_notes(
    format: &NoteFormat,
    notes: impl IntoIterator<Item = NoteRef>,
) -> Vec<DatedNote> {
    notes
        .into_iter()
        .filter(|note| note.extension() == Some("md"))
        .filter_map(|note| match format.parse(note.basename()) {
            Some(date) => Some(DatedNote::new(date, note)),
            None => {
                debug!(
                    "event=note_scan module=host status=skip reason=format_mismatch path={}",
                    note.path()
                );
                None
            }
        })
        .collect()
}
