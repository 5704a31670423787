//! Core domain logic for Reflection: previews of the same daily or weekly
//! journal period from prior years.
//! This crate is the single source of truth for resolution invariants.

pub mod config;
pub mod error;
pub mod host;
pub mod index;
pub mod logging;
pub mod model;
pub mod service;

pub use config::{
    LookbackMode, PeriodicNoteConfig, PeriodicSettings, ReflectionSettings, DEFAULT_WINDOW_YEARS,
    MAX_WINDOW_YEARS,
};
pub use error::{ReflectionError, ReflectionResult};
pub use host::format::{FormatError, NoteFormat};
pub use host::fs_vault::FsVault;
pub use host::memory::InMemoryVault;
pub use host::{HostError, HostResult, PeriodicNotesHost};
pub use index::note_index::NoteIndex;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::leaf::{LeafId, LeafView};
pub use model::note::{DatedNote, NoteRef};
pub use model::period::{years_back, Granularity, PeriodKey, PeriodType, WeekStart};
pub use service::classifier::classify;
pub use service::orchestrator::{
    LeafUpdate, Reflection, RenderDecision, RenderInstruction, ResolvedEntry, Session,
    SuppressReason, NO_PREVIOUS_NOTES_TITLE,
};
pub use service::preview::{derive_excerpt, load_previews, PreviewBlock};
pub use service::resolver::{
    resolve_lookback_window, resolve_lookback_window_by_name, resolve_one_year_back,
};
pub use service::staleness::LeafRegistry;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
