//! Render orchestration over host leaf events.
//!
//! # Responsibility
//! - Own session state: plugin settings, periodic settings, note index and
//!   the leaf registry.
//! - Drive the `NotReady -> Ready` transition lazily from event handlers.
//! - Turn leaf events into render instructions for the presentation layer.
//!
//! # Invariants
//! - Event entry points never return errors; recoverable failures degrade
//!   to `LeafUpdate::Clear` and are logged.
//! - One event triggers at most one initialization attempt.
//! - The index snapshot changes only through (re)initialization.

use crate::config::{LookbackMode, PeriodicSettings, ReflectionSettings};
use crate::error::{ReflectionError, ReflectionResult};
use crate::host::PeriodicNotesHost;
use crate::index::note_index::NoteIndex;
use crate::model::leaf::{LeafId, LeafView};
use crate::model::note::NoteRef;
use crate::model::period::PeriodType;
use crate::service::classifier::classify;
use crate::service::preview::{load_previews, PreviewBlock};
use crate::service::resolver::{resolve_lookback_window, resolve_one_year_back};
use crate::service::staleness::LeafRegistry;
use log::{debug, info, warn};
use std::time::Instant;

/// Title shown when no prior period has a note.
pub const NO_PREVIOUS_NOTES_TITLE: &str = "No Previous Notes";

/// Why a file gets no preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressReason {
    /// Initialization has not succeeded (settings or index unavailable).
    NotReady,
    /// The file is not a periodic note.
    Unclassified,
    /// The file's kind has no indexed notes at all.
    EmptyIndex(PeriodType),
}

impl SuppressReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::Unclassified => "unclassified",
            Self::EmptyIndex(_) => "empty_index",
        }
    }
}

/// Whether the presentation layer should show anything for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    Suppress(SuppressReason),
    Present { period: PeriodType, file: NoteRef },
}

/// One prior-period note selected for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub years_back: u32,
    pub note: NoteRef,
    pub title: String,
}

impl ResolvedEntry {
    pub fn new(years_back: u32, note: NoteRef) -> Self {
        let title = note.basename().to_string();
        Self {
            years_back,
            note,
            title,
        }
    }
}

/// Instruction handed to the presentation layer for one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub leaf_id: LeafId,
    pub current_file: NoteRef,
    pub period: PeriodType,
    /// First entry's title, or `NO_PREVIOUS_NOTES_TITLE`.
    pub title: String,
    /// Hits ordered by ascending `years_back`.
    pub entries: Vec<ResolvedEntry>,
}

impl RenderInstruction {
    pub fn has_previous_notes(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Outcome of one leaf event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafUpdate {
    /// Leaf already shows this file's preview; nothing to do.
    Unchanged(LeafId),
    /// Remove any preview from the leaf.
    Clear(LeafId),
    /// Replace the leaf's preview.
    Render(RenderInstruction),
}

/// State captured by one successful initialization.
#[derive(Debug, Clone)]
pub struct Session {
    pub generation: u64,
    pub settings: PeriodicSettings,
    pub index: NoteIndex,
}

#[derive(Debug)]
enum Readiness {
    NotReady(Option<ReflectionError>),
    Ready(Session),
}

/// Top-level coordinator. Owns all session state; the host's event loop
/// calls into it with `&mut self`, one event at a time.
pub struct Reflection<H: PeriodicNotesHost> {
    host: H,
    settings: ReflectionSettings,
    readiness: Readiness,
    leaves: LeafRegistry,
    attempts: u64,
}

impl<H: PeriodicNotesHost> Reflection<H> {
    /// Creates a coordinator in the `NotReady` state. No host call is made.
    pub fn new(host: H, settings: ReflectionSettings) -> Self {
        Self {
            host,
            settings,
            readiness: Readiness::NotReady(None),
            leaves: LeafRegistry::new(),
            attempts: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to add notes. Changes reach the index only
    /// after `reinitialize`.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &ReflectionSettings {
        &self.settings
    }

    pub fn leaf_registry(&self) -> &LeafRegistry {
        &self.leaves
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.readiness, Readiness::Ready(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.readiness {
            Readiness::Ready(session) => Some(session),
            Readiness::NotReady(_) => None,
        }
    }

    /// Last initialization failure, if the coordinator is not ready.
    pub fn last_error(&self) -> Option<&ReflectionError> {
        match &self.readiness {
            Readiness::NotReady(err) => err.as_ref(),
            Readiness::Ready(_) => None,
        }
    }

    /// Number of initialization attempts so far.
    pub fn init_attempts(&self) -> u64 {
        self.attempts
    }

    /// Runs initialization: load periodic settings, then build the index.
    ///
    /// The outcome replaces the current state (last write wins).
    ///
    /// # Errors
    /// - `ConfigUnavailable` when the settings provider is not ready.
    /// - `IndexUnavailable` when enumeration fails.
    pub fn init(&mut self) -> ReflectionResult<()> {
        self.attempts += 1;
        let generation = self.attempts;
        let started_at = Instant::now();
        info!(
            "event=reflection_init module=orchestrator status=start generation={}",
            generation
        );

        let outcome = self
            .host
            .periodic_settings()
            .map_err(|err| ReflectionError::ConfigUnavailable(err.to_string()))
            .and_then(|settings| {
                let index = NoteIndex::build(&self.host, self.settings.week_start)?;
                Ok(Session {
                    generation,
                    settings,
                    index,
                })
            });

        match outcome {
            Ok(session) => {
                info!(
                    "event=reflection_init module=orchestrator status=ok generation={} duration_ms={}",
                    generation,
                    started_at.elapsed().as_millis()
                );
                self.readiness = Readiness::Ready(session);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=reflection_init module=orchestrator status=error generation={} duration_ms={} error_code={} error={}",
                    generation,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                self.readiness = Readiness::NotReady(Some(err.clone()));
                Err(err)
            }
        }
    }

    /// Initializes once if not ready; a ready coordinator is left untouched.
    pub fn ensure_ready(&mut self) -> ReflectionResult<&Session> {
        if !self.is_ready() {
            self.init()?;
        }
        match &self.readiness {
            Readiness::Ready(session) => Ok(session),
            Readiness::NotReady(err) => Err(err.clone().unwrap_or_else(|| {
                ReflectionError::ConfigUnavailable("initialization has not run".to_string())
            })),
        }
    }

    /// Drops the session and leaf records, then initializes again.
    ///
    /// This is the only way notes created after initialization become
    /// visible.
    pub fn reinitialize(&mut self) -> ReflectionResult<()> {
        self.leaves.clear();
        self.readiness = Readiness::NotReady(None);
        self.init()
    }

    /// Decides whether `file` gets a preview, initializing first if needed.
    pub fn decide(&mut self, file: &NoteRef) -> RenderDecision {
        match self.ensure_ready() {
            Ok(session) => decide_with(session, file),
            Err(_) => RenderDecision::Suppress(SuppressReason::NotReady),
        }
    }

    /// Handles an active-leaf change.
    ///
    /// Leaves without a file and repeated events for the same leaf/file pair
    /// are skipped. A leaf is only recorded once the coordinator is ready, so
    /// a failed initialization is retried on the next event for that leaf.
    pub fn on_active_leaf_change(&mut self, leaf: &LeafView) -> LeafUpdate {
        let Some(file) = leaf.file.as_ref() else {
            return LeafUpdate::Unchanged(leaf.id.clone());
        };

        if let Err(err) = self.ensure_ready() {
            debug!(
                "event=leaf_update module=orchestrator status=skip reason=not_ready leaf={} error_code={}",
                leaf.id,
                err.code()
            );
            return LeafUpdate::Clear(leaf.id.clone());
        }

        if !self.leaves.should_process(&leaf.id, file.path()) {
            return LeafUpdate::Unchanged(leaf.id.clone());
        }
        self.leaves.record(leaf.id.clone(), file.path());

        let Readiness::Ready(session) = &self.readiness else {
            return LeafUpdate::Clear(leaf.id.clone());
        };
        match decide_with(session, file) {
            RenderDecision::Suppress(reason) => {
                debug!(
                    "event=leaf_update module=orchestrator status=skip reason={} leaf={} path={}",
                    reason.code(),
                    leaf.id,
                    file.path()
                );
                LeafUpdate::Clear(leaf.id.clone())
            }
            RenderDecision::Present { period, file } => {
                let instruction =
                    build_instruction(&self.host, &self.settings, session, &leaf.id, file, period);
                info!(
                    "event=leaf_update module=orchestrator status=ok leaf={} period={} entries={}",
                    leaf.id,
                    period,
                    instruction.entries.len()
                );
                LeafUpdate::Render(instruction)
            }
        }
    }

    /// Handles a window-open event by refreshing every markdown leaf.
    pub fn on_window_open(&mut self, leaves: &[LeafView]) -> Vec<LeafUpdate> {
        leaves
            .iter()
            .filter(|leaf| leaf.is_markdown)
            .map(|leaf| self.on_active_leaf_change(leaf))
            .collect()
    }

    /// Forgets a closed leaf so reopening it renders again.
    pub fn on_leaf_closed(&mut self, leaf_id: &LeafId) {
        self.leaves.forget(leaf_id);
    }

    /// Loads preview blocks for an instruction through the host.
    pub fn load_previews(&self, instruction: &RenderInstruction) -> Vec<PreviewBlock> {
        load_previews(&self.host, instruction, self.settings.excerpt_chars)
    }
}

fn decide_with(session: &Session, file: &NoteRef) -> RenderDecision {
    let Some(period) = classify(file, &session.settings) else {
        return RenderDecision::Suppress(SuppressReason::Unclassified);
    };
    if session.index.is_empty(period) {
        return RenderDecision::Suppress(SuppressReason::EmptyIndex(period));
    }
    RenderDecision::Present {
        period,
        file: file.clone(),
    }
}

fn build_instruction<H>(
    host: &H,
    settings: &ReflectionSettings,
    session: &Session,
    leaf_id: &LeafId,
    file: NoteRef,
    period: PeriodType,
) -> RenderInstruction
where
    H: PeriodicNotesHost + ?Sized,
{
    let entries = match settings.lookback {
        LookbackMode::Single => resolve_one_year_back(host, &session.index, &file, period)
            .map(|note| vec![ResolvedEntry::new(1, note.clone())])
            .unwrap_or_default(),
        LookbackMode::Window => match resolve_lookback_window(
            host,
            &session.index,
            &file,
            period,
            settings.window_years,
        ) {
            Ok(found) => found
                .into_iter()
                .map(|(years_back, note)| ResolvedEntry::new(years_back, note.clone()))
                .collect(),
            Err(err) => {
                warn!(
                    "event=resolve_window module=orchestrator status=error error_code={} error={}",
                    err.code(),
                    err
                );
                vec![]
            }
        },
    };

    let title = entries
        .first()
        .map(|entry| entry.title.clone())
        .unwrap_or_else(|| NO_PREVIOUS_NOTES_TITLE.to_string());

    RenderInstruction {
        leaf_id: leaf_id.clone(),
        current_file: file,
        period,
        title,
        entries,
    }
}
