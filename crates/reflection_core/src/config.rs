//! Configuration: periodic-notes folder settings and plugin-owned settings.
//!
//! # Responsibility
//! - Model the periodic-notes settings consumed from the host provider.
//! - Model and validate the plugin's own settings (lookback mode, window).
//!
//! # Invariants
//! - Every settings field has a default; partial JSON is accepted.
//! - An absent periodic config entry is a valid state, never a fault.
//! - Folder comparisons ignore leading/trailing `/`.

use crate::error::{ReflectionError, ReflectionResult};
use crate::model::period::{PeriodType, WeekStart};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default filename format for daily notes.
pub const DEFAULT_DAILY_FORMAT: &str = "YYYY-MM-DD";
/// Default filename format for weekly notes.
pub const DEFAULT_WEEKLY_FORMAT: &str = "gggg-[W]ww";
/// Default multi-lookback window in years.
pub const DEFAULT_WINDOW_YEARS: u32 = 5;
/// Largest accepted multi-lookback window in years.
pub const MAX_WINDOW_YEARS: u32 = 100;
/// Default preview excerpt length in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// Host configuration for one periodic note kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicNoteConfig {
    /// Vault-relative folder holding the notes; empty means vault root.
    pub folder: String,
    /// Moment-style filename format; `None` uses the kind's default.
    pub format: Option<String>,
}

impl PeriodicNoteConfig {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Folder with surrounding whitespace and slashes removed.
    pub fn normalized_folder(&self) -> &str {
        normalize_folder(&self.folder)
    }

    /// Configured format, falling back to the default for `period`.
    pub fn effective_format(&self, period: PeriodType) -> &str {
        match self.format.as_deref().map(str::trim) {
            Some(format) if !format.is_empty() => format,
            _ => default_format(period),
        }
    }
}

/// Periodic-notes settings for both kinds, as read from the host provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicSettings {
    pub daily: Option<PeriodicNoteConfig>,
    pub weekly: Option<PeriodicNoteConfig>,
}

impl PeriodicSettings {
    pub fn get(&self, period: PeriodType) -> Option<&PeriodicNoteConfig> {
        match period {
            PeriodType::Daily => self.daily.as_ref(),
            PeriodType::Weekly => self.weekly.as_ref(),
        }
    }

    /// Returns whether neither kind is configured.
    pub fn is_unconfigured(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none()
    }

    /// Parses host settings from JSON.
    pub fn from_json_str(raw: &str) -> ReflectionResult<Self> {
        serde_json::from_str(raw).map_err(|err| {
            ReflectionError::ConfigUnavailable(format!("malformed periodic settings: {err}"))
        })
    }
}

/// How many prior years the orchestrator resolves per note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookbackMode {
    /// Exactly one year back.
    Single,
    /// Every year in `1..=window_years`, keeping only hits.
    #[default]
    Window,
}

/// Plugin-owned settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionSettings {
    pub lookback: LookbackMode,
    pub window_years: u32,
    pub week_start: WeekStart,
    pub excerpt_chars: usize,
}

impl Default for ReflectionSettings {
    fn default() -> Self {
        Self {
            lookback: LookbackMode::default(),
            window_years: DEFAULT_WINDOW_YEARS,
            week_start: WeekStart::default(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl ReflectionSettings {
    /// Single-lookback settings with all other fields defaulted.
    pub fn single() -> Self {
        Self {
            lookback: LookbackMode::Single,
            ..Self::default()
        }
    }

    /// Parses and validates settings from JSON.
    pub fn from_json_str(raw: &str) -> ReflectionResult<Self> {
        let settings: Self = serde_json::from_str(raw)
            .map_err(|err| ReflectionError::Settings(format!("malformed settings json: {err}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> ReflectionResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            ReflectionError::Settings(format!(
                "failed to read settings `{}`: {err}",
                path.display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// # Errors
    /// - `InvalidLookbackWindow` when `window_years` is outside `1..=100`.
    pub fn validate(&self) -> ReflectionResult<()> {
        validate_window(self.window_years)
    }
}

/// Checks a lookback window size against the supported range.
pub fn validate_window(window_years: u32) -> ReflectionResult<()> {
    if window_years == 0 || window_years > MAX_WINDOW_YEARS {
        return Err(ReflectionError::InvalidLookbackWindow(window_years));
    }
    Ok(())
}

pub fn default_format(period: PeriodType) -> &'static str {
    match period {
        PeriodType::Daily => DEFAULT_DAILY_FORMAT,
        PeriodType::Weekly => DEFAULT_WEEKLY_FORMAT,
    }
}

/// Strips surrounding whitespace and `/` from a folder path.
pub fn normalize_folder(folder: &str) -> &str {
    folder.trim().trim_matches('/')
}
