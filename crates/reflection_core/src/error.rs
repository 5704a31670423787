//! Core error contract shared by index, resolver and orchestrator.
//!
//! # Responsibility
//! - Name every failure kind the core can report.
//! - Keep recoverable readiness failures distinct from caller defects.
//!
//! # Invariants
//! - "File is not a periodic note" is never an error; it is a suppressed
//!   render decision.
//! - Recoverable kinds (`ConfigUnavailable`, `IndexUnavailable`) never escape
//!   the orchestrator's event entry points.

use crate::model::period::PeriodTypeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReflectionResult<T> = Result<T, ReflectionError>;

/// Error kinds reported by the reflection core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    /// Periodic-notes settings provider is not ready or failed.
    ConfigUnavailable(String),
    /// Periodic note enumeration failed while building the note index.
    IndexUnavailable(String),
    /// A period id outside `daily|weekly` reached a resolver entry point.
    InvalidPeriodType(String),
    /// Lookback window size outside `1..=MAX_WINDOW_YEARS`.
    InvalidLookbackWindow(u32),
    /// Plugin-owned settings could not be read or validated.
    Settings(String),
}

impl ReflectionError {
    /// Returns whether a later initialization attempt may clear this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ConfigUnavailable(_) | Self::IndexUnavailable(_))
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigUnavailable(_) => "config_unavailable",
            Self::IndexUnavailable(_) => "index_unavailable",
            Self::InvalidPeriodType(_) => "invalid_period_type",
            Self::InvalidLookbackWindow(_) => "invalid_lookback_window",
            Self::Settings(_) => "invalid_settings",
        }
    }
}

impl Display for ReflectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigUnavailable(message) => {
                write!(f, "periodic note settings unavailable: {message}")
            }
            Self::IndexUnavailable(message) => write!(f, "periodic note index unavailable: {message}"),
            Self::InvalidPeriodType(value) => write!(f, "invalid period type: `{value}`"),
            Self::InvalidLookbackWindow(value) => {
                write!(f, "invalid lookback window: {value} years")
            }
            Self::Settings(message) => write!(f, "invalid reflection settings: {message}"),
        }
    }
}

impl Error for ReflectionError {}

impl From<PeriodTypeError> for ReflectionError {
    fn from(value: PeriodTypeError) -> Self {
        match value {
            PeriodTypeError::Unsupported(value) => Self::InvalidPeriodType(value),
        }
    }
}
