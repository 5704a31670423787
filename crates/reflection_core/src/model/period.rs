//! Period kinds, granularity and calendar arithmetic.
//!
//! # Responsibility
//! - Name the two periodic note kinds and their stable string ids.
//! - Normalize calendar dates into period keys (day or week start).
//! - Shift dates back by whole calendar years.
//!
//! # Invariants
//! - `PeriodKey::start` is always the first day of its period.
//! - Year subtraction is calendar-based: Feb 29 clamps to Feb 28.
//! - Arithmetic never panics; out-of-range dates yield `None`.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable id for daily periodic notes.
pub const PERIOD_DAILY: &str = "daily";
/// Stable id for weekly periodic notes.
pub const PERIOD_WEEKLY: &str = "weekly";

/// Periodic note kind. Selects the folder config and index partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Daily,
    Weekly,
}

impl PeriodType {
    /// Classification priority order: daily wins over weekly.
    pub const ALL: [PeriodType; 2] = [PeriodType::Daily, PeriodType::Weekly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => PERIOD_DAILY,
            Self::Weekly => PERIOD_WEEKLY,
        }
    }

    /// Date granularity a note of this kind represents.
    pub fn granularity(self) -> Granularity {
        match self {
            Self::Daily => Granularity::Day,
            Self::Weekly => Granularity::Week,
        }
    }

    /// Parses a stable period id. Ids are exact and lowercase.
    pub fn parse(value: &str) -> Result<Self, PeriodTypeError> {
        match value.trim() {
            PERIOD_DAILY => Ok(Self::Daily),
            PERIOD_WEEKLY => Ok(Self::Weekly),
            other => Err(PeriodTypeError::Unsupported(other.to_string())),
        }
    }
}

impl Display for PeriodType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period id parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodTypeError {
    Unsupported(String),
}

impl Display for PeriodTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported(value) => write!(f, "period type is unsupported: `{value}`"),
        }
    }
}

impl Error for PeriodTypeError {}

/// Truncation unit for period anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Week,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// First day of a week for weekly period keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// Normalized identity of one period: kind plus first day of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub period: PeriodType,
    pub start: NaiveDate,
}

impl PeriodKey {
    /// Builds the key of the period containing `date`.
    ///
    /// Returns `None` only when truncation would leave the supported date range.
    pub fn containing(period: PeriodType, date: NaiveDate, week_start: WeekStart) -> Option<Self> {
        let start = period_start(date, period.granularity(), week_start)?;
        Some(Self { period, start })
    }
}

/// Truncates `date` to the start of its day or week.
pub fn period_start(
    date: NaiveDate,
    granularity: Granularity,
    week_start: WeekStart,
) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day => Some(date),
        Granularity::Week => {
            let current = date.weekday().num_days_from_monday();
            let first = week_start.weekday().num_days_from_monday();
            let offset = (7 + current - first) % 7;
            date.checked_sub_days(Days::new(u64::from(offset)))
        }
    }
}

/// Shifts `date` back by whole calendar years.
///
/// Days that do not exist in the target year clamp to the month end, so
/// Feb 29 lands on Feb 28.
pub fn years_back(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    date.checked_sub_months(Months::new(months))
}
