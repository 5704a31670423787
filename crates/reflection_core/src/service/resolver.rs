//! Prior-period resolution.
//!
//! # Responsibility
//! - Derive a file's period anchor, shift it back by whole years and look the
//!   shifted period up in the note index.
//!
//! # Invariants
//! - A missing note is `None`/absent, never an error.
//! - The multi-lookback window is the inclusive range `1..=window_years`.
//! - Results depend only on the file, kind, window and index snapshot.

use crate::config::validate_window;
use crate::error::ReflectionResult;
use crate::host::PeriodicNotesHost;
use crate::index::note_index::NoteIndex;
use crate::model::note::NoteRef;
use crate::model::period::{years_back, PeriodKey, PeriodType};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

/// Resolves the note for the same period exactly one year before `file`.
pub fn resolve_one_year_back<'a, H>(
    host: &H,
    index: &'a NoteIndex,
    file: &NoteRef,
    period: PeriodType,
) -> Option<&'a NoteRef>
where
    H: PeriodicNotesHost + ?Sized,
{
    let anchor = period_anchor(host, file, period)?;
    lookup_years_back(index, anchor, period, 1)
}

/// Resolves notes for the same period `1..=window_years` years before `file`.
///
/// Only years with an indexed note appear in the result.
///
/// # Errors
/// - `InvalidLookbackWindow` when `window_years` is `0` or above the maximum.
pub fn resolve_lookback_window<'a, H>(
    host: &H,
    index: &'a NoteIndex,
    file: &NoteRef,
    period: PeriodType,
    window_years: u32,
) -> ReflectionResult<BTreeMap<u32, &'a NoteRef>>
where
    H: PeriodicNotesHost + ?Sized,
{
    validate_window(window_years)?;

    let mut resolved = BTreeMap::new();
    let Some(anchor) = period_anchor(host, file, period) else {
        return Ok(resolved);
    };
    for years in 1..=window_years {
        if let Some(note) = lookup_years_back(index, anchor, period, years) {
            resolved.insert(years, note);
        }
    }
    debug!(
        "event=resolve_window module=resolver status=ok period={} window_years={} hits={} path={}",
        period,
        window_years,
        resolved.len(),
        file.path()
    );
    Ok(resolved)
}

/// String-typed entry point for hosts that carry period ids as text.
///
/// # Errors
/// - `InvalidPeriodType` for ids other than `daily|weekly`.
/// - `InvalidLookbackWindow` as in `resolve_lookback_window`.
pub fn resolve_lookback_window_by_name<'a, H>(
    host: &H,
    index: &'a NoteIndex,
    file: &NoteRef,
    period: &str,
    window_years: u32,
) -> ReflectionResult<BTreeMap<u32, &'a NoteRef>>
where
    H: PeriodicNotesHost + ?Sized,
{
    let period = PeriodType::parse(period)?;
    resolve_lookback_window(host, index, file, period, window_years)
}

fn period_anchor<H>(host: &H, file: &NoteRef, period: PeriodType) -> Option<NaiveDate>
where
    H: PeriodicNotesHost + ?Sized,
{
    let anchor = host.extract_period_anchor(file, period.granularity());
    if anchor.is_none() {
        debug!(
            "event=resolve module=resolver status=skip reason=no_anchor period={} path={}",
            period,
            file.path()
        );
    }
    anchor
}

fn lookup_years_back(
    index: &NoteIndex,
    anchor: NaiveDate,
    period: PeriodType,
    years: u32,
) -> Option<&NoteRef> {
    let shifted = years_back(anchor, years)?;
    let key = PeriodKey::containing(period, shifted, index.week_start())?;
    index.lookup(&key)
}
