//! Note index construction and lookup.

use crate::error::{ReflectionError, ReflectionResult};
use crate::host::PeriodicNotesHost;
use crate::model::note::{DatedNote, NoteRef};
use crate::model::period::{PeriodKey, PeriodType, WeekStart};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::time::Instant;

/// Snapshot of all periodic notes, partitioned by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteIndex {
    week_start: WeekStart,
    daily: BTreeMap<NaiveDate, NoteRef>,
    weekly: BTreeMap<NaiveDate, NoteRef>,
}

impl NoteIndex {
    /// Builds the index from a full host scan (daily first, then weekly).
    ///
    /// # Errors
    /// - `IndexUnavailable` when either enumeration fails; no partial index is
    ///   returned.
    pub fn build<H>(host: &H, week_start: WeekStart) -> ReflectionResult<Self>
    where
        H: PeriodicNotesHost + ?Sized,
    {
        let started_at = Instant::now();
        info!("event=index_build module=index status=start");

        let scanned = host
            .enumerate_notes(PeriodType::Daily)
            .and_then(|daily| Ok((daily, host.enumerate_notes(PeriodType::Weekly)?)));
        let (daily, weekly) = match scanned {
            Ok(notes) => notes,
            Err(err) => {
                error!(
                    "event=index_build module=index status=error duration_ms={} error_code=enumeration_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(ReflectionError::IndexUnavailable(err.to_string()));
            }
        };

        let index = Self::from_notes(week_start, daily, weekly);
        info!(
            "event=index_build module=index status=ok daily_count={} weekly_count={} duration_ms={}",
            index.len(PeriodType::Daily),
            index.len(PeriodType::Weekly),
            started_at.elapsed().as_millis()
        );
        Ok(index)
    }

    /// Builds an index from already enumerated notes.
    pub fn from_notes(
        week_start: WeekStart,
        daily: impl IntoIterator<Item = DatedNote>,
        weekly: impl IntoIterator<Item = DatedNote>,
    ) -> Self {
        let mut index = Self {
            week_start,
            ..Self::default()
        };
        for note in daily {
            index.insert(PeriodType::Daily, note);
        }
        for note in weekly {
            index.insert(PeriodType::Weekly, note);
        }
        index
    }

    fn insert(&mut self, period: PeriodType, dated: DatedNote) {
        let Some(key) = PeriodKey::containing(period, dated.date, self.week_start) else {
            warn!(
                "event=index_insert module=index status=skip reason=date_out_of_range path={}",
                dated.note.path()
            );
            return;
        };
        match self.partition_mut(period).entry(key.start) {
            Entry::Vacant(slot) => {
                slot.insert(dated.note);
            }
            Entry::Occupied(existing) => {
                warn!(
                    "event=index_insert module=index status=skip reason=duplicate_period period={} key={} kept={} dropped={}",
                    period,
                    key.start,
                    existing.get().path(),
                    dated.note.path()
                );
            }
        }
    }

    /// Note representing the period `key`, if indexed.
    pub fn lookup(&self, key: &PeriodKey) -> Option<&NoteRef> {
        self.partition(key.period).get(&key.start)
    }

    /// Week start the weekly keys were normalized with.
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn len(&self, period: PeriodType) -> usize {
        self.partition(period).len()
    }

    pub fn is_empty(&self, period: PeriodType) -> bool {
        self.partition(period).is_empty()
    }

    fn partition(&self, period: PeriodType) -> &BTreeMap<NaiveDate, NoteRef> {
        match period {
            PeriodType::Daily => &self.daily,
            PeriodType::Weekly => &self.weekly,
        }
    }

    fn partition_mut(&mut self, period: PeriodType) -> &mut BTreeMap<NaiveDate, NoteRef> {
        match period {
            PeriodType::Daily => &mut self.daily,
            PeriodType::Weekly => &mut self.weekly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteIndex;
    use crate::model::note::{DatedNote, NoteRef};
    use crate::model::period::{PeriodKey, PeriodType, WeekStart};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn dated(y: i32, m: u32, d: u32, path: &str) -> DatedNote {
        DatedNote::new(date(y, m, d), NoteRef::new(path))
    }

    #[test]
    fn first_duplicate_wins() {
        let index = NoteIndex::from_notes(
            WeekStart::Monday,
            vec![
                dated(2024, 6, 15, "Daily/2024-06-15.md"),
                dated(2024, 6, 15, "Archive/2024-06-15.md"),
            ],
            vec![],
        );
        assert_eq!(index.len(PeriodType::Daily), 1);
        let key = PeriodKey::containing(PeriodType::Daily, date(2024, 6, 15), WeekStart::Monday)
            .expect("key");
        assert_eq!(
            index.lookup(&key).map(NoteRef::path),
            Some("Daily/2024-06-15.md")
        );
    }

    #[test]
    fn weekly_notes_are_keyed_by_week_start() {
        let index = NoteIndex::from_notes(
            WeekStart::Monday,
            vec![],
            vec![dated(2024, 6, 12, "Weekly/2024-W24.md")],
        );
        let any_day = PeriodKey::containing(PeriodType::Weekly, date(2024, 6, 16), WeekStart::Monday)
            .expect("key");
        assert_eq!(any_day.start, date(2024, 6, 10));
        assert!(index.lookup(&any_day).is_some());
        assert!(index.is_empty(PeriodType::Daily));
    }

    #[test]
    fn partitions_do_not_mix() {
        let index = NoteIndex::from_notes(
            WeekStart::Monday,
            vec![dated(2024, 6, 10, "Daily/2024-06-10.md")],
            vec![],
        );
        let weekly_key =
            PeriodKey::containing(PeriodType::Weekly, date(2024, 6, 10), WeekStart::Monday)
                .expect("key");
        assert!(index.lookup(&weekly_key).is_none());
    }
}
