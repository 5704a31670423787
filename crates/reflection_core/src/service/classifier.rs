//! Periodic note classification by parent folder.

use crate::config::{normalize_folder, PeriodicSettings};
use crate::model::note::NoteRef;
use crate::model::period::PeriodType;

/// Returns the periodic kind of `file`, or `None` for ordinary notes.
///
/// Kinds are checked in `PeriodType::ALL` order, so daily wins when both
/// kinds share a folder. Unconfigured kinds never match.
pub fn classify(file: &NoteRef, settings: &PeriodicSettings) -> Option<PeriodType> {
    let parent = normalize_folder(file.parent_path());
    PeriodType::ALL.into_iter().find(|period| {
        settings
            .get(*period)
            .is_some_and(|config| config.normalized_folder() == parent)
    })
}
