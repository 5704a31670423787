use reflection_core::{
    classify, resolve_lookback_window, resolve_one_year_back, InMemoryVault, NoteIndex, NoteRef,
    PeriodType, PeriodicNoteConfig, PeriodicSettings, WeekStart,
};

fn daily_vault(paths: &[&str]) -> InMemoryVault {
    let mut vault = InMemoryVault::new().with_settings(PeriodicSettings {
        daily: Some(PeriodicNoteConfig::new("Journal/Daily")),
        weekly: Some(PeriodicNoteConfig::new("Journal/Weekly")),
    });
    for path in paths {
        vault.add_note(*path, format!("entry for {path}"));
    }
    vault
}

#[test]
fn single_lookback_finds_same_day_last_year() {
    let vault = daily_vault(&["Journal/Daily/2023-06-15.md", "Journal/Daily/2024-06-15.md"]);
    let index = NoteIndex::build(&vault, WeekStart::Monday).unwrap();

    let found = resolve_one_year_back(
        &vault,
        &index,
        &NoteRef::new("Journal/Daily/2024-06-15.md"),
        PeriodType::Daily,
    );
    assert_eq!(found.map(NoteRef::path), Some("Journal/Daily/2023-06-15.md"));
}

#[test]
fn single_lookback_reports_none_when_last_year_is_missing() {
    let vault = daily_vault(&["Journal/Daily/2022-06-15.md", "Journal/Daily/2024-06-15.md"]);
    let index = NoteIndex::build(&vault, WeekStart::Monday).unwrap();

    let found = resolve_one_year_back(
        &vault,
        &index,
        &NoteRef::new("Journal/Daily/2024-06-15.md"),
        PeriodType::Daily,
    );
    assert!(found.is_none());
}

#[test]
fn leap_day_looks_back_to_feb_28() {
    let vault = daily_vault(&[
        "Journal/Daily/2023-02-28.md",
        "Journal/Daily/2023-03-01.md",
        "Journal/Daily/2020-02-29.md",
        "Journal/Daily/2024-02-29.md",
    ]);
    let index = NoteIndex::build(&vault, WeekStart::Monday).unwrap();
    let file = NoteRef::new("Journal/Daily/2024-02-29.md");

    let found = resolve_one_year_back(&vault, &index, &file, PeriodType::Daily);
    assert_eq!(found.map(NoteRef::path), Some("Journal/Daily/2023-02-28.md"));

    let window = resolve_lookback_window(&vault, &index, &file, PeriodType::Daily, 4).unwrap();
    assert_eq!(
        window.get(&4).map(|note| note.path()),
        Some("Journal/Daily/2020-02-29.md")
    );
}

#[test]
fn lookback_window_keeps_only_hits() {
    let vault = daily_vault(&[
        "Journal/Daily/2024-06-15.md",
        "Journal/Daily/2022-06-15.md",
        "Journal/Daily/2020-06-15.md",
        "Journal/Daily/2023-06-16.md",
    ]);
    let index = NoteIndex::build(&vault, WeekStart::Monday).unwrap();

    let window = resolve_lookback_window(
        &vault,
        &index,
        &NoteRef::new("Journal/Daily/2024-06-15.md"),
        PeriodType::Daily,
        5,
    )
    .unwrap();

    assert_eq!(window.keys().copied().collect::<Vec<_>>(), vec![2, 4]);
    assert_eq!(window[&2].basename(), "2022-06-15");
    assert_eq!(window[&4].basename(), "2020-06-15");
}

#[test]
fn lookback_window_includes_its_upper_bound() {
    let vault = daily_vault(&["Journal/Daily/2019-06-15.md", "Journal/Daily/2024-06-15.md"]);
    let index = NoteIndex::build(&vault, WeekStart::Monday).unwrap();
    let file = NoteRef::new("Journal/Daily/2024-06-15.md");

    let five = resolve_lookback_window(&vault, &index, &file, PeriodType::Daily, 5).unwrap();
    assert_eq!(five.keys().copied().collect::<Vec<_>>(), vec![5]);

    let four = resolve_lookback_window(&vault, &index, &file, PeriodType::Daily, 4).unwrap();
    assert!(four.is_empty());
}

#[test]
fn weekly_notes_resolve_through_week_partition() {
    let vault = daily_vault(&[
        "Journal/Weekly/2022-W23.md",
        "Journal/Weekly/2023-W23.md",
        "Journal/Weekly/2024-W24.md",
    ]);
    let index = NoteIndex::build(&vault, WeekStart::Monday).unwrap();

    let window = resolve_lookback_window(
        &vault,
        &index,
        &NoteRef::new("Journal/Weekly/2024-W24.md"),
        PeriodType::Weekly,
        5,
    )
    .unwrap();
    assert_eq!(window[&1].basename(), "2023-W23");
    assert_eq!(window[&2].basename(), "2022-W23");
    assert_eq!(window.len(), 2);
}

#[test]
fn classification_is_total_for_unset_and_partial_configs() {
    let files = [
        NoteRef::new("Journal/Daily/2024-06-15.md"),
        NoteRef::new("Journal/Weekly/2024-W24.md"),
        NoteRef::new("README.md"),
        NoteRef::new(""),
    ];
    let configs = [
        PeriodicSettings::default(),
        PeriodicSettings {
            daily: Some(PeriodicNoteConfig::new("Journal/Daily")),
            weekly: None,
        },
        PeriodicSettings {
            daily: None,
            weekly: Some(PeriodicNoteConfig::new("Journal/Weekly")),
        },
    ];

    for settings in &configs {
        for file in &files {
            let _ = classify(file, settings);
        }
    }

    assert_eq!(classify(&files[0], &configs[0]), None);
    assert_eq!(classify(&files[0], &configs[1]), Some(PeriodType::Daily));
    assert_eq!(classify(&files[1], &configs[1]), None);
    assert_eq!(classify(&files[1], &configs[2]), Some(PeriodType::Weekly));
}
