use reflection_core::{
    InMemoryVault, LeafId, LeafUpdate, LeafView, NoteRef, PeriodType, PeriodicNoteConfig,
    PeriodicSettings, Reflection, ReflectionError, ReflectionSettings, RenderDecision,
    SuppressReason, NO_PREVIOUS_NOTES_TITLE,
};

fn settings() -> PeriodicSettings {
    PeriodicSettings {
        daily: Some(PeriodicNoteConfig::new("Daily")),
        weekly: Some(PeriodicNoteConfig::new("Weekly")),
    }
}

fn vault_with(paths: &[&str]) -> InMemoryVault {
    let mut vault = InMemoryVault::new().with_settings(settings());
    for path in paths {
        vault.add_note(*path, format!("# {path}\nbody"));
    }
    vault
}

fn expect_render(update: LeafUpdate) -> reflection_core::RenderInstruction {
    match update {
        LeafUpdate::Render(instruction) => instruction,
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn opening_daily_note_presents_last_years_note() {
    let vault = vault_with(&["Daily/2023-06-15.md", "Daily/2024-06-15.md"]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());
    let file = NoteRef::new("Daily/2024-06-15.md");

    assert_eq!(
        reflection.decide(&file),
        RenderDecision::Present {
            period: PeriodType::Daily,
            file: file.clone(),
        }
    );

    let instruction =
        expect_render(reflection.on_active_leaf_change(&LeafView::markdown("leaf-1", file.clone())));
    assert_eq!(instruction.period, PeriodType::Daily);
    assert_eq!(instruction.current_file, file);
    assert_eq!(instruction.title, "2023-06-15");
    assert_eq!(instruction.entries.len(), 1);
    assert_eq!(instruction.entries[0].years_back, 1);
    assert_eq!(instruction.entries[0].note.path(), "Daily/2023-06-15.md");
}

#[test]
fn missing_previous_note_renders_placeholder_title() {
    let vault = vault_with(&["Daily/2024-06-15.md"]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());

    let instruction = expect_render(reflection.on_active_leaf_change(&LeafView::markdown(
        "leaf-1",
        NoteRef::new("Daily/2024-06-15.md"),
    )));
    assert_eq!(instruction.title, NO_PREVIOUS_NOTES_TITLE);
    assert!(!instruction.has_previous_notes());
}

#[test]
fn window_mode_lists_hits_in_lookback_order() {
    let vault = vault_with(&[
        "Daily/2024-06-15.md",
        "Daily/2022-06-15.md",
        "Daily/2020-06-15.md",
    ]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::default());

    let instruction = expect_render(reflection.on_active_leaf_change(&LeafView::markdown(
        "leaf-1",
        NoteRef::new("Daily/2024-06-15.md"),
    )));
    let years: Vec<u32> = instruction.entries.iter().map(|e| e.years_back).collect();
    assert_eq!(years, vec![2, 4]);
    assert_eq!(instruction.title, "2022-06-15");
}

#[test]
fn repeated_activation_of_same_leaf_and_file_is_skipped() {
    let vault = vault_with(&["Daily/2023-06-15.md", "Daily/2024-06-15.md"]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());
    let leaf = LeafView::markdown("leaf-1", NoteRef::new("Daily/2024-06-15.md"));

    assert!(matches!(
        reflection.on_active_leaf_change(&leaf),
        LeafUpdate::Render(_)
    ));
    assert_eq!(
        reflection.on_active_leaf_change(&leaf),
        LeafUpdate::Unchanged(LeafId::new("leaf-1"))
    );

    reflection.on_leaf_closed(&leaf.id);
    assert!(matches!(
        reflection.on_active_leaf_change(&leaf),
        LeafUpdate::Render(_)
    ));
}

#[test]
fn unclassified_and_empty_partitions_are_suppressed() {
    let vault = vault_with(&["Daily/2024-06-15.md", "Notes/ideas.md"]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::default());

    assert_eq!(
        reflection.decide(&NoteRef::new("Notes/ideas.md")),
        RenderDecision::Suppress(SuppressReason::Unclassified)
    );
    assert_eq!(
        reflection.decide(&NoteRef::new("Weekly/2024-W24.md")),
        RenderDecision::Suppress(SuppressReason::EmptyIndex(PeriodType::Weekly))
    );
    assert_eq!(
        reflection.on_active_leaf_change(&LeafView::markdown(
            "leaf-2",
            NoteRef::new("Notes/ideas.md")
        )),
        LeafUpdate::Clear(LeafId::new("leaf-2"))
    );
}

#[test]
fn unready_host_suppresses_and_retries_on_next_event() {
    let mut vault = vault_with(&["Daily/2023-06-15.md", "Daily/2024-06-15.md"]);
    vault.set_settings(None);
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());
    let leaf = LeafView::markdown("leaf-1", NoteRef::new("Daily/2024-06-15.md"));

    assert_eq!(
        reflection.on_active_leaf_change(&leaf),
        LeafUpdate::Clear(LeafId::new("leaf-1"))
    );
    assert!(!reflection.is_ready());
    assert!(matches!(
        reflection.last_error(),
        Some(ReflectionError::ConfigUnavailable(_))
    ));
    assert_eq!(reflection.init_attempts(), 1);
    assert!(reflection.leaf_registry().is_empty());

    reflection.host_mut().set_settings(Some(settings()));
    let instruction = expect_render(reflection.on_active_leaf_change(&leaf));
    assert_eq!(instruction.title, "2023-06-15");
    assert_eq!(reflection.init_attempts(), 2);
}

#[test]
fn enumeration_failure_is_index_unavailable() {
    let mut vault = vault_with(&["Daily/2024-06-15.md"]);
    vault.fail_enumeration("periodic notes plugin missing");
    let mut reflection = Reflection::new(vault, ReflectionSettings::default());

    assert_eq!(
        reflection.decide(&NoteRef::new("Daily/2024-06-15.md")),
        RenderDecision::Suppress(SuppressReason::NotReady)
    );
    assert!(matches!(
        reflection.last_error(),
        Some(ReflectionError::IndexUnavailable(_))
    ));
    assert_eq!(reflection.init_attempts(), 1);
}

#[test]
fn index_is_frozen_until_reinitialize() {
    let vault = vault_with(&["Daily/2024-06-15.md"]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());
    reflection.init().unwrap();
    let file = NoteRef::new("Daily/2024-06-15.md");

    reflection
        .host_mut()
        .add_note("Daily/2023-06-15.md", "added later");
    let index = &reflection.session().unwrap().index;
    assert_eq!(index.len(PeriodType::Daily), 1);

    let before = expect_render(
        reflection.on_active_leaf_change(&LeafView::markdown("leaf-1", file.clone())),
    );
    assert_eq!(before.title, NO_PREVIOUS_NOTES_TITLE);

    reflection.reinitialize().unwrap();
    assert_eq!(reflection.session().unwrap().generation, 2);
    let after =
        expect_render(reflection.on_active_leaf_change(&LeafView::markdown("leaf-1", file)));
    assert_eq!(after.title, "2023-06-15");
}

#[test]
fn window_open_refreshes_only_markdown_leaves() {
    let vault = vault_with(&["Daily/2023-06-15.md", "Daily/2024-06-15.md"]);
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());

    let updates = reflection.on_window_open(&[
        LeafView::markdown("leaf-1", NoteRef::new("Daily/2024-06-15.md")),
        LeafView::empty("leaf-2"),
        LeafView::markdown("leaf-3", NoteRef::new("Daily/2023-06-15.md")),
    ]);

    assert_eq!(updates.len(), 2);
    assert!(matches!(&updates[0], LeafUpdate::Render(i) if i.title == "2023-06-15"));
    assert!(matches!(&updates[1], LeafUpdate::Render(i) if i.title == NO_PREVIOUS_NOTES_TITLE));
}

#[test]
fn previews_read_resolved_notes() {
    let mut vault = vault_with(&["Daily/2024-06-15.md"]);
    vault.add_note("Daily/2023-06-15.md", "---\nmood: good\n---\n# Hike\nClimbed **the** ridge.");
    let mut reflection = Reflection::new(vault, ReflectionSettings::single());

    let instruction = expect_render(reflection.on_active_leaf_change(&LeafView::markdown(
        "leaf-1",
        NoteRef::new("Daily/2024-06-15.md"),
    )));
    let previews = reflection.load_previews(&instruction);
    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].title, "2023-06-15");
    assert!(previews[0].markdown.contains("Climbed"));
    assert_eq!(previews[0].excerpt.as_deref(), Some("Hike Climbed the ridge."));
}
