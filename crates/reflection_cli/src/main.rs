//! CLI host probe.
//!
//! # Responsibility
//! - Drive `reflection_core` against a vault directory without an editor.
//! - Print the render instruction and previews for one opened note.

use clap::Parser;
use reflection_core::{
    core_version, default_log_level, init_logging, FsVault, LeafUpdate, LeafView, NoteRef,
    Reflection, ReflectionSettings,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "reflection", version, about = "Show prior-year journal notes for a periodic note")]
struct Args {
    /// Vault root directory.
    vault: PathBuf,
    /// Vault-relative path of the note being opened.
    note: String,
    /// Periodic-notes settings JSON (`daily`/`weekly` folder and format).
    #[arg(long)]
    periodic_settings: PathBuf,
    /// Plugin settings JSON (lookback mode, window, week start).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<String>,
    /// Log level; defaults to `debug` in debug builds and `info` otherwise.
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        if let Err(err) = init_logging(&args.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let settings = match args.settings.as_ref() {
        Some(path) => match ReflectionSettings::load_from_path(path) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => ReflectionSettings::default(),
    };

    let mut vault = FsVault::new(&args.vault);
    if let Err(err) = vault.load_settings(&args.periodic_settings) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let mut reflection = Reflection::new(vault, settings);
    if let Err(err) = reflection.init() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    println!("reflection_core version={}", core_version());
    let leaf = LeafView::markdown("cli", NoteRef::new(args.note.as_str()));
    match reflection.on_active_leaf_change(&leaf) {
        LeafUpdate::Render(instruction) => {
            println!("period={} title={}", instruction.period, instruction.title);
            for block in reflection.load_previews(&instruction) {
                println!();
                println!("## {} ({} years back)", block.title, block.years_back);
                println!("{}", block.excerpt.unwrap_or_default());
            }
        }
        LeafUpdate::Clear(_) | LeafUpdate::Unchanged(_) => {
            println!("{} is not a periodic note with indexed history", args.note);
        }
    }
    ExitCode::SUCCESS
}
