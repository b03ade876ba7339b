//! voiceset - voice dataset preparation
//!
//! Imports directories of audio clips, one character (speaker identity)
//! per directory, and exports a folder-per-character zip archive for
//! downstream voice-model training.

mod audio;
mod core;
mod export;
mod ingest;
mod logging;
mod settings;
#[cfg(test)]
mod test_fixtures;

use std::path::PathBuf;

use clap::Parser;

use crate::core::{Action, ExportState, IngestState, Store, format_duration, format_size};
use crate::export::{ExportMode, ExportOptions, ExportOutcome, export_dataset};
use crate::ingest::{ingest_blobs, scan_character_dir};
use crate::settings::AppSettings;

/// Command-line arguments for voiceset
#[derive(Parser, Debug)]
#[command(name = "voiceset")]
#[command(about = "Assemble a voice-training dataset from folders of audio clips")]
#[command(version)]
struct Args {
    /// Directories to import, one character per directory
    /// (the directory name becomes the character name)
    #[arg(required = true)]
    character_dirs: Vec<PathBuf>,

    /// Base name of the exported archive (<name>.zip)
    #[arg(short, long, default_value = "dataset")]
    name: String,

    /// Directory the archive is written into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Export only characters marked with --select
    #[arg(long)]
    selected_only: bool,

    /// Mark a character (by name) for export; repeatable
    #[arg(long = "select")]
    selected: Vec<String>,

    /// Set and persist the language preference
    #[arg(long)]
    lang: Option<String>,
}

fn main() {
    logging::init_logging();
    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("Export failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut settings = AppSettings::load();
    if let Some(lang) = args.lang {
        settings.language = lang;
        settings.save()?;
    }
    log::debug!("Language preference: {}", settings.language);

    let mut store = Store::new();

    for dir in &args.character_dirs {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| dir.display().to_string());

        let blobs = scan_character_dir(dir)?;
        log::info!("Importing {} clips into '{}'", blobs.len(), name);

        let Some(character_id) = store.add_character(&name) else {
            continue;
        };
        if args.selected.contains(&name) {
            store.dispatch(Action::ToggleCharacterSelection {
                id: character_id.clone(),
            });
        }

        let ingest_state = IngestState::new();
        let outcome = ingest_blobs(&mut store, &character_id, blobs, &ingest_state);

        if let Some(character) = store.state().character(&character_id) {
            log::info!(
                "'{}': {} of {} clips, {}, {}",
                character.name,
                outcome.processed,
                outcome.total,
                format_size(character.total_size()),
                format_duration(character.total_duration()),
            );
        }
    }

    let mode = if args.selected_only {
        ExportMode::SelectedOnly
    } else {
        ExportMode::All
    };
    let options = ExportOptions {
        base_name: args.name,
        output_dir: args.out,
        mode,
    };

    let export_state = ExportState::new();
    match export_dataset(store.state(), &options, &export_state)? {
        ExportOutcome::NothingToExport => {
            log::warn!("Nothing to export: no characters or no audio files in the selection");
        }
        ExportOutcome::Completed {
            archive_path,
            exported,
            skipped,
        } => {
            log::info!(
                "Done: {} ({} clips, {} skipped)",
                archive_path.display(),
                exported,
                skipped
            );
        }
    }

    Ok(())
}
