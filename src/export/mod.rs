//! Dataset export pipeline
//!
//! Packages the in-memory character collection into a single zip archive
//! laid out as one folder per character, each holding that character's
//! clips under their original names. The archive is assembled fully in
//! memory and written to disk in one step, so a failed export leaves no
//! partial file behind. A clip whose bytes cannot be read is logged and
//! skipped; it never aborts the run.

use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::{AppState, Character, ExportState};

/// Which characters an export run includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Every character in the session
    All,
    /// Only characters with the export-inclusion flag set
    SelectedOnly,
}

/// Parameters for one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Archive base name; the output file is `<base_name>.zip`
    pub base_name: String,
    /// Directory the archive is written into
    pub output_dir: PathBuf,
    pub mode: ExportMode,
}

/// Result of an export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The included set was empty or held no clips; no archive was created
    NothingToExport,
    /// The archive was written
    Completed {
        archive_path: PathBuf,
        /// Clips written into the archive
        exported: usize,
        /// Clips skipped because their bytes could not be read
        skipped: usize,
    },
}

/// Export the included characters as `<output_dir>/<base_name>.zip`
///
/// The total file count is computed once up front; progress advances after
/// every clip, archived or skipped, and reaches exactly 100. Archive
/// assembly or save failure surfaces as `Err` and leaves nothing on disk.
pub fn export_dataset(
    state: &AppState,
    options: &ExportOptions,
    progress: &ExportState,
) -> Result<ExportOutcome, String> {
    let included: Vec<&Character> = state
        .characters
        .iter()
        .filter(|c| match options.mode {
            ExportMode::All => true,
            ExportMode::SelectedOnly => c.selected,
        })
        .collect();

    let total_files: usize = included.iter().map(|c| c.file_count()).sum();
    if total_files == 0 {
        log::info!("Nothing to export");
        return Ok(ExportOutcome::NothingToExport);
    }

    progress.reset(total_files);
    let result = build_archive(&included, progress);
    progress.finish();

    let (bytes, exported, skipped) = result?;

    let archive_path = options
        .output_dir
        .join(format!("{}.zip", options.base_name));
    fs::write(&archive_path, &bytes)
        .map_err(|e| format!("Failed to write {}: {}", archive_path.display(), e))?;

    log::info!(
        "Exported {} clips ({} skipped) to {}",
        exported,
        skipped,
        archive_path.display()
    );
    Ok(ExportOutcome::Completed {
        archive_path,
        exported,
        skipped,
    })
}

/// Assemble the archive in memory, sequentially per character then per clip
fn build_archive(
    characters: &[&Character],
    progress: &ExportState,
) -> Result<(Vec<u8>, usize, usize), String> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options = SimpleFileOptions::default();

    let mut exported = 0;
    let mut skipped = 0;

    for character in characters {
        for file in &character.audio_files {
            // Folder-per-character layout; directories are implied by the
            // entry paths, so same-named characters merge into one folder.
            match file.source.read_bytes() {
                Ok(bytes) => {
                    let entry = format!("{}/{}", character.name, file.name);
                    writer
                        .start_file(entry, entry_options)
                        .map_err(|e| format!("Failed to add {} to archive: {}", file.name, e))?;
                    writer
                        .write_all(&bytes)
                        .map_err(|e| format!("Failed to write {} to archive: {}", file.name, e))?;
                    exported += 1;
                }
                Err(e) => {
                    log::error!("Skipping {}: {}", file.name, e);
                    skipped += 1;
                    progress.skip_one();
                }
            }

            progress.complete_one();
            log::debug!("Export progress: {}%", progress.percent());
        }
    }

    let cursor = writer
        .finish()
        .map_err(|e| format!("Failed to finalize archive: {}", e))?;
    Ok((cursor.into_inner(), exported, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, AudioFile, ClipId, ClipSource, Store};
    use std::fs::File;
    use std::sync::Arc;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn memory_clip(name: &str, size: usize) -> AudioFile {
        AudioFile {
            id: ClipId::new(),
            name: name.to_string(),
            source: ClipSource::Memory(Arc::new(vec![0x42; size])),
            size: size as u64,
            duration: None,
        }
    }

    fn add_clip(store: &mut Store, character_id: &crate::core::CharacterId, file: AudioFile) {
        store.dispatch(Action::AddAudioFile {
            character_id: character_id.clone(),
            file,
        });
    }

    fn options(dir: &TempDir, base_name: &str, mode: ExportMode) -> ExportOptions {
        ExportOptions {
            base_name: base_name.to_string(),
            output_dir: dir.path().to_path_buf(),
            mode,
        }
    }

    #[test]
    fn test_export_folder_per_character_layout() {
        let mut store = Store::new();
        let alice = store.add_character("Alice").unwrap();
        let bob = store.add_character("Bob").unwrap();
        add_clip(&mut store, &alice, memory_clip("a.wav", 10));
        add_clip(&mut store, &alice, memory_clip("b.wav", 20));
        add_clip(&mut store, &bob, memory_clip("c.wav", 5));

        let temp_dir = TempDir::new().unwrap();
        let progress = ExportState::new();
        let outcome = export_dataset(
            store.state(),
            &options(&temp_dir, "ds", ExportMode::All),
            &progress,
        )
        .unwrap();

        let archive_path = temp_dir.path().join("ds.zip");
        assert_eq!(
            outcome,
            ExportOutcome::Completed {
                archive_path: archive_path.clone(),
                exported: 3,
                skipped: 0
            }
        );
        assert_eq!(progress.percent(), 100);
        assert!(!progress.is_exporting());

        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.by_name("Alice/a.wav").unwrap().size(), 10);
        assert_eq!(archive.by_name("Alice/b.wav").unwrap().size(), 20);
        assert_eq!(archive.by_name("Bob/c.wav").unwrap().size(), 5);
    }

    #[test]
    fn test_export_empty_state_is_nothing_to_export() {
        let store = Store::new();
        let temp_dir = TempDir::new().unwrap();
        let progress = ExportState::new();

        let outcome = export_dataset(
            store.state(),
            &options(&temp_dir, "ds", ExportMode::All),
            &progress,
        )
        .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(!temp_dir.path().join("ds.zip").exists());
    }

    #[test]
    fn test_export_characters_without_clips_is_nothing_to_export() {
        let mut store = Store::new();
        store.add_character("Alice");
        store.add_character("Bob");

        let temp_dir = TempDir::new().unwrap();
        let outcome = export_dataset(
            store.state(),
            &options(&temp_dir, "ds", ExportMode::All),
            &ExportState::new(),
        )
        .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(!temp_dir.path().join("ds.zip").exists());
    }

    #[test]
    fn test_export_selected_only_filters() {
        let mut store = Store::new();
        let alice = store.add_character("Alice").unwrap();
        let bob = store.add_character("Bob").unwrap();
        add_clip(&mut store, &alice, memory_clip("a.wav", 10));
        add_clip(&mut store, &bob, memory_clip("c.wav", 5));
        store.dispatch(Action::ToggleCharacterSelection { id: bob.clone() });

        let temp_dir = TempDir::new().unwrap();
        let outcome = export_dataset(
            store.state(),
            &options(&temp_dir, "ds", ExportMode::SelectedOnly),
            &ExportState::new(),
        )
        .unwrap();

        match outcome {
            ExportOutcome::Completed { exported, .. } => assert_eq!(exported, 1),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let archive_path = temp_dir.path().join("ds.zip");
        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert!(archive.by_name("Bob/c.wav").is_ok());
        assert!(archive.by_name("Alice/a.wav").is_err());
    }

    #[test]
    fn test_export_selected_only_with_none_selected() {
        let mut store = Store::new();
        let alice = store.add_character("Alice").unwrap();
        add_clip(&mut store, &alice, memory_clip("a.wav", 10));

        let temp_dir = TempDir::new().unwrap();
        let outcome = export_dataset(
            store.state(),
            &options(&temp_dir, "ds", ExportMode::SelectedOnly),
            &ExportState::new(),
        )
        .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
    }

    #[test]
    fn test_export_skips_unreadable_clip_and_succeeds() {
        let mut store = Store::new();
        let alice = store.add_character("Alice").unwrap();
        add_clip(&mut store, &alice, memory_clip("a.wav", 10));
        add_clip(
            &mut store,
            &alice,
            AudioFile {
                id: ClipId::new(),
                name: "gone.wav".to_string(),
                source: ClipSource::Path("/nonexistent/gone.wav".into()),
                size: 123,
                duration: None,
            },
        );
        add_clip(&mut store, &alice, memory_clip("b.wav", 20));

        let temp_dir = TempDir::new().unwrap();
        let progress = ExportState::new();
        let outcome = export_dataset(
            store.state(),
            &options(&temp_dir, "ds", ExportMode::All),
            &progress,
        )
        .unwrap();

        let archive_path = temp_dir.path().join("ds.zip");
        assert_eq!(
            outcome,
            ExportOutcome::Completed {
                archive_path: archive_path.clone(),
                exported: 2,
                skipped: 1
            }
        );
        assert_eq!(progress.percent(), 100);

        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert!(archive.by_name("Alice/a.wav").is_ok());
        assert!(archive.by_name("Alice/b.wav").is_ok());
        assert!(archive.by_name("Alice/gone.wav").is_err());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let mut store = Store::new();
        let alice = store.add_character("Alice").unwrap();
        add_clip(&mut store, &alice, memory_clip("a.wav", 10));

        let export_options = ExportOptions {
            base_name: "ds".to_string(),
            output_dir: PathBuf::from("/nonexistent/output"),
            mode: ExportMode::All,
        };
        let result = export_dataset(store.state(), &export_options, &ExportState::new());
        assert!(result.is_err());
    }
}
