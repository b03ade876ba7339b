//! Audio ingestion pipeline
//!
//! Turns a batch of raw file blobs into `AudioFile` records attached to one
//! target character. Processing is strictly sequential so at most one clip's
//! bytes are being probed at a time and progress stays monotonic. A per-file
//! probe failure never aborts the batch; the clip is committed without a
//! duration.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::audio::{is_audio_file, probe_duration};
use crate::core::{Action, AudioFile, CharacterId, ClipId, ClipSource, IngestState, Store};

/// A raw file blob offered to the pipeline
///
/// Already filtered to audio-only by the caller (see
/// [`scan_character_dir`] or the presentation layer's type filter).
#[derive(Debug, Clone)]
pub struct ClipBlob {
    /// Original filename, the de-dup key within the target character
    pub name: String,
    /// Byte length
    pub size: u64,
    /// Handle to the blob's bytes
    pub source: ClipSource,
}

/// Result of an ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Files committed to the store during this run
    pub processed: usize,
    /// Batch size
    pub total: usize,
    /// Whether the run stopped early at a cancellation check
    pub cancelled: bool,
}

/// Collect the audio files under a directory as ingestion blobs
///
/// Non-audio files are filtered out; results are sorted by name for a
/// stable ingestion order.
pub fn scan_character_dir(path: &Path) -> Result<Vec<ClipBlob>, String> {
    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    let mut blobs = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();
        if !entry_path.is_file() || !is_audio_file(entry_path) {
            continue;
        }

        let Some(name) = entry_path.file_name().map(|n| n.to_string_lossy().to_string())
        else {
            continue;
        };

        match fs::metadata(entry_path) {
            Ok(metadata) => blobs.push(ClipBlob {
                name,
                size: metadata.len(),
                source: ClipSource::Path(entry_path.to_path_buf()),
            }),
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {}", entry_path.display(), e);
            }
        }
    }

    blobs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(blobs)
}

/// Ingest a batch of blobs into the target character, one file at a time
///
/// For each blob: reuse the id of a same-named existing clip (update
/// semantics) or mint a fresh one, probe duration best effort, dispatch the
/// add or update, then advance progress. The cancel flag on `state` is
/// sampled before each file; once observed, already-committed files stay
/// committed and the rest of the batch is never touched.
pub fn ingest_blobs(
    store: &mut Store,
    character_id: &CharacterId,
    blobs: Vec<ClipBlob>,
    state: &IngestState,
) -> IngestOutcome {
    let total = blobs.len();
    state.reset(total);

    let mut processed = 0;
    let mut cancelled = false;

    for blob in blobs {
        if state.is_cancelled() {
            log::info!("Ingestion cancelled after {} of {} files", processed, total);
            cancelled = true;
            break;
        }

        let existing_id = store
            .state()
            .character(character_id)
            .and_then(|c| c.file_by_name(&blob.name))
            .map(|f| f.id.clone());

        let duration = match probe_duration(&blob.source, &blob.name) {
            Ok(d) => Some(d),
            Err(e) => {
                log::warn!("Could not probe duration of {}: {}", blob.name, e);
                None
            }
        };

        let file = AudioFile {
            id: existing_id.clone().unwrap_or_else(ClipId::new),
            name: blob.name,
            source: blob.source,
            size: blob.size,
            duration,
        };

        let action = if existing_id.is_some() {
            Action::UpdateAudioFile {
                character_id: character_id.clone(),
                file,
            }
        } else {
            Action::AddAudioFile {
                character_id: character_id.clone(),
                file,
            }
        };
        store.dispatch(action);

        processed += 1;
        state.complete_one();
        log::debug!("Ingestion progress: {}%", state.percent());
    }

    state.finish();
    IngestOutcome {
        processed,
        total,
        cancelled,
    }
}
