use std::path::Path;

/// Check if a file is an audio file based on its extension
///
/// The boundary filter for ingestion: only files passing this check are
/// offered to the pipeline.
pub fn is_audio_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(
            ext.as_str(),
            "mp3" | "flac" | "wav" | "ogg" | "m4a" | "aac" | "aiff" | "opus" | "alac"
        )
    } else {
        false
    }
}
