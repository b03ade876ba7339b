//! Domain model for the dataset being assembled
//!
//! Plain data records shared across the application:
//! - Character: a speaker identity grouping audio clips
//! - AudioFile: one ingested audio clip
//! - AppState: the full in-memory session state
//!
//! Nothing here performs I/O; all mutation flows through the store actions.

use std::path::PathBuf;
use std::sync::Arc;

/// Unique identifier for a character
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterId(pub String);

impl CharacterId {
    /// Mint a fresh id
    pub fn new() -> Self {
        CharacterId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an audio clip
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipId(pub String);

impl ClipId {
    /// Mint a fresh id
    pub fn new() -> Self {
        ClipId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session-local handle to a clip's bytes
///
/// Not a durable reference: a `Memory` source lives only as long as its
/// owning `AudioFile`, and a `Path` source is only valid while the file it
/// was imported from stays in place. Resolution can fail per clip and is
/// never fatal to a batch.
#[derive(Debug, Clone)]
pub enum ClipSource {
    /// Bytes held in memory for the session
    Memory(Arc<Vec<u8>>),
    /// The file the clip was imported from
    Path(PathBuf),
}

impl ClipSource {
    /// Resolve the handle to the clip's raw bytes
    pub fn read_bytes(&self) -> Result<Vec<u8>, String> {
        match self {
            ClipSource::Memory(bytes) => Ok(bytes.as_ref().clone()),
            ClipSource::Path(path) => std::fs::read(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e)),
        }
    }
}

/// One ingested audio clip belonging to exactly one character
#[derive(Debug, Clone)]
pub struct AudioFile {
    /// Unique clip id, minted at ingestion and stable across re-ingests
    pub id: ClipId,
    /// Original filename; the de-duplication key within a character and
    /// the archive entry name on export
    pub name: String,
    /// Byte-stream handle for preview and export
    pub source: ClipSource,
    /// Byte length, captured at ingestion
    pub size: u64,
    /// Playable duration in seconds; None when metadata probing failed
    pub duration: Option<f64>,
}

/// A speaker identity grouping a collection of audio clips
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    /// Display name, also used as the archive folder name on export
    pub name: String,
    /// Export-inclusion flag, independent of which character has focus
    pub selected: bool,
    /// Clips in insertion order
    pub audio_files: Vec<AudioFile>,
}

impl Character {
    /// Create a new character with no clips and export flag off
    pub fn new(name: String) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            selected: false,
            audio_files: Vec::new(),
        }
    }

    /// Look up a clip by its filename (the within-character de-dup key)
    pub fn file_by_name(&self, name: &str) -> Option<&AudioFile> {
        self.audio_files.iter().find(|f| f.name == name)
    }

    pub fn file_count(&self) -> usize {
        self.audio_files.len()
    }

    pub fn total_size(&self) -> u64 {
        self.audio_files.iter().map(|f| f.size).sum()
    }

    /// Sum of the durations that probed successfully
    pub fn total_duration(&self) -> f64 {
        self.audio_files.iter().filter_map(|f| f.duration).sum()
    }
}

/// The full in-memory session state
///
/// Created empty at startup, discarded at process end; there is no
/// persistence of dataset state across sessions.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Characters in insertion order
    pub characters: Vec<Character>,
    /// Character currently focused for detail viewing, if any
    pub selected_character_id: Option<CharacterId>,
}

impl AppState {
    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    /// The focused character, if the focus reference is set and still valid
    pub fn selected_character(&self) -> Option<&Character> {
        self.selected_character_id
            .as_ref()
            .and_then(|id| self.character(id))
    }

    /// Total clip count across all characters
    pub fn total_file_count(&self) -> usize {
        self.characters.iter().map(|c| c.file_count()).sum()
    }
}

/// Format duration as "Xm Ys"
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.round() as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{}m {}s", mins, secs)
}

/// Format size in human-readable form (KB, MB, GB)
/// Uses decimal units (1 MB = 1,000,000 bytes)
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1000;
    const MB: u64 = KB * 1000;
    const GB: u64 = MB * 1000;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
