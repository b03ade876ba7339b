//! Core application state
//!
//! This module contains:
//! - The domain model (characters, audio clips, session state)
//! - The state store and its closed action set
//! - Shared progress trackers for the ingestion and export pipelines

mod model;
mod state;
mod store;

pub use model::{
    AppState, AudioFile, Character, CharacterId, ClipId, ClipSource, format_duration, format_size,
};
pub use state::{ExportState, IngestState};
pub use store::{Action, Store, apply};
