// Audio module - boundary filtering and metadata probing

pub mod detection;
pub mod metadata;

pub use detection::is_audio_file;
pub use metadata::probe_duration;
