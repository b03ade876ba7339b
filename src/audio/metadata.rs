//! Duration probing for ingested clips
//!
//! Probing is best effort: a clip whose format cannot be decoded keeps
//! `duration: None` and the batch continues.

use std::fs::File;
use std::io::Cursor;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::core::ClipSource;

/// Probe the playable duration of a clip, in seconds
///
/// Only the format header is read; the stream is not decoded. A hint from
/// the filename extension helps the probe pick the right reader.
pub fn probe_duration(source: &ClipSource, name: &str) -> Result<f64, String> {
    let mss = match source {
        ClipSource::Path(path) => {
            let file =
                File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
            MediaSourceStream::new(Box::new(file), Default::default())
        }
        ClipSource::Memory(bytes) => {
            let cursor = Cursor::new(bytes.as_ref().clone());
            MediaSourceStream::new(Box::new(cursor), Default::default())
        }
    };

    let mut hint = Hint::new();
    if let Some(ext) = std::path::Path::new(name).extension() {
        hint.with_extension(&ext.to_string_lossy());
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| format!("Failed to probe audio format: {}", e))?;

    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| "No default track found".to_string())?;

    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100) as f64;
    let n_frames = track
        .codec_params
        .n_frames
        .ok_or_else(|| "Stream does not declare a frame count".to_string())?;

    Ok(n_frames as f64 / sample_rate)
}
