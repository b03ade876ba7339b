//! Test fixtures for audio pipeline tests
//!
//! Generates tiny valid PCM WAV clips in memory so metadata, ingestion and
//! export tests run against real decodable audio without external tools.

#![cfg(test)]

const SAMPLE_RATE: u32 = 8000;

/// Build a mono 16-bit PCM WAV clip of the given duration (silence)
pub fn wav_clip_bytes(duration_secs: f64) -> Vec<u8> {
    let n_samples = (duration_secs * SAMPLE_RATE as f64).round() as u32;
    let data_len = n_samples * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_clip_has_riff_header() {
        let bytes = wav_clip_bytes(1.0);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
    }

    #[test]
    fn test_wav_clip_length_matches_duration() {
        let bytes = wav_clip_bytes(1.0);
        // 44-byte header + 1s of 16-bit mono samples
        assert_eq!(bytes.len(), 44 + (SAMPLE_RATE as usize) * 2);
    }

    #[test]
    fn test_wav_clip_zero_duration() {
        let bytes = wav_clip_bytes(0.0);
        assert_eq!(bytes.len(), 44);
    }
}
