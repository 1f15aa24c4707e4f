//! Decode any supported media file into mono `f32` at the target sample rate.
//!
//! This module is orchestration only:
//! - `wav` handles the preprocessed-WAV fast path
//! - `demux` handles probing, track selection and packet iteration
//! - `audio_pipeline` handles PCM normalization (downmix + resample)
//!
//! Error policy inside the packet loop follows the container plumbing:
//! corrupt frames are skipped, IO errors end the stream, anything else is
//! fatal for this file (and therefore recoverable at batch level).

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use symphonia::core::errors::Error as SymphoniaError;
use tracing::debug;

use crate::audio_pipeline::AudioPipeline;
use crate::demux::{make_decoder, next_packet, open_media};
use crate::media::extension_lowercase;
use crate::wav::try_read_target_format;

/// Decode the media file at `path` into mono 16 kHz samples.
pub fn decode_media_to_mono_16k(path: &Path) -> Result<Vec<f32>> {
    // Fast path: a WAV already in the target format needs no demuxing.
    if extension_lowercase(path).as_deref() == Some("wav") {
        if let Some(samples) = try_read_target_format(path)? {
            debug!(path = %path.display(), samples = samples.len(), "wav fast path");
            return Ok(samples);
        }
    }

    let (mut format, track) = open_media(path)?;
    let mut decoder = make_decoder(&track)?;
    let mut pipeline = AudioPipeline::new();
    let mut samples = Vec::new();

    loop {
        let Some(packet) = next_packet(&mut format)? else {
            break;
        };

        // Ignore packets from non-audio tracks (video containers).
        if packet.track_id() != track.id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => pipeline
                .push_decoded(&decoded, &mut samples)
                .context("audio pipeline failed while processing decoded samples")?,

            // Corrupted frame; decoding can continue.
            Err(SymphoniaError::DecodeError(_)) => continue,

            // Graceful end-of-stream.
            Err(SymphoniaError::IoError(_)) => break,

            Err(e) => return Err(anyhow!(e)).context("decoder failure"),
        }
    }

    // Flush any buffered resampler tail.
    pipeline
        .finalize(&mut samples)
        .context("audio pipeline failed during finalize")?;

    debug!(path = %path.display(), samples = samples.len(), "decoded media");
    Ok(samples)
}
