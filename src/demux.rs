//! Container probing and packet iteration for Symphonia.
//!
//! Responsibilities:
//! - open a media file and pick a decodable default audio track
//! - construct a decoder for that track
//! - provide a `next_packet` helper with a streaming-friendly error policy

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet, Track};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::media::extension_lowercase;

/// Open `path`, probe its container and pick a default audio track.
///
/// Track selection policy: the first track that is decodable (codec !=
/// NULL) and has a known sample rate, which downstream resampling needs.
/// The file extension is passed as a probe hint; inputs here are always
/// seekable files, so containers with trailing metadata (many MP4s) work.
pub fn open_media(path: &Path) -> Result<(Box<dyn FormatReader>, Track)> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let mss_opts = MediaSourceStreamOptions {
        // Symphonia wants a power-of-two buffer > 32KiB for good probing.
        buffer_len: 256 * 1024,
    };
    let mss = MediaSourceStream::new(Box::new(file), mss_opts);

    let mut hint = Hint::new();
    if let Some(ext) = extension_lowercase(path) {
        hint.with_extension(&ext);
    }

    let format_opts: FormatOptions = Default::default();
    let metadata_opts: MetadataOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("failed to probe {}", path.display()))?;

    let format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or_else(|| anyhow!("no audio track found in {}", path.display()))?;

    Ok((format, track))
}

/// Build a decoder for the selected track using the default codec registry.
pub fn make_decoder(track: &Track) -> Result<Box<dyn Decoder>> {
    let decoder_opts: DecoderOptions = Default::default();

    symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")
}

/// Read the next packet, treating IO errors as end-of-stream.
///
/// - `Ok(None)` means EOF
/// - other errors are surfaced with context
pub fn next_packet(format: &mut Box<dyn FormatReader>) -> Result<Option<Packet>> {
    match format.next_packet() {
        Ok(p) => Ok(Some(p)),
        Err(SymphoniaError::IoError(_)) => Ok(None),
        Err(e) => Err(anyhow!(e)).context("failed reading packet"),
    }
}
