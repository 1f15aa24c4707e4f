use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader};

use crate::audio_pipeline::TARGET_SAMPLE_RATE;

/// Try to read a WAV file that is already mono 16 kHz signed 16-bit PCM.
///
/// Returns:
/// - `Ok(Some(samples))` with `f32` samples normalized to `[-1.0, 1.0]`
///   when the file matches the target format exactly
/// - `Ok(None)` for any other WAV layout, which callers route through the
///   full Symphonia decode path instead
///
/// This keeps the common "already preprocessed" case cheap without
/// duplicating resampling logic here.
pub fn try_read_target_format(path: &Path) -> Result<Option<Vec<f32>>> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("failed to read WAV header from {}", path.display()))?;
    let spec = reader.spec();

    let matches_target = spec.channels == 1
        && spec.sample_rate == TARGET_SAMPLE_RATE
        && spec.bits_per_sample == 16
        && spec.sample_format == SampleFormat::Int;
    if !matches_target {
        return Ok(None);
    }

    let mut samples = Vec::with_capacity(reader.len() as usize);
    for sample in reader.samples::<i16>() {
        let pcm = sample.context("failed to read WAV sample")?;
        samples.push(pcm as f32 / i16::MAX as f32);
    }

    Ok(Some(samples))
}
