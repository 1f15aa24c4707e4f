//! PCM normalization for the transcription decode path.
//!
//! Responsibilities:
//! - convert Symphonia-decoded PCM into interleaved `f32`
//! - downmix to mono
//! - resample to the target sample rate when the source rate differs
//!
//! The driver always transcribes whole files, so the pipeline appends into
//! a caller-owned buffer instead of emitting fixed-size chunks.
//! `finalize()` must be called at end-of-stream to flush the resampler tail.

use anyhow::{Context, Result, anyhow, bail};
use rubato::{Resampler, SincFixedIn, WindowFunction};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

/// Target mono sample rate (Hz) expected by whisper.cpp.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Stateful converter from decoded audio buffers to mono 16 kHz `f32`.
pub struct AudioPipeline {
    // Scratch buffer for copying decoded PCM into interleaved `f32`.
    sample_buf: Option<SampleBuffer<f32>>,

    // Lazily built; only needed when the source rate != 16 kHz.
    resampler: Option<SincFixedIn<f32>>,

    // Mono source samples waiting for a full resampler input block.
    pending: Vec<f32>,
}

impl AudioPipeline {
    pub fn new() -> Self {
        Self {
            sample_buf: None,
            resampler: None,
            pending: Vec::new(),
        }
    }

    /// Normalize one decoded buffer and append the result to `out`.
    pub fn push_decoded(&mut self, decoded: &AudioBufferRef<'_>, out: &mut Vec<f32>) -> Result<()> {
        let (interleaved, src_rate, channels) = self.copy_interleaved(decoded)?;
        let mono = downmix_to_mono(&interleaved, channels);

        // Fast path: source already at the target rate.
        if src_rate == TARGET_SAMPLE_RATE {
            out.extend_from_slice(&mono);
            return Ok(());
        }

        self.ensure_resampler(src_rate)?;
        self.pending.extend_from_slice(&mono);
        self.drain_full_blocks(out)
    }

    /// Flush remaining buffered samples at end-of-stream.
    ///
    /// No-op when resampling was never needed.
    pub fn finalize(&mut self, out: &mut Vec<f32>) -> Result<()> {
        let Some(rs) = self.resampler.as_ref() else {
            return Ok(());
        };

        if self.pending.is_empty() {
            return Ok(());
        }

        // rubato wants exact block sizes; pad the tail with silence.
        let block = rs.input_frames_max();
        let rem = self.pending.len() % block;
        if rem != 0 {
            self.pending.resize(self.pending.len() + (block - rem), 0.0);
        }

        self.drain_full_blocks(out)
    }

    fn copy_interleaved(&mut self, decoded: &AudioBufferRef<'_>) -> Result<(Vec<f32>, u32, usize)> {
        if self.sample_buf.is_none() {
            let spec = *decoded.spec();
            let capacity = decoded.capacity() as u64;
            self.sample_buf = Some(SampleBuffer::<f32>::new(capacity, spec));
        }

        let buf = self
            .sample_buf
            .as_mut()
            .ok_or_else(|| anyhow!("sample buffer not initialized"))?;
        buf.copy_interleaved_ref(decoded.clone());

        let src_rate = decoded.spec().rate;
        let channels = decoded.spec().channels.count();
        if channels == 0 {
            bail!("decoded audio had zero channels");
        }

        Ok((buf.samples().to_vec(), src_rate, channels))
    }

    fn ensure_resampler(&mut self, src_rate: u32) -> Result<()> {
        if self.resampler.is_some() {
            return Ok(());
        }

        // Source frames fed to rubato per process() call. Larger blocks
        // favor throughput; latency is irrelevant for file transcription.
        let block_frames = 2048;

        let rs = SincFixedIn::<f32>::new(
            TARGET_SAMPLE_RATE as f64 / src_rate as f64,
            2.0,
            rubato::SincInterpolationParameters {
                sinc_len: 256,
                f_cutoff: 0.95,
                interpolation: rubato::SincInterpolationType::Linear,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
            block_frames,
            1, // mono
        )
        .map_err(|e| anyhow!(e))
        .context("failed to init resampler")?;

        self.resampler = Some(rs);
        Ok(())
    }

    fn drain_full_blocks(&mut self, out: &mut Vec<f32>) -> Result<()> {
        loop {
            let rs = self
                .resampler
                .as_mut()
                .ok_or_else(|| anyhow!("resampler not initialized"))?;
            let block = rs.input_frames_max();

            if self.pending.len() < block {
                return Ok(());
            }

            let input = vec![self.pending.drain(..block).collect::<Vec<f32>>()];
            let resampled = rs
                .process(&input, None)
                .map_err(|e| anyhow!(e))
                .context("resampler process failed")?;

            if resampled.len() != 1 {
                bail!("expected mono output from resampler");
            }
            out.extend_from_slice(&resampled[0]);
        }
    }
}

impl Default for AudioPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Downmix interleaved samples into mono by equal-weight channel average.
fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        mono.push(acc / channels as f32);
    }

    mono
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_is_noop_without_resampler() -> anyhow::Result<()> {
        let mut pipeline = AudioPipeline::new();
        let mut out = Vec::new();
        pipeline.finalize(&mut out)?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn downmix_single_channel_is_identity() {
        let input = vec![0.0, 1.0, -1.0];
        assert_eq!(downmix_to_mono(&input, 1), input);
    }

    #[test]
    fn downmix_averages_channels() {
        // Two stereo frames: (L=1, R=3), (L=-1, R=1) => mono: 2, 0
        let interleaved = vec![1.0, 3.0, -1.0, 1.0];
        assert_eq!(downmix_to_mono(&interleaved, 2), vec![2.0, 0.0]);
    }

    #[test]
    fn resample_path_flushes_padded_tail_on_finalize() -> anyhow::Result<()> {
        let mut pipeline = AudioPipeline::new();
        pipeline.ensure_resampler(8_000)?;
        pipeline.ensure_resampler(8_000)?; // idempotent

        let block = pipeline
            .resampler
            .as_ref()
            .expect("resampler initialized")
            .input_frames_max();

        // Two full blocks plus a remainder that only finalize() flushes.
        pipeline.pending = vec![0.0; (block * 2) + 7];

        let mut out = Vec::new();
        pipeline.drain_full_blocks(&mut out)?;
        assert!(pipeline.pending.len() < block);
        let after_drain = out.len();
        assert!(after_drain > 0);

        pipeline.finalize(&mut out)?;
        assert!(out.len() > after_drain);
        Ok(())
    }

    #[test]
    fn drain_errors_when_resampler_is_missing() {
        let mut pipeline = AudioPipeline::new();
        pipeline.pending = vec![0.0; 4096];
        let mut out = Vec::new();
        let err = pipeline.drain_full_blocks(&mut out).unwrap_err();
        assert!(err.to_string().contains("resampler not initialized"));
    }
}
