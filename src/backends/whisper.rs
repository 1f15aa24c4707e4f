//! The built-in `Transcriber` backed by whisper-rs / whisper.cpp.
//!
//! The model is loaded once at construction (expensive) and reused for
//! every file in the batch; per-file work is decode → full pass → segment
//! extraction.

use std::os::raw::{c_char, c_void};
use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result, ensure};
use tracing::info;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::decoder::decode_media_to_mono_16k;
use crate::error::{self, Error};
use crate::segments::{Segment, centiseconds_to_seconds};
use crate::transcriber::Transcriber;

/// A `Transcriber` that runs whisper.cpp inference locally.
pub struct WhisperTranscriber {
    ctx: WhisperContext,
}

impl std::fmt::Debug for WhisperTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperTranscriber").finish_non_exhaustive()
    }
}

impl WhisperTranscriber {
    /// Load a whisper.cpp GGML model from disk.
    ///
    /// Model loading failures abort the whole run; there is no point
    /// starting a batch the backend cannot serve.
    pub fn new(model_path: &Path) -> error::Result<Self> {
        if !model_path.is_file() {
            return Err(Error::NotFound {
                path: model_path.to_path_buf(),
            });
        }

        // whisper.cpp logs straight to stderr unless redirected.
        silence_whisper_logs();

        let ctx = load_context(model_path).map_err(Error::transcription)?;
        Ok(Self { ctx })
    }

    fn run_full(&self, samples: &[f32], language: Option<&str>) -> Result<Vec<Segment>> {
        ensure!(!samples.is_empty(), "decoded audio was empty");

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: 5,
            patience: 1.0,
        });

        params.set_n_threads(num_cpus::get() as i32);
        params.set_translate(false);
        params.set_language(language);
        params.set_no_context(true);
        params.set_single_segment(false);

        // The driver owns stdout; keep whisper.cpp quiet.
        params.set_print_progress(false);
        params.set_print_special(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = self
            .ctx
            .create_state()
            .context("failed to create whisper state")?;

        state
            .full(params, samples)
            .context("failed to run whisper full()")?;

        let mut segments = Vec::new();
        for whisper_segment in state.as_iter() {
            let text = whisper_segment
                .to_str()
                .context("failed to get segment text")?
                .to_owned();

            segments.push(Segment {
                start_seconds: centiseconds_to_seconds(whisper_segment.start_timestamp()),
                end_seconds: centiseconds_to_seconds(whisper_segment.end_timestamp()),
                text,
            });
        }

        Ok(segments)
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&mut self, path: &Path, language: Option<&str>) -> error::Result<Vec<Segment>> {
        let samples = decode_media_to_mono_16k(path).map_err(Error::transcription)?;

        info!(
            path = %path.display(),
            seconds = samples.len() as f32 / crate::audio_pipeline::TARGET_SAMPLE_RATE as f32,
            "running whisper pass"
        );

        self.run_full(&samples, language).map_err(Error::transcription)
    }
}

/// No-op log callback handed to whisper.cpp.
unsafe extern "C" fn whisper_log_silence(
    _level: u32,
    _c_msg: *const c_char,
    _user_data: *mut c_void,
) {
    // Intentionally left empty.
}

/// Configure whisper logging exactly once for the lifetime of the process.
fn silence_whisper_logs() {
    static INIT: Once = Once::new();

    INIT.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(whisper_log_silence), std::ptr::null_mut());
    });
}

fn load_context(model_path: &Path) -> Result<WhisperContext> {
    let ctx_params = WhisperContextParameters::default();

    WhisperContext::new_with_params(&model_path.to_string_lossy(), ctx_params)
        .with_context(|| format!("failed to load model from {}", model_path.display()))
}
