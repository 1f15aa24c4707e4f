//! Batch-level configuration.
//!
//! This struct represents *library-level configuration*, not CLI flags
//! directly. The CLI maps user input into a `BatchJob` so that other
//! frontends (tests, programmatic batch runs) can construct one without
//! going through argument parsing.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::media::MediaFile;

/// Which Whisper model the run requests.
///
/// The driver is agnostic to model internals; the variant only selects
/// which GGML artifact gets loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelVariant {
    /// The fast default.
    #[default]
    Base,

    /// The larger, more accurate variant.
    LargeV3,
}

impl ModelVariant {
    /// The whisper.cpp artifact file name this variant loads.
    pub fn artifact_file_name(&self) -> &'static str {
        match self {
            Self::Base => "ggml-base.bin",
            Self::LargeV3 => "ggml-large-v3.bin",
        }
    }

    /// The friendly name accepted by `model-downloader --name`.
    pub fn downloader_name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::LargeV3 => "large-v3",
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.downloader_name())
    }
}

/// Resolve the on-disk model path for a variant.
///
/// We fail fast with a download hint when the artifact is missing so the
/// batch never starts half-configured.
pub fn resolve_model_path(model_dir: &Path, variant: ModelVariant) -> Result<PathBuf> {
    let path = model_dir.join(variant.artifact_file_name());
    if !path.is_file() {
        return Err(Error::NotFound { path });
    }
    Ok(path)
}

/// Everything one driver invocation needs, created once and never persisted.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Resolved input files, in processing order.
    pub files: Vec<MediaFile>,

    /// Which model artifact the transcriber loads.
    pub model: ModelVariant,

    /// Optional language hint (e.g. `"en"`, `"yue"`). `None` lets the
    /// model auto-detect.
    pub language: Option<String>,

    /// Output directory override. `None` writes artifacts next to each
    /// input file.
    pub output_dir: Option<PathBuf>,

    /// Also emit a plain-text transcript per file.
    pub write_text: bool,

    /// Also emit an LRC lyrics file per file.
    pub write_lrc: bool,
}
