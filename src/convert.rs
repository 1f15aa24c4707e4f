//! One-shot audio conversion to MP3.
//!
//! This is a thin wrapper over an external codec capability (ffmpeg with
//! `libmp3lame` at its default quality). Validation happens before the
//! codec is ever invoked, so the error cases are testable without ffmpeg
//! installed. There is no batch mode; every failure is terminal.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};
use crate::media::extension_lowercase;

/// Extensions the converter accepts as input.
pub const CONVERT_EXTENSIONS: &[&str] = &["m4a", "wav", "mp3", "aac", "flac", "ogg", "wma"];

/// Human-readable form of `CONVERT_EXTENSIONS` for error messages.
pub const CONVERT_EXTENSIONS_LIST: &str = "m4a, wav, mp3, aac, flac, ogg, wma";

/// A successful conversion: where the MP3 landed and how long it took.
#[derive(Debug)]
pub struct Conversion {
    pub output: PathBuf,
    pub elapsed: Duration,
}

/// The sibling path a conversion writes (`song.m4a` → `song.mp3`).
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("mp3")
}

/// Convert `input` to MP3 next to itself.
///
/// The encode goes into a `.part` staging file that is renamed over the
/// destination on success, so re-encoding an `.mp3` onto its own path can
/// never truncate the input mid-read.
pub fn convert_to_mp3(input: &Path) -> Result<Conversion> {
    let started = Instant::now();

    if !input.exists() {
        return Err(Error::NotFound {
            path: input.to_path_buf(),
        });
    }

    let extension = extension_lowercase(input).unwrap_or_default();
    if !CONVERT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(Error::UnsupportedFormat {
            path: input.to_path_buf(),
            extension,
            expected: CONVERT_EXTENSIONS_LIST,
        });
    }

    let ffmpeg =
        which::which("ffmpeg").map_err(|_| Error::BinaryMissing {
            binary: "ffmpeg".to_owned(),
        })?;

    let output = output_path_for(input);
    let staging = PathBuf::from(format!("{}.part", output.display()));

    debug!(input = %input.display(), output = %output.display(), "invoking ffmpeg");

    let result = Command::new(&ffmpeg)
        .arg("-y")
        .arg("-loglevel")
        .arg("error")
        .arg("-i")
        .arg(input)
        .arg("-codec:a")
        .arg("libmp3lame")
        .arg("-f")
        .arg("mp3")
        .arg(&staging)
        .output()
        .map_err(|e| Error::Conversion(format!("failed to spawn ffmpeg: {e}")))?;

    if !result.status.success() {
        let _ = fs::remove_file(&staging);
        let diagnostic = String::from_utf8_lossy(&result.stderr).trim().to_owned();
        return Err(Error::Conversion(if diagnostic.is_empty() {
            format!("ffmpeg exited with {}", result.status)
        } else {
            diagnostic
        }));
    }

    fs::rename(&staging, &output).map_err(|e| {
        let _ = fs::remove_file(&staging);
        Error::Conversion(format!("failed to move {} into place: {e}", output.display()))
    })?;

    Ok(Conversion {
        output,
        elapsed: started.elapsed(),
    })
}
