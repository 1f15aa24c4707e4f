use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type.
///
/// The variants map directly onto how a failure propagates:
/// - `NotFound`, `UnsupportedFormat`, `UserCancelled` and `BinaryMissing`
///   abort the whole invocation.
/// - `Transcription` and `Write` are per-file failures the batch loop
///   records and survives.
/// - `Conversion` is terminal for the single-file converter, which has no
///   batch to continue.
#[derive(Debug, Error)]
pub enum Error {
    #[error("path not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported format `.{}` for {}: expected one of {}", .extension, .path.display(), .expected)]
    UnsupportedFormat {
        path: PathBuf,
        extension: String,
        expected: &'static str,
    },

    #[error("cancelled by user")]
    UserCancelled,

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("binary `{binary}` missing from PATH")]
    BinaryMissing { binary: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an internal transcription error, flattening its context chain
    /// into a single message suitable for the batch summary.
    pub(crate) fn transcription(err: anyhow::Error) -> Self {
        Self::Transcription(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::path::PathBuf;

    #[test]
    fn display_messages_cover_all_variants() {
        let cases = vec![
            (
                Error::NotFound {
                    path: PathBuf::from("/tmp/missing.wav"),
                },
                "path not found: /tmp/missing.wav",
            ),
            (
                Error::UnsupportedFormat {
                    path: PathBuf::from("clip.xyz"),
                    extension: "xyz".to_owned(),
                    expected: "wav, m4a, mp3, mp4",
                },
                "unsupported format `.xyz` for clip.xyz: expected one of wav, m4a, mp3, mp4",
            ),
            (Error::UserCancelled, "cancelled by user"),
            (
                Error::Transcription("model exploded".to_owned()),
                "transcription failed: model exploded",
            ),
            (
                Error::Write("disk full".to_owned()),
                "write failed: disk full",
            ),
            (
                Error::Conversion("bad stream".to_owned()),
                "conversion failed: bad stream",
            ),
            (
                Error::BinaryMissing {
                    binary: "ffmpeg".to_owned(),
                },
                "binary `ffmpeg` missing from PATH",
            ),
            (
                Error::Io(std::io::Error::other("disk gone")),
                "io error: disk gone",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(format!("{error}"), expected);
            assert!(!format!("{error:?}").trim().is_empty());
        }
    }

    #[test]
    fn transcription_wrapper_flattens_context_chain() {
        let inner = anyhow::anyhow!("root cause").context("while decoding");
        let err = Error::transcription(inner);
        let msg = format!("{err}");
        assert!(msg.contains("while decoding"));
        assert!(msg.contains("root cause"));
    }
}
