use std::path::{Path, PathBuf};

/// Whether a media file carries audio only or a full video container.
///
/// The distinction is informational (progress output, diagnostics); both
/// kinds flow through the same decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// Audio extensions the transcription driver accepts.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "m4a", "mp3"];

/// Video extensions the transcription driver accepts.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Human-readable list of everything the driver accepts, for error messages.
pub const SUPPORTED_EXTENSIONS_LIST: &str = "wav, m4a, mp3, mp4";

/// A candidate input file, immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaFile {
    /// Classify a path by extension (ASCII case-insensitive).
    ///
    /// Returns `None` when the extension is missing or not in the
    /// supported set, so directory scans can silently skip strangers
    /// while single-file callers surface an error.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let ext = extension_lowercase(&path)?;

        let kind = if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Audio
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else {
            return None;
        };

        Some(Self { path, kind })
    }

    /// The file name stem used to derive artifact names.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Extract a path's extension, lowercased.
pub fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}
