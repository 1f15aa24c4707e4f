//! Input resolution: turn a path argument into an ordered list of media files.
//!
//! Policy:
//! - A single file must carry a supported extension, otherwise the run aborts.
//! - A directory is scanned (recursively on request) for supported extensions;
//!   everything else is skipped without comment.
//! - Results are sorted by full path so repeated runs over an unchanged tree
//!   produce identical batches.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::media::{MediaFile, SUPPORTED_EXTENSIONS_LIST, extension_lowercase};

/// Resolve `input` into the ordered list of files the batch will process.
pub fn resolve(input: &Path, recursive: bool) -> Result<Vec<MediaFile>> {
    if !input.exists() {
        return Err(Error::NotFound {
            path: input.to_path_buf(),
        });
    }

    if input.is_file() {
        let media = MediaFile::from_path(input).ok_or_else(|| Error::UnsupportedFormat {
            path: input.to_path_buf(),
            extension: extension_lowercase(input).unwrap_or_default(),
            expected: SUPPORTED_EXTENSIONS_LIST,
        })?;
        return Ok(vec![media]);
    }

    let mut found = Vec::new();
    collect(input, recursive, &mut found)?;
    found.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}

fn collect(dir: &Path, recursive: bool, out: &mut Vec<MediaFile>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            if recursive {
                collect(&path, recursive, out)?;
            }
            continue;
        }

        if let Some(media) = MediaFile::from_path(&path) {
            out.push(media);
        }
    }
    Ok(())
}
