//! Artifact rendering: turn one file's segments into output files.
//!
//! Filenames derive from the input stem (`talk.mp4` → `talk.srt`,
//! `talk.txt`, `talk.lrc`). The subtitle file is always produced; text and
//! LRC are opt-in. Any failure here counts against the file being
//! rendered, not the whole batch.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::job::BatchJob;
use crate::lrc_encoder::LrcEncoder;
use crate::media::MediaFile;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::srt_encoder::SrtEncoder;
use crate::text_encoder::TextEncoder;

/// Where one file's artifacts land.
///
/// Precedence: the job's output directory override, else the input file's
/// own directory, else the current directory for bare relative names.
pub fn output_dir_for(media: &MediaFile, job: &BatchJob) -> PathBuf {
    if let Some(dir) = &job.output_dir {
        return dir.clone();
    }
    match media.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Render every requested artifact for one transcribed file.
///
/// Returns the paths written, in write order.
pub fn write_artifacts(
    media: &MediaFile,
    segments: &[Segment],
    job: &BatchJob,
) -> Result<Vec<PathBuf>> {
    let dir = output_dir_for(media, job);
    fs::create_dir_all(&dir)
        .map_err(|e| Error::Write(format!("failed to create {}: {e}", dir.display())))?;

    let stem = media.stem();
    let mut written = Vec::new();

    let srt_path = dir.join(format!("{stem}.srt"));
    write_with_encoder(&srt_path, segments, SrtEncoder::new)?;
    written.push(srt_path);

    if job.write_text {
        let txt_path = dir.join(format!("{stem}.txt"));
        write_with_encoder(&txt_path, segments, TextEncoder::new)?;
        written.push(txt_path);
    }

    if job.write_lrc {
        let lrc_path = dir.join(format!("{stem}.lrc"));
        write_with_encoder(&lrc_path, segments, |w| LrcEncoder::new(w, stem.clone()))?;
        written.push(lrc_path);
    }

    Ok(written)
}

fn write_with_encoder<E, F>(path: &Path, segments: &[Segment], make: F) -> Result<()>
where
    E: SegmentEncoder,
    F: FnOnce(BufWriter<File>) -> E,
{
    let file = File::create(path)
        .map_err(|e| Error::Write(format!("failed to create {}: {e}", path.display())))?;
    let mut encoder = make(BufWriter::new(file));

    let run = (|| -> anyhow::Result<()> {
        for seg in segments {
            encoder.write_segment(seg)?;
        }
        Ok(())
    })();

    // Close even when a write failed, then surface the first error.
    let close = encoder.close();
    run.and(close)
        .map_err(|e| Error::Write(format!("failed to write {}: {e:#}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::ModelVariant;

    fn seg(start: f32, end: f32, text: &str) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    fn job_for(dir: Option<PathBuf>, text: bool, lrc: bool) -> BatchJob {
        BatchJob {
            files: Vec::new(),
            model: ModelVariant::Base,
            language: None,
            output_dir: dir,
            write_text: text,
            write_lrc: lrc,
        }
    }

    fn media(path: &Path) -> MediaFile {
        MediaFile::from_path(path).expect("fixture path should be supported")
    }

    #[test]
    fn writes_srt_next_to_input_by_default() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("talk.mp3");
        std::fs::write(&input, b"")?;

        let segments = vec![seg(0.0, 1.0, "hello")];
        let written = write_artifacts(&media(&input), &segments, &job_for(None, false, false))?;

        assert_eq!(written, vec![dir.path().join("talk.srt")]);
        let srt = std::fs::read_to_string(&written[0])?;
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,000\nhello\n"));
        Ok(())
    }

    #[test]
    fn creates_override_directory_and_writes_all_artifacts() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("ep.m4a");
        std::fs::write(&input, b"")?;
        let out_dir = dir.path().join("out").join("deep");

        let segments = vec![seg(0.0, 2.0, "line one"), seg(2.5, 4.0, "line two")];
        let written = write_artifacts(
            &media(&input),
            &segments,
            &job_for(Some(out_dir.clone()), true, true),
        )?;

        assert_eq!(
            written,
            vec![
                out_dir.join("ep.srt"),
                out_dir.join("ep.txt"),
                out_dir.join("ep.lrc"),
            ]
        );
        assert_eq!(std::fs::read_to_string(&written[1])?, "line one\nline two\n");
        assert!(std::fs::read_to_string(&written[2])?.starts_with("[ti:ep]"));
        Ok(())
    }

    #[test]
    fn unwritable_output_directory_is_a_write_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("talk.wav");
        std::fs::write(&input, b"")?;

        // A regular file where the output directory should be.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"")?;

        let err = write_artifacts(
            &media(&input),
            &[seg(0.0, 1.0, "x")],
            &job_for(Some(blocker), false, false),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Write(_)));
        Ok(())
    }
}
