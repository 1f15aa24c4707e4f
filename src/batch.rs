//! The batch loop: confirmation, sequential transcription, failure
//! accounting.
//!
//! Invariants:
//! - files are processed strictly in resolved order, one at a time
//! - a single file's failure (transcription or artifact write) is recorded
//!   and never aborts the batch
//! - the summary is the only state shared across files

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::artifacts::write_artifacts;
use crate::error::{Error, Result};
use crate::job::BatchJob;
use crate::media::MediaFile;
use crate::transcriber::Transcriber;

/// One file's failure, kept for the end-of-run report.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run, built incrementally by the single driver thread.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_success(&mut self) {
        self.succeeded += 1;
    }

    fn record_failure(&mut self, file: &MediaFile, err: &Error) {
        self.failures.push(FileFailure {
            path: file.path.clone(),
            reason: err.to_string(),
        });
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "processed {} file(s): {} succeeded, {} failed",
            self.total(),
            self.succeeded,
            self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(f, "  FAILED {}: {}", failure.path.display(), failure.reason)?;
        }
        Ok(())
    }
}

/// Show the resolved batch and require explicit affirmative confirmation.
///
/// The reader/writer pair is injected so tests can script the exchange.
/// Anything other than `y`/`yes` (case-insensitive) declines, which aborts
/// the run with `UserCancelled` before any transcription work starts.
pub fn confirm_batch<R: BufRead, W: Write>(
    files: &[MediaFile],
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "About to transcribe {} file(s):", files.len())?;
    for file in files {
        writeln!(output, "  {}", file.path.display())?;
    }
    write!(output, "Proceed? [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => Err(Error::UserCancelled),
    }
}

/// Process every file in the job, in order, and return the summary.
///
/// Progress (`[i/N] path`) goes to stdout like the rest of the driver's
/// user-facing output; per-file failures additionally land in the log.
pub fn run_batch(transcriber: &mut dyn Transcriber, job: &BatchJob) -> RunSummary {
    let mut summary = RunSummary::default();
    let total = job.files.len();

    for (index, file) in job.files.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, total, file.path.display());

        match process_file(transcriber, file, job) {
            Ok(()) => summary.record_success(),
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "file failed");
                summary.record_failure(file, &err);
            }
        }
    }

    summary
}

fn process_file(transcriber: &mut dyn Transcriber, file: &MediaFile, job: &BatchJob) -> Result<()> {
    let segments = transcriber.transcribe(&file.path, job.language.as_deref())?;
    write_artifacts(file, &segments, job)?;
    Ok(())
}
