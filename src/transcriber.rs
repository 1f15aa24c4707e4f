use std::path::Path;

use crate::error::Result;
use crate::segments::Segment;

/// The narrow seam between the batch loop and model inference.
///
/// A transcriber turns one media file into ordered `Segment`s. The batch
/// orchestrator only ever talks to this trait, so its failure-continuation
/// logic can be exercised with a fake implementation instead of a loaded
/// model.
///
/// `transcribe` takes `&mut self` because whisper.cpp state creation
/// requires mutable access; fakes are free to ignore that.
pub trait Transcriber {
    /// Transcribe the media at `path`, optionally biased toward `language`.
    ///
    /// A `None` language lets the model auto-detect.
    fn transcribe(&mut self, path: &Path, language: Option<&str>) -> Result<Vec<Segment>>;
}
