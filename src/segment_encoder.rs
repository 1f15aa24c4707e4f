use anyhow::Result;

use crate::segments::Segment;

/// Streaming sink for transcription segments.
///
/// Encoders receive segments one at a time in source order and must be
/// `close()`d to flush; `close` is idempotent and writing after close is
/// an error.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
