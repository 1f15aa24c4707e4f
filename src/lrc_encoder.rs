use std::io::Write;

use anyhow::Result;

use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes LRC lyrics.
///
/// Layout:
/// - a metadata header block (`[ti:]`, `[ar:]`, `[al:]`, `[by:]`,
///   `[offset:0]`) followed by a blank line
/// - one `[MM:SS.cc]text` line per segment, keyed on the segment's start
///   time with centisecond precision
///
/// The header is written lazily on the first segment so a run with no
/// speech produces no output.
pub struct LrcEncoder<W: Write> {
    w: W,

    /// Track title written into the `[ti:]` tag.
    title: String,

    /// Whether the header block has been written.
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> LrcEncoder<W> {
    pub fn new(w: W, title: impl Into<String>) -> Self {
        Self {
            w,
            title: title.into(),
            started: false,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            writeln!(&mut self.w, "[ti:{}]", self.title)?;
            writeln!(&mut self.w, "[ar:]")?;
            writeln!(&mut self.w, "[al:]")?;
            writeln!(&mut self.w, "[by:subgen]")?;
            writeln!(&mut self.w, "[offset:0]")?;
            writeln!(&mut self.w)?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for LrcEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot write segment: encoder is already closed");
        }

        self.start_if_needed()?;

        let stamp = format_timestamp_lrc(seg.start_seconds);
        writeln!(&mut self.w, "{stamp}{}", seg.text.trim())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

/// Format a start time as an LRC tag (`[MM:SS.cc]`).
///
/// LRC has no hour field; minutes keep counting past 59.
fn format_timestamp_lrc(seconds: f32) -> String {
    let minutes = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    let centis = ((seconds % 1.0) * 100.0) as u32;

    format!("[{minutes:02}:{secs:02}.{centis:02}]")
}
