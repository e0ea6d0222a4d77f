use std::io::Write;

use crate::errors::SubtitleError;
use crate::subtitle::Subtitle;

// @module: SubRip text output

// Float error allowance so 1.3s lands on 1300ms and not 1299ms.
const MILLIS_EPSILON: f64 = 1e-6;

/// Convert seconds to whole milliseconds, truncating
pub fn seconds_to_millis(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0 + MILLIS_EPSILON).floor() as u64
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format a time in seconds to SRT format, truncated to the millisecond
pub fn format_seconds(secs: f64) -> String {
    format_timestamp(seconds_to_millis(secs))
}

/// Writes numbered SRT blocks to a sink, one cue at a time
pub struct SrtRenderer<W: Write> {
    sink: W,
    // @field: Index of the next block, 1-based
    next_index: usize,
}

impl<W: Write> SrtRenderer<W> {
    pub fn new(sink: W) -> Self {
        SrtRenderer { sink, next_index: 1 }
    }

    /// Write one block and return the index it was given
    pub fn write_cue(&mut self, cue: &Subtitle) -> Result<usize, SubtitleError> {
        let index = self.next_index;

        writeln!(self.sink, "{}", index)?;
        writeln!(
            self.sink,
            "{} --> {}",
            format_seconds(cue.start_time()),
            format_seconds(cue.end_time())
        )?;
        for word in cue.words() {
            self.sink.write_all(word.text.as_bytes())?;
        }
        writeln!(self.sink)?;
        writeln!(self.sink)?;

        self.next_index += 1;
        Ok(index)
    }

    /// Number of blocks written so far
    pub fn cues_written(&self) -> usize {
        self.next_index - 1
    }

    pub fn flush(&mut self) -> Result<(), SubtitleError> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Render every cue to `sink`, returning the number of blocks written
pub fn render_srt<I, W>(cues: I, sink: W) -> Result<usize, SubtitleError>
where
    I: IntoIterator<Item = Subtitle>,
    W: Write,
{
    let mut renderer = SrtRenderer::new(sink);
    for cue in cues {
        renderer.write_cue(&cue)?;
    }
    renderer.flush()?;
    Ok(renderer.cues_written())
}
