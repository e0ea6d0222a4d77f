/*!
 * Word-to-SRT pipeline.
 *
 * Stages are lazy iterator adapters pulled by the renderer:
 *
 * ```text
 * words -> validate_words -> SubtitleSegmenter -> DurationAdjuster -> SrtRenderer -> sink
 * ```
 *
 * Cue emission is reported to a [`CueObserver`] rather than logged directly.
 */

use std::cell::RefCell;
use std::io::Write;

use log::{debug, info};

use crate::app_config::{Config, SegmenterConfig};
use crate::duration::DurationAdjuster;
use crate::errors::{AppError, WordSourceError};
use crate::segmenter::SubtitleSegmenter;
use crate::srt_renderer::{format_seconds, SrtRenderer};
use crate::subtitle::{Subtitle, Word};
use crate::word_source::validate_words;

/// Receives every cue as it is written
pub trait CueObserver {
    /// Called after cue `index` (1-based) reached the sink
    fn on_cue(&mut self, index: usize, cue: &Subtitle);

    /// Called once the source is exhausted and the sink flushed
    fn on_finish(&mut self, _cues_written: usize) {}
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CueObserver for NoopObserver {
    fn on_cue(&mut self, _index: usize, _cue: &Subtitle) {}
}

/// Observer forwarding cue events to the `log` facade
#[derive(Debug, Default)]
pub struct LogObserver;

impl CueObserver for LogObserver {
    fn on_cue(&mut self, index: usize, cue: &Subtitle) {
        debug!(
            "Cue {}: {} --> {} ({} word(s))",
            index,
            format_seconds(cue.start_time()),
            format_seconds(cue.end_time()),
            cue.words().len()
        );
    }

    fn on_finish(&mut self, cues_written: usize) {
        info!("Write complete: {} subtitle(s)", cues_written);
    }
}

/// Segmentation, timing repair and rendering with one set of settings
#[derive(Debug, Clone)]
pub struct SubtitlePipeline {
    segmenter: SegmenterConfig,
    min_duration: f64,
}

impl SubtitlePipeline {
    pub fn new(segmenter: SegmenterConfig, min_duration: f64) -> Self {
        SubtitlePipeline {
            segmenter,
            min_duration,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.segmenter.clone(), config.timing.min_duration_secs)
    }

    /// Lazily segmented and duration-adjusted cues for already validated words
    pub fn cues<I>(&self, words: I) -> DurationAdjuster<SubtitleSegmenter<I::IntoIter>>
    where
        I: IntoIterator<Item = Word>,
    {
        let segmented = SubtitleSegmenter::new(words, self.segmenter.clone());
        DurationAdjuster::new(segmented, self.min_duration)
    }

    /// Drive the whole pipeline, returning the number of cues written
    ///
    /// A word source error aborts the run as soon as it surfaces. Cues already
    /// written stay in the sink. Cues not yet written are dropped, including the
    /// last complete cue still held back by the duration adjuster's lookahead.
    pub fn run<I, W>(&self, words: I, sink: W, observer: &mut dyn CueObserver) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = Result<Word, WordSourceError>>,
        W: Write,
    {
        info!(
            "Converting words to subtitles. Length per line {}",
            self.segmenter.max_line_length
        );

        let failure: RefCell<Option<WordSourceError>> = RefCell::new(None);
        let mut renderer = SrtRenderer::new(sink);

        let words = validate_words(words).map_while(|word| match word {
            Ok(word) => Some(word),
            Err(e) => {
                *failure.borrow_mut() = Some(e);
                None
            }
        });

        for cue in self.cues(words) {
            if failure.borrow().is_some() {
                break;
            }
            let index = renderer.write_cue(&cue)?;
            observer.on_cue(index, &cue);
        }

        if let Some(e) = failure.into_inner() {
            return Err(e.into());
        }

        renderer.flush()?;
        let written = renderer.cues_written();
        observer.on_finish(written);
        Ok(written)
    }
}
