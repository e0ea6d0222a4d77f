/*!
 * Groups a stream of words into subtitle cues.
 *
 * Words are laid out on lines of at most `max_line_length` characters. A line
 * also ends after a word that closes a sentence. Once a cue holds
 * `max_lines_per_cue` lines the next break emits it.
 */

use std::iter::Fuse;
use std::mem;

use log::trace;

use crate::app_config::SegmenterConfig;
use crate::subtitle::{Subtitle, Word};

/// Outcome of a break decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// No break: keep filling the current line
    Accumulating,
    /// Line finished and the cue has room for another one
    LineComplete,
    /// Line finished and it was the cue's last one
    CueComplete,
}

impl LineState {
    /// Break decision from whether the word fits, whether it ends a sentence,
    /// and how many more lines the current cue may start
    pub fn decide(fits: bool, sentence_end: bool, lines_remaining: usize) -> Self {
        if fits && !sentence_end {
            LineState::Accumulating
        } else if lines_remaining > 0 {
            LineState::LineComplete
        } else {
            LineState::CueComplete
        }
    }
}

/// Lazy adapter turning a word iterator into a cue iterator
pub struct SubtitleSegmenter<I: Iterator<Item = Word>> {
    words: Fuse<I>,
    config: SegmenterConfig,
    // @field: Words of the cue being built
    cue: Vec<Word>,
    // @field: Characters on the current line, trailing spaces included
    line_len: usize,
    // @field: Lines started in this cue after the first
    lines_used: usize,
    // @field: Last word of the previous line still owes a separator
    pending_separator: bool,
}

impl<I: Iterator<Item = Word>> SubtitleSegmenter<I> {
    pub fn new<T>(words: T, config: SegmenterConfig) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        SubtitleSegmenter {
            words: words.into_iter().fuse(),
            config,
            cue: Vec::new(),
            line_len: 0,
            lines_used: 0,
            pending_separator: false,
        }
    }

    fn lines_remaining(&self) -> usize {
        self.config
            .max_lines_per_cue
            .saturating_sub(1)
            .saturating_sub(self.lines_used)
    }

    // @processes: One word, returning a cue if the word completed one
    fn push(&mut self, word: Word) -> Option<Subtitle> {
        let word_len = word.char_len() + 1;
        let fits = self.line_len == 0 || self.line_len + word_len <= self.config.max_line_length;

        if !fits {
            // The word opens the next line; its own punctuation does not break again.
            let emitted = self.apply(LineState::decide(false, false, self.lines_remaining()));
            self.append(word, word_len);
            return emitted;
        }

        let sentence_end = word.is_sentence_end();
        self.append(word, word_len);
        self.apply(LineState::decide(true, sentence_end, self.lines_remaining()))
    }

    fn append(&mut self, mut word: Word, word_len: usize) {
        if self.pending_separator {
            if let Some(last) = self.cue.last_mut() {
                last.text.push_str(&self.config.line_separator);
            }
            self.pending_separator = false;
        }

        word.text.push(' ');
        self.line_len += word_len;
        self.cue.push(word);
    }

    fn apply(&mut self, state: LineState) -> Option<Subtitle> {
        match state {
            LineState::Accumulating => None,
            LineState::LineComplete => {
                self.pending_separator = true;
                self.line_len = 0;
                self.lines_used += 1;
                None
            }
            LineState::CueComplete => Some(self.take_cue()),
        }
    }

    // @invariant: only called with at least one buffered word
    fn take_cue(&mut self) -> Subtitle {
        self.line_len = 0;
        self.lines_used = 0;
        self.pending_separator = false;

        let words = mem::take(&mut self.cue);
        let cue = Subtitle::new(words).expect("segmenter emitted a cue with no words");
        trace!("Cue complete: {} word(s) at {:.3}s", cue.words().len(), cue.start_time());
        cue
    }
}

impl<I: Iterator<Item = Word>> Iterator for SubtitleSegmenter<I> {
    type Item = Subtitle;

    fn next(&mut self) -> Option<Subtitle> {
        while let Some(word) = self.words.next() {
            if let Some(cue) = self.push(word) {
                return Some(cue);
            }
        }

        // Source exhausted: flush whatever is buffered
        if self.cue.is_empty() {
            None
        } else {
            Some(self.take_cue())
        }
    }
}
