use serde::{Deserialize, Serialize};
use crate::errors::SubtitleError;

// @module: Word and subtitle cue data model

/// A transcribed word with its position in the source audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    // @field: Word text, as recognized
    #[serde(rename = "word")]
    pub text: String,

    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,
}

impl Word {
    /// Creates a new word record
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Word {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    // @checks: Text ends a sentence (., ? or !)
    pub fn is_sentence_end(&self) -> bool {
        self.text.trim_end().ends_with(['.', '?', '!'])
    }

    /// Length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// One caption entry: a non-empty run of words shown together
#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    words: Vec<Word>,
}

impl Subtitle {
    // @creates: Cue from its words
    // @validates: At least one word
    pub fn new(words: Vec<Word>) -> Result<Self, SubtitleError> {
        if words.is_empty() {
            return Err(SubtitleError::EmptyCue);
        }
        Ok(Subtitle { words })
    }

    /// Words in display order, each carrying its trailing space or line separator
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Start of the first word
    pub fn start_time(&self) -> f64 {
        self.words[0].start_time
    }

    /// End of the last word
    pub fn end_time(&self) -> f64 {
        self.words[self.words.len() - 1].end_time
    }

    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    /// Moves the cue end later. An earlier `end_time` is ignored, so a cue never shrinks.
    pub fn extend_end_to(&mut self, end_time: f64) {
        let last = self.words.len() - 1;
        if end_time > self.words[last].end_time {
            self.words[last].end_time = end_time;
        }
    }

    /// Caption text exactly as rendered
    pub fn text(&self) -> String {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }

    /// Number of physical lines, given the separator the segmenter inserted
    pub fn line_count(&self, line_separator: &str) -> usize {
        let separators = self
            .words
            .iter()
            .filter(|w| w.text.ends_with(line_separator))
            .count();
        separators + 1
    }
}
