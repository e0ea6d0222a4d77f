/*!
 * Word sources feeding the subtitle pipeline.
 *
 * Words come either from a speech backend or from a replayed word log. The
 * log holds one JSON record per line:
 *
 * ```text
 * {"word": "hello", "start_time": 0.0, "end_time": 0.4}
 * ```
 *
 * Every source goes through [`validate_words`] before segmentation.
 */

use std::io::{BufRead, Write};

use log::debug;

use crate::app_config::WordCase;
use crate::errors::{AppError, WordSourceError};
use crate::subtitle::Word;

/// Boxed stream of word records as produced by any source
pub type WordStream<'a> = Box<dyn Iterator<Item = Result<Word, WordSourceError>> + 'a>;

/// Speech recognition backend producing words from audio
///
/// `input` is a local audio path or a `gs://` uri. Backends needing remote
/// staging of local audio do it themselves.
pub trait SpeechBackend {
    /// Start transcription and return the words lazily, in time order
    fn transcribe(&self, input: &str) -> Result<WordStream<'_>, AppError>;

    /// Backend name used in log output
    fn name(&self) -> &str;
}

/// Reads word records from a JSONL word log
pub struct JsonlWordReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> JsonlWordReader<R> {
    pub fn new(reader: R) -> Self {
        JsonlWordReader {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonlWordReader<R> {
    type Item = Result<Word, WordSourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(WordSourceError::Io(e))),
            };
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return Some(serde_json::from_str(trimmed).map_err(|source| WordSourceError::Parse {
                line: self.line_number,
                source,
            }));
        }
    }
}

/// Checks a single record against the previous word's start
pub fn validate_word(word: &Word, previous_start: Option<f64>) -> Result<(), WordSourceError> {
    if word.text.trim().is_empty() {
        return Err(WordSourceError::EmptyText {
            start_time: word.start_time,
        });
    }

    if !word.start_time.is_finite() || !word.end_time.is_finite() {
        return Err(WordSourceError::NonFiniteTime {
            word: word.text.clone(),
        });
    }

    if word.start_time < 0.0 || word.end_time < word.start_time {
        return Err(WordSourceError::InvalidTiming {
            word: word.text.clone(),
            start_time: word.start_time,
            end_time: word.end_time,
        });
    }

    if let Some(previous_start) = previous_start {
        if word.start_time < previous_start {
            return Err(WordSourceError::OutOfOrder {
                word: word.text.clone(),
                start_time: word.start_time,
                previous_start,
            });
        }
    }

    Ok(())
}

/// Iterator adapter rejecting malformed or out-of-order records
pub struct ValidatedWords<I> {
    inner: I,
    previous_start: Option<f64>,
}

impl<I> Iterator for ValidatedWords<I>
where
    I: Iterator<Item = Result<Word, WordSourceError>>,
{
    type Item = Result<Word, WordSourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let word = match self.inner.next()? {
            Ok(word) => word,
            Err(e) => return Some(Err(e)),
        };

        if let Err(e) = validate_word(&word, self.previous_start) {
            return Some(Err(e));
        }
        self.previous_start = Some(word.start_time);
        Some(Ok(word))
    }
}

/// Wrap a word source so malformed timing is rejected before segmentation
pub fn validate_words<I>(words: I) -> ValidatedWords<I::IntoIter>
where
    I: IntoIterator<Item = Result<Word, WordSourceError>>,
{
    ValidatedWords {
        inner: words.into_iter(),
        previous_start: None,
    }
}

/// Apply a type case to every word of a stream
pub fn apply_word_case<I>(words: I, case: WordCase) -> impl Iterator<Item = Result<Word, WordSourceError>>
where
    I: Iterator<Item = Result<Word, WordSourceError>>,
{
    words.map(move |word| {
        word.map(|mut w| {
            w.text = case.apply(&w.text);
            w
        })
    })
}

/// Tee adapter writing every word that passes through to a JSONL log
pub struct WordLogWriter<I, W: Write> {
    inner: I,
    log: W,
    written: usize,
}

impl<I, W: Write> WordLogWriter<I, W> {
    pub fn new(inner: I, log: W) -> Self {
        WordLogWriter {
            inner,
            log,
            written: 0,
        }
    }

    /// Records written to the log so far
    pub fn written(&self) -> usize {
        self.written
    }

    fn record(&mut self, word: &Word) -> Result<(), WordSourceError> {
        let line = serde_json::to_string(word).map_err(std::io::Error::from)?;
        writeln!(self.log, "{}", line)?;
        self.written += 1;
        Ok(())
    }
}

impl<I, W> Iterator for WordLogWriter<I, W>
where
    I: Iterator<Item = Result<Word, WordSourceError>>,
    W: Write,
{
    type Item = Result<Word, WordSourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(Ok(word)) => match self.record(&word) {
                Ok(()) => Some(Ok(word)),
                Err(e) => Some(Err(e)),
            },
            Some(Err(e)) => Some(Err(e)),
            None => {
                if let Err(e) = self.log.flush() {
                    return Some(Err(WordSourceError::Io(e)));
                }
                debug!("Word log complete: {} record(s)", self.written);
                None
            }
        }
    }
}
