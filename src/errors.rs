/*!
 * Error types for the substream application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while ingesting word-timing records
#[derive(Error, Debug)]
pub enum WordSourceError {
    /// Error reading from the underlying source
    #[error("Failed to read word source: {0}")]
    Io(#[from] std::io::Error),

    /// A word log line could not be decoded
    #[error("Invalid word record on line {line}: {source}")]
    Parse {
        /// 1-based line number in the word log
        line: usize,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },

    /// A word with no text
    #[error("Empty word text at {start_time}s")]
    EmptyText {
        /// Start time of the offending record
        start_time: f64,
    },

    /// Start or end time is NaN or infinite
    #[error("Non-finite timing for word '{word}'")]
    NonFiniteTime {
        /// Offending word
        word: String,
    },

    /// Negative start time or end before start
    #[error("Invalid timing for word '{word}': {start_time}s --> {end_time}s")]
    InvalidTiming {
        /// Offending word
        word: String,
        /// Start time in seconds
        start_time: f64,
        /// End time in seconds
        end_time: f64,
    },

    /// Start time earlier than the preceding word's
    #[error("Word '{word}' starts at {start_time}s, before previous word start {previous_start}s")]
    OutOfOrder {
        /// Offending word
        word: String,
        /// Start time in seconds
        start_time: f64,
        /// Start time of the previous word
        previous_start: f64,
    },
}

/// Errors that can occur while building or writing subtitles
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A cue was requested with no words
    #[error("Subtitle cue must contain at least one word")]
    EmptyCue,

    /// The output sink rejected a write
    #[error("Failed to write subtitle output: {0}")]
    Write(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Input that is neither a word log, an audio file nor a gs:// uri
    #[error("Input error: {0}")]
    Input(String),

    /// Error from the word source
    #[error("Word source error: {0}")]
    WordSource(#[from] WordSourceError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
