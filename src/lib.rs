/*!
 * # substream - word timings to SubRip captions
 *
 * A Rust library that turns a time-stamped stream of transcribed words into
 * a SubRip (.srt) caption file.
 *
 * ## Features
 *
 * - Line wrapping on length and sentence-ending punctuation
 * - Cues of a bounded number of lines
 * - Minimum on-screen duration without overlapping the next cue
 * - Replay of JSONL word logs without re-running speech recognition
 * - Fully lazy: words are pulled through the pipeline one at a time
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle`: `Word` and `Subtitle` data model
 * - `word_source`: JSONL word logs, validation and the speech backend seam
 * - `segmenter`: grouping words into cues
 * - `duration`: minimum duration repair
 * - `srt_renderer`: SRT text output
 * - `pipeline`: the stages wired together, with cue observers
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod duration;
pub mod errors;
pub mod file_utils;
pub mod pipeline;
pub mod segmenter;
pub mod srt_renderer;
pub mod subtitle;
pub mod word_source;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use duration::DurationAdjuster;
pub use errors::{AppError, SubtitleError, WordSourceError};
pub use pipeline::{CueObserver, LogObserver, NoopObserver, SubtitlePipeline};
pub use segmenter::SubtitleSegmenter;
pub use srt_renderer::SrtRenderer;
pub use subtitle::{Subtitle, Word};
