use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::{AppError, WordSourceError};
use crate::file_utils::{FileManager, InputKind};
use crate::pipeline::{CueObserver, LogObserver, SubtitlePipeline};
use crate::srt_renderer::format_seconds;
use crate::subtitle::{Subtitle, Word};
use crate::word_source::{apply_word_case, JsonlWordReader, SpeechBackend, WordLogWriter, WordStream};

// @module: Application controller for subtitle generation

/// Main application controller: picks the word source and drives the pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Speech recognition backend, if any
    backend: Option<Box<dyn SpeechBackend>>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            backend: None,
        })
    }

    /// Attach the backend used for audio inputs
    pub fn with_backend(mut self, backend: Box<dyn SpeechBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Run the main workflow, reporting progress on a spinner
    pub fn run(&self, input: &str, output: &Path) -> Result<usize> {
        let mut observer = ProgressObserver::new();
        self.run_with_observer(input, output, &mut observer)
    }

    /// Convert `input` (word log, audio file or gs:// uri) to an SRT file at `output`
    ///
    /// Existing output and word log files are renamed to `<name>.<unix_ts>.bak`
    /// first. Returns the number of cues written.
    pub fn run_with_observer(&self, input: &str, output: &Path, observer: &mut dyn CueObserver) -> Result<usize> {
        let start_time = std::time::Instant::now();

        let kind = FileManager::detect_input_kind(input);
        let backend = match kind {
            InputKind::Unknown => {
                return Err(AppError::Input(format!("{} not a file or valid gs:// uri.", input)).into());
            }
            InputKind::LocalAudio | InputKind::RemoteAudio => match &self.backend {
                Some(backend) => Some(backend.as_ref()),
                None => {
                    return Err(AppError::Input(format!(
                        "No speech backend configured to transcribe {}",
                        input
                    ))
                    .into());
                }
            },
            InputKind::WordLog => None,
        };

        // Open the source first so a failure leaves existing outputs untouched
        let source: WordStream<'_> = match backend {
            None => {
                info!("Converting {} to {:?}", input, output);
                Box::new(JsonlWordReader::new(FileManager::open_reader(input)?))
            }
            Some(backend) => {
                info!("Transcribing {} with {}", input, backend.name());
                backend.transcribe(input)?
            }
        };

        FileManager::backup_if_exists(output)?;
        info!("Writing subtitles to {:?}", output);
        let srt_file = FileManager::create_writer(output)?;

        let words: WordStream<'_> = if backend.is_some() {
            let log_path = FileManager::word_log_path(output);
            FileManager::backup_if_exists(&log_path)?;
            let log_file = FileManager::create_writer(&log_path)?;
            info!("Dumping word log to {:?}", log_path);
            Box::new(WordLogWriter::new(source, log_file))
        } else {
            source
        };

        let written = self.words_to_srt(words, srt_file, observer)?;

        info!(
            "Subtitles completed in {}.",
            Self::format_duration(start_time.elapsed())
        );
        Ok(written)
    }

    /// Convert a word log read from `reader` to SRT text on `writer`
    pub fn jsonl_to_srt<R: BufRead, W: Write>(&self, reader: R, writer: W, observer: &mut dyn CueObserver) -> Result<usize> {
        self.words_to_srt(JsonlWordReader::new(reader), writer, observer)
    }

    /// Convert any word stream to SRT text on `writer`
    pub fn words_to_srt<I, W>(&self, words: I, writer: W, observer: &mut dyn CueObserver) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Word, WordSourceError>>,
        W: Write,
    {
        let words = apply_word_case(words.into_iter(), self.config.output.word_case);
        let pipeline = SubtitlePipeline::from_config(&self.config);
        let written = pipeline.run(words, writer, observer)?;
        Ok(written)
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Spinner showing the latest cue, with log output on completion
pub struct ProgressObserver {
    spinner: ProgressBar,
    log: LogObserver,
}

impl ProgressObserver {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} cues {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(120));
        ProgressObserver {
            spinner,
            log: LogObserver,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressObserver {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.abandon();
        }
    }
}

impl CueObserver for ProgressObserver {
    fn on_cue(&mut self, index: usize, cue: &Subtitle) {
        self.spinner.set_position(index as u64);
        self.spinner.set_message(format_seconds(cue.end_time()));
        self.log.on_cue(index, cue);
    }

    fn on_finish(&mut self, cues_written: usize) {
        self.spinner.finish_and_clear();
        self.log.on_finish(cues_written);
    }
}
