use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Line wrapping and cue grouping
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Cue timing repair
    #[serde(default)]
    pub timing: TimingConfig,

    /// Output text options
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for grouping words into cues
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmenterConfig {
    // @field: Max characters per line, trailing spaces included
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    // @field: Max physical lines per cue
    #[serde(default = "default_max_lines_per_cue")]
    pub max_lines_per_cue: usize,

    // @field: Pause between words that would split a cue.
    // Accepted and validated but not used by the break decision.
    #[serde(default = "default_split_on_pause_secs")]
    pub split_on_pause_secs: f64,

    // @field: Marker inserted between lines of one cue
    #[serde(default = "default_line_separator")]
    pub line_separator: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            max_lines_per_cue: default_max_lines_per_cue(),
            split_on_pause_secs: default_split_on_pause_secs(),
            line_separator: default_line_separator(),
        }
    }
}

/// Configuration for cue duration repair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Minimum on-screen time in seconds for every cue but the last
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: default_min_duration_secs(),
        }
    }
}

/// Configuration for the caption text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    /// Case applied to every word before segmentation
    #[serde(default)]
    pub word_case: WordCase,
}

/// Type case of caption text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WordCase {
    #[default]
    Normal,
    Upper,
    Lower,
}

impl WordCase {
    // @returns: Text with this case applied
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Normal => text.to_string(),
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
        }
    }
}

impl std::fmt::Display for WordCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Upper => "upper",
            Self::Lower => "lower",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for WordCase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            _ => Err(anyhow!("Invalid word case: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_line_length() -> usize {
    32
}

fn default_max_lines_per_cue() -> usize {
    2
}

fn default_split_on_pause_secs() -> f64 {
    1.0
}

fn default_line_separator() -> String {
    "\r\n".to_string()
}

fn default_min_duration_secs() -> f64 {
    1.0
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.segmenter.max_line_length == 0 {
            return Err(anyhow!("max_line_length must be greater than zero"));
        }

        if self.segmenter.max_lines_per_cue == 0 {
            return Err(anyhow!("max_lines_per_cue must be at least 1"));
        }

        let pause = self.segmenter.split_on_pause_secs;
        if !pause.is_finite() || pause < 0.0 {
            return Err(anyhow!("split_on_pause_secs must be a non-negative number, got {}", pause));
        }

        if self.segmenter.line_separator.is_empty() {
            return Err(anyhow!("line_separator must not be empty"));
        }

        let min_duration = self.timing.min_duration_secs;
        if !min_duration.is_finite() || min_duration < 0.0 {
            return Err(anyhow!("min_duration_secs must be a non-negative number, got {}", min_duration));
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the config at `path`, writing a default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
