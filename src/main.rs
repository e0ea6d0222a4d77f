// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use substream::app_config::{self, Config, WordCase};
use substream::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for WordCase to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliWordCase {
    Normal,
    Upper,
    Lower,
}

impl From<CliWordCase> for WordCase {
    fn from(cli_case: CliWordCase) -> Self {
        match cli_case {
            CliWordCase::Normal => WordCase::Normal,
            CliWordCase::Upper => WordCase::Upper,
            CliWordCase::Lower => WordCase::Lower,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for substream
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// substream - word timings to SubRip captions
#[derive(Parser, Debug)]
#[command(name = "substream")]
#[command(version)]
#[command(about = "Transcribes an audio file or .jsonl word log to .srt")]
#[command(long_about = "Transcribes an audio file or .jsonl word log to .srt.

EXAMPLES:
    substream -i talk.srt.jsonl -o talk.srt      # Replay a word log
    substream -i talk.jsonl -o talk.srt -w upper # Upper-case captions
    substream -i talk.jsonl -o talk.srt --max-line-length 42 --max-lines 1
    substream completions bash > substream.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

An existing output file is renamed to <output>.<unix_ts>.bak before writing.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Mono audio file, gs:// uri to an audio file, or intermediate .jsonl word log
    #[arg(short, long, value_name = "INPUT")]
    input: Option<String>,

    /// .srt filename
    #[arg(short, long, value_name = "SRT_FILE")]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: PathBuf,

    /// Maximum characters per caption line
    #[arg(long)]
    max_line_length: Option<usize>,

    /// Maximum lines per caption
    #[arg(long)]
    max_lines: Option<usize>,

    /// Minimum caption duration in seconds
    #[arg(long)]
    min_duration: Option<f64>,

    /// Type case of the captions
    #[arg(short, long, value_enum)]
    word_case: Option<CliWordCase>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Extra logging (same as --log-level debug)
    #[arg(short, long)]
    verbose: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with the most verbose level; the effective
    // level is set through log::set_max_level once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "substream", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Effective configuration: {:?}", config);

    let input = cli.input.context("--input is required")?;
    let output = cli.output.context("--output is required")?;

    let controller = Controller::with_config(config)?;
    let written = controller.run(&input, &output)?;
    info!("Wrote {} subtitle(s) to {:?}", written, output);

    Ok(())
}

// @loads: Config file, then CLI overrides on top
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(max_line_length) = cli.max_line_length {
        config.segmenter.max_line_length = max_line_length;
    }

    if let Some(max_lines) = cli.max_lines {
        config.segmenter.max_lines_per_cue = max_lines;
    }

    if let Some(min_duration) = cli.min_duration {
        config.timing.min_duration_secs = min_duration;
    }

    if let Some(word_case) = &cli.word_case {
        config.output.word_case = word_case.clone().into();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else if cli.verbose {
        config.log_level = app_config::LogLevel::Debug;
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
