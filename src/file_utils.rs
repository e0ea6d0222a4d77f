use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Backup name `<file>.<unix_ts>.bak`
    pub fn backup_path<P: AsRef<Path>>(path: P, timestamp: i64) -> PathBuf {
        let mut name = path.as_ref().as_os_str().to_os_string();
        name.push(format!(".{}.bak", timestamp));
        PathBuf::from(name)
    }

    /// Rename an existing file out of the way, returning the backup path
    pub fn backup_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Ok(None);
        }

        let backup = Self::backup_path(path, Utc::now().timestamp());
        fs::rename(path, &backup)
            .with_context(|| format!("Failed to back up {:?} to {:?}", path, backup))?;
        info!("Backed up existing {:?} to {:?}", path, backup);
        Ok(Some(backup))
    }

    // @generates: Word log path written next to the subtitle output
    pub fn word_log_path<P: AsRef<Path>>(srt_path: P) -> PathBuf {
        let mut name = srt_path.as_ref().as_os_str().to_os_string();
        name.push(".jsonl");
        PathBuf::from(name)
    }

    /// Open a file for buffered reading
    pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;
        Ok(BufReader::new(file))
    }

    /// Create (or truncate) a file for buffered writing, creating parent directories
    pub fn create_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;
        Ok(BufWriter::new(file))
    }

    /// Classify a command line input
    pub fn detect_input_kind(input: &str) -> InputKind {
        if input.starts_with("gs://") {
            return InputKind::RemoteAudio;
        }

        let path = Path::new(input);
        if !Self::file_exists(path) {
            return InputKind::Unknown;
        }

        let is_word_log = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("jsonl"));
        if is_word_log {
            InputKind::WordLog
        } else {
            InputKind::LocalAudio
        }
    }
}

/// Enum representing the inputs the front end accepts
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputKind {
    /// Word-timing dump (.jsonl) replayed without the speech backend
    WordLog,
    /// Audio file on the local filesystem
    LocalAudio,
    /// Audio already in remote storage (gs:// uri)
    RemoteAudio,
    /// Neither an existing file nor a gs:// uri
    Unknown,
}
