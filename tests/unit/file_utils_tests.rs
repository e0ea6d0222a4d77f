/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use substream::file_utils::{FileManager, InputKind};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_backup_path_shouldAppendTimestampAndBak() {
    let backup = FileManager::backup_path("/tmp/out/talk.srt", 1700000000);
    assert_eq!(backup, Path::new("/tmp/out/talk.srt.1700000000.bak"));
}

#[test]
fn test_word_log_path_shouldAppendJsonl() {
    assert_eq!(FileManager::word_log_path("/tmp/talk.srt"), Path::new("/tmp/talk.srt.jsonl"));
}

#[test]
fn test_backup_if_exists_withExistingFile_shouldMoveItAside() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "talk.srt", "old content")?;

    let backup = FileManager::backup_if_exists(&file)?.expect("backup should be created");

    assert!(!file.exists());
    assert_eq!(fs::read_to_string(&backup)?, "old content");
    let name = backup.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("talk.srt."));
    assert!(name.ends_with(".bak"));
    Ok(())
}

#[test]
fn test_backup_if_exists_withMissingFile_shouldDoNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::backup_if_exists(temp_dir.path().join("absent.srt"))?.is_none());
    Ok(())
}

#[test]
fn test_create_writer_withMissingParent_shouldCreateDirectories() -> Result<()> {
    use std::io::Write;

    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("dir").join("out.srt");
    {
        let mut writer = FileManager::create_writer(&path)?;
        write!(writer, "1\n")?;
    }
    assert_eq!(fs::read_to_string(&path)?, "1\n");
    Ok(())
}

#[test]
fn test_detect_input_kind_shouldClassifyInputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log = common::create_test_file(temp_dir.path(), "talk.JSONL", "")?;
    let audio = common::create_test_file(temp_dir.path(), "talk.flac", "")?;

    assert_eq!(FileManager::detect_input_kind(log.to_str().unwrap()), InputKind::WordLog);
    assert_eq!(FileManager::detect_input_kind(audio.to_str().unwrap()), InputKind::LocalAudio);
    assert_eq!(FileManager::detect_input_kind("gs://bucket/talk.flac"), InputKind::RemoteAudio);
    assert_eq!(FileManager::detect_input_kind("missing.jsonl"), InputKind::Unknown);
    Ok(())
}
