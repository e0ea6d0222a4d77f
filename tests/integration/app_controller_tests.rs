/*!
 * End-to-end tests for the application controller
 */

use std::fs;
use std::io::Cursor;
use anyhow::Result;

use substream::app_config::{Config, WordCase};
use substream::app_controller::Controller;
use substream::errors::AppError;
use substream::file_utils::FileManager;
use substream::pipeline::NoopObserver;
use crate::common::{self, mock_backend::MockSpeechBackend, RecordingObserver};

#[test]
fn test_controller_withInvalidConfig_shouldFailToBuild() {
    let mut config = Config::default();
    config.segmenter.max_lines_per_cue = 0;
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_run_withWordLog_shouldWriteSrtFile() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let log = common::words_to_jsonl(&common::quick_brown_fox());
    let input = common::create_test_file(temp_dir.path(), "talk.jsonl", &log)?;
    let output = temp_dir.path().join("talk.srt");

    let controller = Controller::with_config(Config::default())?;
    let written = controller.run_with_observer(input.to_str().unwrap(), &output, &mut NoopObserver)?;

    assert_eq!(written, 1);
    assert_eq!(
        fs::read_to_string(&output)?,
        "1\n00:00:00,000 --> 00:00:01,300\nthe quick brown fox. \n\n"
    );
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldBackItUpFirst() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log = common::words_to_jsonl(&common::quick_brown_fox());
    let input = common::create_test_file(temp_dir.path(), "talk.jsonl", &log)?;
    let output = common::create_test_file(temp_dir.path(), "talk.srt", "previous run")?;

    let controller = Controller::with_config(Config::default())?;
    controller.run_with_observer(input.to_str().unwrap(), &output, &mut NoopObserver)?;

    let backups: Vec<_> = fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().ends_with(".bak"))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0])?, "previous run");
    assert!(fs::read_to_string(&output)?.starts_with("1\n"));
    Ok(())
}

#[test]
fn test_run_withUnknownInput_shouldFailWithoutCreatingOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("talk.srt");

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run_with_observer("does/not/exist.wav", &output, &mut NoopObserver);

    let error = result.unwrap_err();
    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::Input(_))));
    assert!(error.to_string().contains("not a file or valid gs:// uri"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_run_withAudioAndNoBackend_shouldReportMissingBackend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_file(temp_dir.path(), "talk.flac", "fLaC")?;
    let output = temp_dir.path().join("talk.srt");

    let controller = Controller::with_config(Config::default())?;
    let error = controller
        .run_with_observer(audio.to_str().unwrap(), &output, &mut NoopObserver)
        .unwrap_err();

    assert!(error.to_string().contains("No speech backend"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_run_withBackend_shouldTranscribeAndDumpWordLog() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("talk.srt");
    let backend = MockSpeechBackend::new(common::sample_words());
    let requests = backend.requests.clone();

    let controller = Controller::with_config(Config::default())?.with_backend(Box::new(backend));
    let mut observer = RecordingObserver::default();
    let written = controller.run_with_observer("gs://bucket/talk.flac", &output, &mut observer)?;

    assert_eq!(requests.borrow().as_slice(), ["gs://bucket/talk.flac".to_string()]);
    assert_eq!(observer.finished, Some(written));

    // The dumped log replays to the same subtitles
    let log_path = FileManager::word_log_path(&output);
    let replay_output = temp_dir.path().join("replay.srt");
    let replay_input = temp_dir.path().join("replay.jsonl");
    fs::copy(&log_path, &replay_input)?;
    let replayed = controller.run_with_observer(replay_input.to_str().unwrap(), &replay_output, &mut NoopObserver)?;

    assert_eq!(replayed, written);
    assert_eq!(fs::read_to_string(&output)?, fs::read_to_string(&replay_output)?);
    Ok(())
}

#[test]
fn test_run_withFailingBackend_shouldPropagateError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("talk.srt");

    let controller = Controller::with_config(Config::default())?.with_backend(Box::new(MockSpeechBackend::failing()));
    let result = controller.run_with_observer("gs://bucket/talk.flac", &output, &mut NoopObserver);

    assert!(result.is_err());
    assert!(!output.exists());
    assert!(!FileManager::word_log_path(&output).exists());
    Ok(())
}

#[test]
fn test_run_withFailingBackend_shouldLeaveExistingOutputInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = common::create_test_file(temp_dir.path(), "talk.srt", "previous run")?;

    let controller = Controller::with_config(Config::default())?.with_backend(Box::new(MockSpeechBackend::failing()));
    let result = controller.run_with_observer("gs://bucket/talk.flac", &output, &mut NoopObserver);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&output)?, "previous run");
    assert!(!FileManager::word_log_path(&output).exists());
    let names: Vec<String> = fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, ["talk.srt".to_string()]);
    Ok(())
}

#[test]
fn test_run_withBackendEmittingBadTiming_shouldAbort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("talk.srt");
    let mut backend = MockSpeechBackend::new(common::quick_brown_fox());
    backend.emit_invalid_word = true;

    let controller = Controller::with_config(Config::default())?.with_backend(Box::new(backend));
    let error = controller
        .run_with_observer("gs://bucket/talk.flac", &output, &mut NoopObserver)
        .unwrap_err();

    assert!(matches!(error.downcast_ref::<AppError>(), Some(AppError::WordSource(_))));
    Ok(())
}

#[test]
fn test_jsonl_to_srt_withUpperCase_shouldTransformCaptions() -> Result<()> {
    let mut config = Config::default();
    config.output.word_case = WordCase::Upper;
    let controller = Controller::with_config(config)?;

    let log = common::words_to_jsonl(&common::quick_brown_fox());
    let mut output = Vec::new();
    controller.jsonl_to_srt(Cursor::new(log), &mut output, &mut NoopObserver)?;

    assert!(String::from_utf8(output)?.contains("THE QUICK BROWN FOX. "));
    Ok(())
}

#[test]
fn test_jsonl_to_srt_withMalformedLog_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let result = controller.jsonl_to_srt(Cursor::new("not json\n"), Vec::new(), &mut NoopObserver);

    assert!(result.is_err());
    Ok(())
}
