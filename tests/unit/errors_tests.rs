/*!
 * Tests for error types and conversions
 */

use substream::errors::{AppError, SubtitleError, WordSourceError};

#[test]
fn test_wordSourceError_invalidTiming_shouldDisplayWordAndTimes() {
    let error = WordSourceError::InvalidTiming {
        word: "late".to_string(),
        start_time: 2.0,
        end_time: 1.0,
    };
    let display = format!("{}", error);
    assert!(display.contains("late"));
    assert!(display.contains("2s"));
    assert!(display.contains("1s"));
}

#[test]
fn test_wordSourceError_parse_shouldDisplayLineNumber() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = WordSourceError::Parse { line: 7, source };
    assert!(format!("{}", error).contains("line 7"));
}

#[test]
fn test_wordSourceError_outOfOrder_shouldDisplayBothStarts() {
    let error = WordSourceError::OutOfOrder {
        word: "back".to_string(),
        start_time: 0.5,
        previous_start: 1.5,
    };
    let display = format!("{}", error);
    assert!(display.contains("0.5"));
    assert!(display.contains("1.5"));
}

#[test]
fn test_subtitleError_emptyCue_shouldDisplayCorrectly() {
    let display = format!("{}", SubtitleError::EmptyCue);
    assert!(display.contains("at least one word"));
}

#[test]
fn test_appError_fromWordSourceError_shouldWrapCorrectly() {
    let error = WordSourceError::EmptyText { start_time: 1.0 };
    let app_error: AppError = error.into();
    match app_error {
        AppError::WordSource(_) => {}
        _ => panic!("Expected AppError::WordSource"),
    }
}

#[test]
fn test_appError_fromSubtitleError_shouldWrapCorrectly() {
    let app_error: AppError = SubtitleError::EmptyCue.into();
    assert!(matches!(app_error, AppError::Subtitle(SubtitleError::EmptyCue)));
}

#[test]
fn test_appError_fromIoError_shouldConvertToFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.srt");
    let app_error: AppError = io_error.into();
    match app_error {
        AppError::File(message) => assert!(message.contains("missing.srt")),
        _ => panic!("Expected AppError::File"),
    }
}

#[test]
fn test_appError_fromAnyhow_shouldConvertToUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref m) if m == "something odd"));
}
