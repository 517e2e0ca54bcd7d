/*!
 * Common test utilities for the clipsift test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use clipsift::intervals::LabeledInterval;

/// Initialize logging for tests that assert on skip-and-warn behavior;
/// safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a labeled interval from numeric endpoints
pub fn interval(start: f64, end: f64, text: &str) -> LabeledInterval {
    LabeledInterval::new(start, end, text)
}

/// Builds a labeled interval from timecode text endpoints
pub fn interval_text(start: &str, end: &str, text: &str) -> LabeledInterval {
    LabeledInterval::new(start, end, text)
}

/// A scene extraction response the way a well-behaved model writes it
pub fn scene_response_json() -> String {
    r#"{
        "important_scenes": [
            {"start_time": "00:00:10.000", "end_time": "00:00:20.000", "text": "the first key moment"},
            {"start_time": "00:00:05.000", "end_time": "00:00:15.000", "text": "an earlier aside"}
        ]
    }"#
    .to_string()
}

/// A segment translation response carrying the same timing back
pub fn translated_response_json() -> String {
    r#"{
        "segments": [
            {"start_time": "00:00:10.000", "end_time": "00:00:20.000", "text": "translated first"},
            {"start_time": "00:00:05.000", "end_time": "00:00:15.000", "text": "translated second"}
        ]
    }"#
    .to_string()
}
