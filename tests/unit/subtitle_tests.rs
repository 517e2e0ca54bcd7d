/*!
 * Tests for subtitle cue and track handling
 */

use std::fmt::Write;
use clipsift::subtitle::{format_cue_text, SubtitleCue, SubtitleTrack};
use crate::common;

/// Test SRT timestamp formatting
#[test]
fn test_srt_timestamp_withValidSeconds_shouldFormatWithComma() {
    assert_eq!(SubtitleCue::srt_timestamp(0.0), "00:00:00,000");
    assert_eq!(SubtitleCue::srt_timestamp(61.234), "00:01:01,234");
    assert_eq!(SubtitleCue::srt_timestamp(5025.678), "01:23:45,678");
}

/// Test SRT timestamp clamping of negative input
#[test]
fn test_srt_timestamp_withNegativeSeconds_shouldClampToZero() {
    assert_eq!(SubtitleCue::srt_timestamp(-3.0), "00:00:00,000");
}

/// Test cue display formatting
#[test]
fn test_cue_display_withValidCue_shouldFormatCorrectly() {
    let cue = SubtitleCue::new(5.0, 10.0, "Test cue");
    let mut output = String::new();
    write!(output, "{}", cue).unwrap();

    assert!(output.contains("00:00:05,000 --> 00:00:10,000"));
    assert!(output.contains("Test cue"));
}

/// Test cue duration
#[test]
fn test_cue_duration_withValidCue_shouldReturnDifference() {
    let cue = SubtitleCue::new(1.5, 4.0, "x");
    assert!((cue.duration() - 2.5).abs() < 1e-9);
}

/// Test SRT rendering numbers cues sequentially
#[test]
fn test_to_srt_string_withMultipleCues_shouldNumberSequentially() {
    let track = SubtitleTrack::new(vec![
        SubtitleCue::new(0.0, 2.0, "First cue"),
        SubtitleCue::new(2.0, 4.0, "Second cue"),
    ]);

    let srt = track.to_srt_string();
    let lines: Vec<&str> = srt.lines().collect();
    assert_eq!(lines[0], "1");
    assert_eq!(lines[1], "00:00:00,000 --> 00:00:02,000");
    assert_eq!(lines[2], "First cue");
    assert!(srt.contains("\n2\n"));
    assert!(srt.contains("Second cue"));
}

/// Test writing a track to an SRT file
#[test]
fn test_write_to_srt_withValidTrack_shouldWriteFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("out").join("track.srt");

    let track = SubtitleTrack::new(vec![SubtitleCue::new(0.0, 1.0, "hello")]);
    let written = track.write_to_srt(&path).unwrap();

    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.starts_with("1\n00:00:00,000 --> 00:00:01,000\nhello"));
}

/// Test validation accepts ordered, adjacent cues
#[test]
fn test_validate_withAdjacentCues_shouldPass() {
    let track = SubtitleTrack::new(vec![
        SubtitleCue::new(0.0, 3.0, "a"),
        SubtitleCue::new(3.0, 8.0, "b"),
    ]);
    assert!(track.validate().is_ok());
}

/// Test validation rejects overlapping cues
#[test]
fn test_validate_withOverlappingCues_shouldFail() {
    let track = SubtitleTrack::new(vec![
        SubtitleCue::new(0.0, 5.0, "a"),
        SubtitleCue::new(3.0, 8.0, "b"),
    ]);
    assert!(track.validate().is_err());
}

/// Test validation rejects out-of-order cues
#[test]
fn test_validate_withUnorderedCues_shouldFail() {
    let track = SubtitleTrack::new(vec![
        SubtitleCue::new(5.0, 6.0, "late"),
        SubtitleCue::new(0.0, 1.0, "early"),
    ]);
    assert!(track.validate().is_err());
}

/// Test validation rejects degenerate cues
#[test]
fn test_validate_withDegenerateCue_shouldFail() {
    let track = SubtitleTrack::new(vec![SubtitleCue::new(2.0, 2.0, "empty")]);
    assert!(track.validate().is_err());
}

/// Test the line break lands after the second break character
#[test]
fn test_format_cue_text_withTwoBreakChars_shouldInsertLineBreak() {
    let text = "まず一つ、次に二つ、最後に三つ";
    let formatted = format_cue_text(text, '、');
    assert_eq!(formatted, "まず一つ、次に二つ、\n最後に三つ");
}

/// Test text with fewer than two break characters is unchanged
#[test]
fn test_format_cue_text_withFewerThanTwoBreakChars_shouldReturnUnchanged() {
    assert_eq!(format_cue_text("一つだけ、です", '、'), "一つだけ、です");
    assert_eq!(format_cue_text("no break chars at all", '、'), "no break chars at all");
}

/// Test the break character is configurable
#[test]
fn test_format_cue_text_withAsciiBreakChar_shouldInsertLineBreak() {
    assert_eq!(
        format_cue_text("one, two, three, four", ','),
        "one, two,\n three, four"
    );
}

/// Test that only the second occurrence triggers the break
#[test]
fn test_format_cue_text_withManyBreakChars_shouldBreakOnlyOnce() {
    let formatted = format_cue_text("a、b、c、d、e", '、');
    assert_eq!(formatted, "a、b、\nc、d、e");
    assert_eq!(formatted.matches('\n').count(), 1);
}
