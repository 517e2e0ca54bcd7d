/*!
 * Tests for trim-range resolution and subtitle track normalization
 */

use clipsift::errors::IntervalError;
use clipsift::intervals::{normalize_subtitle_track, resolve_trim_range, LabeledInterval};
use clipsift::timecode::TimeValue;
use crate::common::{interval, interval_text};

/// Test the bounding-box reduction over textual timecodes
#[test]
fn test_resolve_trim_range_withTextTimecodes_shouldSpanAllIntervals() {
    let intervals = vec![
        interval_text("00:00:10.000", "00:00:20.000", "first"),
        interval_text("00:00:05.000", "00:00:15.000", "second"),
    ];

    let range = resolve_trim_range(&intervals).unwrap();
    assert_eq!(range.start, 5.0);
    assert_eq!(range.end, 20.0);
    assert_eq!(range.duration(), 15.0);
}

/// Test that numeric and textual endpoints mix freely
#[test]
fn test_resolve_trim_range_withMixedRepresentations_shouldSpanAllIntervals() {
    let intervals = vec![
        interval(12.0, 30.0, "numeric"),
        interval_text("00:00:08.500", "00:00:25.000", "textual"),
    ];

    let range = resolve_trim_range(&intervals).unwrap();
    assert_eq!(range.start, 8.5);
    assert_eq!(range.end, 30.0);
}

/// Test that intervals missing an endpoint are skipped, not fatal
#[test]
fn test_resolve_trim_range_withMissingEndpoints_shouldSkipAndContinue() {
    crate::common::init_test_logging();
    let intervals = vec![
        LabeledInterval {
            start_time: Some(TimeValue::from("00:00:01.000")),
            end_time: None,
            text: "missing end".to_string(),
        },
        interval(5.0, 9.0, "valid"),
    ];

    let range = resolve_trim_range(&intervals).unwrap();
    assert_eq!(range.start, 5.0);
    assert_eq!(range.end, 9.0);
}

/// Test that unparseable endpoints are skipped, not fatal
#[test]
fn test_resolve_trim_range_withUnparseableEndpoints_shouldSkipAndContinue() {
    crate::common::init_test_logging();
    let intervals = vec![
        interval_text("garbage", "00:00:09.000", "bad start"),
        interval(2.0, 4.0, "valid"),
    ];

    let range = resolve_trim_range(&intervals).unwrap();
    assert_eq!(range.start, 2.0);
    assert_eq!(range.end, 4.0);
}

/// Test the empty-input error on an empty list
#[test]
fn test_resolve_trim_range_withEmptyList_shouldFailWithEmptyInput() {
    let result = resolve_trim_range(&[]);
    assert_eq!(result.unwrap_err(), IntervalError::EmptyInput);
}

/// Test the empty-input error when every interval is malformed
#[test]
fn test_resolve_trim_range_withAllMalformed_shouldFailWithEmptyInput() {
    let intervals = vec![
        LabeledInterval {
            start_time: None,
            end_time: Some(TimeValue::from(10.0)),
            text: "missing start".to_string(),
        },
        interval_text("not a time", "also not", "garbage"),
        interval_text("", "00:00:05.000", "blank start"),
    ];

    let result = resolve_trim_range(&intervals);
    assert_eq!(result.unwrap_err(), IntervalError::EmptyInput);
}

/// Test the invalid-range error when the aggregate span is inverted
#[test]
fn test_resolve_trim_range_withInvertedSpan_shouldFailWithInvalidRange() {
    let intervals = vec![interval(20.0, 10.0, "inverted")];

    match resolve_trim_range(&intervals) {
        Err(IntervalError::InvalidRange { start, end }) => {
            assert_eq!(start, 20.0);
            assert_eq!(end, 10.0);
        }
        other => panic!("Expected InvalidRange, got {:?}", other),
    }
}

/// Test that overlapping cues truncate the earlier one, not drop it
#[test]
fn test_normalize_withOverlappingCues_shouldTruncateEarlier() {
    let intervals = vec![
        interval(0.0, 5.0, "a"),
        interval(3.0, 8.0, "b"),
    ];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 2);
    assert_eq!((track[0].start, track[0].end), (0.0, 3.0));
    assert_eq!(track[0].text, "a");
    assert_eq!((track[1].start, track[1].end), (3.0, 8.0));
    assert_eq!(track[1].text, "b");
}

/// Test that a cue starting past the clip end is dropped entirely
#[test]
fn test_normalize_withCuePastClipEnd_shouldDropIt() {
    let intervals = vec![
        interval(2.0, 4.0, "inside"),
        interval(12.0, 15.0, "outside"),
    ];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].text, "inside");
}

/// Test that a zero-length cue is stretched to the minimum visible duration
#[test]
fn test_normalize_withZeroLengthCue_shouldStretchToMinimumDuration() {
    let intervals = vec![interval(4.0, 4.0, "blink")];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].start, 4.0);
    assert!((track[0].end - 4.2).abs() < 1e-9);
}

/// Test that the stretch is capped at the clip end
#[test]
fn test_normalize_withZeroLengthCueNearClipEnd_shouldStretchToClipEnd() {
    let intervals = vec![interval(9.9, 9.9, "late blink")];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].start, 9.9);
    assert_eq!(track[0].end, 10.0);
}

/// Test that an empty input produces an empty track without error
#[test]
fn test_normalize_withEmptyInput_shouldReturnEmptyTrack() {
    let track = normalize_subtitle_track(&[], 10.0, 0.0);
    assert!(track.is_empty());
}

/// Test offset auto-detection against original-timeline timestamps
#[test]
fn test_normalize_withOriginalTimelineTimestamps_shouldRebaseAtEarliestStart() {
    // Raw span 100..140 cannot fit a 30s clip, so the caller-supplied
    // offset of 0 must be overridden with 100.
    let intervals = vec![
        interval(100.0, 110.0, "opening"),
        interval(125.0, 140.0, "closing"),
    ];

    let track = normalize_subtitle_track(&intervals, 30.0, 0.0);
    assert_eq!(track.len(), 2);
    assert_eq!((track[0].start, track[0].end), (0.0, 10.0));
    assert_eq!(track[1].start, 25.0);
    assert_eq!(track[1].end, 30.0);
}

/// Test that the caller-supplied offset is used when the span fits the clip
#[test]
fn test_normalize_withFittingSpan_shouldUseCallerOffset() {
    let intervals = vec![interval(2.0, 4.0, "a")];

    let track = normalize_subtitle_track(&intervals, 10.0, 1.0);
    assert_eq!(track.len(), 1);
    assert_eq!((track[0].start, track[0].end), (1.0, 3.0));
}

/// Test that clamping to the clip start keeps a cue visible
#[test]
fn test_normalize_withNegativeShiftedStart_shouldClampToZero() {
    // Start lands before the clip after the offset is applied
    let intervals = vec![interval(3.0, 8.0, "a")];

    let track = normalize_subtitle_track(&intervals, 10.0, 5.0);
    assert_eq!(track.len(), 1);
    assert_eq!((track[0].start, track[0].end), (0.0, 3.0));
}

/// Test a stretched cue yielding to the one after it
#[test]
fn test_normalize_withStretchedCueOverlappingNext_shouldYieldToLater() {
    let intervals = vec![
        interval(0.0, 0.0, "stretched"),
        interval(0.1, 5.0, "next"),
    ];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 2);
    assert_eq!((track[0].start, track[0].end), (0.0, 0.1));
    assert_eq!((track[1].start, track[1].end), (0.1, 5.0));
}

/// Test that a cue fully shadowed by a same-start later cue is dropped
#[test]
fn test_normalize_withSameStartCues_shouldDropFullyShadowedCue() {
    let intervals = vec![
        interval(0.0, 5.0, "long"),
        interval(0.0, 3.0, "short"),
    ];

    // Sorted order puts the shorter cue first; yielding to the later cue
    // collapses it to nothing.
    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].text, "long");
    assert_eq!((track[0].start, track[0].end), (0.0, 5.0));
}

/// Test that cues missing endpoints are skipped while the rest normalize
#[test]
fn test_normalize_withMissingEndpoints_shouldSkipAndNormalizeRest() {
    let intervals = vec![
        LabeledInterval {
            start_time: None,
            end_time: Some(TimeValue::from(2.0)),
            text: "missing start".to_string(),
        },
        interval(1.0, 3.0, "valid"),
    ];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    assert_eq!(track.len(), 1);
    assert_eq!(track[0].text, "valid");
}

/// Test that the output is sorted by (start, end)
#[test]
fn test_normalize_withUnsortedInput_shouldSortByStartThenEnd() {
    let intervals = vec![
        interval(6.0, 8.0, "third"),
        interval(0.0, 2.0, "first"),
        interval(3.0, 5.0, "second"),
    ];

    let track = normalize_subtitle_track(&intervals, 10.0, 0.0);
    let texts: Vec<&str> = track.iter().map(|cue| cue.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}
