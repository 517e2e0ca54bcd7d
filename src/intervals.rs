/*!
 * Interval resolution over LLM-supplied scene timestamps.
 *
 * Scene extractors return time ranges that are frequently unreliable: they
 * may reference the original timeline instead of the trimmed one, overlap
 * each other, run past the clip end, or collapse to zero duration. This
 * module turns such a list into (a) a single trim range spanning all scenes
 * and (b) a clean, displayable subtitle track for a clip that starts at 0
 * after trimming.
 */

use serde::{Deserialize, Serialize};
use log::{warn, debug};

use crate::errors::IntervalError;
use crate::subtitle::SubtitleCue;
use crate::timecode::TimeValue;

/// Slack allowed before timestamps are considered to be on the original
/// (pre-trim) timeline rather than the clip's own.
const OFFSET_DETECTION_SLACK_SECS: f64 = 0.1;

/// Minimum visible duration a degenerate cue is stretched to.
const MIN_CUE_DURATION_SECS: f64 = 0.2;

/// A labeled time interval as proposed by the scene extractor.
///
/// Endpoints are optional and may be textual or numeric; malformed scenes
/// are tolerated here and filtered during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledInterval {
    /// Interval start, missing when the extractor dropped it
    #[serde(default, alias = "start")]
    pub start_time: Option<TimeValue>,

    /// Interval end, missing when the extractor dropped it
    #[serde(default, alias = "end")]
    pub end_time: Option<TimeValue>,

    /// Text spoken or shown during the interval
    #[serde(default)]
    pub text: String,
}

impl LabeledInterval {
    /// Create an interval from already-parsed endpoint values
    pub fn new(start: impl Into<TimeValue>, end: impl Into<TimeValue>, text: impl Into<String>) -> Self {
        LabeledInterval {
            start_time: Some(start.into()),
            end_time: Some(end.into()),
            text: text.into(),
        }
    }

    /// Parse both endpoints into seconds.
    ///
    /// Returns `None` when an endpoint is missing, blank, or unparseable;
    /// the caller decides whether that skips the interval or the operation.
    fn endpoints_seconds(&self) -> Option<(f64, f64)> {
        let start = Self::endpoint_seconds(self.start_time.as_ref())?;
        let end = Self::endpoint_seconds(self.end_time.as_ref())?;
        Some((start, end))
    }

    fn endpoint_seconds(value: Option<&TimeValue>) -> Option<f64> {
        let value = value?;
        if let TimeValue::Text(text) = value {
            if text.trim().is_empty() {
                return None;
            }
        }
        match value.to_seconds() {
            Ok(seconds) => Some(seconds),
            Err(e) => {
                warn!("Skipping unparseable timecode: {}", e);
                None
            }
        }
    }
}

/// The span used to cut a source clip down to its important portion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    /// Earliest interesting point in seconds
    pub start: f64,

    /// Latest interesting point in seconds
    pub end: f64,
}

impl TrimRange {
    /// Range duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Compute the single trim range spanning all supplied intervals.
///
/// Intervals missing a start or end value are skipped with a warning rather
/// than failing the whole operation. The result is a bounding-box reduction:
/// `start = min(starts)`, `end = max(ends)`. No merging or gap analysis is
/// attempted; the caller wants the full span from the earliest interesting
/// point to the latest.
pub fn resolve_trim_range(intervals: &[LabeledInterval]) -> Result<TrimRange, IntervalError> {
    let mut times = Vec::with_capacity(intervals.len());

    for interval in intervals {
        match interval.endpoints_seconds() {
            Some((start, end)) => {
                debug!(
                    "trim range item: start={:.3}s end={:.3}s text={:?}",
                    start, end, interval.text
                );
                times.push((start, end));
            }
            None => {
                warn!(
                    "trim range skip: missing time (start={:?}, end={:?})",
                    interval.start_time, interval.end_time
                );
            }
        }
    }

    if times.is_empty() {
        return Err(IntervalError::EmptyInput);
    }

    let start = times.iter().map(|(s, _)| *s).fold(f64::INFINITY, f64::min);
    let end = times.iter().map(|(_, e)| *e).fold(f64::NEG_INFINITY, f64::max);
    debug!(
        "trim range summary: start={:.3}s end={:.3}s items={}",
        start, end, times.len()
    );

    if end <= start {
        return Err(IntervalError::InvalidRange { start, end });
    }

    Ok(TrimRange { start, end })
}

/// Normalize scene intervals into a renderable subtitle track.
///
/// `clip_duration` is the duration of the trimmed clip; `offset_seconds` is
/// the trim start on the original timeline. The output is sorted by
/// `(start, end)`, mutually non-overlapping and bounded within
/// `[0, clip_duration]`. An empty input produces an empty track, which
/// callers treat as "nothing to render" rather than an error.
pub fn normalize_subtitle_track(
    intervals: &[LabeledInterval],
    clip_duration: f64,
    offset_seconds: f64,
) -> Vec<SubtitleCue> {
    let mut raw: Vec<(f64, f64, &str)> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match interval.endpoints_seconds() {
            Some((start, end)) => raw.push((start, end, interval.text.as_str())),
            None => warn!(
                "subtitle skip: missing time (start={:?}, end={:?})",
                interval.start_time, interval.end_time
            ),
        }
    }

    if raw.is_empty() {
        return Vec::new();
    }

    // Timestamps spanning more than the clip itself are still on the
    // original timeline; re-base them so the earliest scene lands at 0.
    let min_start = raw.iter().map(|(s, _, _)| *s).fold(f64::INFINITY, f64::min);
    let max_end = raw.iter().map(|(_, e, _)| *e).fold(f64::NEG_INFINITY, f64::max);
    let offset = if max_end - min_start > clip_duration + OFFSET_DETECTION_SLACK_SECS {
        debug!(
            "subtitle offset override: span {:.3}s exceeds clip {:.3}s, re-basing at {:.3}s",
            max_end - min_start, clip_duration, min_start
        );
        min_start
    } else {
        offset_seconds
    };

    let mut normalized: Vec<SubtitleCue> = Vec::with_capacity(raw.len());
    for (start, end, text) in raw {
        let start = (start - offset).max(0.0);
        let mut end = (end - offset).min(clip_duration).max(0.0);
        if end <= start {
            // Degenerate after clamping; stretch to a minimum visible
            // duration instead of dropping the cue outright.
            end = clip_duration.min(start + MIN_CUE_DURATION_SECS);
        }
        if end <= start {
            // Still degenerate: the cue starts at or past the clip end.
            continue;
        }
        normalized.push(SubtitleCue::new(start, end, text));
    }

    normalized.sort_by(|a, b| {
        a.start
            .total_cmp(&b.start)
            .then(a.end.total_cmp(&b.end))
    });

    // Earlier cues yield to later ones: clamp each end down to the next
    // start, never below the cue's own start.
    for idx in 0..normalized.len().saturating_sub(1) {
        let next_start = normalized[idx + 1].start;
        if normalized[idx].end > next_start {
            normalized[idx].end = next_start.max(normalized[idx].start);
        }
    }

    normalized.retain(|cue| cue.end > cue.start);
    normalized
}
