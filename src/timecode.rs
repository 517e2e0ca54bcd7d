/*!
 * Timecode conversion between human-readable text and seconds.
 *
 * LLM responses and transcription output carry timestamps either as
 * `HH:MM:SS.mmm` / `MM:SS.mmm` strings or as plain numeric seconds.
 * This module converts both into seconds-as-f64 and renders seconds
 * back into `HH:MM:SS.mmm` text.
 */

use serde::{Deserialize, Serialize};

use crate::errors::TimecodeError;

/// A timestamp as it arrives at the boundary: either seconds or timecode text.
///
/// Scene payloads are not consistent about which representation they use,
/// so both deserialize transparently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Already expressed in seconds
    Seconds(f64),
    /// Timecode text such as "00:02:19.000" or "02:19"
    Text(String),
}

impl TimeValue {
    /// Convert to seconds. Numeric values pass through unchanged,
    /// text values go through [`parse`].
    pub fn to_seconds(&self) -> Result<f64, TimecodeError> {
        match self {
            TimeValue::Seconds(secs) => Ok(*secs),
            TimeValue::Text(text) => parse(text),
        }
    }
}

impl From<f64> for TimeValue {
    fn from(secs: f64) -> Self {
        TimeValue::Seconds(secs)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        TimeValue::Text(text.to_string())
    }
}

/// Parse a timecode string into seconds.
///
/// Accepts `H:MM:SS.mmm` (3 colon groups) or `MM:SS.mmm` (2 groups).
/// The last group may carry a fractional millisecond suffix after a `.`;
/// a missing suffix means 0 ms.
pub fn parse(text: &str) -> Result<f64, TimecodeError> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();

    let (hours, minutes, seconds_token) = match parts.as_slice() {
        [minutes, seconds] => (0u64, parse_group(minutes, trimmed)?, *seconds),
        [hours, minutes, seconds] => {
            (parse_group(hours, trimmed)?, parse_group(minutes, trimmed)?, *seconds)
        }
        _ => return Err(TimecodeError::Format(trimmed.to_string())),
    };

    let (seconds, millis) = match seconds_token.split_once('.') {
        Some((secs, frac)) => (parse_group(secs, trimmed)?, parse_group(frac, trimmed)?),
        None => (parse_group(seconds_token, trimmed)?, 0),
    };

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + millis as f64 / 1000.0)
}

/// Format seconds as `HH:MM:SS.mmm`, truncating to millisecond precision.
///
/// Negative input is clamped to 0 before formatting.
pub fn format(seconds: f64) -> String {
    let clamped = seconds.max(0.0);
    // The epsilon absorbs representation error in the product; without it
    // values like 5025.678 land one millisecond low.
    let total_ms = (clamped * 1000.0 + 1e-6).floor() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

fn parse_group(group: &str, original: &str) -> Result<u64, TimecodeError> {
    group
        .parse::<u64>()
        .map_err(|_| TimecodeError::Format(original.to_string()))
}
