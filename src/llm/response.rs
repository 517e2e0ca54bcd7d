/*!
 * Recovery and typed parsing of LLM JSON output.
 *
 * Models wrap JSON in code fences, prepend prose, or return a bare array
 * where an object was asked for. The helpers here peel those layers off
 * before handing the payload to serde.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use log::warn;

use crate::errors::ProviderError;
use crate::intervals::LabeledInterval;
use crate::timecode::TimeValue;

// @const: First {...} or [...] block in a prose response
static JSON_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[\s\S]*\}|\[[\s\S]*\]").unwrap()
});

/// Scene extraction payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenePayload {
    /// Scenes the extractor considered important
    #[serde(default)]
    pub important_scenes: Vec<RawSegment>,
}

/// A segment as the LLM actually writes it.
///
/// Besides the documented `start_time`/`end_time` fields, some responses
/// come back with a combined `time_stamp` ("start --> end") instead; both
/// layouts normalize into a [`LabeledInterval`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    /// Segment start
    #[serde(default)]
    pub start_time: Option<TimeValue>,

    /// Segment end
    #[serde(default)]
    pub end_time: Option<TimeValue>,

    /// Combined "start --> end" timestamp fallback
    #[serde(default)]
    pub time_stamp: Option<String>,

    /// Segment text
    #[serde(default)]
    pub text: String,
}

impl RawSegment {
    /// Normalize into a labeled interval, splitting the combined
    /// `time_stamp` form when the explicit fields are absent
    pub fn into_interval(self) -> LabeledInterval {
        let (mut start_time, mut end_time) = (self.start_time, self.end_time);

        if start_time.is_none() || end_time.is_none() {
            if let Some((start, end)) = self.time_stamp.as_deref().and_then(split_time_stamp) {
                start_time = Some(TimeValue::Text(start));
                end_time = Some(TimeValue::Text(end));
            }
        }

        LabeledInterval {
            start_time,
            end_time,
            text: self.text,
        }
    }
}

/// Split a combined "start --> end" timestamp
fn split_time_stamp(time_stamp: &str) -> Option<(String, String)> {
    let (start, end) = time_stamp.split_once(" --> ")?;
    Some((start.trim().to_string(), end.trim().to_string()))
}

/// Strip surrounding markdown code fences from a response
pub fn strip_code_fences(text: &str) -> String {
    let stripped = text.trim();
    if !stripped.starts_with("```") {
        return stripped.to_string();
    }

    let mut lines: Vec<&str> = stripped.lines().collect();
    if lines.first().is_some_and(|line| line.starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.starts_with("```")) {
        lines.pop();
    }
    lines.join("\n")
}

/// Extract the first JSON object or array block from a prose response
pub fn extract_json_block(text: &str) -> Option<&str> {
    JSON_BLOCK_REGEX.find(text).map(|m| m.as_str())
}

/// Parse an LLM response into a JSON value, recovering from code fences
/// and surrounding prose
pub fn parse_json_value(response: &str) -> Result<Value, ProviderError> {
    let stripped = strip_code_fences(response);
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Err(ProviderError::ParseError("LLM response is empty".to_string()));
    }

    if let Ok(value) = serde_json::from_str::<Value>(stripped) {
        return Ok(value);
    }

    if let Some(block) = extract_json_block(stripped) {
        if let Ok(value) = serde_json::from_str::<Value>(block) {
            return Ok(value);
        }
    }

    let preview: String = stripped.chars().take(200).collect();
    warn!("LLM response is not valid JSON: {}", preview);
    Err(ProviderError::ParseError("LLM response is not valid JSON".to_string()))
}

/// Parse a scene extraction response into its payload
pub fn parse_scene_payload(response: &str) -> Result<ScenePayload, ProviderError> {
    let value = parse_json_value(response)?;
    serde_json::from_value(value)
        .map_err(|e| ProviderError::ParseError(format!("Unexpected scene payload: {}", e)))
}

/// Parse a segment translation response into intervals.
///
/// Accepts both the documented `{"segments": [...]}` object and a bare
/// segment array.
pub fn parse_segment_payload(response: &str) -> Result<Vec<LabeledInterval>, ProviderError> {
    let value = parse_json_value(response)?;

    let segments_value = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("segments")
            .ok_or_else(|| ProviderError::ParseError(
                "Translation payload has no segments array".to_string()
            ))?,
        other => {
            return Err(ProviderError::ParseError(
                format!("Unexpected translation payload type: {}", type_name(&other))
            ));
        }
    };

    let raw: Vec<RawSegment> = serde_json::from_value(segments_value)
        .map_err(|e| ProviderError::ParseError(format!("Unexpected segment payload: {}", e)))?;

    Ok(raw.into_iter().map(RawSegment::into_interval).collect())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
