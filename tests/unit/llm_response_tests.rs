/*!
 * Tests for LLM response recovery and typed parsing
 */

use clipsift::errors::ProviderError;
use clipsift::llm::response::{
    extract_json_block, parse_scene_payload, parse_segment_payload, strip_code_fences,
};

/// Test stripping a fenced code block
#[test]
fn test_strip_code_fences_withJsonFence_shouldRemoveFences() {
    let fenced = "```json\n{\"important_scenes\": []}\n```";
    assert_eq!(strip_code_fences(fenced), "{\"important_scenes\": []}");
}

/// Test that unfenced text passes through unchanged
#[test]
fn test_strip_code_fences_withPlainText_shouldReturnTrimmed() {
    assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
}

/// Test extracting a JSON object out of surrounding prose
#[test]
fn test_extract_json_block_withSurroundingProse_shouldFindObject() {
    let prose = "Here are the scenes you asked for: {\"important_scenes\": []} hope it helps!";
    assert_eq!(extract_json_block(prose), Some("{\"important_scenes\": []}"));
}

/// Test extracting a JSON array out of surrounding prose
#[test]
fn test_extract_json_block_withArrayPayload_shouldFindArray() {
    let prose = "Sure! [1, 2, 3]";
    assert_eq!(extract_json_block(prose), Some("[1, 2, 3]"));
}

/// Test parsing a clean scene payload
#[test]
fn test_parse_scene_payload_withCleanJson_shouldReturnScenes() {
    let response = r#"{
        "important_scenes": [
            {"start_time": "00:00:10.000", "end_time": "00:00:20.000", "text": "moment"}
        ]
    }"#;

    let payload = parse_scene_payload(response).unwrap();
    assert_eq!(payload.important_scenes.len(), 1);

    let interval = payload.important_scenes[0].clone().into_interval();
    assert_eq!(interval.text, "moment");
    assert_eq!(interval.start_time.unwrap().to_seconds().unwrap(), 10.0);
    assert_eq!(interval.end_time.unwrap().to_seconds().unwrap(), 20.0);
}

/// Test parsing a fenced scene payload
#[test]
fn test_parse_scene_payload_withFencedJson_shouldRecover() {
    let response = "```json\n{\"important_scenes\": [{\"start_time\": \"00:00:01.000\", \"end_time\": \"00:00:02.000\", \"text\": \"x\"}]}\n```";

    let payload = parse_scene_payload(response).unwrap();
    assert_eq!(payload.important_scenes.len(), 1);
}

/// Test parsing a payload buried in prose
#[test]
fn test_parse_scene_payload_withProseAroundJson_shouldRecover() {
    let response = "Here you go:\n{\"important_scenes\": []}\nLet me know if you need more.";

    let payload = parse_scene_payload(response).unwrap();
    assert!(payload.important_scenes.is_empty());
}

/// Test the combined time_stamp fallback normalizes into explicit endpoints
#[test]
fn test_parse_scene_payload_withCombinedTimeStamp_shouldSplitEndpoints() {
    let response = r#"{
        "important_scenes": [
            {"time_stamp": "00:00:05.000 --> 00:00:09.000", "text": "combined"}
        ]
    }"#;

    let payload = parse_scene_payload(response).unwrap();
    let interval = payload.important_scenes[0].clone().into_interval();
    assert_eq!(interval.start_time.unwrap().to_seconds().unwrap(), 5.0);
    assert_eq!(interval.end_time.unwrap().to_seconds().unwrap(), 9.0);
}

/// Test numeric timestamps deserialize through the same payload
#[test]
fn test_parse_scene_payload_withNumericTimestamps_shouldAcceptThem() {
    let response = r#"{"important_scenes": [{"start_time": 3.5, "end_time": 8, "text": "numeric"}]}"#;

    let payload = parse_scene_payload(response).unwrap();
    let interval = payload.important_scenes[0].clone().into_interval();
    assert_eq!(interval.start_time.unwrap().to_seconds().unwrap(), 3.5);
    assert_eq!(interval.end_time.unwrap().to_seconds().unwrap(), 8.0);
}

/// Test parsing the documented object form of a translation payload
#[test]
fn test_parse_segment_payload_withObjectForm_shouldReturnSegments() {
    let response = r#"{"segments": [{"start_time": "00:00:01.000", "end_time": "00:00:02.000", "text": "hi"}]}"#;

    let segments = parse_segment_payload(response).unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "hi");
}

/// Test parsing a bare array where an object was asked for
#[test]
fn test_parse_segment_payload_withBareArray_shouldNormalize() {
    let response = r#"[{"start_time": "00:00:01.000", "end_time": "00:00:02.000", "text": "hi"}]"#;

    let segments = parse_segment_payload(response).unwrap();
    assert_eq!(segments.len(), 1);
}

/// Test that an object without a segments array is rejected
#[test]
fn test_parse_segment_payload_withMissingSegments_shouldFail() {
    let result = parse_segment_payload(r#"{"other": []}"#);
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

/// Test that an empty response is a parse error
#[test]
fn test_parse_scene_payload_withEmptyResponse_shouldFail() {
    assert!(matches!(
        parse_scene_payload(""),
        Err(ProviderError::ParseError(_))
    ));
    assert!(matches!(
        parse_scene_payload("   \n  "),
        Err(ProviderError::ParseError(_))
    ));
}

/// Test that non-JSON prose is a parse error
#[test]
fn test_parse_scene_payload_withPlainProse_shouldFail() {
    assert!(matches!(
        parse_scene_payload("I could not find any scenes worth keeping."),
        Err(ProviderError::ParseError(_))
    ));
}
